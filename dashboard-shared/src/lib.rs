//! Shared types and logic for the star-tracker camera dashboard.
//!
//! Everything here is DOM-free and WASM-compatible: the wire types for the
//! camera server API, the HTTP client, the telemetry reshaping pipeline,
//! the typed processing report, and the capture workflow state machine.
//! The frontend crate only renders what these modules decide.

pub mod client;
pub mod report;
pub mod telemetry;
pub mod types;
pub mod workflow;

pub use client::{CameraServerClient, DashboardError};
pub use report::{evaluate_results, ProcessOutcome, ReportEntry, ResultPanel, Severity};
pub use telemetry::{histogram_dataset, reshape, ChartDataset, MetricSample, TelemetryError};
pub use types::{
    Burst, BurstAck, BurstFormat, CameraParams, FrameResponse, ProcessOptions, ProcessResponse,
    ProcessResults, ReportSection,
};
pub use workflow::{CaptureWorkflow, FlightState, WorkflowKind, WorkflowRejection};
