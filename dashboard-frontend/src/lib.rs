pub mod burst_panel;
pub mod charts;
pub mod components;
pub mod dashboard_app;
pub mod report_log;

pub use dashboard_app::DashboardApp;
