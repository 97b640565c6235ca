//! State machine for the capture / upload / process workflows.
//!
//! Each workflow kind is a single-flight operation: one request may be
//! outstanding at a time, and a second trigger while one is in flight is a
//! rejected no-op. The machine also owns the active image handle, which is
//! the precondition for processing. Every transition is plain data so the
//! whole thing is testable without a network or a DOM.

/// The three user-triggered request/response workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowKind {
    Capture,
    Upload,
    Process,
}

impl WorkflowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowKind::Capture => "capture",
            WorkflowKind::Upload => "upload",
            WorkflowKind::Process => "process",
        }
    }
}

/// In-flight state of one workflow kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlightState {
    #[default]
    Idle,
    Requesting,
}

/// Why a trigger was rejected locally, before any request was sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowRejection {
    #[error("a {} request is already in flight", .0.as_str())]
    AlreadyInFlight(WorkflowKind),
    /// Processing needs an image handle from a prior capture or upload.
    #[error("no image to process; capture or upload a frame first")]
    NoActiveImage,
}

#[derive(Debug, Default)]
pub struct CaptureWorkflow {
    capture: FlightState,
    upload: FlightState,
    process: FlightState,
    image_uuid: Option<String>,
}

impl CaptureWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, kind: WorkflowKind) -> &mut FlightState {
        match kind {
            WorkflowKind::Capture => &mut self.capture,
            WorkflowKind::Upload => &mut self.upload,
            WorkflowKind::Process => &mut self.process,
        }
    }

    pub fn state(&self, kind: WorkflowKind) -> FlightState {
        match kind {
            WorkflowKind::Capture => self.capture,
            WorkflowKind::Upload => self.upload,
            WorkflowKind::Process => self.process,
        }
    }

    pub fn is_busy(&self, kind: WorkflowKind) -> bool {
        self.state(kind) == FlightState::Requesting
    }

    /// True while any workflow has a request outstanding; drives the busy
    /// indicator over the active result panel.
    pub fn any_busy(&self) -> bool {
        [self.capture, self.upload, self.process]
            .iter()
            .any(|s| *s == FlightState::Requesting)
    }

    /// Attempt the `Idle -> Requesting` transition for `kind`.
    ///
    /// Rejections leave the machine unchanged: a kind already in flight
    /// stays in flight, and a process trigger without an image handle stays
    /// `Idle` with no request issued.
    pub fn try_begin(&mut self, kind: WorkflowKind) -> Result<(), WorkflowRejection> {
        if kind == WorkflowKind::Process && self.image_uuid.is_none() {
            return Err(WorkflowRejection::NoActiveImage);
        }
        let slot = self.slot(kind);
        if *slot == FlightState::Requesting {
            return Err(WorkflowRejection::AlreadyInFlight(kind));
        }
        *slot = FlightState::Requesting;
        Ok(())
    }

    /// `Requesting -> Idle`, on completion of either outcome. The caller
    /// renders the result or the failure; the machine only tracks flight.
    pub fn finish(&mut self, kind: WorkflowKind) {
        *self.slot(kind) = FlightState::Idle;
    }

    /// Record the image handle issued by a successful capture or upload.
    pub fn set_image(&mut self, uuid: String) {
        self.image_uuid = Some(uuid);
    }

    pub fn image_uuid(&self) -> Option<&str> {
        self.image_uuid.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_trigger_while_requesting_is_rejected() {
        let mut wf = CaptureWorkflow::new();
        assert!(wf.try_begin(WorkflowKind::Capture).is_ok());
        assert_eq!(
            wf.try_begin(WorkflowKind::Capture),
            Err(WorkflowRejection::AlreadyInFlight(WorkflowKind::Capture))
        );
        // Still exactly one outstanding request.
        assert_eq!(wf.state(WorkflowKind::Capture), FlightState::Requesting);
    }

    #[test]
    fn process_without_image_is_rejected_and_stays_idle() {
        let mut wf = CaptureWorkflow::new();
        assert_eq!(
            wf.try_begin(WorkflowKind::Process),
            Err(WorkflowRejection::NoActiveImage)
        );
        assert_eq!(wf.state(WorkflowKind::Process), FlightState::Idle);
        assert!(!wf.any_busy());
    }

    #[test]
    fn capture_enables_processing() {
        let mut wf = CaptureWorkflow::new();
        assert!(wf.try_begin(WorkflowKind::Capture).is_ok());
        wf.set_image("b1946ac9.jpg".to_string());
        wf.finish(WorkflowKind::Capture);

        assert!(wf.try_begin(WorkflowKind::Process).is_ok());
        assert_eq!(wf.image_uuid(), Some("b1946ac9.jpg"));
    }

    #[test]
    fn finish_returns_to_idle_regardless_of_outcome() {
        let mut wf = CaptureWorkflow::new();
        wf.try_begin(WorkflowKind::Upload).unwrap();
        assert!(wf.any_busy());
        wf.finish(WorkflowKind::Upload);
        assert_eq!(wf.state(WorkflowKind::Upload), FlightState::Idle);
        assert!(!wf.any_busy());
    }

    #[test]
    fn kinds_are_independent() {
        let mut wf = CaptureWorkflow::new();
        wf.set_image("a.jpg".to_string());
        wf.try_begin(WorkflowKind::Capture).unwrap();
        // A capture in flight does not block a process trigger.
        assert!(wf.try_begin(WorkflowKind::Process).is_ok());
        assert!(wf.any_busy());
    }

    #[test]
    fn upload_replaces_the_active_handle() {
        let mut wf = CaptureWorkflow::new();
        wf.set_image("old.jpg".to_string());
        wf.try_begin(WorkflowKind::Upload).unwrap();
        wf.set_image("new.png".to_string());
        wf.finish(WorkflowKind::Upload);
        assert_eq!(wf.image_uuid(), Some("new.png"));
    }
}
