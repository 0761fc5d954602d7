pub type RequestId = u64;

/// Lifecycle of the single batch submission.
///
/// The terminal `Succeeded`/`Failed` states are reported through
/// [`TransferOutcome`]; the controller resets to `Idle` as soon as a request
/// settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferPhase {
    #[default]
    Idle,
    /// Batch is being packaged for upload.
    Preparing,
    /// Upload issued, waiting for the server.
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Succeeded,
    Failed,
}

/// Single-flight guard around the submission request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransferController {
    phase: TransferPhase,
    in_flight: Option<RequestId>,
    last_outcome: Option<TransferOutcome>,
}

impl TransferController {
    pub fn phase(&self) -> TransferPhase {
        self.phase
    }

    pub fn last_outcome(&self) -> Option<TransferOutcome> {
        self.last_outcome
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn is_idle(&self) -> bool {
        self.phase == TransferPhase::Idle
    }

    /// Idle -> Preparing. Returns false (and changes nothing) when busy.
    pub fn begin(&mut self, request: RequestId) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.phase = TransferPhase::Preparing;
        self.in_flight = Some(request);
        self.last_outcome = None;
        true
    }

    /// Preparing -> Submitting once the upload has been issued.
    pub fn mark_submitting(&mut self, request: RequestId) -> bool {
        if self.in_flight != Some(request) || self.phase != TransferPhase::Preparing {
            return false;
        }
        self.phase = TransferPhase::Submitting;
        true
    }

    /// Records the outcome of `request` and returns to Idle.
    ///
    /// Completions for anything but the in-flight request are ignored.
    pub fn settle(&mut self, request: RequestId, outcome: TransferOutcome) -> bool {
        if self.in_flight != Some(request) {
            return false;
        }
        self.phase = TransferPhase::Idle;
        self.in_flight = None;
        self.last_outcome = Some(outcome);
        true
    }
}
