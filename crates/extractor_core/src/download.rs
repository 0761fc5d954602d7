use crate::RequestId;

/// Fixed filename the artifact is saved under.
pub const ARTIFACT_FILENAME: &str = "extracted_data.xlsx";

/// Gate and busy flag for retrieving the produced artifact.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadController {
    available: bool,
    in_flight: Option<RequestId>,
}

impl DownloadController {
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.available && !self.is_busy()
    }

    /// Set once a submission succeeds. Never cleared.
    pub fn make_available(&mut self) {
        self.available = true;
    }

    pub fn begin(&mut self, request: RequestId) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.in_flight = Some(request);
        true
    }

    /// Clears the busy flag for `request` whatever the outcome was.
    pub fn finish(&mut self, request: RequestId) -> bool {
        if self.in_flight != Some(request) {
            return false;
        }
        self.in_flight = None;
        true
    }
}

/// Busy flag for the server storage cleanup request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CleanupController {
    in_flight: Option<RequestId>,
}

impl CleanupController {
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn begin(&mut self, request: RequestId) -> bool {
        if self.is_busy() {
            return false;
        }
        self.in_flight = Some(request);
        true
    }

    pub fn finish(&mut self, request: RequestId) -> bool {
        if self.in_flight != Some(request) {
            return false;
        }
        self.in_flight = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_until_available() {
        let mut download = DownloadController::default();
        assert!(!download.begin(1));
        download.make_available();
        assert!(download.begin(1));
        assert!(!download.is_enabled());
        assert!(!download.begin(2));
    }

    #[test]
    fn finish_keeps_availability() {
        let mut download = DownloadController::default();
        download.make_available();
        download.begin(7);
        assert!(!download.finish(6));
        assert!(download.finish(7));
        assert!(download.is_available());
        assert!(download.is_enabled());
    }

    #[test]
    fn cleanup_is_single_flight() {
        let mut cleanup = CleanupController::default();
        assert!(cleanup.begin(1));
        assert!(!cleanup.begin(2));
        assert!(cleanup.finish(1));
        assert!(cleanup.begin(3));
    }
}
