use std::time::Duration;

use tokio::task::JoinHandle;

/// Owns at most one pending timer task.
///
/// Scheduling a new expiry aborts the previous one before arming the next.
#[derive(Debug, Default)]
pub struct ExpiryTimer {
    pending: Option<JoinHandle<()>>,
}

impl ExpiryTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `on_expire` after `after`, cancelling whatever was pending.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, after: Duration, on_expire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(after).await;
            on_expire();
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for ExpiryTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
