use std::sync::Arc;
use std::time::Duration;

use extractor_logging::{extractor_debug, extractor_trace};
use tokio::sync::mpsc;

use crate::expiry::ExpiryTimer;
use crate::service::{ChannelProgressSink, ConversionService, ReqwestService, ServiceSettings};
use crate::{EngineEvent, NotificationId, RequestId, ServiceError, UploadFile};

enum EngineCommand {
    Call(ServiceCall),
    ScheduleExpiry { id: NotificationId, after: Duration },
}

enum ServiceCall {
    Submit {
        request: RequestId,
        files: Vec<UploadFile>,
    },
    Download {
        request: RequestId,
    },
    Cleanup {
        request: RequestId,
    },
}

/// Command/event channel pair in front of the conversion service.
///
/// Requests run as independent tasks; their results come back through
/// [`EngineHandle::recv`] in completion order.
pub struct EngineHandle {
    cmd_tx: mpsc::UnboundedSender<EngineCommand>,
    event_rx: mpsc::UnboundedReceiver<EngineEvent>,
}

impl EngineHandle {
    /// Must be called from within a tokio runtime.
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let service = ReqwestService::new(settings)?;
        Ok(Self::with_service(Arc::new(service)))
    }

    /// Must be called from within a tokio runtime.
    pub fn with_service(service: Arc<dyn ConversionService>) -> Self {
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut timer = ExpiryTimer::new();
            while let Some(command) = cmd_rx.recv().await {
                match command {
                    EngineCommand::ScheduleExpiry { id, after } => {
                        extractor_trace!("arming notification expiry id={} after={:?}", id, after);
                        let tx = event_tx.clone();
                        timer.schedule(after, move || {
                            let _ = tx.send(EngineEvent::NotificationExpired { id });
                        });
                    }
                    EngineCommand::Call(call) => {
                        let service = service.clone();
                        let event_tx = event_tx.clone();
                        tokio::spawn(async move {
                            handle_call(service.as_ref(), call, event_tx).await;
                        });
                    }
                }
            }
            extractor_debug!("engine command channel closed");
        });

        Self { cmd_tx, event_rx }
    }

    pub fn submit(&self, request: RequestId, files: Vec<UploadFile>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Call(ServiceCall::Submit { request, files }));
    }

    pub fn download(&self, request: RequestId) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Call(ServiceCall::Download { request }));
    }

    pub fn cleanup(&self, request: RequestId) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Call(ServiceCall::Cleanup { request }));
    }

    /// Replaces any pending notification expiry.
    pub fn schedule_expiry(&self, id: NotificationId, after: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::ScheduleExpiry { id, after });
    }

    pub async fn recv(&mut self) -> Option<EngineEvent> {
        self.event_rx.recv().await
    }
}

async fn handle_call(
    service: &dyn ConversionService,
    call: ServiceCall,
    event_tx: mpsc::UnboundedSender<EngineEvent>,
) {
    let event = match call {
        ServiceCall::Submit { request, files } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = service.process(request, &files, &sink).await;
            EngineEvent::SubmitCompleted { request, result }
        }
        ServiceCall::Download { request } => EngineEvent::DownloadCompleted {
            request,
            result: service.download().await,
        },
        ServiceCall::Cleanup { request } => EngineEvent::CleanupCompleted {
            request,
            result: service.cleanup().await,
        },
    };
    let _ = event_tx.send(event);
}
