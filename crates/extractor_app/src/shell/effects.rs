use std::path::{Path, PathBuf};

use extractor_core::{Effect, Msg, SelectedFile, SelectionSource, ServiceFailure};
use extractor_engine::{
    display_name, probe_file, ArtifactWriter, EngineEvent, EngineHandle, ServiceError,
    UploadFile,
};
use extractor_logging::{extractor_debug, extractor_info, extractor_warn};

/// What running a batch of effects produced besides engine calls.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Messages to dispatch right away (e.g. a failed save).
    pub messages: Vec<Msg>,
    pub saved: Vec<PathBuf>,
}

pub struct EffectRunner {
    engine: EngineHandle,
    writer: ArtifactWriter,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, writer: ArtifactWriter) -> Self {
        Self { engine, writer }
    }

    pub fn run(&self, effects: Vec<Effect>) -> RunReport {
        let mut report = RunReport::default();
        for effect in effects {
            match effect {
                Effect::SubmitBatch { request, files } => {
                    extractor_info!("SubmitBatch request={} files={}", request, files.len());
                    let files = files
                        .into_iter()
                        .map(|file| UploadFile {
                            name: file.name,
                            path: file.path,
                        })
                        .collect();
                    self.engine.submit(request, files);
                }
                Effect::FetchArtifact { request } => {
                    extractor_info!("FetchArtifact request={}", request);
                    self.engine.download(request);
                }
                Effect::SaveArtifact { filename, bytes } => {
                    match self.writer.save(&filename, &bytes) {
                        Ok(path) => {
                            extractor_info!("Saved {} bytes to {:?}", bytes.len(), path);
                            report.saved.push(path);
                            report.messages.push(Msg::ArtifactSaved);
                        }
                        Err(err) => {
                            extractor_warn!("Saving {} failed: {}", filename, err);
                            report.messages.push(Msg::ArtifactSaveFailed {
                                reason: err.to_string(),
                            });
                        }
                    }
                }
                Effect::RequestCleanup { request } => {
                    extractor_info!("RequestCleanup request={}", request);
                    self.engine.cleanup(request);
                }
                Effect::ScheduleNotificationExpiry { id, after } => {
                    extractor_debug!("Notification {} expires in {:?}", id, after);
                    self.engine.schedule_expiry(id, after);
                }
            }
        }
        report
    }

    /// Waits for the next engine event and turns it into a message.
    pub async fn next_msg(&mut self) -> Option<Msg> {
        self.engine.recv().await.map(map_event)
    }
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadStarted { request } => Msg::SubmitUploading { request },
        EngineEvent::SubmitCompleted { request, result } => Msg::SubmitFinished {
            request,
            result: result.map_err(|err| to_failure(&err)),
        },
        EngineEvent::DownloadCompleted { request, result } => Msg::DownloadFinished {
            request,
            result: result
                .map(|bytes| bytes.to_vec())
                .map_err(|err| to_failure(&err)),
        },
        EngineEvent::CleanupCompleted { request, result } => Msg::CleanupFinished {
            request,
            result: result.map_err(|err| to_failure(&err)),
        },
        EngineEvent::NotificationExpired { id } => Msg::NotificationExpired { id },
    }
}

fn to_failure(err: &ServiceError) -> ServiceFailure {
    extractor_warn!("Service call failed: {}", err);
    ServiceFailure {
        message: err.user_message().map(str::to_string),
    }
}

/// Probes `paths` on disk and builds one message per path, in order, so
/// every rejection is reported on its own.
pub fn select_paths(paths: &[PathBuf], source: SelectionSource) -> Vec<Msg> {
    paths
        .iter()
        .map(|path| match probe(path) {
            Ok(file) => Msg::FilesSelected {
                source,
                files: vec![file],
            },
            Err(msg) => msg,
        })
        .collect()
}

fn probe(path: &Path) -> Result<SelectedFile, Msg> {
    match probe_file(path) {
        Ok(probed) => Ok(SelectedFile {
            name: probed.name,
            byte_size: probed.byte_size,
            mime_type: probed.mime_type.to_string(),
            path: probed.path,
        }),
        Err(err) => {
            extractor_debug!("Probe of {:?} failed: {}", path, err);
            Err(Msg::FileUnreadable {
                name: display_name(path),
                reason: err.to_string(),
            })
        }
    }
}
