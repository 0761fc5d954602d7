//! Extractor engine: conversion service client and effect execution.
mod engine;
mod expiry;
mod persist;
mod probe;
mod service;
mod types;

pub use engine::EngineHandle;
pub use expiry::ExpiryTimer;
pub use persist::{ensure_output_dir, ArtifactWriter, PersistError};
pub use probe::{
    display_name, probe_file, sniff_mime_type, ProbeError, ProbedFile, PDF_MIME_TYPE,
    UNKNOWN_MIME_TYPE,
};
pub use service::{
    ChannelProgressSink, ConversionService, ProgressSink, ReqwestService, ServiceSettings,
    UPLOAD_FIELD,
};
pub use types::{
    EngineEvent, FailureKind, NotificationId, RequestId, ServiceError, UploadFile,
};
