use std::time::Duration;

use bytes::Bytes;
use extractor_logging::{extractor_debug, extractor_info, extractor_warn};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

use crate::{EngineEvent, FailureKind, RequestId, ServiceError, UploadFile};

/// Multipart field carrying each uploaded file.
pub const UPLOAD_FIELD: &str = "files";
const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    /// `None` waits indefinitely, like a browser `fetch`.
    pub connect_timeout: Option<Duration>,
    /// `None` waits indefinitely, like a browser `fetch`.
    pub request_timeout: Option<Duration>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: UnboundedSender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: UnboundedSender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// The remote conversion service.
#[async_trait::async_trait]
pub trait ConversionService: Send + Sync {
    /// Upload every file as one batch to `/process`.
    async fn process(
        &self,
        request: RequestId,
        files: &[UploadFile],
        sink: &dyn ProgressSink,
    ) -> Result<(), ServiceError>;

    /// Retrieve the produced artifact from `/download`.
    async fn download(&self) -> Result<Bytes, ServiceError>;

    /// Ask the server to prune old sessions via `/cleanup`.
    async fn cleanup(&self) -> Result<(), ServiceError>;
}

/// Reply shape shared by `/process`, `/cleanup` and error bodies.
#[derive(Debug, Default, Deserialize)]
struct ServiceReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestService {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let base = parse_base_url(&settings.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        self.base
            .join(path)
            .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    /// Sends a request whose reply is `{ "success": bool, "error": ... }`.
    async fn send_for_reply(&self, request: reqwest::RequestBuilder) -> Result<(), ServiceError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let reply = parse_reply(&body);

        if !status.is_success() {
            return Err(ServiceError::rejected(
                status.as_u16(),
                reply.and_then(|reply| reply.error),
            ));
        }
        match reply {
            Some(reply) if reply.success => Ok(()),
            Some(reply) => Err(ServiceError::rejected(status.as_u16(), reply.error)),
            None => Err(ServiceError::new(
                FailureKind::Decode,
                "reply is not a JSON object",
            )),
        }
    }
}

#[async_trait::async_trait]
impl ConversionService for ReqwestService {
    async fn process(
        &self,
        request: RequestId,
        files: &[UploadFile],
        sink: &dyn ProgressSink,
    ) -> Result<(), ServiceError> {
        let url = self.endpoint("process")?;
        let form = build_form(files).await?;

        extractor_info!("POST {} request={} files={}", url, request, files.len());
        sink.emit(EngineEvent::UploadStarted { request });

        let result = self.send_for_reply(self.client.post(url).multipart(form)).await;
        log_outcome(&format!("process request={request}"), &result);
        result
    }

    async fn download(&self) -> Result<Bytes, ServiceError> {
        let url = self.endpoint("download")?;
        extractor_info!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let server_message = parse_reply(&body).and_then(|reply| reply.error);
            extractor_debug!("download rejected status={} message={:?}", status, server_message);
            return Err(ServiceError::rejected(status.as_u16(), server_message));
        }

        extractor_info!("downloaded artifact bytes={}", body.len());
        Ok(body)
    }

    async fn cleanup(&self) -> Result<(), ServiceError> {
        let url = self.endpoint("cleanup")?;
        extractor_info!("POST {}", url);
        let result = self.send_for_reply(self.client.post(url)).await;
        log_outcome("cleanup", &result);
        result
    }
}

async fn build_form(files: &[UploadFile]) -> Result<Form, ServiceError> {
    let mut form = Form::new();
    for file in files {
        let bytes = tokio::fs::read(&file.path).await.map_err(|err| {
            ServiceError::new(
                FailureKind::Io,
                format!("Could not read {}: {}", file.name, err),
            )
        })?;
        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(PDF_CONTENT_TYPE)
            .map_err(map_reqwest_error)?;
        form = form.part(UPLOAD_FIELD, part);
    }
    Ok(form)
}

/// Parses the base URL and makes sure relative joins append to its path.
fn parse_base_url(raw: &str) -> Result<Url, ServiceError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ServiceError::new(
            FailureKind::InvalidUrl,
            format!("unsupported scheme {}", url.scheme()),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_reply(body: &[u8]) -> Option<ServiceReply> {
    serde_json::from_slice(body).ok()
}

fn log_outcome(operation: &str, result: &Result<(), ServiceError>) {
    match result {
        Ok(()) => extractor_info!("{} succeeded", operation),
        Err(err) if matches!(err.kind, FailureKind::Rejected { .. }) => {
            extractor_info!("{} rejected: {}", operation, err)
        }
        Err(err) => extractor_warn!("{} failed: {}", operation, err),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(FailureKind::Timeout, err.to_string());
    }
    ServiceError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let url = parse_base_url("http://localhost:5000/api").unwrap();
        assert_eq!(url.join("process").unwrap().as_str(), "http://localhost:5000/api/process");

        let url = parse_base_url(" http://localhost:5000 ").unwrap();
        assert_eq!(url.join("download").unwrap().as_str(), "http://localhost:5000/download");
    }

    #[test]
    fn base_url_rejects_other_schemes() {
        let err = parse_base_url("ftp://example.com").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
        assert_eq!(parse_base_url("not a url").unwrap_err().kind, FailureKind::InvalidUrl);
    }

    #[test]
    fn reply_fields_default_when_missing() {
        let reply = parse_reply(br#"{}"#).unwrap();
        assert!(!reply.success);
        assert!(reply.error.is_none());
        assert!(parse_reply(b"<html>").is_none());
    }
}
