//! Outbound HTTP, behind a trait so the client can be driven without a server.

use async_trait::async_trait;
use reqclass_core::UploadedFile;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::TransportFailure;

/// Status and raw body of whatever the server answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends exactly one POST per call. Any HTTP status counts as a response;
/// only failures to get one are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<RawResponse, TransportFailure>;

    /// Multipart upload of `file` under the form field `field`.
    async fn post_file(
        &self,
        path: &str,
        field: &str,
        file: &UploadedFile,
    ) -> Result<RawResponse, TransportFailure>;
}

/// [`Transport`] over `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self, TransportFailure> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn collect(resp: reqwest::Response) -> Result<RawResponse, TransportFailure> {
        let status = resp.status().as_u16();
        let body = resp.bytes().await?.to_vec();
        debug!(status, bytes = body.len(), "response received");
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<RawResponse, TransportFailure> {
        let url = self.config.url(path);
        let resp = self.client.post(&url).json(&body).send().await?;
        Self::collect(resp).await
    }

    async fn post_file(
        &self,
        path: &str,
        field: &str,
        file: &UploadedFile,
    ) -> Result<RawResponse, TransportFailure> {
        let url = self.config.url(path);
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(file.declared_type())?;
        let form = reqwest::multipart::Form::new().part(field.to_string(), part);
        let resp = self.client.post(&url).multipart(form).send().await?;
        Self::collect(resp).await
    }
}
