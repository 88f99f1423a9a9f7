//! Client for the requirements classification API.
//!
//! One method per endpoint. Every method validates locally first, sends at
//! most one request, and returns either the decoded body or an
//! [`OperationError`]. Nothing else escapes.

use reqclass_core::{
    AnalysisResult, AnalyzeRequest, BatchClassificationReport, ClassificationResult,
    ClassifyRequest, RequirementText, SearchRequest, SearchResult, TopN, UploadedFile,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::error::{Operation, OperationError, TransportFailure};
use crate::transport::{HttpTransport, RawResponse, Transport};

/// Multipart field the batch endpoint reads the CSV from.
pub const FILE_FIELD: &str = "file";

pub struct RequirementsApiClient<T = HttpTransport> {
    transport: T,
}

impl RequirementsApiClient<HttpTransport> {
    /// Create a client talking HTTP to `config.base_url`.
    pub fn new(config: ClientConfig) -> Result<Self, TransportFailure> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: Transport> RequirementsApiClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Classify one requirement as functional or non-functional.
    pub async fn classify_one(&self, text: &str) -> Result<ClassificationResult, OperationError> {
        let request = ClassifyRequest {
            requirement: RequirementText::parse(text)?,
        };
        self.post_json(Operation::Classify, &request).await
    }

    /// Upload a CSV of requirements and classify every row.
    ///
    /// A report that breaks the server's counting contract is logged, not
    /// rejected.
    pub async fn classify_batch(
        &self,
        file: &UploadedFile,
    ) -> Result<BatchClassificationReport, OperationError> {
        file.ensure_csv()?;

        let op = Operation::ClassifyFile;
        info!(
            operation = %op,
            file = %file.file_name,
            bytes = file.bytes.len(),
            "uploading requirements file"
        );
        let resp = self
            .transport
            .post_file(op.path(), FILE_FIELD, file)
            .await
            .map_err(|e| transport_error(op, e))?;

        let report: BatchClassificationReport = decode(op, resp)?;
        if let Err(violation) = report.check_consistency() {
            warn!(%violation, "batch report is internally inconsistent");
        }
        info!(
            total = report.total_count,
            functional = report.fr_count,
            non_functional = report.nfr_count,
            "batch classified"
        );
        Ok(report)
    }

    /// Classify a requirement and fetch up to `top_n` similar ones.
    ///
    /// `top_n` outside `[1, 20]` is rejected, never clamped.
    pub async fn classify_and_search(
        &self,
        text: &str,
        top_n: i64,
        use_clustering: bool,
    ) -> Result<AnalysisResult, OperationError> {
        let request = AnalyzeRequest {
            requirement: RequirementText::parse(text)?,
            top_n: TopN::new(top_n)?,
            use_clustering,
        };
        self.post_json(Operation::Analyze, &request).await
    }

    /// Fetch up to `top_n` stored requirements similar to `text`.
    ///
    /// `top_n` outside `[1, 20]` is rejected, never clamped.
    pub async fn search_similar(
        &self,
        text: &str,
        top_n: i64,
    ) -> Result<SearchResult, OperationError> {
        let request = SearchRequest {
            requirement: RequirementText::parse(text)?,
            top_n: TopN::new(top_n)?,
        };
        self.post_json(Operation::Search, &request).await
    }

    async fn post_json<B, R>(&self, op: Operation, body: &B) -> Result<R, OperationError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let payload = serde_json::to_value(body).map_err(|e| transport_error(op, e))?;
        info!(operation = %op, path = op.path(), "sending request");
        let resp = self
            .transport
            .post_json(op.path(), payload)
            .await
            .map_err(|e| transport_error(op, e))?;
        decode(op, resp)
    }
}

fn transport_error(op: Operation, detail: impl std::fmt::Display) -> OperationError {
    warn!(operation = %op, %detail, "request failed without a usable response");
    OperationError::transport(op, detail)
}

/// Turn a raw response into the expected body or a normalized error.
fn decode<R: DeserializeOwned>(op: Operation, resp: RawResponse) -> Result<R, OperationError> {
    if !resp.is_success() {
        let err = OperationError::server(op, resp.status, &resp.body);
        warn!(operation = %op, status = resp.status, reason = %err, "server rejected request");
        return Err(err);
    }
    serde_json::from_slice(&resp.body)
        .map_err(|e| transport_error(op, format!("malformed response: {e}")))
}
