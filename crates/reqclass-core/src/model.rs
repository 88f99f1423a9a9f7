//! Wire types exchanged with the classification API.
//!
//! Request payloads are built from validated input only. Response types
//! mirror the JSON the server returns; none of them outlive a single request.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::{RequirementText, TopN};

// ── Requests ──

/// Body of `POST /api/classify`.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyRequest {
    pub requirement: RequirementText,
}

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub requirement: RequirementText,
    pub top_n: TopN,
    pub use_clustering: bool,
}

/// Body of `POST /api/search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub requirement: RequirementText,
    pub top_n: TopN,
}

// ── Responses ──

/// Label assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequirementType {
    Functional,
    NonFunctional,
}

impl RequirementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Functional => "Functional",
            Self::NonFunctional => "NonFunctional",
        }
    }
}

impl fmt::Display for RequirementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `POST /api/classify`, also nested in analysis results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "type")]
    pub kind: RequirementType,
    /// Classifier probability in `[0, 1]`.
    pub confidence: f64,
}

/// Identifier of a stored requirement. The server may send a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequirementId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RequirementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A stored requirement related to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarRequirement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequirementId>,
    pub text: String,
    /// Relatedness score in `[0, 1]`.
    pub similarity: f64,
}

/// Response of `POST /api/analyze`.
///
/// `similar_requirements` keeps the server's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub classification: ClassificationResult,
    pub similar_requirements: Vec<SimilarRequirement>,
}

/// Response of `POST /api/search`.
///
/// `requirements` keeps the server's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub requirements: Vec<SimilarRequirement>,
}

/// One row of a batch report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRequirement {
    pub requirement: String,
    pub confidence: f64,
}

/// Response of `POST /api/classify/file`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchClassificationReport {
    pub total_count: u64,
    pub fr_count: u64,
    pub nfr_count: u64,
    pub functional_requirements: Vec<ClassifiedRequirement>,
    pub non_functional_requirements: Vec<ClassifiedRequirement>,
}

/// A batch report whose counts disagree with each other or with its lists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("fr_count {fr} + nfr_count {nfr} != total_count {total}")]
    CountMismatch { fr: u64, nfr: u64, total: u64 },

    #[error("{list} has {len} entries but its count is {count}")]
    ListLengthMismatch {
        list: &'static str,
        len: usize,
        count: u64,
    },
}

impl BatchClassificationReport {
    /// Check the server's counting contract.
    ///
    /// The client does not reject inconsistent reports; callers decide what
    /// to do with a violation.
    pub fn check_consistency(&self) -> Result<(), ReportError> {
        if self.fr_count.checked_add(self.nfr_count) != Some(self.total_count) {
            return Err(ReportError::CountMismatch {
                fr: self.fr_count,
                nfr: self.nfr_count,
                total: self.total_count,
            });
        }
        let lists = [
            ("functional_requirements", &self.functional_requirements, self.fr_count),
            (
                "non_functional_requirements",
                &self.non_functional_requirements,
                self.nfr_count,
            ),
        ];
        for (list, items, count) in lists {
            if items.len() as u64 != count {
                return Err(ReportError::ListLengthMismatch {
                    list,
                    len: items.len(),
                    count,
                });
            }
        }
        Ok(())
    }
}

/// Optional `message` carried by error responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The message, if it is a non-empty string.
    pub fn message(&self) -> Option<&str> {
        match &self.message {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}
