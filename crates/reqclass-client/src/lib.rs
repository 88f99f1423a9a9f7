//! Client side of the requirements classification API: one HTTP call per
//! operation, local validation, normalized errors, and per-form state.

mod client;
mod config;
mod error;
mod form;
mod transport;

pub use client::{FILE_FIELD, RequirementsApiClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ErrorKind, Operation, OperationError, TransportFailure};
pub use form::{
    AnalyzeForm, BatchClassifyForm, ClassifyForm, OperationState, SearchForm, describe_error,
};
pub use transport::{HttpTransport, RawResponse, Transport};
