//! Caller-owned form state: the input a user is editing plus the lifecycle
//! of the single request that form may have in flight.
//!
//! Every form moves through `Idle → Pending → (Success | Failed)`.
//! `Pending` is entered only after local validation passes, and `submit`
//! always returns with the form in a terminal state. A submit future dropped
//! mid-request leaves the form `Failed`. `reset` goes back to `Idle` with
//! default input.

use reqclass_core::{
    AnalysisResult, BatchClassificationReport, ClassificationResult, RequirementText,
    SearchResult, TopN, UploadedFile, ValidationError,
};

use crate::client::RequirementsApiClient;
use crate::error::{Operation, OperationError};
use crate::transport::Transport;

/// Lifecycle of one form's request.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationState<T> {
    Idle,
    Pending,
    Success(T),
    Failed(OperationError),
}

impl<T> Default for OperationState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> OperationState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&OperationError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    fn settle(&mut self, outcome: Result<T, OperationError>) {
        *self = match outcome {
            Ok(value) => Self::Success(value),
            Err(err) => Self::Failed(err),
        };
    }
}

/// Holds a form in `Pending` while its request is in flight.
///
/// Dropping the guard before [`Inflight::settle`] (the submit future was
/// cancelled) leaves the form `Failed` instead of stuck in `Pending`.
struct Inflight<'a, T> {
    state: &'a mut OperationState<T>,
    op: Operation,
}

impl<'a, T> Inflight<'a, T> {
    fn begin(state: &'a mut OperationState<T>, op: Operation) -> Self {
        *state = OperationState::Pending;
        Self { state, op }
    }

    fn settle(mut self, outcome: Result<T, OperationError>) {
        self.state.settle(outcome);
    }
}

impl<T> Drop for Inflight<'_, T> {
    fn drop(&mut self) {
        if self.state.is_pending() {
            *self.state = OperationState::Failed(OperationError::transport(
                self.op,
                "request dropped before completion",
            ));
        }
    }
}

/// User-facing text for a failed form.
///
/// Validation failures get a prompt worded for the form they happened in;
/// everything else shows the normalized message.
pub fn describe_error(op: Operation, err: &OperationError) -> String {
    let OperationError::Validation(validation) = err else {
        return err.message();
    };
    let prompt = match (validation, op) {
        (ValidationError::EmptyRequirement, Operation::Classify) => {
            "Please enter a requirement to classify"
        }
        (ValidationError::EmptyRequirement, Operation::Search) => {
            "Please enter a requirement to search"
        }
        (ValidationError::EmptyRequirement, _) => "Please enter a requirement",
        (ValidationError::TopNOutOfRange(_), Operation::Search) => {
            "Number of results must be between 1 and 20"
        }
        (ValidationError::TopNOutOfRange(_), _) => "Top N must be between 1 and 20",
        (ValidationError::InvalidFileType { .. }, _) => "Please select a valid CSV file.",
        (ValidationError::NoFileSelected, _) => "Please select a CSV file to upload",
    };
    prompt.to_string()
}

fn check_requirement(text: &str) -> Result<(), OperationError> {
    RequirementText::parse(text)?;
    Ok(())
}

// ── Classify one ──

/// Single-requirement classification.
#[derive(Debug, Default)]
pub struct ClassifyForm {
    requirement: String,
    state: OperationState<ClassificationResult>,
}

impl ClassifyForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requirement(&self) -> &str {
        &self.requirement
    }

    pub fn set_requirement(&mut self, text: impl Into<String>) {
        self.requirement = text.into();
    }

    pub fn state(&self) -> &OperationState<ClassificationResult> {
        &self.state
    }

    pub fn can_submit(&self) -> bool {
        !self.state.is_pending() && !self.requirement.trim().is_empty()
    }

    pub fn error_message(&self) -> Option<String> {
        self.state
            .error()
            .map(|err| describe_error(Operation::Classify, err))
    }

    pub async fn submit<T: Transport>(
        &mut self,
        client: &RequirementsApiClient<T>,
    ) -> &OperationState<ClassificationResult> {
        if self.state.is_pending() {
            return &self.state;
        }
        if let Err(err) = check_requirement(&self.requirement) {
            self.state = OperationState::Failed(err);
            return &self.state;
        }
        let inflight = Inflight::begin(&mut self.state, Operation::Classify);
        let outcome = client.classify_one(&self.requirement).await;
        inflight.settle(outcome);
        &self.state
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ── Batch ──

/// CSV upload for batch classification.
#[derive(Debug, Default)]
pub struct BatchClassifyForm {
    file: Option<UploadedFile>,
    state: OperationState<BatchClassificationReport>,
}

impl BatchClassifyForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    /// Choose the file to upload. A non-CSV file clears the selection and
    /// fails the form; a CSV file clears any earlier failure.
    pub fn select_file(&mut self, file: UploadedFile) {
        if self.state.is_pending() {
            return;
        }
        match file.ensure_csv() {
            Ok(()) => {
                self.file = Some(file);
                if self.state.error().is_some() {
                    self.state = OperationState::Idle;
                }
            }
            Err(err) => {
                self.file = None;
                self.state = OperationState::Failed(err.into());
            }
        }
    }

    pub fn state(&self) -> &OperationState<BatchClassificationReport> {
        &self.state
    }

    pub fn can_submit(&self) -> bool {
        !self.state.is_pending() && self.file.is_some()
    }

    pub fn error_message(&self) -> Option<String> {
        self.state
            .error()
            .map(|err| describe_error(Operation::ClassifyFile, err))
    }

    pub async fn submit<T: Transport>(
        &mut self,
        client: &RequirementsApiClient<T>,
    ) -> &OperationState<BatchClassificationReport> {
        if self.state.is_pending() {
            return &self.state;
        }
        let Some(file) = self.file.as_ref() else {
            self.state = OperationState::Failed(ValidationError::NoFileSelected.into());
            return &self.state;
        };
        if let Err(err) = file.ensure_csv() {
            self.state = OperationState::Failed(err.into());
            return &self.state;
        }
        let inflight = Inflight::begin(&mut self.state, Operation::ClassifyFile);
        let outcome = client.classify_batch(file).await;
        inflight.settle(outcome);
        &self.state
    }

    /// Back to `Idle`, dropping the result, the error and the selected file.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ── Classify and search ──

/// Classification plus similarity search in one call.
#[derive(Debug, Default)]
pub struct AnalyzeForm {
    requirement: String,
    top_n: TopN,
    use_clustering: bool,
    state: OperationState<AnalysisResult>,
}

impl AnalyzeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requirement(&self) -> &str {
        &self.requirement
    }

    pub fn set_requirement(&mut self, text: impl Into<String>) {
        self.requirement = text.into();
    }

    pub fn top_n(&self) -> TopN {
        self.top_n
    }

    /// Numeric control semantics: clamps into `[1, 20]`.
    pub fn set_top_n(&mut self, n: i64) {
        self.top_n = TopN::clamped(n);
    }

    /// Raw control text; ignored when it holds no integer.
    pub fn set_top_n_input(&mut self, raw: &str) {
        if let Some(n) = TopN::from_control(raw) {
            self.top_n = n;
        }
    }

    pub fn use_clustering(&self) -> bool {
        self.use_clustering
    }

    pub fn set_use_clustering(&mut self, on: bool) {
        self.use_clustering = on;
    }

    pub fn state(&self) -> &OperationState<AnalysisResult> {
        &self.state
    }

    pub fn can_submit(&self) -> bool {
        !self.state.is_pending() && !self.requirement.trim().is_empty()
    }

    pub fn error_message(&self) -> Option<String> {
        self.state
            .error()
            .map(|err| describe_error(Operation::Analyze, err))
    }

    pub async fn submit<T: Transport>(
        &mut self,
        client: &RequirementsApiClient<T>,
    ) -> &OperationState<AnalysisResult> {
        if self.state.is_pending() {
            return &self.state;
        }
        if let Err(err) = check_requirement(&self.requirement) {
            self.state = OperationState::Failed(err);
            return &self.state;
        }
        let inflight = Inflight::begin(&mut self.state, Operation::Analyze);
        let outcome = client
            .classify_and_search(
                &self.requirement,
                self.top_n.get().into(),
                self.use_clustering,
            )
            .await;
        inflight.settle(outcome);
        &self.state
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ── Search ──

/// Similarity search without classification.
#[derive(Debug, Default)]
pub struct SearchForm {
    requirement: String,
    top_n: TopN,
    state: OperationState<SearchResult>,
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requirement(&self) -> &str {
        &self.requirement
    }

    pub fn set_requirement(&mut self, text: impl Into<String>) {
        self.requirement = text.into();
    }

    pub fn top_n(&self) -> TopN {
        self.top_n
    }

    /// Numeric control semantics: clamps into `[1, 20]`.
    pub fn set_top_n(&mut self, n: i64) {
        self.top_n = TopN::clamped(n);
    }

    /// Raw control text; ignored when it holds no integer.
    pub fn set_top_n_input(&mut self, raw: &str) {
        if let Some(n) = TopN::from_control(raw) {
            self.top_n = n;
        }
    }

    pub fn state(&self) -> &OperationState<SearchResult> {
        &self.state
    }

    pub fn can_submit(&self) -> bool {
        !self.state.is_pending() && !self.requirement.trim().is_empty()
    }

    pub fn error_message(&self) -> Option<String> {
        self.state
            .error()
            .map(|err| describe_error(Operation::Search, err))
    }

    pub async fn submit<T: Transport>(
        &mut self,
        client: &RequirementsApiClient<T>,
    ) -> &OperationState<SearchResult> {
        if self.state.is_pending() {
            return &self.state;
        }
        if let Err(err) = check_requirement(&self.requirement) {
            self.state = OperationState::Failed(err);
            return &self.state;
        }
        let inflight = Inflight::begin(&mut self.state, Operation::Search);
        let outcome = client
            .search_similar(&self.requirement, self.top_n.get().into())
            .await;
        inflight.settle(outcome);
        &self.state
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
