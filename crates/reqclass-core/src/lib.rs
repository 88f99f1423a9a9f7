pub mod model;
pub mod upload;
pub mod validation;

pub use model::{
    AnalysisResult, AnalyzeRequest, BatchClassificationReport, ClassificationResult,
    ClassifiedRequirement, ClassifyRequest, ErrorBody, ReportError, RequirementId,
    RequirementType, SearchRequest, SearchResult, SimilarRequirement,
};
pub use upload::{CSV_MEDIA_TYPE, UploadedFile};
pub use validation::{
    RequirementText, TOP_N_DEFAULT, TOP_N_MAX, TOP_N_MIN, TopN, ValidationError,
};
