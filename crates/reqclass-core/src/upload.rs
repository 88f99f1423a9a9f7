//! File uploads for batch classification.

use crate::validation::ValidationError;

/// Media type a batch upload must declare.
pub const CSV_MEDIA_TYPE: &str = "text/csv";

/// A user-selected file: raw bytes plus the media type its source declared.
///
/// Not tied to any UI file handle. Only the media type is checked locally;
/// row and column structure is the server's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into().trim().to_string(),
            bytes: bytes.into(),
        }
    }

    /// The declared media type without surrounding whitespace. This is what
    /// gets checked and what goes on the wire, even when `media_type` was
    /// set directly.
    pub fn declared_type(&self) -> &str {
        self.media_type.trim()
    }

    /// True when the declared media type is `text/csv`, ignoring case and
    /// parameters such as `charset`.
    pub fn is_csv(&self) -> bool {
        let essence = self
            .declared_type()
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        essence.eq_ignore_ascii_case(CSV_MEDIA_TYPE)
    }

    /// Reject anything that does not declare itself as CSV.
    pub fn ensure_csv(&self) -> Result<(), ValidationError> {
        if self.is_csv() {
            Ok(())
        } else {
            Err(ValidationError::InvalidFileType {
                media_type: self.declared_type().to_string(),
            })
        }
    }
}
