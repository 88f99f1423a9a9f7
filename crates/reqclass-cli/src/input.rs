//! Turning a path on disk into an upload.

use std::path::Path;

use anyhow::Context;
use reqclass_core::UploadedFile;

/// Read `path` and declare its media type.
///
/// Without an explicit `media_type` the type is guessed from the extension,
/// the way a browser fills in a file input's type. Unknown extensions become
/// `application/octet-stream`.
pub fn load_upload(path: &Path, media_type: Option<&str>) -> anyhow::Result<UploadedFile> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let media_type = match media_type {
        Some(mt) => mt.to_string(),
        None => mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(UploadedFile::new(file_name, media_type, bytes))
}
