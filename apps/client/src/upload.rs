//! Loading local files into form uploads, with the same type and size
//! limits the backend enforces.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::page::form_data::UploadedFile;

const MEGABYTE: u64 = 1024 * 1024;

pub const CV_EXTENSIONS: &[&str] = &["pdf", "docx", "doc"];
pub const MAX_CV_SIZE_MB: u64 = 3;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
pub const MAX_IMAGE_SIZE_MB: u64 = 5;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} has no file extension")]
    NoExtension(PathBuf),

    #[error("{path}: file must be one of these types: {allowed}")]
    UnsupportedExtension { path: PathBuf, allowed: String },

    #[error("{path}: file too large ({size_mb:.2}MB). Maximum allowed size is {max_mb}MB")]
    TooLarge {
        path: PathBuf,
        size_mb: f64,
        max_mb: u64,
    },
}

/// MIME type sent for a file extension (case-insensitive).
pub fn content_type_for(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

impl UploadedFile {
    /// Reads `path` and infers the content type from its extension.
    pub async fn from_path(path: &Path) -> Result<Self, UploadError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| UploadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        let file = UploadedFile::new(file_name, content_type_for(extension), bytes);
        debug!("Loaded {} ({} bytes)", path.display(), file.size());
        Ok(file)
    }
}

/// Loads a résumé: `.pdf`, `.docx` or `.doc`, at most 3 MB.
pub async fn load_cv(path: &Path) -> Result<UploadedFile, UploadError> {
    load_checked(path, CV_EXTENSIONS, MAX_CV_SIZE_MB).await
}

/// Loads a job description image: `.jpg`, `.jpeg` or `.png`, at most 5 MB.
pub async fn load_job_image(path: &Path) -> Result<UploadedFile, UploadError> {
    load_checked(path, IMAGE_EXTENSIONS, MAX_IMAGE_SIZE_MB).await
}

async fn load_checked(
    path: &Path,
    allowed: &[&str],
    max_mb: u64,
) -> Result<UploadedFile, UploadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| UploadError::NoExtension(path.to_path_buf()))?;
    if !allowed.contains(&extension.as_str()) {
        return Err(UploadError::UnsupportedExtension {
            path: path.to_path_buf(),
            allowed: allowed
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect::<Vec<_>>()
                .join(", "),
        });
    }

    // Size comes from metadata so oversized files are never read.
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|source| UploadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    if metadata.len() > max_mb * MEGABYTE {
        return Err(UploadError::TooLarge {
            path: path.to_path_buf(),
            size_mb: metadata.len() as f64 / MEGABYTE as f64,
            max_mb,
        });
    }

    UploadedFile::from_path(path).await
}
