//! Product image uploads and their storage path convention.
//!
//! Only the path is decided here. Writing the bytes is the blob store's job.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::slug::is_slug_char;

/// Extensions accepted for product images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("No file was submitted.")]
    MissingFileName,

    #[error("The submitted file is empty.")]
    EmptyFile,

    #[error("File extension \"{0}\" is not allowed. Allowed extensions are: jpg, jpeg, png, gif, webp, bmp.")]
    UnsupportedExtension(String),

    #[error("Upload a valid image. The file you uploaded was either not an image or a corrupted image.")]
    NotAnImage(String),
}

/// File received alongside a product submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Client-supplied file name, possibly with directory components.
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: u64,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            size,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// File name without any client-side directory components.
    pub fn base_name(&self) -> &str {
        let name = self.file_name.trim();
        name.rsplit(['/', '\\']).next().unwrap_or(name)
    }

    /// Base name reduced to a path-safe form: whitespace becomes `_`, anything
    /// outside `[A-Za-z0-9._-]` is dropped, leading dots are removed.
    pub fn stored_name(&self) -> String {
        let cleaned: String = self
            .base_name()
            .chars()
            .filter_map(|c| {
                if c.is_whitespace() {
                    Some('_')
                } else if is_slug_char(c) || c == '.' {
                    Some(c)
                } else {
                    None
                }
            })
            .collect();
        cleaned.trim_start_matches('.').to_string()
    }

    /// Check that the upload looks like an image we can store.
    pub fn check(&self) -> Result<(), ImageError> {
        let name = self.stored_name();
        if name.is_empty() {
            return Err(ImageError::MissingFileName);
        }
        if self.size == 0 {
            return Err(ImageError::EmptyFile);
        }
        let ext = name.rsplit_once('.').map(|(_, e)| e).unwrap_or("");
        if !IMAGE_EXTENSIONS.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)) {
            return Err(ImageError::UnsupportedExtension(ext.to_string()));
        }
        if let Some(content_type) = &self.content_type {
            if !content_type.trim().to_ascii_lowercase().starts_with("image/") {
                return Err(ImageError::NotAnImage(content_type.clone()));
            }
        }
        Ok(())
    }
}

/// Storage path of an uploaded image, relative to the media root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// `<prefix>/<YYYY>/<MM>/<DD>/<file name>` for an upload received on `date`.
pub fn upload_path(prefix: &str, date: NaiveDate, file: &UploadedFile) -> ImageRef {
    ImageRef(format!(
        "{}/{:04}/{:02}/{:02}/{}",
        prefix.trim_matches('/'),
        date.year(),
        date.month(),
        date.day(),
        file.stored_name()
    ))
}
