/// Upload policy checks
///
/// A candidate file must be one of the accepted image formats and must not
/// exceed the size cap. The media type is derived from the file extension;
/// the file contents are never sniffed.

use std::path::Path;

use thiserror::Error;

/// Maximum accepted file size: 10 MiB
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// The image formats the enhancement pipeline accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Jpeg,
    Png,
    WebP,
}

impl MediaType {
    /// The MIME string used in data URIs and in the enhancement request
    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::WebP => "image/webp",
        }
    }

    /// Parse a MIME string, e.g. when decoding a data URI
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(MediaType::Jpeg),
            "image/png" => Some(MediaType::Png),
            "image/webp" => Some(MediaType::WebP),
            _ => None,
        }
    }

    /// Derive the media type from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(MediaType::Jpeg),
            "png" => Some(MediaType::Png),
            "webp" => Some(MediaType::WebP),
            _ => None,
        }
    }

    /// Derive the media type from a file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Why a candidate file was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unsupported file type. Please choose a JPEG, PNG or WebP image.")]
    UnsupportedType,
    #[error("File is too large. The maximum size is 10 MB.")]
    TooLarge,
}

/// Check a candidate file against the upload policy.
///
/// The media type is checked before the size, so an oversized file of an
/// unsupported type reports `UnsupportedType`.
pub fn validate(media_type: Option<MediaType>, byte_len: u64) -> Result<MediaType, ValidationError> {
    let media_type = media_type.ok_or(ValidationError::UnsupportedType)?;

    if byte_len > MAX_FILE_BYTES {
        return Err(ValidationError::TooLarge);
    }

    Ok(media_type)
}
