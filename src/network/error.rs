use thiserror::Error;

/// Why a catalog list failed to load
///
/// Cloneable so it can travel inside UI messages.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Malformed(err.to_string())
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Malformed(err.to_string())
    }
}

/// Why an image could not be shown
#[derive(Debug, Clone, Error)]
pub enum ImageError {
    #[error("Image download failed: {0}")]
    Transport(String),

    #[error("Image request failed with status {0}")]
    Status(u16),

    #[error("Image could not be decoded: {0}")]
    Decode(String),

    #[error("Task join error: {0}")]
    Join(String),
}

impl From<reqwest::Error> for ImageError {
    fn from(err: reqwest::Error) -> Self {
        ImageError::Transport(err.to_string())
    }
}

impl From<image::ImageError> for ImageError {
    fn from(err: image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}
