//! Error types for the invoice assistant.

use thiserror::Error;

/// Failures of an assistant request.
#[derive(Debug, Error)]
pub enum AssistError {
    /// No image was supplied, or the buffer is empty.
    #[error("Please upload an invoice image.")]
    MissingImage,

    /// The image is neither JPEG nor PNG.
    #[error("Unsupported image format (expected JPEG or PNG)")]
    UnsupportedImage,

    /// The request never got a response. The URL is stripped from the
    /// inner error.
    #[error("Request to the model API failed: {0}")]
    Http(reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Model API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The API answered without any text.
    #[error("Model API returned no answer")]
    EmptyResponse,
}

impl From<reqwest::Error> for AssistError {
    fn from(err: reqwest::Error) -> Self {
        AssistError::Http(err.without_url())
    }
}

pub type AssistResult<T> = Result<T, AssistError>;
