//! Error types for document generation.

use quill_core::ValidationError;
use thiserror::Error;

/// Failures while turning a layout into PDF bytes.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A page content stream could not be encoded.
    #[error("Failed to encode page content: {0}")]
    Encode(String),

    /// The finished document could not be serialized.
    #[error("Failed to write PDF: {0}")]
    Save(String),
}

/// Failures of [`crate::generate_invoice`].
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// The request was rejected before rendering.
    #[error("Invalid invoice: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl InvoiceError {
    /// Whether the caller should show the "fill in all required fields"
    /// message rather than an internal failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, InvoiceError::Validation(_))
    }
}
