//! Command implementations.
//!
//! Each command returns the text destined for stdout so `main` stays a
//! dispatcher and the commands can be tested without a terminal.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

use quill_assist::{InvoiceAssistant, InvoiceImage};
use quill_core::{InvoiceRequest, Money, Percent, Totals};
use quill_pdf::{generate_invoice, DocumentStyle, InvoiceError};

use crate::config::AppConfig;
use crate::download::{download_link, DOWNLOAD_FILE_NAME};

/// Shown when an invoice request fails validation.
pub const INCOMPLETE_REQUEST_MESSAGE: &str =
    "Please fill in all required fields and add at least one item.";

/// Shown when `ask` runs without an image.
pub const MISSING_IMAGE_MESSAGE: &str = "Please upload an invoice image.";

// =============================================================================
// total
// =============================================================================

/// Breakdown of a total, one line per step.
pub fn total(subtotal: Money, discount: Percent, tax: Percent, marker: &str) -> String {
    let totals = Totals::compute(subtotal, discount, tax);
    format!(
        "Subtotal: {}\nDiscount: {}% (-{})\nTax: {}% (+{})\nTotal: {}",
        totals.subtotal.display_with(marker),
        totals.discount_percent,
        totals.discount_amount.display_with(marker),
        totals.tax_percent,
        totals.tax_amount.display_with(marker),
        totals.total.display_with(marker),
    )
}

// =============================================================================
// generate
// =============================================================================

/// Where a generated PDF goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Write the bytes to a file.
    File(PathBuf),
    /// Print an HTML download link instead of writing anything.
    Link,
}

impl Delivery {
    pub fn new(out: Option<PathBuf>, link: bool) -> Self {
        if link {
            Delivery::Link
        } else {
            Delivery::File(out.unwrap_or_else(|| PathBuf::from(DOWNLOAD_FILE_NAME)))
        }
    }
}

/// Reads an invoice request from a JSON file, dropping blank item rows.
pub fn read_request(path: &Path) -> Result<InvoiceRequest> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read invoice request {}", path.display()))?;
    let request: InvoiceRequest = serde_json::from_str(&text)
        .with_context(|| format!("Invalid invoice request {}", path.display()))?;
    Ok(request.without_blank_items())
}

/// Generates the PDF and delivers it.
pub fn generate(request: &InvoiceRequest, style: &DocumentStyle, delivery: &Delivery) -> Result<String> {
    let invoice = match generate_invoice(request, style) {
        Ok(invoice) => invoice,
        Err(InvoiceError::Validation(e)) => {
            return Err(anyhow::Error::new(e).context(INCOMPLETE_REQUEST_MESSAGE))
        }
        Err(e) => return Err(e).context("Failed to generate invoice PDF"),
    };

    let marker = style.currency_marker.as_str();
    let subtotal = invoice.totals.subtotal.display_with(marker);
    let total = invoice.totals.total.display_with(marker);
    let bytes = invoice.document.into_bytes();

    match delivery {
        Delivery::Link => {
            // stdout carries only the anchor
            info!(%subtotal, %total, "Invoice totals");
            Ok(download_link(&bytes))
        }
        Delivery::File(path) => {
            fs::write(path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Wrote invoice PDF");
            Ok(format!("Subtotal: {}\nTotal: {}\nSaved {}", subtotal, total, path.display()))
        }
    }
}

// =============================================================================
// ask
// =============================================================================

/// Asks the assistant a question about an invoice image.
pub async fn ask(config: &AppConfig, image: Option<&Path>, question: &str) -> Result<String> {
    let Some(path) = image else {
        bail!(MISSING_IMAGE_MESSAGE);
    };

    let bytes =
        fs::read(path).with_context(|| format!("Failed to read image {}", path.display()))?;
    let image = InvoiceImage::from_bytes(bytes)
        .with_context(|| format!("Cannot use {} as an invoice image", path.display()))?;

    let assistant = InvoiceAssistant::new(config.assist_config()?)
        .context("Failed to create assistant client")?;
    let answer = assistant.ask(&image, question).await?;
    Ok(answer)
}
