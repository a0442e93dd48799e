//! # quill-pdf: Invoice Document Builder
//!
//! Turns an invoice into a single in-memory PDF.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  InvoiceRequest ──validate──► layout_invoice ──► render_layout ──► PDF  │
//! │                  (quill-core)   (layout.rs)        (render.rs)          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`generate_invoice`] runs the whole pipeline and is what callers want.
//! [`build_document`] skips validation and takes the fields one by one, for
//! callers that have already checked their input.
//!
//! ## Example
//! ```rust
//! use chrono::NaiveDate;
//! use quill_core::{InvoiceRequest, LineItem, Money, Percent};
//! use quill_pdf::{generate_invoice, DocumentStyle};
//!
//! let request = InvoiceRequest {
//!     company_name: "Acme Traders".to_string(),
//!     billed_to: "Globex".to_string(),
//!     invoice_number: "INV-001".to_string(),
//!     date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
//!     items: vec![LineItem::new("Widget", 2, Money::from_cents(999))],
//!     discount_percent: Percent::zero(),
//!     tax_percent: Percent::from_whole(5),
//! };
//!
//! let invoice = generate_invoice(&request, &DocumentStyle::default()).unwrap();
//! assert!(invoice.document.as_bytes().starts_with(b"%PDF"));
//! assert_eq!(invoice.totals.total.display_with("Rs."), "Rs.20.98");
//! ```

pub mod error;
pub mod fonts;
pub mod layout;
pub mod render;
pub mod style;

pub use error::{InvoiceError, RenderError};
pub use layout::{layout_document, layout_invoice, InvoiceLayout, SummaryLine, TableRow};
pub use render::render_layout;
pub use style::{DocumentStyle, PageSize};

use chrono::NaiveDate;
use quill_core::{validate_request, InvoiceRequest, LineItem, Money, Percent, Totals};
use tracing::{info, warn};

// =============================================================================
// Document
// =============================================================================

/// A finished PDF, held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDocument {
    bytes: Vec<u8>,
    page_count: usize,
}

impl InvoiceDocument {
    pub(crate) fn new(bytes: Vec<u8>, page_count: usize) -> Self {
        InvoiceDocument { bytes, page_count }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }
}

/// A rendered invoice together with the figures printed on it.
#[derive(Debug, Clone)]
pub struct GeneratedInvoice {
    pub document: InvoiceDocument,
    pub totals: Totals,
}

// =============================================================================
// Operations
// =============================================================================

/// Builds an invoice PDF from its fields without validating them.
///
/// An empty `items` slice yields a table with only the header row.
#[allow(clippy::too_many_arguments)]
pub fn build_document(
    company_name: &str,
    billed_to: &str,
    invoice_number: &str,
    date: NaiveDate,
    items: &[LineItem],
    subtotal: Money,
    discount_percent: Percent,
    tax_percent: Percent,
    style: &DocumentStyle,
) -> Result<InvoiceDocument, RenderError> {
    let layout = layout_document(
        company_name,
        billed_to,
        invoice_number,
        date,
        items,
        subtotal,
        discount_percent,
        tax_percent,
        style,
    );
    render_layout(&layout, style)
}

/// Validates a request and renders it.
pub fn generate_invoice(
    request: &InvoiceRequest,
    style: &DocumentStyle,
) -> Result<GeneratedInvoice, InvoiceError> {
    if let Err(e) = validate_request(request) {
        warn!(
            invoice_number = %request.invoice_number,
            error = %e,
            "Rejected invoice request"
        );
        return Err(e.into());
    }

    let totals = request.totals();
    let document = render_layout(&layout_invoice(request, style), style)?;

    info!(
        invoice_number = %request.invoice_number,
        items = request.items.len(),
        total = %totals.total,
        pages = document.page_count(),
        bytes = document.len(),
        "Generated invoice"
    );

    Ok(GeneratedInvoice { document, totals })
}
