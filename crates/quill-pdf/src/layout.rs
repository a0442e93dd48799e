//! # Invoice Layout
//!
//! The content of an invoice document, decided before anything is painted.
//!
//! ## Document Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    Acme Traders                         │  title
//! │                                                         │
//! │  Invoice #: INV-042                                     │
//! │  Date: 2024-03-15                                       │  details
//! │  Billed to: Globex                                      │
//! │                                                         │
//! │   ┌────────┬──────────┬────────────┬──────────┐         │
//! │   │  Item  │ Quantity │ Unit Price │  Total   │         │  header row
//! │   ├────────┼──────────┼────────────┼──────────┤         │
//! │   │ Widget │    2     │  Rs.9.99   │ Rs.19.98 │         │  item rows
//! │   │ Gadget │    1     │  Rs.5.00   │ Rs.5.00  │         │
//! │   └────────┴──────────┴────────────┴──────────┘         │
//! │                                                         │
//! │  Subtotal: Rs.24.98                                     │
//! │  Discount: 10%                                          │  summary
//! │  Tax: 5%                                                │
//! │  Total: Rs.23.61                                        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering ([`crate::render`]) only decides where these strings go. Two
//! layouts that compare equal describe the same document.

use chrono::NaiveDate;
use serde::Serialize;

use quill_core::{compute_total, InvoiceRequest, LineItem, Money, Percent};

use crate::style::DocumentStyle;

/// Column headings of the item table.
pub const TABLE_HEADER: [&str; 4] = ["Item", "Quantity", "Unit Price", "Total"];

/// One row of the item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub cells: [String; 4],
    pub is_header: bool,
}

impl TableRow {
    fn header() -> Self {
        TableRow {
            cells: TABLE_HEADER.map(String::from),
            is_header: true,
        }
    }

    fn item(item: &LineItem, marker: &str) -> Self {
        TableRow {
            cells: [
                item.name.clone(),
                item.quantity.to_string(),
                item.unit_price.display_with(marker),
                item.line_total().display_with(marker),
            ],
            is_header: false,
        }
    }
}

/// One line of the totals block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub text: String,
    /// Printed in bold (subtotal and total).
    pub emphasis: bool,
}

impl SummaryLine {
    fn plain(text: String) -> Self {
        SummaryLine {
            text,
            emphasis: false,
        }
    }

    fn bold(text: String) -> Self {
        SummaryLine {
            text,
            emphasis: true,
        }
    }
}

/// Row and column content of one invoice, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceLayout {
    /// Company name, printed as the title.
    pub title: String,

    /// Invoice number, date and billed-to lines.
    pub details: Vec<String>,

    /// Header row followed by one row per item.
    pub table: Vec<TableRow>,

    /// Subtotal, discount, tax and total lines.
    pub summary: Vec<SummaryLine>,
}

impl InvoiceLayout {
    /// Rows after the header.
    pub fn item_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.table.iter().filter(|row| !row.is_header)
    }
}

/// Lays out an invoice from its individual fields.
///
/// `subtotal` is taken as given, the way the form computed it; the total is
/// derived from it with [`compute_total`]. An empty `items` slice produces a
/// table with only the header row.
#[allow(clippy::too_many_arguments)]
pub fn layout_document(
    company_name: &str,
    billed_to: &str,
    invoice_number: &str,
    date: NaiveDate,
    items: &[LineItem],
    subtotal: Money,
    discount_percent: Percent,
    tax_percent: Percent,
    style: &DocumentStyle,
) -> InvoiceLayout {
    let marker = style.currency_marker.as_str();

    let details = vec![
        format!("Invoice #: {}", invoice_number),
        format!("Date: {}", date.format("%Y-%m-%d")),
        format!("Billed to: {}", billed_to),
    ];

    let table = std::iter::once(TableRow::header())
        .chain(items.iter().map(|item| TableRow::item(item, marker)))
        .collect();

    let total = compute_total(subtotal, discount_percent, tax_percent);
    let summary = vec![
        SummaryLine::bold(format!("Subtotal: {}", subtotal.display_with(marker))),
        SummaryLine::plain(format!("Discount: {}%", discount_percent)),
        SummaryLine::plain(format!("Tax: {}%", tax_percent)),
        SummaryLine::bold(format!("Total: {}", total.display_with(marker))),
    ];

    InvoiceLayout {
        title: company_name.to_string(),
        details,
        table,
        summary,
    }
}

/// Lays out an invoice request.
pub fn layout_invoice(request: &InvoiceRequest, style: &DocumentStyle) -> InvoiceLayout {
    layout_document(
        &request.company_name,
        &request.billed_to,
        &request.invoice_number,
        request.date,
        &request.items,
        request.subtotal(),
        request.discount_percent,
        request.tax_percent,
        style,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> InvoiceRequest {
        InvoiceRequest {
            company_name: "Acme Traders".to_string(),
            billed_to: "Globex".to_string(),
            invoice_number: "INV-042".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            items: vec![
                LineItem::new("Widget", 2, Money::from_cents(999)),
                LineItem::new("Gadget", 1, Money::from_cents(500)),
            ],
            discount_percent: Percent::from_whole(10),
            tax_percent: Percent::from_whole(5),
        }
    }

    #[test]
    fn test_table_has_header_plus_item_rows() {
        let layout = layout_invoice(&sample_request(), &DocumentStyle::default());

        assert_eq!(layout.table.len(), 3);
        assert!(layout.table[0].is_header);
        assert_eq!(layout.table[0].cells, TABLE_HEADER.map(String::from));

        let gadget = &layout.table[2];
        assert_eq!(gadget.cells[0], "Gadget");
        assert_eq!(gadget.cells[1], "1");
        assert_eq!(gadget.cells[2], "Rs.5.00");
        assert_eq!(gadget.cells[3], "Rs.5.00");

        assert_eq!(layout.table[1].cells[3], "Rs.19.98");
    }

    #[test]
    fn test_title_and_details() {
        let layout = layout_invoice(&sample_request(), &DocumentStyle::default());
        assert_eq!(layout.title, "Acme Traders");
        assert_eq!(
            layout.details,
            vec!["Invoice #: INV-042", "Date: 2024-03-15", "Billed to: Globex"]
        );
    }

    #[test]
    fn test_summary_lines() {
        let layout = layout_invoice(&sample_request(), &DocumentStyle::default());
        let texts: Vec<_> = layout.summary.iter().map(|l| l.text.as_str()).collect();

        // 24.98 × 0.9 × 1.05 = 23.6061 → 23.61
        assert_eq!(
            texts,
            vec!["Subtotal: Rs.24.98", "Discount: 10%", "Tax: 5%", "Total: Rs.23.61"]
        );
        assert!(layout.summary[0].emphasis);
        assert!(!layout.summary[1].emphasis);
        assert!(layout.summary[3].emphasis);
    }

    #[test]
    fn test_empty_items_render_header_only() {
        let mut request = sample_request();
        request.items.clear();
        let layout = layout_invoice(&request, &DocumentStyle::default());

        assert_eq!(layout.table.len(), 1);
        assert_eq!(layout.item_rows().count(), 0);
        assert_eq!(layout.summary[3].text, "Total: Rs.0.00");
    }

    #[test]
    fn test_custom_currency_marker() {
        let style = DocumentStyle {
            currency_marker: "$".to_string(),
            ..DocumentStyle::default()
        };
        let layout = layout_invoice(&sample_request(), &style);
        assert_eq!(layout.table[1].cells[2], "$9.99");
        assert_eq!(layout.summary[0].text, "Subtotal: $24.98");
    }

    #[test]
    fn test_layout_is_deterministic() {
        let style = DocumentStyle::default();
        assert_eq!(
            layout_invoice(&sample_request(), &style),
            layout_invoice(&sample_request(), &style)
        );
    }
}
