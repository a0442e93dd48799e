//! # PDF Rendering
//!
//! Paints an [`InvoiceLayout`] onto pages and serializes them with lopdf.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Render Pipeline                                  │
//! │                                                                         │
//! │  InvoiceLayout                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Canvas (cursor moves down the frame, breaks pages when full)           │
//! │  ├── title     Helvetica-Bold 18, centred, wrapped                      │
//! │  ├── gap 24                                                             │
//! │  ├── details   Helvetica 10, wrapped                                    │
//! │  ├── gap 24                                                             │
//! │  ├── table     grey header row, beige body rows, 1pt grid               │
//! │  │             header repeated at the top of every continued page       │
//! │  ├── gap 24                                                             │
//! │  └── summary   Helvetica 10, subtotal and total in bold                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Vec<Operation>>  (one content stream per page)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lopdf::Document ──save_to──► bytes                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Content streams are written uncompressed and the document carries no
//! timestamp or ID, so the same layout always yields the same bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use tracing::debug;

use crate::error::RenderError;
use crate::fonts::{encode_win_ansi, truncate_to_width, wrap_text, Font};
use crate::layout::{InvoiceLayout, TableRow};
use crate::style::DocumentStyle;
use crate::InvoiceDocument;

const PDF_VERSION: &str = "1.5";
const PRODUCER: &str = "Quill Invoice";

// =============================================================================
// Type Scale
// =============================================================================

const TITLE_SIZE: f32 = 18.0;
const TITLE_LEADING: f32 = 22.0;
const TITLE_SPACE_AFTER: f32 = 6.0;

const BODY_SIZE: f32 = 10.0;
const BODY_LEADING: f32 = 12.0;

const SECTION_GAP: f32 = 24.0;

// =============================================================================
// Table Style
// =============================================================================

const CELL_PADDING_X: f32 = 6.0;
const CELL_LEADING_FACTOR: f32 = 1.2;
const GRID_WIDTH: f32 = 1.0;

/// Narrowest the item-name column is squeezed to before names are cut.
const MIN_NAME_WIDTH: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rgb(f32, f32, f32);

const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
const GREY: Rgb = Rgb(0.502, 0.502, 0.502);
const WHITESMOKE: Rgb = Rgb(0.961, 0.961, 0.961);
const BEIGE: Rgb = Rgb(0.961, 0.961, 0.863);

/// How one kind of table row is drawn.
#[derive(Debug, Clone, Copy)]
struct RowStyle {
    font: Font,
    size: f32,
    padding_top: f32,
    padding_bottom: f32,
    background: Rgb,
    text: Rgb,
}

const HEADER_ROW: RowStyle = RowStyle {
    font: Font::HelveticaBold,
    size: 14.0,
    padding_top: 3.0,
    padding_bottom: 12.0,
    background: GREY,
    text: WHITESMOKE,
};

const BODY_ROW: RowStyle = RowStyle {
    font: Font::Helvetica,
    size: 12.0,
    padding_top: 6.0,
    padding_bottom: 6.0,
    background: BEIGE,
    text: BLACK,
};

impl RowStyle {
    fn for_row(row: &TableRow) -> Self {
        if row.is_header {
            HEADER_ROW
        } else {
            BODY_ROW
        }
    }

    fn height(&self) -> f32 {
        self.padding_top + self.size * CELL_LEADING_FACTOR + self.padding_bottom
    }
}

// =============================================================================
// Entry Point
// =============================================================================

/// Renders a layout to a PDF document.
pub fn render_layout(
    layout: &InvoiceLayout,
    style: &DocumentStyle,
) -> Result<InvoiceDocument, RenderError> {
    let mut canvas = Canvas::new(style);

    canvas.paragraph(&layout.title, Font::HelveticaBold, TITLE_SIZE, TITLE_LEADING, Align::Center);
    canvas.advance(TITLE_SPACE_AFTER);
    canvas.advance(SECTION_GAP);

    for line in &layout.details {
        canvas.paragraph(line, Font::Helvetica, BODY_SIZE, BODY_LEADING, Align::Left);
    }
    canvas.advance(SECTION_GAP);

    canvas.table(&layout.table);
    canvas.advance(SECTION_GAP);

    for line in &layout.summary {
        let font = if line.emphasis {
            Font::HelveticaBold
        } else {
            Font::Helvetica
        };
        canvas.paragraph(&line.text, font, BODY_SIZE, BODY_LEADING, Align::Left);
    }

    let pages = canvas.finish();
    let page_count = pages.len();
    let bytes = write_document(pages, style, &layout.title)?;

    debug!(page_count, bytes = bytes.len(), "Rendered invoice document");

    Ok(InvoiceDocument::new(bytes, page_count))
}

// =============================================================================
// Canvas
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

/// Column positions shared by every row of one table.
#[derive(Debug, Clone, PartialEq)]
struct TableGeometry {
    x: f32,
    widths: [f32; 4],
}

impl TableGeometry {
    /// Sizes each column to its widest cell and centres the table in the
    /// frame. When the table is wider than the frame only the name column
    /// gives way.
    fn measure(table: &[TableRow], frame_left: f32, frame_width: f32) -> Self {
        let mut widths = [0.0f32; 4];
        for row in table {
            let style = RowStyle::for_row(row);
            for (width, cell) in widths.iter_mut().zip(row.cells.iter()) {
                let needed = style.font.text_width(cell, style.size) + 2.0 * CELL_PADDING_X;
                *width = width.max(needed);
            }
        }

        let rest: f32 = widths[1..].iter().sum();
        if widths[0] + rest > frame_width {
            widths[0] = (frame_width - rest).max(MIN_NAME_WIDTH);
        }

        let total: f32 = widths.iter().sum();
        TableGeometry {
            x: frame_left + ((frame_width - total) / 2.0).max(0.0),
            widths,
        }
    }

    /// Left edge and width of every column.
    fn columns(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.widths.iter().scan(self.x, |left, &width| {
            let column = (*left, width);
            *left += width;
            Some(column)
        })
    }

    fn width(&self) -> f32 {
        self.widths.iter().sum()
    }
}

/// Accumulates drawing operations page by page.
struct Canvas {
    page_height: f32,
    margin: f32,
    frame_width: f32,
    cursor: f32,
    current: Vec<Operation>,
    finished: Vec<Vec<Operation>>,
}

impl Canvas {
    fn new(style: &DocumentStyle) -> Self {
        let (_, page_height) = style.page_size.dimensions();
        Canvas {
            page_height,
            margin: style.margin,
            frame_width: style.frame_width(),
            cursor: page_height - style.margin,
            current: Vec::new(),
            finished: Vec::new(),
        }
    }

    fn top(&self) -> f32 {
        self.page_height - self.margin
    }

    fn bottom(&self) -> f32 {
        self.margin
    }

    fn left(&self) -> f32 {
        self.margin
    }

    fn new_page(&mut self) {
        self.finished.push(std::mem::take(&mut self.current));
        self.cursor = self.top();
    }

    /// Starts a new page unless `height` fits below the cursor.
    ///
    /// Returns whether a page break happened. A fresh page never breaks,
    /// so content taller than the frame is drawn and allowed to overflow.
    fn reserve(&mut self, height: f32) -> bool {
        let at_top = self.cursor >= self.top();
        if self.cursor - height < self.bottom() && !at_top {
            self.new_page();
            return true;
        }
        false
    }

    fn advance(&mut self, height: f32) {
        self.cursor -= height;
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        self.finished.push(self.current);
        self.finished
    }

    // -------------------------------------------------------------------------
    // Primitives
    // -------------------------------------------------------------------------

    fn text(&mut self, font: Font, size: f32, color: Rgb, x: f32, baseline: f32, text: &str) {
        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new("rg", color.operands()),
            Operation::new(
                "Tf",
                vec![Object::Name(font.resource_name().as_bytes().to_vec()), pt(size)],
            ),
            Operation::new("Td", vec![pt(x), pt(baseline)]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    fn fill_rect(&mut self, color: Rgb, x: f32, y: f32, width: f32, height: f32) {
        self.current.extend([
            Operation::new("rg", color.operands()),
            Operation::new("re", vec![pt(x), pt(y), pt(width), pt(height)]),
            Operation::new("f", vec![]),
        ]);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.current.extend([
            Operation::new("RG", BLACK.operands()),
            Operation::new("w", vec![pt(GRID_WIDTH)]),
            Operation::new("re", vec![pt(x), pt(y), pt(width), pt(height)]),
            Operation::new("S", vec![]),
        ]);
    }

    // -------------------------------------------------------------------------
    // Flowables
    // -------------------------------------------------------------------------

    /// Wraps `text` to the frame and draws it line by line.
    fn paragraph(&mut self, text: &str, font: Font, size: f32, leading: f32, align: Align) {
        for line in wrap_text(text, font, size, self.frame_width) {
            self.reserve(leading);
            let x = match align {
                Align::Left => self.left(),
                Align::Center => {
                    self.left() + (self.frame_width - font.text_width(&line, size)) / 2.0
                }
            };
            let baseline = self.cursor - size;
            self.text(font, size, BLACK, x, baseline, &line);
            self.advance(leading);
        }
    }

    fn table(&mut self, table: &[TableRow]) {
        let geometry = TableGeometry::measure(table, self.left(), self.frame_width);
        let (headers, body): (Vec<&TableRow>, Vec<&TableRow>) =
            table.iter().partition(|row| row.is_header);

        let header_height: f32 = headers.iter().map(|_| HEADER_ROW.height()).sum();
        let first_row = if body.is_empty() { 0.0 } else { BODY_ROW.height() };

        // Never leave a header alone at the foot of a page.
        self.reserve(header_height + first_row);
        for header in &headers {
            self.table_row(&geometry, header);
        }

        for row in body {
            if self.reserve(BODY_ROW.height()) {
                for header in &headers {
                    self.table_row(&geometry, header);
                }
            }
            self.table_row(&geometry, row);
        }
    }

    fn table_row(&mut self, geometry: &TableGeometry, row: &TableRow) {
        let style = RowStyle::for_row(row);
        let height = style.height();
        let bottom = self.cursor - height;

        self.fill_rect(style.background, geometry.x, bottom, geometry.width(), height);

        let baseline =
            bottom + style.padding_bottom + style.size * (CELL_LEADING_FACTOR - 1.0);
        for ((left, width), cell) in geometry.columns().zip(row.cells.iter()) {
            let fitted = truncate_to_width(
                cell,
                style.font,
                style.size,
                width - 2.0 * CELL_PADDING_X,
            );
            let x = left + (width - style.font.text_width(&fitted, style.size)) / 2.0;
            self.text(style.font, style.size, style.text, x, baseline, &fitted);
        }

        for (left, width) in geometry.columns() {
            self.stroke_rect(left, bottom, width, height);
        }

        self.advance(height);
    }
}

impl Rgb {
    fn operands(self) -> Vec<Object> {
        vec![pt(self.0), pt(self.1), pt(self.2)]
    }
}

/// A number operand, rounded to 1/100 pt.
fn pt(value: f32) -> Object {
    Object::Real((value * 100.0).round() / 100.0)
}

// =============================================================================
// Document Assembly
// =============================================================================

fn write_document(
    pages: Vec<Vec<Operation>>,
    style: &DocumentStyle,
    title: &str,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), Object::Reference(font_id));
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let (width, height) = style.page_size.dimensions();
    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "Contents" => Object::Reference(content_id),
            "MediaBox" => vec![pt(0.0), pt(0.0), pt(width), pt(height)],
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => Object::Reference(resources_id),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::String(PRODUCER.as_bytes().to_vec(), StringFormat::Literal),
    });
    doc.trailer.set("Info", Object::Reference(info_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| RenderError::Save(e.to_string()))?;
    Ok(buffer)
}
