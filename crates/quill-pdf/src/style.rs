//! # Document Style
//!
//! Page geometry and the few presentation knobs an invoice has.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use quill_core::DEFAULT_CURRENCY_MARKER;

/// One inch in PDF points.
pub const INCH: f32 = 72.0;

// =============================================================================
// Page Size
// =============================================================================

/// Supported paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    /// US Letter, 8.5 × 11 in.
    #[default]
    Letter,
    /// ISO A4, 210 × 297 mm.
    A4,
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.28, 841.89),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Letter => write!(f, "letter"),
            PageSize::A4 => write!(f, "a4"),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "letter" | "us-letter" => Ok(PageSize::Letter),
            "a4" => Ok(PageSize::A4),
            other => Err(format!(
                "Unknown page size: '{}'. Valid options: letter, a4",
                other
            )),
        }
    }
}

// =============================================================================
// Document Style
// =============================================================================

/// Presentation settings for a generated invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStyle {
    /// Paper size.
    pub page_size: PageSize,

    /// Label printed in front of every amount ("Rs.").
    pub currency_marker: String,

    /// Margin on all four sides, in points.
    pub margin: f32,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        DocumentStyle {
            page_size: PageSize::Letter,
            currency_marker: DEFAULT_CURRENCY_MARKER.to_string(),
            margin: INCH,
        }
    }
}

impl DocumentStyle {
    /// Width available to content between the side margins.
    pub fn frame_width(&self) -> f32 {
        self.page_size.dimensions().0 - 2.0 * self.margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_parse() {
        assert_eq!("letter".parse::<PageSize>(), Ok(PageSize::Letter));
        assert_eq!(" A4 ".parse::<PageSize>(), Ok(PageSize::A4));
        assert!("legal".parse::<PageSize>().is_err());
    }

    #[test]
    fn test_default_style() {
        let style = DocumentStyle::default();
        assert_eq!(style.currency_marker, "Rs.");
        assert_eq!(style.page_size, PageSize::Letter);
        assert!((style.frame_width() - 468.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_style_from_partial_json() {
        let style: DocumentStyle = serde_json::from_str(r#"{"page_size": "a4"}"#).unwrap();
        assert_eq!(style.page_size, PageSize::A4);
        assert_eq!(style.currency_marker, "Rs.");
    }
}
