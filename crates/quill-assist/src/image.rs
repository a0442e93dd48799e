//! Uploaded invoice images.

use base64::Engine;

use crate::error::{AssistError, AssistResult};

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Image formats the assistant accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    /// Detects the format from the leading bytes.
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.starts_with(JPEG_MAGIC) {
            Some(ImageKind::Jpeg)
        } else if data.starts_with(PNG_MAGIC) {
            Some(ImageKind::Png)
        } else {
            None
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
        }
    }
}

/// A JPEG or PNG image ready to be sent inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceImage {
    kind: ImageKind,
    data: Vec<u8>,
}

impl InvoiceImage {
    /// Wraps raw image bytes, rejecting empty buffers and other formats.
    pub fn from_bytes(data: Vec<u8>) -> AssistResult<Self> {
        if data.is_empty() {
            return Err(AssistError::MissingImage);
        }
        let kind = ImageKind::detect(&data).ok_or(AssistError::UnsupportedImage)?;
        Ok(InvoiceImage { kind, data })
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    pub fn mime_type(&self) -> &'static str {
        self.kind.mime_type()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Standard base64 of the image bytes.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png() -> Vec<u8> {
        let mut data = PNG_MAGIC.to_vec();
        data.extend_from_slice(&[0, 0, 0, 13, b'I', b'H', b'D', b'R']);
        data
    }

    #[test]
    fn test_detects_jpeg_and_png() {
        let jpeg = InvoiceImage::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00]).unwrap();
        assert_eq!(jpeg.mime_type(), "image/jpeg");

        let png = InvoiceImage::from_bytes(tiny_png()).unwrap();
        assert_eq!(png.kind(), ImageKind::Png);
        assert_eq!(png.mime_type(), "image/png");
    }

    #[test]
    fn test_rejects_empty_buffer() {
        assert!(matches!(
            InvoiceImage::from_bytes(Vec::new()),
            Err(AssistError::MissingImage)
        ));
    }

    #[test]
    fn test_rejects_other_formats() {
        // GIF89a
        let gif = b"GIF89a\x01\x00\x01\x00".to_vec();
        assert!(matches!(
            InvoiceImage::from_bytes(gif),
            Err(AssistError::UnsupportedImage)
        ));
        assert!(matches!(
            InvoiceImage::from_bytes(b"%PDF-1.5".to_vec()),
            Err(AssistError::UnsupportedImage)
        ));
    }

    #[test]
    fn test_base64() {
        let image = InvoiceImage::from_bytes(vec![0xFF, 0xD8, 0xFF]).unwrap();
        assert_eq!(image.to_base64(), "/9j/");
    }
}
