//! HTML download link for a generated PDF.

use base64::Engine;

/// File name offered to the browser.
pub const DOWNLOAD_FILE_NAME: &str = "invoice.pdf";

/// Base64 `data:` URI carrying `bytes`.
pub fn data_uri(bytes: &[u8]) -> String {
    format!(
        "data:application/octet-stream;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Anchor element that downloads `bytes` as [`DOWNLOAD_FILE_NAME`].
pub fn download_link(bytes: &[u8]) -> String {
    format!(
        r#"<a href="{}" download="{}">Download Invoice PDF</a>"#,
        data_uri(bytes),
        DOWNLOAD_FILE_NAME
    )
}
