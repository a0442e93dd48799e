//! `generate` and `ask` command bodies against real files.

use std::fs;
use std::io;
use std::sync::{Arc, Mutex};

use quill_cli::commands::{self, Delivery, INCOMPLETE_REQUEST_MESSAGE};
use quill_cli::config::AppConfig;
use quill_pdf::DocumentStyle;

const REQUEST_JSON: &str = r#"{
    "company_name": "Acme Traders",
    "billed_to": "Globex",
    "invoice_number": "INV-042",
    "date": "2024-03-15",
    "items": [
        {"name": "Widget", "quantity": 2, "price": "9.99"},
        {"name": "", "quantity": 0, "price": 0},
        {"name": "Gadget", "quantity": 1, "price": 5}
    ],
    "discount_percent": 10,
    "tax_percent": 5
}"#;

#[test]
fn test_read_request_drops_blank_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("request.json");
    fs::write(&path, REQUEST_JSON).unwrap();

    let request = commands::read_request(&path).unwrap();
    let names: Vec<&str> = request.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Widget", "Gadget"]);
}

#[test]
fn test_generate_writes_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let request_path = dir.path().join("request.json");
    let out = dir.path().join("out.pdf");
    fs::write(&request_path, REQUEST_JSON).unwrap();

    let request = commands::read_request(&request_path).unwrap();
    let printed = commands::generate(
        &request,
        &DocumentStyle::default(),
        &Delivery::File(out.clone()),
    )
    .unwrap();

    assert!(printed.contains("Total: Rs.23.61"));
    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_generate_link_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let request_path = dir.path().join("request.json");
    fs::write(&request_path, REQUEST_JSON).unwrap();

    let request = commands::read_request(&request_path).unwrap();
    let printed = commands::generate(&request, &DocumentStyle::default(), &Delivery::Link).unwrap();

    assert!(printed.starts_with(r#"<a href="data:application/octet-stream;base64,JVBER"#));
    assert!(printed.ends_with(r#"download="invoice.pdf">Download Invoice PDF</a>"#));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_generate_link_logs_totals() {
    let logs = CapturedLogs::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_ansi(false)
        .finish();

    let request: quill_core::InvoiceRequest = serde_json::from_str(REQUEST_JSON).unwrap();
    let printed = tracing::subscriber::with_default(subscriber, || {
        commands::generate(
            &request.without_blank_items(),
            &DocumentStyle::default(),
            &Delivery::Link,
        )
        .unwrap()
    });

    assert!(!printed.contains("Total:"));
    let logged = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(logged.contains("Invoice totals"), "logs: {}", logged);
    assert!(logged.contains("subtotal=Rs.24.98"), "logs: {}", logged);
    assert!(logged.contains("total=Rs.23.61"), "logs: {}", logged);
}

#[test]
fn test_generate_rejects_incomplete_request() {
    let dir = tempfile::tempdir().unwrap();
    let request_path = dir.path().join("request.json");
    fs::write(
        &request_path,
        r#"{
            "company_name": "Acme Traders",
            "billed_to": "",
            "invoice_number": "INV-042",
            "date": "2024-03-15",
            "items": [{"name": "Widget", "quantity": 1, "price": 1}]
        }"#,
    )
    .unwrap();

    let request = commands::read_request(&request_path).unwrap();
    let err = commands::generate(&request, &DocumentStyle::default(), &Delivery::Link).unwrap_err();

    assert_eq!(err.to_string(), INCOMPLETE_REQUEST_MESSAGE);
    assert!(format!("{:#}", err).contains("billed_to is required"));
}

#[test]
fn test_read_request_reports_bad_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("request.json");
    fs::write(&path, r#"{"company_name": 5}"#).unwrap();

    let err = commands::read_request(&path).unwrap_err();
    assert!(err.to_string().starts_with("Invalid invoice request"));
}

#[tokio::test]
async fn test_ask_rejects_unsupported_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invoice.gif");
    fs::write(&path, b"GIF89a\x01\x00").unwrap();

    let config = AppConfig::from_lookup(|_| None).unwrap();
    let err = commands::ask(&config, Some(path.as_path()), "Total?").await.unwrap_err();
    assert!(format!("{:#}", err).contains("Unsupported image format"));
}

#[tokio::test]
async fn test_ask_requires_api_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invoice.png");
    fs::write(&path, b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap();

    let config = AppConfig::from_lookup(|_| None).unwrap();
    let err = commands::ask(&config, Some(path.as_path()), "Total?").await.unwrap_err();
    assert!(err.to_string().contains("GOOGLE_API_KEY"));
}
