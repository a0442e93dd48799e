//! # quill-assist: Ask the Invoice
//!
//! Answers free-text questions about an invoice image using a multimodal
//! model. Independent of the invoice core: it never sees an
//! `InvoiceRequest`, only pixels.
//!
//! ```no_run
//! # async fn run() -> quill_assist::AssistResult<()> {
//! use quill_assist::{AssistConfig, InvoiceAssistant, InvoiceImage};
//!
//! let assistant = InvoiceAssistant::new(AssistConfig::new("api-key"))?;
//! let image = InvoiceImage::from_bytes(std::fs::read("invoice.png").unwrap_or_default())?;
//! let answer = assistant.ask(&image, "What is the total?").await?;
//! println!("{}", answer);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod image;

pub use client::{InvoiceAssistant, OFF_TOPIC_REPLY, SYSTEM_PROMPT};
pub use config::AssistConfig;
pub use error::{AssistError, AssistResult};
pub use image::{ImageKind, InvoiceImage};
