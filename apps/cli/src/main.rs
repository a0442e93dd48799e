//! # quill
//!
//! Invoice totals, PDF generation and invoice Q&A from the command line.
//!
//! Reads `GOOGLE_API_KEY`, `GEMINI_MODEL`, `GEMINI_API_BASE`,
//! `GEMINI_TIMEOUT_SECS`, `QUILL_CURRENCY` and `QUILL_PAGE_SIZE` from the
//! environment or a `.env` file.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use quill_cli::commands::{self, Delivery};
use quill_cli::config::AppConfig;
use quill_cli::init_tracing;
use quill_core::{Money, Percent};
use quill_pdf::PageSize;

#[derive(Parser)]
#[command(name = "quill", version, about = "Invoice generator and invoice assistant")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a discount and then tax to a subtotal
    Total {
        /// Subtotal, e.g. 200 or 24.98
        #[arg(long)]
        subtotal: Money,
        /// Discount percentage, 0 to 100
        #[arg(long, default_value = "0")]
        discount: Percent,
        /// Tax percentage, 0 to 100
        #[arg(long, default_value = "0")]
        tax: Percent,
        /// Currency label (overrides QUILL_CURRENCY)
        #[arg(long)]
        currency: Option<String>,
    },
    /// Build an invoice PDF from a JSON request
    Generate {
        /// Path to the invoice request JSON
        #[arg(long, value_name = "FILE")]
        request: PathBuf,
        /// Output path (default: invoice.pdf)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// letter or a4 (overrides QUILL_PAGE_SIZE)
        #[arg(long)]
        page_size: Option<PageSize>,
        /// Currency label (overrides QUILL_CURRENCY)
        #[arg(long)]
        currency: Option<String>,
        /// Print an HTML download link instead of writing a file
        #[arg(long)]
        link: bool,
    },
    /// Ask a question about an invoice image
    Ask {
        /// JPEG or PNG invoice image
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,
        /// Question about the invoice
        #[arg(long, default_value = "")]
        question: String,
        /// Model name (overrides GEMINI_MODEL)
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env().context("Invalid configuration")?;
    debug!(?config, "Configuration loaded");

    let output = match cli.command {
        Commands::Total {
            subtotal,
            discount,
            tax,
            currency,
        } => {
            let marker = currency.unwrap_or(config.currency_marker);
            commands::total(subtotal, discount, tax, &marker)
        }
        Commands::Generate {
            request,
            out,
            page_size,
            currency,
            link,
        } => {
            if let Some(page_size) = page_size {
                config.page_size = page_size;
            }
            if let Some(currency) = currency {
                config.currency_marker = currency;
            }
            let request = commands::read_request(&request)?;
            commands::generate(&request, &config.document_style(), &Delivery::new(out, link))?
        }
        Commands::Ask {
            image,
            question,
            model,
        } => {
            if let Some(model) = model {
                config.gemini_model = model;
            }
            commands::ask(&config, image.as_deref(), &question).await?
        }
    };

    println!("{}", output);
    Ok(())
}
