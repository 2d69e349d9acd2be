//! Create an invoice and download its documents.
//!
//! Creates a sample invoice, then saves it as PDF, UBL BIS3 XML and Facturae
//! XML. A format the account cannot produce is reported and skipped.
//!
//! ```text
//! B2B_API_KEY=... B2B_ACCOUNT_ID=... cargo run -p download-invoice-documents
//! ```

#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

mod sample;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use b2brouter::prelude::*;
use chrono::NaiveDate;
use clap::Parser;
use derive_more::{Display, Error as DeriveError, From};
use tracing::{debug, info};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Create an invoice and download it in several formats.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Account the invoice is created in.
    #[arg(long, env = "B2B_ACCOUNT_ID")]
    account_id: String,

    /// Directory receiving the downloaded documents.
    #[arg(long, env = "B2B_OUTPUT_DIR", default_value = "output")]
    output_dir: PathBuf,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Failure of the demo workflow.
#[derive(Debug, Display, DeriveError, From)]
enum DemoError {
    /// The SDK call failed.
    #[display("{_0}")]
    Api(b2brouter::Error),
    /// Writing output failed.
    #[display("I/O error: {_0}")]
    Io(std::io::Error),
}

/// A document to download, with how it is saved and reported.
struct Download {
    format: DocumentFormat,
    label: &'static str,
    file_suffix: &'static str,
    unavailable_note: &'static str,
}

fn downloads() -> [Download; 3] {
    [
        Download {
            format: DocumentFormat::PdfInvoice,
            label: "PDF",
            file_suffix: ".pdf",
            unavailable_note: "The invoice may need to be sent before PDF is available",
        },
        Download {
            format: DocumentFormat::UblBis3,
            label: "UBL BIS3",
            file_suffix: "-ubl.xml",
            unavailable_note: "UBL format may not be configured for this account",
        },
        Download {
            format: DocumentFormat::Facturae322,
            label: "Facturae 3.2.2",
            file_suffix: "-facturae.xml",
            unavailable_note: "Expected for non-Spanish invoices",
        },
    ]
}

/// What happened to one download.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Saved { path: PathBuf, size: usize },
    Unavailable(String),
}

/// Summary of a completed run.
#[derive(Debug)]
struct Report {
    invoice_id: String,
    invoice_number: String,
    total: f64,
    outcomes: Vec<(DocumentFormat, Outcome)>,
}

async fn run<C: HttpClient>(
    client: &B2BRouterClient<C>,
    account_id: &str,
    output_dir: &Path,
    today: NaiveDate,
    seq: u32,
    out: &mut impl Write,
) -> std::result::Result<Report, DemoError> {
    std::fs::create_dir_all(output_dir)?;

    writeln!(out, "Step 1: Creating invoice...")?;
    let number = sample::invoice_number(today, seq);
    let params = to_params(&sample::sample_invoice(&number, today))?;
    let created = client.invoices().create(account_id, &params).await?;
    let invoice = created.get("invoice").unwrap_or(&created);

    let invoice_id = scalar(&invoice["id"]);
    let invoice_number = invoice["number"].as_str().unwrap_or(&number).to_string();
    let total = amount(&invoice["total"]);
    info!(%invoice_id, %invoice_number, "invoice created");

    writeln!(out, "✓ Invoice created successfully!")?;
    writeln!(out, "  ID: {invoice_id}")?;
    writeln!(out, "  Number: {invoice_number}")?;
    writeln!(out, "  Subtotal: €{}", format_amount(amount(&invoice["subtotal"])))?;
    writeln!(
        out,
        "  Total: €{} {}",
        format_amount(total),
        scalar(&invoice["currency"])
    )?;
    writeln!(out, "  State: {}\n", scalar(&invoice["state"]))?;

    let mut outcomes = Vec::new();
    for (step, download) in (2..).zip(downloads()) {
        writeln!(
            out,
            "Step {step}: Downloading invoice as {} ({})...",
            download.label, download.format
        )?;

        let outcome = match client
            .invoices()
            .download_as(&invoice_id, download.format.clone(), &Params::new())
            .await
        {
            Ok(data) => {
                let file_name = format!("{}{}", file_stem(&invoice_number), download.file_suffix);
                let path = output_dir.join(file_name);
                std::fs::write(&path, &data)?;
                writeln!(out, "✓ {} downloaded successfully!", download.label)?;
                writeln!(out, "  File: {}", path.display())?;
                writeln!(out, "  Size: {} bytes\n", group_thousands(&data.len().to_string()))?;
                Outcome::Saved {
                    path,
                    size: data.len(),
                }
            }
            Err(err) if err.is_not_found() => {
                let message = err
                    .api_error()
                    .map_or_else(|| err.to_string(), |api| api.message().to_string());
                debug!(format = %download.format, %message, "format not available");
                writeln!(out, "✗ {} not available: {message}", download.label)?;
                writeln!(out, "  Note: {}\n", download.unavailable_note)?;
                Outcome::Unavailable(message)
            }
            Err(err) => return Err(err.into()),
        };
        outcomes.push((download.format, outcome));
    }

    writeln!(out, "{}", "-".repeat(60))?;
    writeln!(out, "Summary:")?;
    writeln!(out, "  Invoice: {invoice_number} (ID: {invoice_id})")?;
    writeln!(out, "  Total Amount: €{}", format_amount(total))?;
    writeln!(out, "  Downloads saved to: {}/", output_dir.display())?;

    Ok(Report {
        invoice_id,
        invoice_number,
        total,
        outcomes,
    })
}

/// File-name-safe form of an invoice number.
///
/// Keeps ASCII alphanumerics, `-`, `_` and inner dots; everything else,
/// path separators included, becomes `_`.
fn file_stem(number: &str) -> String {
    let stem: String = number
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_start_matches('.');
    if stem.is_empty() {
        "invoice".to_string()
    } else {
        stem.to_string()
    }
}

/// Render a JSON scalar without quotes.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Read an amount sent either as a number or as a decimal string.
fn amount(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    }
}

/// Two decimals with thousands separators, e.g. `1,815.00`.
fn format_amount(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let (sign, digits) = int.strip_prefix('-').map_or(("", int), |d| ("-", d));
    format!("{sign}{}.{frac}", group_thousands(digits))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn print_next_steps(report: &Report) {
    println!("\nNext steps:");
    for (format, outcome) in &report.outcomes {
        match outcome {
            Outcome::Saved { path, size } => {
                println!("  - View {format} ({size} bytes): open {}", path.display());
            }
            Outcome::Unavailable(reason) => println!("  - {format} skipped: {reason}"),
        }
    }
    println!(
        "  - Send {} to its recipient once the documents look right",
        report.invoice_number
    );
}

/// Print an error with its status and JSON details.
fn report_error(err: &DemoError) {
    eprintln!("✗ Error: {err}");
    if let DemoError::Api(b2brouter::Error::Api(api)) = err {
        eprintln!("  Status: {}", api.status());
        if let Some(details) = api
            .json_body()
            .and_then(|body| serde_json::to_string_pretty(body).ok())
        {
            eprintln!("  Details:");
            eprintln!("  {}", details.replace('\n', "\n  "));
        }
    }
}

fn init_tracing(verbose: u8) {
    let base_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        match verbose {
            0 => "warn",
            1 => "warn,b2brouter=info,download_invoice_documents=info",
            _ => "info,b2brouter=debug,b2brouter_core=debug,download_invoice_documents=debug",
        }
        .to_string()
    });

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("✗ {err}");
            eprintln!(
                "  Set {} (and optionally {}, {})",
                b2brouter::ENV_API_KEY,
                b2brouter::ENV_API_VERSION,
                b2brouter::ENV_API_BASE
            );
            return ExitCode::FAILURE;
        }
    };

    let transport = HyperClient::builder()
        .timeout(config.timeout())
        .with_logging()
        .build();
    let client = B2BRouterClient::with_transport(config, transport);

    let today = chrono::Local::now().date_naive();
    let mut stdout = std::io::stdout().lock();

    match run(
        &client,
        &args.account_id,
        &args.output_dir,
        today,
        sample::clock_seq(),
        &mut stdout,
    )
    .await
    {
        Ok(report) => {
            debug!(invoice_id = %report.invoice_id, total = report.total, "run completed");
            print_next_steps(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}
