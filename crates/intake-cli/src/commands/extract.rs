//! Extract command - recover invoice header fields from an OCR text dump.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::info;

use intake_core::{DocumentKind, HeaderFieldExtractor, HeaderFields};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// OCR text dump of the source document
    #[arg(required = true)]
    input: PathBuf,

    /// Original document the text was OCR'd from; used to validate the
    /// source kind before extraction
    #[arg(long)]
    source: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Reference date anchoring the date plausibility window (default: today)
    #[arg(long)]
    reference_date: Option<NaiveDate>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if let Some(source) = &args.source {
        let kind = DocumentKind::from_path(source)?;
        info!(?kind, "source document accepted");
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    let text = fs::read_to_string(&args.input)?;

    let mut extractor = HeaderFieldExtractor::from_rules(&config.fields);
    if let Some(reference) = args.reference_date {
        extractor = extractor.with_reference_date(reference);
    }

    let fields = extractor.extract(&text);
    let output = format_fields(&fields, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_fields(fields: &HeaderFields, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(fields)?),
        OutputFormat::Csv => format_csv(fields),
        OutputFormat::Text => Ok(format_text(fields)),
    }
}

fn format_csv(fields: &HeaderFields) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["invoice_number", "invoice_date", "total_amount", "currency"])?;

    let total = fields
        .total_amount
        .map(|a| a.to_string())
        .unwrap_or_default();
    wtr.write_record([
        fields.invoice_number.as_deref().unwrap_or(""),
        fields.invoice_date.as_deref().unwrap_or(""),
        total.as_str(),
        fields.currency.as_deref().unwrap_or(""),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(fields: &HeaderFields) -> String {
    let missing = "(not found)";
    let mut output = String::new();

    output.push_str(&format!(
        "Invoice number: {}\n",
        fields.invoice_number.as_deref().unwrap_or(missing)
    ));
    output.push_str(&format!(
        "Invoice date:   {}\n",
        fields.invoice_date.as_deref().unwrap_or(missing)
    ));
    match fields.total_amount {
        Some(total) => output.push_str(&format!(
            "Total amount:   {} {}\n",
            total,
            fields.currency.as_deref().unwrap_or("")
        )),
        None => output.push_str(&format!("Total amount:   {missing}\n")),
    }

    output
}
