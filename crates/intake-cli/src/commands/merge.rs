//! Merge command - reconcile spreadsheet items with the manual entry list.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::warn;

use intake_core::{ItemReconciler, ManualEntry, MergedLineItem, SheetParser};

use super::extract::OutputFormat;
use super::sheet::load_grid;

/// Arguments for the merge command.
#[derive(Args)]
pub struct MergeArgs {
    /// Supporting spreadsheet with the item lines
    #[arg(required = true)]
    sheet: PathBuf,

    /// JSON file with the manually-entered barcode/model list
    #[arg(short, long)]
    manual: Option<PathBuf>,

    /// Supplier code stamped into every itemcode
    #[arg(short, long, default_value = "")]
    supplier_code: String,

    /// Brand code stamped onto every line
    #[arg(short, long, default_value = "")]
    brand_code: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

pub async fn run(args: MergeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    // An unreadable sheet is not fatal: the manual list takes over as the
    // sole item source.
    let sheet_items = match load_grid(&args.sheet) {
        Ok(grid) => {
            let parser = SheetParser::new().with_vocabulary(config.columns.clone());
            Some(parser.parse(&grid))
        }
        Err(e) => {
            warn!("failed to read {}: {}", args.sheet.display(), e);
            None
        }
    };

    let manual: Vec<ManualEntry> = match &args.manual {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Vec::new(),
    };

    let reconciler =
        ItemReconciler::new(&args.supplier_code).with_brand_code(&args.brand_code);
    let merged = reconciler.reconcile_with_fallback(sheet_items, &manual);

    let output = format_lines(&merged, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} line items written to {}",
            style("✓").green(),
            merged.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_lines(lines: &[MergedLineItem], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(lines)?),
        OutputFormat::Csv => format_csv(lines),
        OutputFormat::Text => Ok(format_text(lines)),
    }
}

fn format_csv(lines: &[MergedLineItem]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "itemcode",
        "sku",
        "model",
        "description",
        "barcode",
        "quantity",
        "unit_cost",
        "unit_retail",
        "color_size",
        "brand_code",
        "supplier_code",
    ])?;

    for line in lines {
        let quantity = line.quantity.to_string();
        let unit_cost = line.unit_cost.to_string();
        let unit_retail = line.unit_retail.to_string();
        wtr.write_record([
            line.itemcode.as_str(),
            line.sku.as_str(),
            line.model.as_str(),
            line.description.as_str(),
            line.barcode.as_str(),
            quantity.as_str(),
            unit_cost.as_str(),
            unit_retail.as_str(),
            line.color_size.as_str(),
            line.brand_code.as_str(),
            line.supplier_code.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(lines: &[MergedLineItem]) -> String {
    let mut output = String::new();

    for line in lines {
        output.push_str(&format!(
            "{} sku={} barcode={} x{}\n",
            line.itemcode, line.sku, line.barcode, line.quantity
        ));
    }
    output.push_str(&format!("{} line items\n", lines.len()));

    output
}
