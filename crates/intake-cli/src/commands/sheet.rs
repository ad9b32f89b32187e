//! Sheet command - parse a supporting spreadsheet into normalized items.

use std::fs;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};
use clap::Args;
use console::style;

use intake_core::{CellValue, NormalizedItem, SheetError, SheetParser};

use super::extract::OutputFormat;

/// Arguments for the sheet command.
#[derive(Args)]
pub struct SheetArgs {
    /// Spreadsheet file (.xlsx, .xls, .ods or .csv)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

pub async fn run(args: SheetArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let grid = load_grid(&args.input)?;
    let parser = SheetParser::new().with_vocabulary(config.columns.clone());
    let items = parser.parse(&grid);

    let output = format_items(&items, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} items written to {}",
            style("✓").green(),
            items.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Load a spreadsheet into the engine's cell grid model.
///
/// Any read failure maps to [`SheetError::Unreadable`], so callers can fall
/// back to the manually-entered item list.
pub(crate) fn load_grid(path: &Path) -> Result<Vec<Vec<CellValue>>, SheetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => load_workbook(path),
        other => Err(SheetError::Unreadable(format!(
            "unrecognized sheet format: {other}"
        ))),
    }
}

fn load_csv(path: &Path) -> Result<Vec<Vec<CellValue>>, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| SheetError::Unreadable(e.to_string()))?;

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| SheetError::Unreadable(e.to_string()))?;
        grid.push(record.iter().map(CellValue::from).collect());
    }
    Ok(grid)
}

fn load_workbook(path: &Path) -> Result<Vec<Vec<CellValue>>, SheetError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| SheetError::Unreadable(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SheetError::Unreadable("workbook has no sheets".to_string()))?
        .map_err(|e| SheetError::Unreadable(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect())
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

fn format_items(items: &[NormalizedItem], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Csv => format_csv(items),
        OutputFormat::Text => Ok(format_text(items)),
    }
}

fn format_csv(items: &[NormalizedItem]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "sku",
        "model",
        "description",
        "barcode",
        "quantity",
        "unit_cost",
        "unit_retail",
        "color_size",
    ])?;

    for item in items {
        let quantity = item.quantity.to_string();
        let unit_cost = item.unit_cost.to_string();
        let unit_retail = item.unit_retail.to_string();
        wtr.write_record([
            item.sku.as_str(),
            item.model.as_str(),
            item.description.as_str(),
            item.barcode.as_str(),
            quantity.as_str(),
            unit_cost.as_str(),
            unit_retail.as_str(),
            item.color_size.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(items: &[NormalizedItem]) -> String {
    let mut output = String::new();

    for (idx, item) in items.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}. {} x{} (cost {}, retail {})\n",
            idx + 1,
            if item.sku.is_empty() { &item.model } else { &item.sku },
            item.quantity,
            item.unit_cost,
            item.unit_retail
        ));
    }
    output.push_str(&format!("{} items\n", items.len()));

    output
}
