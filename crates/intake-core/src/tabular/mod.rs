//! Spreadsheet grid ingestion: header location, column mapping, and row
//! normalization.
//!
//! The grid itself is loaded by an external collaborator; this module only
//! consumes in-memory cell values.

mod header;
mod rows;

pub use header::{ColumnMap, HEADER_SCAN_ROWS, HeaderScan, locate_header};
pub use rows::normalize_row;

pub(crate) use rows::strip_numeric_suffix;

use tracing::debug;

use crate::models::config::ColumnVocabulary;
use crate::models::item::NormalizedItem;

/// A single spreadsheet cell as handed over by the loading collaborator.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Whether the cell carries no data (empty, or blank text).
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Generic string form, used for header matching and text fields.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// Spreadsheet parser turning a raw cell grid into normalized items.
pub struct SheetParser {
    vocabulary: ColumnVocabulary,
}

impl SheetParser {
    pub fn new() -> Self {
        Self {
            vocabulary: ColumnVocabulary::default(),
        }
    }

    /// Use an alternate column vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: ColumnVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Parse a grid: locate the header, then normalize every data row
    /// below it. Rows that fail normalization are dropped silently.
    pub fn parse(&self, grid: &[Vec<CellValue>]) -> Vec<NormalizedItem> {
        let scan = locate_header(grid, &self.vocabulary);

        let items: Vec<NormalizedItem> = grid
            .iter()
            .skip(scan.row + 1)
            .filter_map(|row| normalize_row(row, &scan.columns))
            .collect();

        debug!(
            header_row = scan.row,
            items = items.len(),
            "parsed tabular source"
        );
        items
    }
}

impl Default for SheetParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a spreadsheet grid into normalized items with the default
/// vocabulary.
pub fn parse_tabular_source(grid: &[Vec<CellValue>]) -> Vec<NormalizedItem> {
    SheetParser::new().parse(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> Vec<Vec<CellValue>> {
        vec![
            vec![
                CellValue::from("Decathlon SKU"),
                CellValue::from("QTY"),
                CellValue::from("Unit Cost without VAT"),
                CellValue::from("Unit Retail With VAT"),
            ],
            vec![
                CellValue::from("8569472"),
                CellValue::from(10.0),
                CellValue::from(50.5),
                CellValue::from(100.0),
            ],
            vec![
                CellValue::from(""),
                CellValue::from(""),
                CellValue::from(""),
                CellValue::from(""),
            ],
            vec![
                CellValue::from("8569473.0"),
                CellValue::from(2.0),
                CellValue::from(10.0),
                CellValue::from(20.0),
            ],
        ]
    }

    #[test]
    fn test_parse_skips_empty_rows() {
        let items = parse_tabular_source(&sample_grid());

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].sku, "8569472");
        assert_eq!(items[1].sku, "8569473");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let grid = sample_grid();
        let first = parse_tabular_source(&grid);
        let second = parse_tabular_source(&grid);

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_grid_yields_no_items() {
        assert!(parse_tabular_source(&[]).is_empty());
    }
}
