//! Configuration structures for the extraction engine.
//!
//! The synonym vocabulary and field-matcher rules are plain data loaded from
//! JSON, so new document formats can be supported by editing configuration
//! rather than code.

use serde::{Deserialize, Serialize};

use crate::error::{IntakeError, Result};

/// Canonical item attributes that downstream logic depends on by name,
/// independent of the header label used in any particular spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnField {
    /// Supplier-side SKU.
    #[serde(rename = "decathlon_sku")]
    Sku,
    /// Model / article code.
    Model,
    /// Free-text description.
    #[serde(rename = "item_description")]
    Description,
    /// Ordered quantity.
    Quantity,
    /// Unit cost excluding VAT.
    UnitCost,
    /// Unit retail price including VAT.
    UnitRetail,
    /// Barcode (EAN/UPC/GTIN).
    Barcode,
}

/// One vocabulary row: a canonical field and the header labels naming it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub field: ColumnField,
    /// Accepted header spellings, matched case-insensitively.
    pub labels: Vec<String>,
}

/// Ordered table mapping canonical column fields to accepted header labels.
///
/// Resolution walks entries in table order, so earlier fields claim
/// contested columns first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnVocabulary {
    entries: Vec<VocabularyEntry>,
}

impl ColumnVocabulary {
    pub fn new(entries: Vec<VocabularyEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }
}

impl Default for ColumnVocabulary {
    fn default() -> Self {
        let entry = |field, labels: &[&str]| VocabularyEntry {
            field,
            labels: labels.iter().map(|s| s.to_string()).collect(),
        };

        Self {
            entries: vec![
                entry(
                    ColumnField::Sku,
                    &["Decathlon SKU", "Decathlon SKU #", "SKU #", "SKU", "Model Code", "Item Code"],
                ),
                entry(
                    ColumnField::Model,
                    &[
                        "Model",
                        "Model Code",
                        "Item Code",
                        "Model #",
                        "Item #",
                        "Article #",
                        "Style",
                        "Article Code",
                        "Product Code",
                    ],
                ),
                entry(
                    ColumnField::Description,
                    &[
                        "Item Description",
                        "Description",
                        "Product Description",
                        "Product Name",
                        "Name",
                        "Title",
                    ],
                ),
                entry(ColumnField::Quantity, &["QTY", "Qty", "Quantity", "Units"]),
                entry(
                    ColumnField::UnitCost,
                    &["Unit Cost without VAT", "Foreign FOB", "Unit Cost", "Cost", "Cost Price"],
                ),
                entry(
                    ColumnField::UnitRetail,
                    &["Unit Retail With VAT", "Unit Retail", "Retail Price", "RRP", "Unit Price"],
                ),
                entry(
                    ColumnField::Barcode,
                    &["Barcode", "EAN", "UPC", "GTIN", "International Code"],
                ),
            ],
        }
    }
}

/// Rules for the invoice-level field matchers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldRules {
    /// Tokens rejected as invoice-number candidates (compared uppercased).
    pub number_stoplist: Vec<String>,

    /// Minimum accepted invoice-number length.
    pub number_min_len: usize,

    /// Maximum accepted invoice-number length.
    pub number_max_len: usize,

    /// Days before the reference date an invoice date may plausibly fall.
    pub date_past_window_days: i64,

    /// Days after the reference date an invoice date may plausibly fall.
    pub date_future_window_days: i64,

    /// Exclusive upper bound for a plausible invoice total.
    pub amount_max: u64,
}

impl Default for FieldRules {
    fn default() -> Self {
        Self {
            number_stoplist: ["PAGE", "TOTAL", "DATE", "NOTES", "TERMS", "AMOUNT", "REF", "NO"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            number_min_len: 2,
            number_max_len: 30,
            date_past_window_days: 730,
            date_future_window_days: 30,
            amount_max: 100_000_000,
        }
    }
}

/// Main configuration for the intake extraction engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Invoice field matcher rules.
    pub fields: FieldRules,

    /// Spreadsheet column vocabulary.
    pub columns: ColumnVocabulary,
}

impl IntakeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| IntakeError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| IntakeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
