//! Data models for extracted header fields and reconciled line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice-level fields recovered from OCR text.
///
/// Extraction is best-effort: any field may be absent, and callers are
/// expected to route missing values to manual completion rather than
/// treat absence as a failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderFields {
    /// Invoice number as printed on the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    /// Invoice date in `YYYYMMDD` form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,

    /// Grand total of the invoice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,

    /// Normalized currency code found near the winning total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// One product line recovered from a supporting spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedItem {
    /// Supplier-side SKU, cleaned of numeric-coercion artifacts.
    pub sku: String,

    /// Model / article code.
    pub model: String,

    /// Free-text item description.
    pub description: String,

    /// Barcode (EAN/UPC), rendered without decimal artifacts.
    pub barcode: String,

    /// Ordered quantity. Zero when the cell is missing or unparseable.
    pub quantity: Decimal,

    /// Unit cost excluding VAT.
    pub unit_cost: Decimal,

    /// Unit retail price including VAT.
    pub unit_retail: Decimal,

    /// Synthesized `000|<sku-or-model>` colour/size key.
    pub color_size: String,
}

/// A single row of the manually-entered item list, as submitted by the UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualEntry {
    /// Barcode typed or pasted by the operator.
    #[serde(default)]
    pub barcode: String,

    /// Model code typed or pasted by the operator.
    #[serde(default)]
    pub model: String,
}

/// A reconciled line item ready for the downstream ERP feed.
///
/// Created by the reconciler and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedLineItem {
    pub sku: String,
    pub model: String,
    pub description: String,
    pub barcode: String,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    pub unit_retail: Decimal,
    pub color_size: String,

    /// Composite item key: season placeholder + supplier code + SKU.
    pub itemcode: String,

    /// Brand code resolved by the caller.
    pub brand_code: String,

    /// Supplier code resolved by the caller.
    pub supplier_code: String,
}
