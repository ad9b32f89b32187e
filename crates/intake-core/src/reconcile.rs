//! Reconciliation of spreadsheet items with the manually-entered list.
//!
//! The two lists are paired positionally: the Nth spreadsheet row matches
//! the Nth manual entry, on the assumption that the UI and the spreadsheet
//! present items in the same order. Manual input is authoritative for
//! barcode and model, since spreadsheet and OCR sources are unreliable for
//! those fields.

use tracing::{debug, warn};

use crate::models::item::{ManualEntry, MergedLineItem, NormalizedItem};
use crate::tabular::strip_numeric_suffix;

/// Fixed season placeholder used in composite item codes.
pub const SEASON_PLACEHOLDER: &str = "000";

/// Supplier code used when the selected supplier has none on record.
const DEFAULT_SUPPLIER_CODE: &str = "0000";

/// Compose the downstream item key: season + supplier code + SKU.
pub fn generate_itemcode(season: &str, supplier_code: &str, sku: &str) -> String {
    format!("{season}{supplier_code}{sku}")
}

/// Positional item reconciler.
pub struct ItemReconciler {
    supplier_code: String,
    brand_code: String,
}

impl ItemReconciler {
    pub fn new(supplier_code: &str) -> Self {
        let supplier_code = if supplier_code.is_empty() {
            DEFAULT_SUPPLIER_CODE
        } else {
            supplier_code
        };
        Self {
            supplier_code: supplier_code.to_string(),
            brand_code: String::new(),
        }
    }

    /// Stamp a brand code onto every merged item.
    pub fn with_brand_code(mut self, brand_code: &str) -> Self {
        self.brand_code = brand_code.to_string();
        self
    }

    /// Merge the spreadsheet-derived items with the manual list.
    ///
    /// Items without a SKU are dropped: they cannot form a valid itemcode.
    pub fn reconcile(
        &self,
        items: &[NormalizedItem],
        manual: &[ManualEntry],
    ) -> Vec<MergedLineItem> {
        let mut merged = Vec::with_capacity(items.len());

        for (idx, item) in items.iter().enumerate() {
            if item.sku.is_empty() {
                debug!(row = idx + 1, "dropping row without a SKU");
                continue;
            }

            // A manual list shorter than the sheet reads as absent entries
            let entry = manual.get(idx);
            let manual_barcode = entry
                .map(|e| strip_numeric_suffix(e.barcode.trim().to_string()))
                .unwrap_or_default();
            let manual_model = entry
                .map(|e| strip_numeric_suffix(e.model.trim().to_string()))
                .unwrap_or_default();

            let model = if manual_model.is_empty() {
                item.model.clone()
            } else {
                manual_model
            };

            merged.push(MergedLineItem {
                sku: item.sku.clone(),
                model,
                description: item.description.clone(),
                barcode: manual_barcode,
                quantity: item.quantity,
                unit_cost: item.unit_cost,
                unit_retail: item.unit_retail,
                color_size: format!("{SEASON_PLACEHOLDER}|{}", item.sku),
                itemcode: generate_itemcode(SEASON_PLACEHOLDER, &self.supplier_code, &item.sku),
                brand_code: self.brand_code.clone(),
                supplier_code: self.supplier_code.clone(),
            });
        }

        debug!(
            merged = merged.len(),
            source = items.len(),
            "reconciled item lists"
        );
        merged
    }

    /// Reconcile with source fallback.
    ///
    /// `None` for the sheet items means the tabular source was unreadable;
    /// the manual list then becomes the sole item source. With nothing
    /// available at all the result is an empty list, never an error: the
    /// surrounding flow allows a document to be recorded with zero items
    /// and corrected later.
    pub fn reconcile_with_fallback(
        &self,
        sheet_items: Option<Vec<NormalizedItem>>,
        manual: &[ManualEntry],
    ) -> Vec<MergedLineItem> {
        let items = match sheet_items {
            Some(items) => items,
            None => {
                warn!("sheet source unreadable; using manual entries as the only item source");
                manual.iter().map(NormalizedItem::from).collect()
            }
        };
        self.reconcile(&items, manual)
    }
}

impl From<&ManualEntry> for NormalizedItem {
    fn from(entry: &ManualEntry) -> Self {
        let model = strip_numeric_suffix(entry.model.trim().to_string());
        NormalizedItem {
            barcode: strip_numeric_suffix(entry.barcode.trim().to_string()),
            color_size: format!("{SEASON_PLACEHOLDER}|{model}"),
            model,
            ..NormalizedItem::default()
        }
    }
}

/// Merge spreadsheet-derived items with the manual list under the given
/// supplier code.
pub fn reconcile_items(
    items: &[NormalizedItem],
    manual: &[ManualEntry],
    supplier_code: &str,
) -> Vec<MergedLineItem> {
    ItemReconciler::new(supplier_code).reconcile(items, manual)
}

/// [`reconcile_items`] with the unreadable-sheet fallback semantics of
/// [`ItemReconciler::reconcile_with_fallback`].
pub fn reconcile_with_fallback(
    sheet_items: Option<Vec<NormalizedItem>>,
    manual: &[ManualEntry],
    supplier_code: &str,
) -> Vec<MergedLineItem> {
    ItemReconciler::new(supplier_code).reconcile_with_fallback(sheet_items, manual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::{CellValue, parse_tabular_source};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn item(sku: &str, model: &str) -> NormalizedItem {
        NormalizedItem {
            sku: sku.to_string(),
            model: model.to_string(),
            ..NormalizedItem::default()
        }
    }

    fn entry(barcode: &str, model: &str) -> ManualEntry {
        ManualEntry {
            barcode: barcode.to_string(),
            model: model.to_string(),
        }
    }

    #[test]
    fn test_manual_barcode_is_authoritative() {
        let items = vec![NormalizedItem {
            barcode: "spreadsheet-barcode".to_string(),
            ..item("8569472", "TREK-500")
        }];
        let manual = vec![entry("5012345678900", "")];

        let merged = reconcile_items(&items, &manual, "5432");
        assert_eq!(merged[0].barcode, "5012345678900");
    }

    #[test]
    fn test_model_falls_back_to_sheet_value() {
        let items = vec![item("8569472", "TREK-500")];

        let merged = reconcile_items(&items, &[entry("123", "")], "5432");
        assert_eq!(merged[0].model, "TREK-500");

        let merged = reconcile_items(&items, &[entry("123", "OVERRIDE-1")], "5432");
        assert_eq!(merged[0].model, "OVERRIDE-1");
    }

    #[test]
    fn test_manual_values_are_normalized() {
        let items = vec![item("8569472", "")];
        let manual = vec![entry(" 123456789.0 ", "TREK-500.0")];

        let merged = reconcile_items(&items, &manual, "5432");
        assert_eq!(merged[0].barcode, "123456789");
        assert_eq!(merged[0].model, "TREK-500");
    }

    #[test]
    fn test_itemcode_composition() {
        let merged = reconcile_items(&[item("8569472", "")], &[], "5432");
        assert_eq!(merged[0].itemcode, "00054328569472");
        assert_eq!(merged[0].supplier_code, "5432");
    }

    #[test]
    fn test_missing_supplier_code_defaults() {
        let merged = reconcile_items(&[item("8569472", "")], &[], "");
        assert_eq!(merged[0].itemcode, "00000008569472");
        assert_eq!(merged[0].supplier_code, "0000");
    }

    #[test]
    fn test_items_without_sku_dropped() {
        let items = vec![item("", "TREK-500"), item("8569472", "")];

        let merged = reconcile_items(&items, &[], "5432");
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].sku, "8569472");
    }

    #[test]
    fn test_shorter_manual_list_reads_as_absent() {
        let items = vec![item("111", ""), item("222", "")];
        let manual = vec![entry("5012345678900", "")];

        let merged = reconcile_items(&items, &manual, "5432");
        assert_eq!(merged[0].barcode, "5012345678900");
        assert_eq!(merged[1].barcode, "");
    }

    #[test]
    fn test_brand_code_stamped() {
        let merged = ItemReconciler::new("5432")
            .with_brand_code("54")
            .reconcile(&[item("8569472", "")], &[]);

        assert_eq!(merged[0].brand_code, "54");
    }

    #[test]
    fn test_fallback_to_manual_source_yields_no_coded_items() {
        // Manual entries carry no SKU, so they cannot form itemcodes; the
        // document is recorded with zero items rather than failing.
        let manual = vec![entry("5012345678900", "TREK-500")];

        let merged = reconcile_with_fallback(None, &manual, "5432");
        assert!(merged.is_empty());
    }

    #[test]
    fn test_nothing_available_yields_empty_list() {
        assert!(reconcile_with_fallback(None, &[], "5432").is_empty());
    }

    #[test]
    fn test_grid_to_merged_items_end_to_end() {
        let grid = vec![
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
        ];
        let manual = vec![entry("123456789", "")];

        let items = parse_tabular_source(&grid);
        let merged = reconcile_items(&items, &manual, "5432");

        assert_eq!(merged.len(), 1);
        let line = &merged[0];
        assert_eq!(line.sku, "8569472");
        assert_eq!(line.barcode, "123456789");
        assert_eq!(line.quantity, Decimal::from_str("10").unwrap());
        assert_eq!(line.unit_cost, Decimal::from_str("50.5").unwrap());
        assert_eq!(line.unit_retail, Decimal::from_str("100").unwrap());
        assert_eq!(line.itemcode, "00054328569472");
        assert_eq!(line.color_size, "000|8569472");
    }
}
