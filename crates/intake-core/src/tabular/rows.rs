//! Data row normalization and type coercion.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::CellValue;
use super::header::ColumnMap;
use crate::models::config::ColumnField;
use crate::models::item::NormalizedItem;

/// Normalize one data row into an item, or decide to discard it.
///
/// A row with every cell empty is skipped outright; a row survives only if
/// at least one of SKU, model, or barcode is non-empty after cleaning.
/// Numeric fields never fail: unparseable or missing cells coerce to zero.
pub fn normalize_row(row: &[CellValue], columns: &ColumnMap) -> Option<NormalizedItem> {
    if row.iter().all(CellValue::is_empty) {
        return None;
    }

    let sku = strip_numeric_suffix(text_at(row, columns, ColumnField::Sku));
    let model = strip_numeric_suffix(text_at(row, columns, ColumnField::Model));
    let description = text_at(row, columns, ColumnField::Description);
    let barcode = barcode_at(row, columns);

    if sku.is_empty() && model.is_empty() && barcode.is_empty() {
        return None;
    }

    let color_size = if sku.is_empty() {
        format!("000|{model}")
    } else {
        format!("000|{sku}")
    };

    Some(NormalizedItem {
        quantity: decimal_at(row, columns, ColumnField::Quantity),
        unit_cost: decimal_at(row, columns, ColumnField::UnitCost),
        unit_retail: decimal_at(row, columns, ColumnField::UnitRetail),
        sku,
        model,
        description,
        barcode,
        color_size,
    })
}

/// Strip the trailing `.0` artifact left by numeric-to-text coercion.
pub(crate) fn strip_numeric_suffix(value: String) -> String {
    match value.strip_suffix(".0") {
        Some(stripped) => stripped.to_string(),
        None => value,
    }
}

fn cell_at<'a>(
    row: &'a [CellValue],
    columns: &ColumnMap,
    field: ColumnField,
) -> Option<&'a CellValue> {
    columns.get(field).and_then(|idx| row.get(idx))
}

fn text_at(row: &[CellValue], columns: &ColumnMap, field: ColumnField) -> String {
    cell_at(row, columns, field)
        .map(|cell| cell.to_text().trim().to_string())
        .unwrap_or_default()
}

/// Barcodes from numeric cells are rendered with zero decimal places, so
/// spreadsheet numbers do not leak scientific notation or `.0` artifacts.
fn barcode_at(row: &[CellValue], columns: &ColumnMap) -> String {
    match cell_at(row, columns, ColumnField::Barcode) {
        Some(CellValue::Number(n)) => format!("{n:.0}"),
        Some(cell) => strip_numeric_suffix(cell.to_text().trim().to_string()),
        None => String::new(),
    }
}

fn decimal_at(row: &[CellValue], columns: &ColumnMap, field: ColumnField) -> Decimal {
    match cell_at(row, columns, field) {
        Some(CellValue::Number(n)) => Decimal::try_from(*n).unwrap_or(Decimal::ZERO),
        Some(CellValue::Text(s)) => Decimal::from_str(s.trim()).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::ColumnVocabulary;
    use crate::tabular::header::locate_header;

    fn columns() -> ColumnMap {
        let header = vec![
            CellValue::from("Decathlon SKU"),
            CellValue::from("Model"),
            CellValue::from("Item Description"),
            CellValue::from("Barcode"),
            CellValue::from("QTY"),
            CellValue::from("Unit Cost"),
            CellValue::from("Unit Retail"),
        ];
        locate_header(&[header], &ColumnVocabulary::default()).columns
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_normalize_full_row() {
        let row = vec![
            CellValue::from("8569472"),
            CellValue::from("TREK-500"),
            CellValue::from("Trekking pole"),
            CellValue::from("5012345678900"),
            CellValue::from(10.0),
            CellValue::from(50.5),
            CellValue::from(100.0),
        ];

        let item = normalize_row(&row, &columns()).unwrap();
        assert_eq!(item.sku, "8569472");
        assert_eq!(item.model, "TREK-500");
        assert_eq!(item.description, "Trekking pole");
        assert_eq!(item.barcode, "5012345678900");
        assert_eq!(item.quantity, dec("10"));
        assert_eq!(item.unit_cost, dec("50.5"));
        assert_eq!(item.unit_retail, dec("100"));
        assert_eq!(item.color_size, "000|8569472");
    }

    #[test]
    fn test_trailing_point_zero_stripped() {
        let row = vec![
            CellValue::from("8569472.0"),
            CellValue::from("MODEL-1.0"),
            CellValue::Empty,
            CellValue::from("123456789.0"),
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Empty,
        ];

        let item = normalize_row(&row, &columns()).unwrap();
        assert_eq!(item.sku, "8569472");
        assert_eq!(item.model, "MODEL-1");
        assert_eq!(item.barcode, "123456789");
    }

    #[test]
    fn test_numeric_barcode_has_no_decimal_artifacts() {
        let mut row = vec![CellValue::Empty; 7];
        row[3] = CellValue::from(5012345678900.0);

        let item = normalize_row(&row, &columns()).unwrap();
        assert_eq!(item.barcode, "5012345678900");
    }

    #[test]
    fn test_all_empty_row_skipped() {
        let row = vec![CellValue::from(""); 7];
        assert_eq!(normalize_row(&row, &columns()), None);

        let row = vec![CellValue::Empty; 7];
        assert_eq!(normalize_row(&row, &columns()), None);
    }

    #[test]
    fn test_row_without_identifiers_discarded() {
        // Description and quantity alone cannot identify a product line
        let row = vec![
            CellValue::from(""),
            CellValue::from(""),
            CellValue::from("Mystery item"),
            CellValue::from(""),
            CellValue::from(5.0),
            CellValue::Empty,
            CellValue::Empty,
        ];

        assert_eq!(normalize_row(&row, &columns()), None);
    }

    #[test]
    fn test_unparseable_numerics_default_to_zero() {
        let row = vec![
            CellValue::from("8569472"),
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Empty,
            CellValue::from("ten"),
            CellValue::from(""),
            CellValue::Empty,
        ];

        let item = normalize_row(&row, &columns()).unwrap();
        assert_eq!(item.quantity, Decimal::ZERO);
        assert_eq!(item.unit_cost, Decimal::ZERO);
        assert_eq!(item.unit_retail, Decimal::ZERO);
    }

    #[test]
    fn test_color_size_falls_back_to_model() {
        let row = vec![
            CellValue::from(""),
            CellValue::from("TREK-500"),
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Empty,
        ];

        let item = normalize_row(&row, &columns()).unwrap();
        assert_eq!(item.color_size, "000|TREK-500");
    }

    #[test]
    fn test_short_row_treated_as_absent_cells() {
        // Row narrower than the header: missing cells read as empty
        let row = vec![CellValue::from("8569472")];

        let item = normalize_row(&row, &columns()).unwrap();
        assert_eq!(item.sku, "8569472");
        assert_eq!(item.model, "");
        assert_eq!(item.barcode, "");
    }
}
