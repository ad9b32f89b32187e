//! Header row location and canonical column mapping.
//!
//! Locating the header and recording which column holds which field happen
//! in one pass over a candidate row: a row qualifies as the header exactly
//! when the columns it resolves say so.

use std::collections::BTreeMap;

use tracing::debug;

use super::CellValue;
use crate::models::config::{ColumnField, ColumnVocabulary};

/// Headers are assumed near the top; only this many rows are scanned.
pub const HEADER_SCAN_ROWS: usize = 15;

/// Synonyms longer than this may match by substring containment. Shorter
/// labels like "QTY" must match exactly, or they trigger on unrelated text.
const SUBSTRING_MIN_LEN: usize = 5;

/// Mapping from canonical field to zero-based column index.
///
/// A missing field means the sheet does not carry it. A single resolution
/// pass never maps two fields to the same index: a claimed column is
/// consumed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    indices: BTreeMap<ColumnField, usize>,
}

impl ColumnMap {
    pub fn get(&self, field: ColumnField) -> Option<usize> {
        self.indices.get(&field).copied()
    }

    pub fn contains(&self, field: ColumnField) -> bool {
        self.indices.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn insert(&mut self, field: ColumnField, index: usize) {
        self.indices.insert(field, index);
    }
}

/// Result of a header scan: the row picked and the columns it resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderScan {
    /// Zero-based index of the header row.
    pub row: usize,
    pub columns: ColumnMap,
}

/// Locate the header row within the first [`HEADER_SCAN_ROWS`] rows.
///
/// A row qualifies when it resolves the SKU column, or the barcode column
/// plus at least one other field. If no row qualifies, row 0 is assumed
/// and matched exactly (no substring rule) as a last resort, which may
/// yield an incomplete map.
pub fn locate_header(grid: &[Vec<CellValue>], vocabulary: &ColumnVocabulary) -> HeaderScan {
    for (row_idx, row) in grid.iter().take(HEADER_SCAN_ROWS).enumerate() {
        let columns = match_row(row, vocabulary, true);

        if columns.contains(ColumnField::Sku)
            || (columns.contains(ColumnField::Barcode) && columns.len() >= 2)
        {
            debug!(row = row_idx, fields = columns.len(), "header row located");
            return HeaderScan { row: row_idx, columns };
        }
    }

    debug!("no header row qualified; assuming row 0 with exact matching");
    let columns = grid
        .first()
        .map(|row| match_row(row, vocabulary, false))
        .unwrap_or_default();
    HeaderScan { row: 0, columns }
}

/// Resolve the columns of one candidate row against the vocabulary.
///
/// Fields are walked in vocabulary order; for each field the first
/// unclaimed matching column wins.
fn match_row(row: &[CellValue], vocabulary: &ColumnVocabulary, allow_substring: bool) -> ColumnMap {
    let mut columns = ColumnMap::default();
    let mut claimed = vec![false; row.len()];

    for entry in vocabulary.entries() {
        if columns.contains(entry.field) {
            continue;
        }

        'cols: for (idx, cell) in row.iter().enumerate() {
            if claimed[idx] {
                continue;
            }
            let cell_text = cell.to_text().trim().to_lowercase();
            if cell_text.is_empty() {
                continue;
            }

            for label in &entry.labels {
                let label = label.to_lowercase();
                let matched = cell_text == label
                    || (allow_substring
                        && label.len() > SUBSTRING_MIN_LEN
                        && cell_text.contains(&label));
                if matched {
                    columns.insert(entry.field, idx);
                    claimed[idx] = true;
                    break 'cols;
                }
            }
        }
    }

    columns
}
