//! Core library for invoice intake processing.
//!
//! This crate provides:
//! - Heuristic invoice field extraction from noisy OCR text (invoice
//!   number, invoice date, total amount)
//! - Spreadsheet ingestion: header row location, synonym-based column
//!   mapping, and data row normalization
//! - Positional reconciliation of spreadsheet and manually-entered item
//!   lists into itemcode-bearing line items
//!
//! The engine is pure value-in/value-out: OCR, file loading, and
//! persistence all live with external collaborators. Every entry point is
//! safe to call concurrently for independent documents.

pub mod document;
pub mod error;
pub mod fields;
pub mod models;
pub mod reconcile;
pub mod tabular;

pub use document::{DocumentKind, HeaderFieldExtractor, extract_header_fields};
pub use error::{DocumentError, IntakeError, Result, SheetError};
pub use models::config::{ColumnField, ColumnVocabulary, FieldRules, IntakeConfig, VocabularyEntry};
pub use models::item::{HeaderFields, ManualEntry, MergedLineItem, NormalizedItem};
pub use reconcile::{
    ItemReconciler, SEASON_PLACEHOLDER, generate_itemcode, reconcile_items,
    reconcile_with_fallback,
};
pub use tabular::{
    CellValue, ColumnMap, HeaderScan, SheetParser, locate_header, parse_tabular_source,
};
