//! Error types for the intake-core library.

use thiserror::Error;

/// Main error type for the intake library.
#[derive(Error, Debug)]
pub enum IntakeError {
    /// Document-level dispatch error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Spreadsheet source error.
    #[error("sheet error: {0}")]
    Sheet(#[from] SheetError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to whole-document dispatch.
///
/// Field extraction itself never fails; a field that cannot be recovered is
/// simply absent. The only hard failure is a document type the intake flow
/// does not recognize at all.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Unrecognized document type requested for field extraction.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Errors related to spreadsheet sources.
#[derive(Error, Debug)]
pub enum SheetError {
    /// The tabular source could not be read at all (corrupt or unknown
    /// format). Callers fall back to the manually-entered item list.
    #[error("unreadable sheet source: {0}")]
    Unreadable(String),
}

/// Result type for the intake library.
pub type Result<T> = std::result::Result<T, IntakeError>;
