//! Rule-based field extractors for noisy invoice OCR text.

pub mod amount;
pub mod currency;
pub mod date;
pub mod number;
pub mod patterns;

pub use amount::{AmountCandidate, TotalAmountExtractor, normalize_amount};
pub use currency::{detect_currency, normalize_currency};
pub use date::{InvoiceDateExtractor, format_yyyymmdd};
pub use number::InvoiceNumberExtractor;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the best single value from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all acceptable candidates, best first.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
