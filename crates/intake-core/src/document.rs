//! Document-kind dispatch and invoice header field extraction.

use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::DocumentError;
use crate::fields::{
    FieldExtractor, InvoiceDateExtractor, InvoiceNumberExtractor, TotalAmountExtractor,
    detect_currency, format_yyyymmdd,
};
use crate::models::config::FieldRules;
use crate::models::item::HeaderFields;

/// Source document kinds the intake flow recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// PDF invoice, OCR'd page by page upstream.
    Pdf,
    /// Scanned image (PNG/JPEG).
    Image,
}

impl DocumentKind {
    /// Classify a document by its file extension.
    ///
    /// Anything outside the supported set is a hard failure; the caller may
    /// still route the document for manual field entry.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "png" | "jpg" | "jpeg" => Ok(Self::Image),
            _ => Err(DocumentError::UnsupportedFormat(ext)),
        }
    }
}

/// Invoice header field extractor over raw OCR text.
///
/// Bundles the three field matchers; each is best-effort and independent,
/// so any subset of the output may be absent.
pub struct HeaderFieldExtractor {
    number: InvoiceNumberExtractor,
    date: InvoiceDateExtractor,
    amount: TotalAmountExtractor,
}

impl HeaderFieldExtractor {
    pub fn new() -> Self {
        Self::from_rules(&FieldRules::default())
    }

    pub fn from_rules(rules: &FieldRules) -> Self {
        Self {
            number: InvoiceNumberExtractor::from_rules(rules),
            date: InvoiceDateExtractor::from_rules(rules),
            amount: TotalAmountExtractor::from_rules(rules),
        }
    }

    /// Anchor the date plausibility window to a fixed reference date.
    pub fn with_reference_date(mut self, reference: NaiveDate) -> Self {
        self.date = self.date.with_reference_date(reference);
        self
    }

    /// Extract invoice-level fields from raw OCR text.
    pub fn extract(&self, text: &str) -> HeaderFields {
        let invoice_number = self.number.extract(text);
        let invoice_date = self.date.extract(text).map(format_yyyymmdd);

        // The winning amount also identifies the line to mine for a
        // currency hint.
        let lines: Vec<&str> = text.lines().collect();
        let best = self.amount.best_candidate(text);
        let currency = best
            .as_ref()
            .and_then(|c| lines.get(c.line_rank - 1))
            .and_then(|line| detect_currency(line));
        let total_amount = best.map(|c| c.value);

        debug!(
            number = invoice_number.is_some(),
            date = invoice_date.is_some(),
            amount = total_amount.is_some(),
            "header field extraction finished"
        );

        HeaderFields {
            invoice_number,
            invoice_date,
            total_amount,
            currency,
        }
    }
}

impl Default for HeaderFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract invoice-level fields from raw OCR text with default rules.
pub fn extract_header_fields(text: &str) -> HeaderFields {
    HeaderFieldExtractor::new().extract(text)
}
