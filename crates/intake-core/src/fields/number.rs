//! Invoice number extraction.

use super::FieldExtractor;
use super::patterns::{NUMBER_PATTERNS, WHITESPACE};
use crate::models::config::FieldRules;

/// Invoice number extractor.
///
/// Label patterns are tried most specific first; within a pattern, matches
/// are scanned in document order and the first candidate surviving
/// validation wins. Once a pattern yields an accepted value, later
/// patterns are not tried.
pub struct InvoiceNumberExtractor {
    stoplist: Vec<String>,
    min_len: usize,
    max_len: usize,
}

impl InvoiceNumberExtractor {
    pub fn new() -> Self {
        Self::from_rules(&FieldRules::default())
    }

    pub fn from_rules(rules: &FieldRules) -> Self {
        Self {
            stoplist: rules.number_stoplist.clone(),
            min_len: rules.number_min_len,
            max_len: rules.number_max_len,
        }
    }

    /// Replace the false-positive stoplist.
    pub fn with_stoplist(mut self, stoplist: Vec<String>) -> Self {
        self.stoplist = stoplist;
        self
    }

    fn accept(&self, candidate: &str) -> bool {
        if candidate.len() < self.min_len || candidate.len() > self.max_len {
            return false;
        }
        if !candidate.chars().any(|c| c.is_alphanumeric()) {
            return false;
        }
        let upper = candidate.to_uppercase();
        !self.stoplist.iter().any(|stop| *stop == upper)
    }
}

impl Default for InvoiceNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceNumberExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        for pattern in NUMBER_PATTERNS.iter() {
            for caps in pattern.captures_iter(text) {
                // Squash whitespace and newline artifacts inside the token
                let cleaned = WHITESPACE.replace_all(caps[1].trim(), "").into_owned();
                if self.accept(&cleaned) {
                    return Some(cleaned);
                }
            }
        }
        None
    }

    fn extract_all(&self, text: &str) -> Vec<String> {
        let mut results = Vec::new();
        for pattern in NUMBER_PATTERNS.iter() {
            for caps in pattern.captures_iter(text) {
                let cleaned = WHITESPACE.replace_all(caps[1].trim(), "").into_owned();
                if self.accept(&cleaned) && !results.contains(&cleaned) {
                    results.push(cleaned);
                }
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_labeled_number() {
        let extractor = InvoiceNumberExtractor::new();

        assert_eq!(
            extractor.extract("Inv. No: QA-2024-0815\nDate: 01/08/2024"),
            Some("QA-2024-0815".to_string())
        );
        assert_eq!(
            extractor.extract("Invoice No. 77812/A"),
            Some("77812/A".to_string())
        );
    }

    #[test]
    fn test_specific_label_beats_generic() {
        let extractor = InvoiceNumberExtractor::new();

        let text = "Document No: REF-1111\nInvoice No: INV-2222";
        assert_eq!(extractor.extract(text), Some("INV-2222".to_string()));
    }

    #[test]
    fn test_stoplist_rejects_false_positives() {
        let extractor = InvoiceNumberExtractor::new();

        // "PAGE" is a known OCR false positive after a bare "invoice" label
        assert_eq!(extractor.extract("Invoice PAGE 1 of 2"), None);
    }

    #[test]
    fn test_custom_stoplist() {
        let extractor =
            InvoiceNumberExtractor::new().with_stoplist(vec!["DRAFT".to_string()]);

        assert_eq!(extractor.extract("Invoice No: DRAFT"), None);
        assert_eq!(
            extractor.extract("Invoice No: TOTAL"),
            Some("TOTAL".to_string())
        );
    }

    #[test]
    fn test_length_bounds() {
        let extractor = InvoiceNumberExtractor::new();

        // Single character is below the minimum length
        assert_eq!(extractor.extract("Invoice No: 7"), None);
    }

    #[test]
    fn test_no_match_is_absent() {
        let extractor = InvoiceNumberExtractor::new();

        assert_eq!(extractor.extract("no usable labels here"), None);
        assert_eq!(extractor.extract(""), None);
    }
}
