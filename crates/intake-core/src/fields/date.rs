//! Invoice date extraction and normalization.

use chrono::{Duration, Local, NaiveDate};

use super::FieldExtractor;
use super::patterns::{DATE_PATTERNS, DATE_SEPARATORS};
use crate::models::config::FieldRules;

/// Date layouts tried in order once separators are normalized to `/`.
const DATE_LAYOUTS: &[&str] = &[
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d/%m/%y",
    "%m/%d/%y",
    "%d/%b/%Y",
    "%d/%b/%y",
];

/// Invoice date extractor.
///
/// Candidates are accepted only inside a plausibility window around the
/// reference date, which rejects OCR misreads that produce implausible
/// years. The reference date defaults to today and is injectable for
/// deterministic tests.
pub struct InvoiceDateExtractor {
    reference: NaiveDate,
    past_window_days: i64,
    future_window_days: i64,
}

impl InvoiceDateExtractor {
    pub fn new() -> Self {
        Self::from_rules(&FieldRules::default())
    }

    pub fn from_rules(rules: &FieldRules) -> Self {
        Self {
            reference: Local::now().date_naive(),
            past_window_days: rules.date_past_window_days,
            future_window_days: rules.date_future_window_days,
        }
    }

    /// Set the reference date the plausibility window is anchored to.
    pub fn with_reference_date(mut self, reference: NaiveDate) -> Self {
        self.reference = reference;
        self
    }

    fn plausible(&self, date: NaiveDate) -> bool {
        let earliest = self.reference - Duration::days(self.past_window_days);
        let latest = self.reference + Duration::days(self.future_window_days);
        earliest <= date && date <= latest
    }

    /// Parse one raw matched substring against the layout list, returning
    /// the first successfully parsed date inside the plausibility window.
    fn parse_candidate(&self, raw: &str) -> Option<NaiveDate> {
        let cleaned = DATE_SEPARATORS.replace_all(raw.trim(), "/");
        for layout in DATE_LAYOUTS {
            if let Ok(date) = NaiveDate::parse_from_str(&cleaned, layout) {
                if self.plausible(date) {
                    return Some(date);
                }
            }
        }
        None
    }
}

impl Default for InvoiceDateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceDateExtractor {
    type Output = NaiveDate;

    fn extract(&self, text: &str) -> Option<NaiveDate> {
        for pattern in DATE_PATTERNS.iter() {
            for caps in pattern.captures_iter(text) {
                if let Some(date) = self.parse_candidate(&caps[1]) {
                    return Some(date);
                }
            }
        }
        None
    }

    fn extract_all(&self, text: &str) -> Vec<NaiveDate> {
        let mut results = Vec::new();
        for pattern in DATE_PATTERNS.iter() {
            for caps in pattern.captures_iter(text) {
                if let Some(date) = self.parse_candidate(&caps[1]) {
                    if !results.contains(&date) {
                        results.push(date);
                    }
                }
            }
        }
        results
    }
}

/// Format an extracted date the way the downstream feed expects it.
pub fn format_yyyymmdd(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}
