//! Total amount extraction with position/pattern/magnitude scoring.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::FieldExtractor;
use super::patterns::AMOUNT_PATTERNS;
use crate::models::config::FieldRules;

/// Lines shorter than this (trimmed) are skipped entirely.
const MIN_LINE_LEN: usize = 3;

/// One scored candidate for the document total.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountCandidate {
    /// 1-based distance of the source line from the start of the document;
    /// equivalently, the last line carries the highest rank.
    pub line_rank: usize,

    /// Rank of the matching pattern; more specific patterns rank higher.
    pub pattern_rank: usize,

    /// The normalized amount.
    pub value: Decimal,
}

impl AmountCandidate {
    /// Combined priority: line position dominates, pattern specificity
    /// breaks ties, magnitude breaks the rest.
    pub fn score(&self) -> f64 {
        (self.line_rank as f64) * 10_000.0
            + (self.pattern_rank as f64) * 100.0
            + self.value.to_f64().unwrap_or(0.0) / 1_000_000.0
    }
}

/// Total amount extractor.
///
/// Lines are scanned from the end of the document toward the start, since
/// totals conventionally sit near the bottom. Every pattern match on every
/// line becomes a scored candidate; the best-scoring candidate wins.
pub struct TotalAmountExtractor {
    max_amount: Decimal,
}

impl TotalAmountExtractor {
    pub fn new() -> Self {
        Self::from_rules(&FieldRules::default())
    }

    pub fn from_rules(rules: &FieldRules) -> Self {
        Self {
            max_amount: Decimal::from(rules.amount_max),
        }
    }

    /// Collect every valid candidate in the text, unscored and unordered.
    pub fn candidates(&self, text: &str) -> Vec<AmountCandidate> {
        let lines: Vec<&str> = text.lines().collect();
        let total_lines = lines.len();
        let mut candidates = Vec::new();

        for (rev_idx, line) in lines.iter().rev().enumerate() {
            if line.trim().len() < MIN_LINE_LEN {
                continue;
            }
            let line_rank = total_lines - rev_idx;

            for (pattern_idx, pattern) in AMOUNT_PATTERNS.iter().enumerate() {
                let pattern_rank = AMOUNT_PATTERNS.len() - pattern_idx;

                for caps in pattern.captures_iter(line) {
                    let Some(value) = normalize_amount(&caps[1]) else {
                        continue;
                    };
                    if value <= Decimal::ZERO || value >= self.max_amount {
                        continue;
                    }
                    candidates.push(AmountCandidate {
                        line_rank,
                        pattern_rank,
                        value,
                    });
                }
            }
        }

        candidates
    }

    /// The best candidate under [`AmountCandidate::score`], if any.
    pub fn best_candidate(&self, text: &str) -> Option<AmountCandidate> {
        self.candidates(text)
            .into_iter()
            .max_by(|a, b| a.score().partial_cmp(&b.score()).unwrap_or(Ordering::Equal))
    }
}

impl Default for TotalAmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TotalAmountExtractor {
    type Output = Decimal;

    fn extract(&self, text: &str) -> Option<Decimal> {
        self.best_candidate(text).map(|c| c.value)
    }

    fn extract_all(&self, text: &str) -> Vec<Decimal> {
        let mut candidates = self.candidates(text);
        candidates.sort_by(|a, b| {
            b.score().partial_cmp(&a.score()).unwrap_or(Ordering::Equal)
        });
        candidates.into_iter().map(|c| c.value).collect()
    }
}

/// Normalize a noisy numeric string to a decimal.
///
/// When both comma and period appear, whichever comes last is the decimal
/// separator and the other is stripped as a thousands separator. A lone
/// comma is decimal only when exactly 2-3 digits follow it.
pub fn normalize_amount(raw: &str) -> Option<Decimal> {
    let mut s = raw.trim().replace(' ', "");

    if s.contains(',') && s.contains('.') {
        let last_comma = s.rfind(',')?;
        let last_dot = s.rfind('.')?;
        if last_dot > last_comma {
            // US style: 1,234.56
            s = s.replace(',', "");
        } else {
            // EU style: 1.234,56
            s = s.replace('.', "").replace(',', ".");
        }
    } else if s.contains(',') {
        let tail_len = s.rsplit(',').next().map(str::len).unwrap_or(0);
        if tail_len == 2 || tail_len == 3 {
            // Likely decimal: ,45 or ,456
            s = s.replace(',', ".");
        } else {
            // Likely thousands
            s = s.replace(',', "");
        }
    }

    Decimal::from_str(s.trim_end_matches('.')).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_normalize_us_format() {
        assert_eq!(normalize_amount("1,234.56"), Some(dec("1234.56")));
        assert_eq!(normalize_amount("12,345,678.90"), Some(dec("12345678.90")));
    }

    #[test]
    fn test_normalize_eu_format() {
        assert_eq!(normalize_amount("1.234,56"), Some(dec("1234.56")));
    }

    #[test]
    fn test_normalize_lone_comma() {
        // 2-3 digits after the comma: decimal separator
        assert_eq!(normalize_amount("45,00"), Some(dec("45.00")));
        // Otherwise: thousands separator
        assert_eq!(normalize_amount("45,0000"), Some(dec("450000")));
    }

    #[test]
    fn test_normalize_garbage_is_rejected() {
        assert_eq!(normalize_amount(",,"), None);
        assert_eq!(normalize_amount("1.2.3"), None);
    }

    #[test]
    fn test_total_on_last_line_wins() {
        let text = "Subtotal: 900.00\nVAT: 45.00\nTotal: 1,234.56";
        let extractor = TotalAmountExtractor::new();

        assert_eq!(extractor.extract(text), Some(dec("1234.56")));
    }

    #[test]
    fn test_position_dominates_pattern_specificity() {
        // The generic currency-prefixed amount on the last line outranks the
        // explicit "Total" label higher up.
        let text = "Total: 500.00\nsome terms\nQAR 750.00";
        let extractor = TotalAmountExtractor::new();

        assert_eq!(extractor.extract(text), Some(dec("750.00")));
    }

    #[test]
    fn test_pattern_specificity_breaks_line_ties() {
        let text = "Net 100.00 Total: 200.00";
        let extractor = TotalAmountExtractor::new();

        // Same line, so the more specific "total" pattern wins
        assert_eq!(extractor.extract(text), Some(dec("200.00")));
    }

    #[test]
    fn test_out_of_range_amounts_rejected() {
        let extractor = TotalAmountExtractor::new();

        assert_eq!(extractor.extract("Total: 100000001.00"), None);
        assert_eq!(extractor.extract("Total: 0"), None);
    }

    #[test]
    fn test_short_lines_skipped() {
        // "AB 1" would match the currency pattern but the line is too short
        let extractor = TotalAmountExtractor::new();
        assert_eq!(extractor.extract("AB"), None);
    }

    #[test]
    fn test_score_ordering() {
        let low = AmountCandidate { line_rank: 1, pattern_rank: 6, value: dec("999.99") };
        let high = AmountCandidate { line_rank: 2, pattern_rank: 1, value: dec("1.00") };

        // A later line beats any pattern rank on an earlier line
        assert!(high.score() > low.score());
    }
}
