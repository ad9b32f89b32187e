//! Currency code normalization.

use super::patterns::CURRENCY_HINT;

/// Canonicalize a currency token.
///
/// Codes outside the known set are uppercased and passed through.
pub fn normalize_currency(code: &str) -> String {
    match code.to_lowercase().as_str() {
        "qar" => "QAR",
        "aed" => "AED",
        "usd" => "USD",
        "eur" => "EUR",
        "gbp" => "GBP",
        "jod" => "JOD",
        "lbp" => "LBP",
        "omr" => "OMR",
        "kwd" => "KWD",
        _ => return code.to_uppercase(),
    }
    .to_string()
}

/// Best-effort currency hint from a line of text.
pub fn detect_currency(line: &str) -> Option<String> {
    CURRENCY_HINT
        .captures(line)
        .map(|caps| normalize_currency(&caps[1]))
}
