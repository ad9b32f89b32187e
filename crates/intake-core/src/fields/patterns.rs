//! Regex tables for invoice field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Invoice number label patterns, ordered most specific first.
    pub static ref NUMBER_PATTERNS: Vec<Regex> = vec![
        // "Inv. No." / "Invoice No." with optional punctuation
        Regex::new(r"(?im)inv\.?\s*no\.?\s*[:\-]?\s*([A-Z0-9\-\./]+?)(?:\s|$)").unwrap(),
        Regex::new(r"(?im)invoice\s*no\.?\s*[:\-]?\s*([A-Z0-9\-\./]+?)(?:\s|$)").unwrap(),

        // More flexible label shapes
        Regex::new(r"(?im)inv(?:oice)?\s*(?:number|no\.?|#)[:\s]+([A-Z0-9\-\./]+?)(?:\s|$)").unwrap(),
        Regex::new(r"(?im)invoice[:\s#]*([A-Z0-9\-\./]+?)(?:\s|$)").unwrap(),

        // Generic reference/document-number labels, minimum 4 characters
        Regex::new(r"(?im)(?:ref|reference|doc|document)[.\s]*(?:number|no\.?|#)?[:\s]*([A-Z0-9\-\./]{4,})").unwrap(),
    ];

    /// Invoice date patterns, ordered most specific first.
    pub static ref DATE_PATTERNS: Vec<Regex> = vec![
        // Explicit "Date" label followed by a numeric date
        Regex::new(r"(?i)date\s*[:\-]?\s*(\d{1,4}[-/]\d{1,2}[-/]\d{1,4})").unwrap(),
        Regex::new(r"(?i)invoice\s*date\s*[:\-]?\s*(\d{1,4}[-/]\d{1,2}[-/]\d{1,4})").unwrap(),

        // Bare numeric dates (DD/MM/YYYY, MM/DD/YYYY, YYYY/MM/DD)
        Regex::new(r"(\d{1,2}[-/]\d{1,2}[-/]\d{4})").unwrap(),
        Regex::new(r"(\d{4}[-/]\d{1,2}[-/]\d{1,2})").unwrap(),

        // Dates with a month abbreviation
        Regex::new(r"(?i)(\d{1,2}[-/](?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*[-/]\d{4})").unwrap(),

        // Loose fallback: anything slash/dash-delimited after a "date" label
        Regex::new(r"(?i)date[:\s]+([0-9/\-]+)").unwrap(),
    ];

    /// Total amount patterns, ordered most specific first. An optional
    /// 1-3 letter currency code may sit between the label and the number.
    pub static ref AMOUNT_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)total\s*[:\-]?\s*(?:[A-Z]{1,3}[\s.]*)?\s*([\d,\.]+)").unwrap(),
        Regex::new(r"(?i)grand\s*total\s*[:\-]?\s*(?:[A-Z]{1,3}[\s.]*)?\s*([\d,\.]+)").unwrap(),
        Regex::new(r"(?i)total\s*(?:amount|invoice)\s*[:\-]?\s*(?:[A-Z]{1,3}[\s.]*)?\s*([\d,\.]+)").unwrap(),

        Regex::new(r"(?i)net\s*(?:amount|payable|am)?\s*[:\-]?\s*(?:[A-Z]{1,3}[\s.]*)?\s*([\d,\.]+)").unwrap(),
        Regex::new(r"(?i)sum\s*[:\-]?\s*(?:[A-Z]{1,3}[\s.]*)?\s*([\d,\.]+)").unwrap(),

        // Bare currency-code-prefixed number, lowest priority
        Regex::new(r"(?:[A-Z]{3}|[A-Z]{2})\s*[:]?\s*([\d,\.]+)").unwrap(),
    ];

    /// Currency codes the intake flow encounters.
    pub static ref CURRENCY_HINT: Regex =
        Regex::new(r"(?i)\b(QAR|AED|USD|EUR|GBP|JOD|LBP|OMR|KWD)\b").unwrap();

    /// Whitespace runs (including OCR newline artifacts inside a token).
    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    /// Date separator runs, normalized to a single `/` before parsing.
    pub static ref DATE_SEPARATORS: Regex = Regex::new(r"[\s/\-_]+").unwrap();
}
