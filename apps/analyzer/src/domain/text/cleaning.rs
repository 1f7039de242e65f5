use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LEADING_ZERO: Regex = Regex::new(r"\b0([a-zA-Z])").unwrap();
    static ref TRAILING_ZERO: Regex = Regex::new(r"([a-zA-Z])0\b").unwrap();
}

/// Characters trimmed from both ends of raw OCR text.
const EDGE_NOISE: &[char] = &[
    '.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '"', '\'', '-', '_', '=', '+',
    '|', '\\', '/',
];

/// Normalizes raw OCR output.
///
/// Whitespace runs collapse to one space, punctuation and brackets are trimmed
/// from the edges, and a `0` at a word boundary next to a letter becomes `O`
/// (`0ffice` -> `Office`, `caf0` -> `cafO`). Zeros inside a word or next to
/// other digits are left alone.
pub fn clean_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed.trim_matches(EDGE_NOISE);

    let corrected = LEADING_ZERO.replace_all(trimmed, "O${1}");
    let corrected = TRAILING_ZERO.replace_all(&corrected, "${1}O");

    corrected.trim().to_string()
}
