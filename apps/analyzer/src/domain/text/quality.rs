use super::keywords::{business_keywords, general_keywords};
use super::value_objects::BusinessType;
use crate::domain::shared::thresholds::*;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ONLY_SYMBOLS: Regex = Regex::new(r"^[^a-zA-Z0-9]+$").unwrap();
    static ref TOO_SHORT_WORD: Regex = Regex::new(r"^[a-zA-Z]{1,2}$").unwrap();
    static ref BRACKET_RUN: Regex = Regex::new(r"[)(\[\]{}|\\/]{3,}").unwrap();
}

/// Relevance of a text snippet for a business category, in [0, 1].
///
/// Starts from a neutral base and adjusts for length, share of ASCII letters
/// and keyword hits (case-insensitive substring matches, bonus capped).
pub fn calculate_text_quality(text: &str, business_type: BusinessType) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let mut score = QUALITY_BASE_SCORE;
    let length = text.chars().count();

    if (QUALITY_SHORT_LEN_MIN..=QUALITY_SHORT_LEN_MAX).contains(&length) {
        score += QUALITY_SHORT_LEN_BONUS;
    } else if length > QUALITY_LONG_LEN_THRESHOLD {
        score -= QUALITY_LONG_LEN_PENALTY;
    }

    let letters = text.chars().filter(|c| c.is_ascii_alphabetic()).count();
    if letters > 0 {
        let ratio = letters as f64 / length as f64;
        if ratio >= QUALITY_HIGH_LETTER_RATIO {
            score += QUALITY_HIGH_LETTER_BONUS;
        } else if ratio < QUALITY_LOW_LETTER_RATIO {
            score -= QUALITY_LOW_LETTER_PENALTY;
        }
    }

    score += keyword_bonus(&text.to_lowercase(), business_type);

    score.clamp(0.0, 100.0) / 100.0
}

fn keyword_bonus(lowered: &str, business_type: BusinessType) -> f64 {
    let specific = business_keywords(business_type)
        .iter()
        .filter(|k| lowered.contains(*k))
        .count() as f64;
    let general = general_keywords()
        .iter()
        .filter(|k| lowered.contains(*k))
        .count() as f64;

    (specific * BUSINESS_KEYWORD_BONUS + general * GENERAL_KEYWORD_BONUS).min(MAX_KEYWORD_BONUS)
}

/// Whether cleaned text is worth reporting.
///
/// Quality is always scored against the general keyword set here, regardless
/// of the business type of the request.
pub fn is_meaningful_text(text: &str) -> bool {
    let text = text.trim();
    if text.chars().count() < MIN_MEANINGFUL_LENGTH {
        return false;
    }

    if calculate_text_quality(text, BusinessType::General) < MIN_MEANINGFUL_QUALITY {
        return false;
    }

    !is_noise(text)
}

fn is_noise(text: &str) -> bool {
    ONLY_SYMBOLS.is_match(text)
        || TOO_SHORT_WORD.is_match(text)
        || is_single_char_repeated(text)
        || BRACKET_RUN.is_match(text)
}

/// One character repeated three or more times, e.g. `lll` or `===`.
fn is_single_char_repeated(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if first == '\n' {
        return false;
    }
    let mut count = 1;
    for c in chars {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}
