use analyzer::domain::shared::thresholds::{
    QUALITY_BASE_SCORE, QUALITY_HIGH_LETTER_BONUS, QUALITY_LONG_LEN_PENALTY,
    QUALITY_LONG_LEN_THRESHOLD, QUALITY_LOW_LETTER_PENALTY, QUALITY_SHORT_LEN_BONUS,
    QUALITY_SHORT_LEN_MAX, QUALITY_SHORT_LEN_MIN,
};
use analyzer::domain::text::{
    calculate_text_quality, clean_text,
    entity::{RawTextDetection, TextRegion},
    filtering::{deduplicate, filter_detections},
    is_meaningful_text,
    value_objects::BusinessType,
};

fn raw(text: &str, confidence: f32) -> RawTextDetection {
    RawTextDetection {
        text: text.to_string(),
        confidence,
        region: TextRegion::Rect {
            x: 5,
            y: 5,
            width: 20,
            height: 10,
        },
    }
}

#[test]
fn cleaning_fixes_zero_only_at_word_edges() {
    assert_eq!(clean_text("  a0cme  widget!!"), "a0cme widget");
    assert_eq!(clean_text("0ffice"), "Office");
    assert_eq!(clean_text("caf0"), "cafO");
    assert_eq!(clean_text("b00k"), "b00k");
    assert_eq!(clean_text("Room 101"), "Room 101");
    assert_eq!(clean_text("(OPEN 24/7)"), "OPEN 24/7");
}

#[test]
fn keyword_content_outscores_noise() {
    let sale = calculate_text_quality("SALE 50% OFF", BusinessType::Retail);
    let noise = calculate_text_quality("xk92", BusinessType::Retail);
    assert!(sale > noise);
    assert!((sale - 0.89).abs() < 1e-9);
    assert!((noise - 0.65).abs() < 1e-9);
}

#[test]
fn keyword_bonus_is_capped() {
    // long text (-20), mostly letters (+25), four restaurant keywords (+48 -> +35)
    let text = "cafe menu food grill with a very long descriptive tail";
    let score = calculate_text_quality(text, BusinessType::Restaurant);
    assert!((score - 0.9).abs() < 1e-9);
}

#[test]
fn empty_text_scores_zero() {
    assert_eq!(calculate_text_quality("", BusinessType::General), 0.0);
    assert_eq!(calculate_text_quality("   ", BusinessType::Salon), 0.0);
}

#[test]
fn meaningful_text_rules() {
    assert!(!is_meaningful_text("ab"));
    assert!(!is_meaningful_text("a"));
    assert!(!is_meaningful_text("***"));
    assert!(!is_meaningful_text("zzzz"));
    assert!(!is_meaningful_text("x ///"));
    assert!(is_meaningful_text("OPEN 24/7"));
    assert!(is_meaningful_text("Bakery"));
}

#[test]
fn deduplication_keeps_higher_confidence_casing() {
    let detections = deduplicate(filter_detections(vec![raw("open", 0.4), raw("Open", 0.9)]));
    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].text, "Open");
    assert_eq!(detections[0].confidence, 0.9);
    assert_eq!(detections[0].bounding_box, [5, 5, 25, 5, 25, 15, 5, 15]);
}

#[test]
fn confidence_threshold_is_exclusive() {
    assert!(filter_detections(vec![raw("WELCOME", 0.3)]).is_empty());
    assert_eq!(filter_detections(vec![raw("WELCOME", 0.31)]).len(), 1);
}

fn assert_quality(text: &str, expected: f64) {
    let score = calculate_text_quality(text, BusinessType::General);
    assert!(
        (score - expected / 100.0).abs() < 1e-9,
        "{:?} scored {}, expected {}",
        text,
        score,
        expected / 100.0
    );
}

#[test]
fn length_bands_are_inclusive_at_short_edges_and_exclusive_at_long_edge() {
    let letters = |n: usize| "x".repeat(n);
    let all_letters = QUALITY_BASE_SCORE + QUALITY_HIGH_LETTER_BONUS;

    let cases = [
        (QUALITY_SHORT_LEN_MIN - 1, all_letters),
        (QUALITY_SHORT_LEN_MIN, all_letters + QUALITY_SHORT_LEN_BONUS),
        (QUALITY_SHORT_LEN_MAX, all_letters + QUALITY_SHORT_LEN_BONUS),
        (QUALITY_SHORT_LEN_MAX + 1, all_letters),
        (QUALITY_LONG_LEN_THRESHOLD, all_letters),
        (QUALITY_LONG_LEN_THRESHOLD + 1, all_letters - QUALITY_LONG_LEN_PENALTY),
    ];

    for (length, expected) in cases {
        assert_quality(&letters(length), expected);
    }
}

#[test]
fn letter_ratio_bands_hit_their_exact_edges() {
    let short = QUALITY_BASE_SCORE + QUALITY_SHORT_LEN_BONUS;

    let cases = [
        // 3/5 letters sits exactly on the high-ratio edge
        ("abc12", short + QUALITY_HIGH_LETTER_BONUS),
        // 5/9 letters is just below it
        ("abcde1234", short),
        // 3/10 letters sits exactly on the low-ratio edge
        ("abc1111111", short),
        // 2/7 letters is just below it
        ("ab11111", short - QUALITY_LOW_LETTER_PENALTY),
        // no letters at all skips the ratio adjustment
        ("1234", short),
    ];

    for (text, expected) in cases {
        assert_quality(text, expected);
    }
}
