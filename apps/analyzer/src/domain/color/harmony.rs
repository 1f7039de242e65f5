use super::entity::ColorSample;
use super::hsv::rgb_to_hsv8;
use crate::domain::shared::thresholds::{
    HARMONY_ANALOGOUS, HARMONY_COMPLEMENTARY, HARMONY_COMPLEX, HARMONY_MAX_COLORS,
    HARMONY_MONOCHROMATIC, HARMONY_TRIADIC, HUE_WHEEL,
};

/// Scores how well the dominant colors' hues relate, in [0, 1].
///
/// Fewer than two colors give 0.0. Only the first five samples are considered.
pub fn calculate_color_harmony(colors: &[ColorSample]) -> f64 {
    if colors.len() < 2 {
        return 0.0;
    }

    let hues: Vec<i32> = colors
        .iter()
        .take(HARMONY_MAX_COLORS)
        .map(|c| i32::from(rgb_to_hsv8(c.rgb).h))
        .collect();

    let mut distances = Vec::new();
    for (i, a) in hues.iter().enumerate() {
        for b in &hues[i + 1..] {
            distances.push(hue_distance(*a, *b));
        }
    }

    let average = distances.iter().sum::<i32>() as f64 / distances.len() as f64;
    score_for_average_distance(average)
}

/// Circular distance on the 180-step hue wheel.
pub fn hue_distance(a: i32, b: i32) -> i32 {
    let diff = (a - b).abs();
    diff.min(HUE_WHEEL - diff)
}

/// Maps an average hue distance to a harmony band.
///
/// Averages strictly between 90 and 120 have no band of their own and fall
/// through to the complex score.
pub fn score_for_average_distance(average: f64) -> f64 {
    if average < 30.0 {
        HARMONY_MONOCHROMATIC
    } else if average < 60.0 {
        HARMONY_ANALOGOUS
    } else if (60.0..=90.0).contains(&average) {
        HARMONY_TRIADIC
    } else if (120.0..=180.0).contains(&average) {
        HARMONY_COMPLEMENTARY
    } else {
        HARMONY_COMPLEX
    }
}
