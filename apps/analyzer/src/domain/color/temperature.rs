use super::statistics::channel_means;
use crate::domain::shared::thresholds::{
    MAX_COLOR_TEMPERATURE, MIN_COLOR_TEMPERATURE, TEMPERATURE_SCALE,
};
use image::RgbImage;

/// Warm/cool estimate on a Kelvin-like scale, clamped to [3000, 10000].
///
/// This is a coarse heuristic driven by the red+green to blue ratio, not a
/// calibrated correlated color temperature.
pub fn calculate_color_temperature(image: &RgbImage) -> f64 {
    temperature_from_means(channel_means(image))
}

pub fn temperature_from_means([red, green, blue]: [f64; 3]) -> f64 {
    // +1 keeps an all-zero blue channel finite
    let warmth_index = (red + green) / (blue + 1.0);
    let temperature = MIN_COLOR_TEMPERATURE + (warmth_index - 1.0) * TEMPERATURE_SCALE;
    temperature.clamp(MIN_COLOR_TEMPERATURE, MAX_COLOR_TEMPERATURE)
}
