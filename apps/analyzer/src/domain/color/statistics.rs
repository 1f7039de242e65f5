use super::entity::ColorStatistics;
use super::hsv::rgb_to_hsv8;
use image::RgbImage;

/// Per-channel means of an RGB buffer. Zero for an empty buffer.
pub fn channel_means(image: &RgbImage) -> [f64; 3] {
    let count = image.width() as usize * image.height() as usize;
    if count == 0 {
        return [0.0; 3];
    }
    let mut sums = [0u64; 3];
    for pixel in image.pixels() {
        for (sum, &value) in sums.iter_mut().zip(pixel.0.iter()) {
            *sum += u64::from(value);
        }
    }
    sums.map(|s| s as f64 / count as f64)
}

/// Brightness, contrast and saturation in a single pass over the pixels.
///
/// Standard deviations are population deviations, so a flat image has zero
/// contrast.
pub fn analyze_basic_stats(image: &RgbImage) -> ColorStatistics {
    let count = image.width() as usize * image.height() as usize;
    if count == 0 {
        return ColorStatistics {
            brightness: 0.0,
            contrast: 0.0,
            saturation: 0.0,
        };
    }

    let mut sums = [0f64; 3];
    let mut squares = [0f64; 3];
    let mut saturation_sum = 0u64;

    for pixel in image.pixels() {
        for channel in 0..3 {
            let value = f64::from(pixel[channel]);
            sums[channel] += value;
            squares[channel] += value * value;
        }
        saturation_sum += u64::from(rgb_to_hsv8(pixel.0).s);
    }

    let n = count as f64;
    let means = sums.map(|s| s / n);
    let deviations: Vec<f64> = (0..3)
        .map(|c| (squares[c] / n - means[c] * means[c]).max(0.0).sqrt())
        .collect();

    ColorStatistics {
        brightness: means.iter().sum::<f64>() / 3.0,
        contrast: deviations.iter().sum::<f64>() / 3.0,
        saturation: saturation_sum as f64 / n / 255.0,
    }
}
