use analyzer::domain::color::{
    analyze_basic_stats, calculate_color_harmony, calculate_color_temperature,
    entity::ColorSample, extract_dominant_colors, harmony::score_for_average_distance,
};
use image::{Rgb, RgbImage};

fn gradient() -> RgbImage {
    RgbImage::from_fn(24, 16, |x, y| Rgb([(x * 10) as u8, (y * 15) as u8, ((x + y) * 5) as u8]))
}

#[test]
fn statistics_stay_in_range_for_extremes() {
    let images = [
        RgbImage::from_pixel(5, 5, Rgb([0, 0, 0])),
        RgbImage::from_pixel(5, 5, Rgb([255, 255, 255])),
        RgbImage::from_fn(5, 5, |x, _| if x % 2 == 0 { Rgb([0, 0, 0]) } else { Rgb([255, 0, 255]) }),
        gradient(),
    ];

    for img in &images {
        let stats = analyze_basic_stats(img);
        assert!((0.0..=255.0).contains(&stats.brightness));
        assert!((0.0..=255.0).contains(&stats.contrast));
        assert!((0.0..=1.0).contains(&stats.saturation));
    }
}

#[test]
fn dominant_colors_return_k_sorted_samples() {
    for k in [1, 3, 5, 8] {
        let colors = extract_dominant_colors(&gradient(), k);
        assert_eq!(colors.len(), k);

        let total: f64 = colors.iter().map(|c| c.percentage).sum();
        assert!((total - 100.0).abs() < 1e-6, "k={} total={}", k, total);
        assert!(colors.windows(2).all(|w| w[0].percentage >= w[1].percentage));
    }
}

#[test]
fn dominant_colors_are_deterministic() {
    let first = extract_dominant_colors(&gradient(), 4);
    let second = extract_dominant_colors(&gradient(), 4);
    assert_eq!(first, second);
}

#[test]
fn zero_clusters_degrade_to_empty() {
    assert!(extract_dominant_colors(&gradient(), 0).is_empty());
    assert!(extract_dominant_colors(&RgbImage::new(0, 0), 3).is_empty());
}

#[test]
fn temperature_is_bounded() {
    for color in [[0, 0, 0], [255, 255, 255], [0, 0, 255], [255, 200, 0]] {
        let t = calculate_color_temperature(&RgbImage::from_pixel(3, 3, Rgb(color)));
        assert!((3000.0..=10000.0).contains(&t));
    }
}

#[test]
fn harmony_edge_cases() {
    let red = ColorSample::new([255, 0, 0], 50.0);
    assert_eq!(calculate_color_harmony(&[]), 0.0);
    assert_eq!(calculate_color_harmony(&[red.clone()]), 0.0);
    assert_eq!(calculate_color_harmony(&[red.clone(), red]), 0.9);
}

#[test]
fn harmony_gap_between_90_and_120_is_complex() {
    assert_eq!(score_for_average_distance(90.0), 0.8);
    assert_eq!(score_for_average_distance(100.0), 0.6);
    assert_eq!(score_for_average_distance(119.9), 0.6);
    assert_eq!(score_for_average_distance(120.0), 0.75);
}

#[test]
fn red_and_cyan_land_in_triadic_band() {
    // red (h=0) and cyan (h=90) are 90 apart on the 180-step wheel
    let colors = [
        ColorSample::new([255, 0, 0], 50.0),
        ColorSample::new([0, 255, 255], 50.0),
    ];
    assert_eq!(calculate_color_harmony(&colors), 0.8);
}
