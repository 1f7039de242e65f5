//! Dominant color extraction with seeded k-means.
//!
//! Clustering runs in sRGB scaled to [0, 1]. Several seeded runs are made and
//! the one with the lowest within-cluster squared error wins.

use super::entity::ColorSample;
use crate::domain::shared::thresholds::{
    KMEANS_MAX_ITERATIONS, KMEANS_MAX_SAMPLES, KMEANS_RESTARTS, KMEANS_SEED, KMEANS_TOLERANCE,
};
use image::RgbImage;
use kmeans_colors::{Kmeans, get_kmeans};
use palette::Srgb;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClusteringError {
    #[error("image has no pixels")]
    EmptyImage,
    #[error("cluster count must be between 1 and {max}")]
    InvalidClusterCount { max: usize },
}

/// `kmeans_colors` labels pixels with a `u8` cluster index.
const MAX_CLUSTERS: usize = u8::MAX as usize;

/// Best-effort dominant colors: any failure is logged and yields an empty list.
pub fn extract_dominant_colors(image: &RgbImage, n_colors: usize) -> Vec<ColorSample> {
    match try_extract_dominant_colors(image, n_colors) {
        Ok(colors) => colors,
        Err(e) => {
            warn!("Dominant color extraction failed: {}", e);
            Vec::new()
        }
    }
}

/// Clusters the image into `n_colors` representative colors, largest share first.
///
/// When the image holds fewer unique colors than requested, one sample per
/// unique color is returned instead.
pub fn try_extract_dominant_colors(
    image: &RgbImage,
    n_colors: usize,
) -> Result<Vec<ColorSample>, ClusteringError> {
    if n_colors == 0 || n_colors > MAX_CLUSTERS {
        return Err(ClusteringError::InvalidClusterCount { max: MAX_CLUSTERS });
    }

    let pixels = sample_pixels(image);
    if pixels.is_empty() {
        return Err(ClusteringError::EmptyImage);
    }

    let unique = pixels.iter().map(to_rgb8).collect::<HashSet<_>>().len();
    let k = n_colors.min(unique);
    if k < n_colors {
        debug!(
            "Only {} unique colors available, reducing cluster count from {}",
            unique, n_colors
        );
    }

    let result = best_of_restarts(&pixels, k);

    let mut counts = vec![0usize; result.centroids.len()];
    for &index in &result.indices {
        counts[index as usize] += 1;
    }

    let total = pixels.len() as f64;
    let mut samples: Vec<ColorSample> = result
        .centroids
        .iter()
        .zip(&counts)
        .map(|(centroid, &count)| ColorSample::new(to_rgb8(centroid), count as f64 / total * 100.0))
        .collect();

    samples.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    Ok(samples)
}

/// Pixels in scan order, strided down to at most `KMEANS_MAX_SAMPLES`.
fn sample_pixels(image: &RgbImage) -> Vec<Srgb<f32>> {
    let total = image.width() as usize * image.height() as usize;
    let step = total.div_ceil(KMEANS_MAX_SAMPLES).max(1);

    image
        .pixels()
        .step_by(step)
        .map(|p| {
            let [r, g, b] = p.0;
            Srgb::new(r, g, b).into_format::<f32>()
        })
        .collect()
}

fn to_rgb8(color: &Srgb<f32>) -> [u8; 3] {
    [color.red, color.green, color.blue].map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8)
}

fn best_of_restarts(pixels: &[Srgb<f32>], k: usize) -> Kmeans<Srgb<f32>> {
    let run = |restart: usize| {
        let seed = KMEANS_SEED + restart as u64;
        let result = get_kmeans(k, KMEANS_MAX_ITERATIONS, KMEANS_TOLERANCE, false, pixels, seed);
        let error = squared_error(pixels, &result);
        debug!("k-means seed {} squared error {:.4}", seed, error);
        (error, result)
    };

    let (mut best_error, mut best) = run(0);
    for restart in 1..KMEANS_RESTARTS {
        let (error, candidate) = run(restart);
        if error < best_error {
            best_error = error;
            best = candidate;
        }
    }
    best
}

/// Sum of squared distances from each pixel to its assigned centroid.
fn squared_error(pixels: &[Srgb<f32>], result: &Kmeans<Srgb<f32>>) -> f64 {
    pixels
        .iter()
        .zip(&result.indices)
        .map(|(p, &index)| {
            let c = &result.centroids[index as usize];
            let d = [p.red - c.red, p.green - c.green, p.blue - c.blue];
            d.iter().map(|v| f64::from(v * v)).sum::<f64>()
        })
        .sum()
}
