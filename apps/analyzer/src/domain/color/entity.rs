use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One representative color of an image and the share of pixels it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ColorSample {
    /// Cluster centroid rounded to integer RGB
    pub rgb: [u8; 3],

    /// Lower-case `#rrggbb` form of `rgb`
    pub hex: String,

    /// Share of image pixels assigned to this color, 0-100
    pub percentage: f64,
}

impl ColorSample {
    pub fn new(rgb: [u8; 3], percentage: f64) -> Self {
        Self {
            rgb,
            hex: to_hex(rgb),
            percentage,
        }
    }
}

pub fn to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Brightness, contrast and saturation of a whole image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ColorStatistics {
    /// Mean of the per-channel means, 0-255
    pub brightness: f64,

    /// Mean of the per-channel standard deviations, 0-255
    pub contrast: f64,

    /// Mean HSV saturation normalized to 0-1
    pub saturation: f64,
}

/// Aggregated color analysis for one image.
///
/// # Invariants
/// - `dominant_colors` is sorted by descending `percentage`
/// - `color_temperature` lies in [3000, 10000]
/// - `color_harmony_score` lies in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ColorAnalysisResult {
    /// Representative colors, largest share first. Empty when clustering failed.
    pub dominant_colors: Vec<ColorSample>,

    /// Kelvin-like warm/cool estimate (heuristic, not calibrated)
    pub color_temperature: f64,

    /// Hue-relationship heuristic over the dominant colors
    pub color_harmony_score: f64,

    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
}
