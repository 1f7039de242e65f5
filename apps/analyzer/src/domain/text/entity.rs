use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A piece of text found on the image after cleaning, filtering and
/// deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TextDetection {
    /// Cleaned text, in the casing of the highest-confidence occurrence
    pub text: String,

    /// Engine confidence normalized to 0-1
    pub confidence: f32,

    /// Four corner points flattened as `[x1, y1, x2, y2, x3, y3, x4, y4]`
    pub bounding_box: [i32; 8],
}

/// Where an OCR engine located a piece of text, in the engine's native shape.
#[derive(Debug, Clone, PartialEq)]
pub enum TextRegion {
    /// Corner points as returned by the engine (normally four).
    Polygon(Vec<[f32; 2]>),
    /// Axis-aligned box from its top-left corner.
    Rect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
}

impl TextRegion {
    /// Flattens the region into four corner points.
    ///
    /// Rectangles expand clockwise from the top-left corner. Polygon
    /// coordinates truncate toward zero; polygons with more than four points
    /// keep the first four and shorter ones repeat their last point.
    pub fn to_bounding_box(&self) -> [i32; 8] {
        match self {
            Self::Rect {
                x,
                y,
                width,
                height,
            } => {
                let (right, bottom) = (x + width, y + height);
                [*x, *y, right, *y, right, bottom, *x, bottom]
            }
            Self::Polygon(points) => {
                let mut flat = [0i32; 8];
                let Some(last) = points.last() else {
                    return flat;
                };
                for corner in 0..4 {
                    let [px, py] = points.get(corner).unwrap_or(last);
                    flat[corner * 2] = *px as i32;
                    flat[corner * 2 + 1] = *py as i32;
                }
                flat
            }
        }
    }
}

/// Unfiltered output of one OCR engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTextDetection {
    pub text: String,

    /// Confidence already normalized to 0-1 by the engine adapter
    pub confidence: f32,

    pub region: TextRegion,
}

/// Detected text with its business-aware quality score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TextQualityAssessment {
    pub text: String,
    pub confidence: f32,
    pub quality_score: f64,
}
