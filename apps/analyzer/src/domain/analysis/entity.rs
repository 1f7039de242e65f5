use crate::domain::{
    color::entity::ColorAnalysisResult,
    text::{entity::TextDetection, value_objects::BusinessType},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Basic properties of a source image, read once per analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImageMetadata {
    /// Pixel width
    pub width: u32,

    /// Pixel height
    pub height: u32,

    /// Channel count of the stored color type (3 for RGB, 4 for RGBA, 1 for gray)
    pub channels: u8,

    /// File size on disk in bytes
    pub file_size: u64,

    /// Upper-case container format tag, e.g. `PNG` or `JPEG`
    pub format: String,
}

/// Which sub-pipelines an analysis request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum AnalysisType {
    Color,
    Text,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 2] = [AnalysisType::Color, AnalysisType::Text];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Text => "text",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Color => {
                "Color analysis including dominant colors, temperature, and harmony"
            }
            Self::Text => "Text detection and OCR extraction",
        }
    }

    /// `(name, description)` pairs for every analysis type.
    pub fn catalogue() -> Vec<(&'static str, &'static str)> {
        Self::ALL
            .iter()
            .map(|t| (t.as_str(), t.description()))
            .collect()
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "color" => Ok(Self::Color),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown analysis type: {}", other)),
        }
    }
}

/// Combined output of one `analyze_image` call.
///
/// Built fresh for every request and never persisted; asking for the same
/// image twice recomputes everything from the source pixels.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalysisReport {
    /// Identifier the caller asked for
    pub id: String,

    /// File name the identifier resolved to
    pub filename: String,

    /// Business category used for text scoring, if one was supplied
    pub business_type: Option<BusinessType>,

    /// Last modification time of the source file
    pub upload_time: DateTime<Utc>,

    pub image_stats: ImageMetadata,

    /// Present when `color` was requested
    pub color_analysis: Option<ColorAnalysisResult>,

    /// Present when `text` was requested
    pub text_detection: Option<Vec<TextDetection>>,

    /// Wall-clock seconds spent on the whole call
    pub processing_time: f64,
}
