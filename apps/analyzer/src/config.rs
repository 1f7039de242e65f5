//! Analyzer configuration loaded from environment variables.
//!
//! Everything has a default, so an empty environment yields a working setup
//! that degrades gracefully when OCR models or binaries are missing.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Logging level (default: "info,analyzer=debug")
//! - `UPLOAD_DIR`: Directory searched when resolving image identifiers (default: "uploads")
//! - `ALLOWED_IMAGE_EXTENSIONS`: Comma-separated extensions accepted during lookup
//!   (default: "jpg,jpeg,png,bmp,tiff")
//! - `DEFAULT_DOMINANT_COLORS`: Cluster count when none is requested (default: 5)
//! - `ENABLE_NEURAL_OCR`: Load the ONNX text detector/recognizer (default: true)
//! - `OCR_DETECTION_MODEL_PATH`: Detector model (default: "./models/ocr/det.onnx")
//! - `OCR_RECOGNITION_MODEL_PATH`: Recognizer model (default: "./models/ocr/rec.onnx")
//! - `OCR_CHARSET_PATH`: Recognizer symbol list (default: "./models/ocr/charset.txt")
//! - `ENABLE_TESSERACT`: Allow the Tesseract fallback (default: true)
//! - `TESSERACT_BIN`: Tesseract executable (default: "tesseract")
//! - `TESSERACT_LANG`: Tesseract language pack (default: "eng")
//! - `ANALYSIS_TIMEOUT_SECONDS`: Deadline for one combined analysis (default: 120)
//! - `MAX_CONCURRENT_ANALYSES`: Batch concurrency limit (default: 4)

use crate::domain::shared::thresholds::DEFAULT_DOMINANT_COLORS;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory holding uploaded images named `<id>.<ext>`
    pub upload_dir: String,

    /// Lower-case extensions (without dot) considered during lookup
    pub allowed_image_extensions: Vec<String>,

    /// Cluster count used when a request does not specify one
    pub default_dominant_colors: usize,

    /// Load the neural OCR engine at startup
    pub enable_neural_ocr: bool,

    /// ONNX text detection model
    pub ocr_detection_model_path: String,

    /// ONNX text recognition model
    pub ocr_recognition_model_path: String,

    /// One recognizer symbol per line
    pub ocr_charset_path: String,

    /// Allow the classical OCR fallback
    pub enable_tesseract: bool,

    /// Tesseract executable name or path
    pub tesseract_bin: String,

    /// Tesseract `-l` argument
    pub tesseract_lang: String,

    /// Deadline for one combined analysis, in seconds
    pub analysis_timeout_seconds: u64,

    /// Upper bound on analyses running at once in batch mode
    pub max_concurrent_analyses: usize,
}

impl Default for Config {
    fn default() -> Self {
        // An empty lookup cannot fail to parse.
        Self::from_lookup(|_| None).unwrap_or_else(|_| unreachable!())
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            upload_dir: env_or(&lookup, "UPLOAD_DIR", "uploads".to_string())?,
            allowed_image_extensions: lookup("ALLOWED_IMAGE_EXTENSIONS")
                .map(|raw| parse_list(&raw))
                .unwrap_or_else(|| {
                    ["jpg", "jpeg", "png", "bmp", "tiff"]
                        .iter()
                        .map(|s| s.to_string())
                        .collect()
                }),
            default_dominant_colors: env_or(
                &lookup,
                "DEFAULT_DOMINANT_COLORS",
                DEFAULT_DOMINANT_COLORS,
            )?,
            enable_neural_ocr: env_or(&lookup, "ENABLE_NEURAL_OCR", true)?,
            ocr_detection_model_path: env_or(
                &lookup,
                "OCR_DETECTION_MODEL_PATH",
                "./models/ocr/det.onnx".to_string(),
            )?,
            ocr_recognition_model_path: env_or(
                &lookup,
                "OCR_RECOGNITION_MODEL_PATH",
                "./models/ocr/rec.onnx".to_string(),
            )?,
            ocr_charset_path: env_or(
                &lookup,
                "OCR_CHARSET_PATH",
                "./models/ocr/charset.txt".to_string(),
            )?,
            enable_tesseract: env_or(&lookup, "ENABLE_TESSERACT", true)?,
            tesseract_bin: env_or(&lookup, "TESSERACT_BIN", "tesseract".to_string())?,
            tesseract_lang: env_or(&lookup, "TESSERACT_LANG", "eng".to_string())?,
            analysis_timeout_seconds: env_or(&lookup, "ANALYSIS_TIMEOUT_SECONDS", 120)?,
            max_concurrent_analyses: env_or(&lookup, "MAX_CONCURRENT_ANALYSES", 4)?,
        };

        if config.default_dominant_colors == 0 {
            anyhow::bail!("DEFAULT_DOMINANT_COLORS must be at least 1");
        }
        if config.max_concurrent_analyses == 0 {
            anyhow::bail!("MAX_CONCURRENT_ANALYSES must be at least 1");
        }

        Ok(config)
    }

    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_seconds)
    }
}

/// Load a variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(val) => val
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        None => Ok(default),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
