//! Tuning constants shared by the color and text pipelines.
//!
//! Kept in one place so tests can target the exact band edges.

// --- Text detection ---

/// Raw OCR detections at or below this confidence are discarded.
pub const MIN_OCR_CONFIDENCE: f32 = 0.3;

/// Minimum cleaned text length (in chars) for a detection to survive.
pub const MIN_TEXT_LENGTH: usize = 1;

/// Minimum normalized quality for `is_meaningful`.
pub const MIN_MEANINGFUL_QUALITY: f64 = 0.2;

/// Minimum trimmed length for `is_meaningful`.
pub const MIN_MEANINGFUL_LENGTH: usize = 2;

// --- Text quality score (0-100 scale before normalization) ---

pub const QUALITY_BASE_SCORE: f64 = 50.0;
pub const QUALITY_SHORT_LEN_MIN: usize = 3;
pub const QUALITY_SHORT_LEN_MAX: usize = 25;
pub const QUALITY_SHORT_LEN_BONUS: f64 = 15.0;
pub const QUALITY_LONG_LEN_THRESHOLD: usize = 40;
pub const QUALITY_LONG_LEN_PENALTY: f64 = 20.0;
pub const QUALITY_HIGH_LETTER_RATIO: f64 = 0.6;
pub const QUALITY_HIGH_LETTER_BONUS: f64 = 25.0;
pub const QUALITY_LOW_LETTER_RATIO: f64 = 0.3;
pub const QUALITY_LOW_LETTER_PENALTY: f64 = 20.0;
pub const BUSINESS_KEYWORD_BONUS: f64 = 12.0;
pub const GENERAL_KEYWORD_BONUS: f64 = 8.0;
pub const MAX_KEYWORD_BONUS: f64 = 35.0;

// --- Color temperature ---

pub const MIN_COLOR_TEMPERATURE: f64 = 3000.0;
pub const MAX_COLOR_TEMPERATURE: f64 = 10000.0;
pub const TEMPERATURE_SCALE: f64 = 2000.0;

// --- Color harmony ---

/// Span of the 8-bit hue wheel.
pub const HUE_WHEEL: i32 = 180;
pub const HARMONY_MONOCHROMATIC: f64 = 0.9;
pub const HARMONY_ANALOGOUS: f64 = 0.85;
pub const HARMONY_TRIADIC: f64 = 0.8;
pub const HARMONY_COMPLEMENTARY: f64 = 0.75;
pub const HARMONY_COMPLEX: f64 = 0.6;
/// Upper bound on how many dominant colors take part in harmony scoring.
pub const HARMONY_MAX_COLORS: usize = 5;

// --- Dominant color clustering ---

pub const DEFAULT_DOMINANT_COLORS: usize = 5;
pub const MAX_DOMINANT_COLORS: usize = 32;
pub const KMEANS_SEED: u64 = 42;
pub const KMEANS_RESTARTS: usize = 10;
pub const KMEANS_MAX_ITERATIONS: usize = 300;
/// Convergence bound on centroid movement, colors scaled to [0, 1].
pub const KMEANS_TOLERANCE: f32 = 1e-4;
/// Larger images are clustered on an evenly strided subset of their pixels.
pub const KMEANS_MAX_SAMPLES: usize = 65_536;
