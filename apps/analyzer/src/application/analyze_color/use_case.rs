use crate::{
    application::{analyze_color::dto::AnalyzeColorRequest, decode_blocking, run_blocking},
    domain::{
        analysis::errors::AnalysisError,
        color::{
            analyze_basic_stats, calculate_color_harmony, calculate_color_temperature,
            entity::{ColorAnalysisResult, ColorSample},
            extract_dominant_colors,
        },
    },
};
use image::RgbImage;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use validator::Validate;

/// Color analysis of a single image.
///
/// Runs basic statistics, dominant-color clustering, temperature estimation
/// and harmony scoring over one decoded buffer. Harmony is always scored on
/// the dominant colors of the same call, so clustering runs before it.
///
/// # Failure modes
/// Only decoding can fail. A clustering failure is logged and yields an empty
/// `dominant_colors` list (and therefore a harmony score of 0.0) while the
/// remaining fields are still computed.
///
/// # Concurrency
/// All pixel work happens on the blocking thread pool so concurrent requests
/// do not stall the runtime.
#[derive(Debug, Clone)]
pub struct AnalyzeColorUseCase {
    default_colors: usize,
}

impl AnalyzeColorUseCase {
    pub fn new(default_colors: usize) -> Self {
        Self { default_colors }
    }

    pub fn default_colors(&self) -> usize {
        self.default_colors
    }

    /// Validates the request, then analyzes the image at its path.
    ///
    /// # Errors
    /// - `InvalidRequest` for an empty path or a cluster count outside [1, 32]
    /// - `ImageNotFound` / `ImageDecode` when the file cannot be read
    pub async fn execute(
        &self,
        request: AnalyzeColorRequest,
    ) -> Result<ColorAnalysisResult, AnalysisError> {
        request.validate()?;
        self.analyze(Path::new(&request.image_path), Some(request.n_colors))
            .await
    }

    /// Decodes `path` and runs the full color pipeline.
    ///
    /// `n_colors` falls back to the configured default when `None`.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn analyze(
        &self,
        path: &Path,
        n_colors: Option<usize>,
    ) -> Result<ColorAnalysisResult, AnalysisError> {
        let decoded = decode_blocking(path).await?;
        self.analyze_decoded(Arc::new(decoded.pixels), n_colors)
            .await
    }

    /// Runs the color pipeline on an already decoded buffer.
    pub async fn analyze_decoded(
        &self,
        pixels: Arc<RgbImage>,
        n_colors: Option<usize>,
    ) -> Result<ColorAnalysisResult, AnalysisError> {
        let n_colors = n_colors.unwrap_or(self.default_colors);
        run_blocking(move || Ok(analyze_pixels(&pixels, n_colors))).await
    }

    /// Dominant colors only.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn dominant_colors(
        &self,
        path: &Path,
        n_colors: Option<usize>,
    ) -> Result<Vec<ColorSample>, AnalysisError> {
        let n_colors = n_colors.unwrap_or(self.default_colors);
        let decoded = decode_blocking(path).await?;
        run_blocking(move || Ok(extract_dominant_colors(&decoded.pixels, n_colors))).await
    }

    /// Color temperature only.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn temperature(&self, path: &Path) -> Result<f64, AnalysisError> {
        let decoded = decode_blocking(path).await?;
        run_blocking(move || Ok(calculate_color_temperature(&decoded.pixels))).await
    }
}

impl Default for AnalyzeColorUseCase {
    fn default() -> Self {
        Self::new(crate::domain::shared::thresholds::DEFAULT_DOMINANT_COLORS)
    }
}

/// Synchronous color pipeline over a decoded buffer.
pub fn analyze_pixels(pixels: &RgbImage, n_colors: usize) -> ColorAnalysisResult {
    let stats = analyze_basic_stats(pixels);
    let dominant_colors = extract_dominant_colors(pixels, n_colors);
    let color_temperature = calculate_color_temperature(pixels);
    let color_harmony_score = calculate_color_harmony(&dominant_colors);

    debug!(
        "Color stats: brightness {:.1}, contrast {:.1}, saturation {:.3}",
        stats.brightness, stats.contrast, stats.saturation
    );
    info!(
        "Color analysis done: {} dominant colors, {:.0}K, harmony {:.2}",
        dominant_colors.len(),
        color_temperature,
        color_harmony_score
    );

    ColorAnalysisResult {
        dominant_colors,
        color_temperature,
        color_harmony_score,
        brightness: stats.brightness,
        contrast: stats.contrast,
        saturation: stats.saturation,
    }
}
