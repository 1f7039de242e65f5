use crate::{
    application::{decode_blocking, detect_text::dto::DetectTextRequest, run_blocking},
    domain::{
        analysis::errors::AnalysisError,
        text::{
            calculate_text_quality,
            entity::{RawTextDetection, TextDetection, TextQualityAssessment},
            filtering::{deduplicate, filter_detections},
            value_objects::BusinessType,
        },
    },
    infrastructure::ml::{OcrEngine, OcrEngines},
};
use image::RgbImage;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Multi-engine text detection.
///
/// Each call walks the same stages:
/// 1. Engine selection: the neural engine when ready, otherwise the
///    classical one.
/// 2. Extraction: raw detections from the selected engine. If the neural
///    engine fails or finds nothing, the classical engine gets a turn.
/// 3. Filtering: low-confidence, empty and noisy detections are dropped and
///    the survivors cleaned.
/// 4. Deduplication: one detection per case-insensitive text, highest
///    confidence first.
///
/// # Failure modes
/// Engine errors are logged and count as zero detections. Having no engine
/// at all yields an empty result, not an error. Only reading the image can
/// fail the call.
#[derive(Clone)]
pub struct DetectTextUseCase {
    engines: Arc<OcrEngines>,
}

impl DetectTextUseCase {
    pub fn new(engines: Arc<OcrEngines>) -> Self {
        Self { engines }
    }

    /// Validates the request, then detects text in the image at its path.
    pub async fn execute(
        &self,
        request: DetectTextRequest,
    ) -> Result<Vec<TextDetection>, AnalysisError> {
        request.validate()?;
        self.detect_text(Path::new(&request.image_path), request.business_type())
            .await
    }

    /// Decodes `path` and detects text on it.
    ///
    /// `business_type` is carried for tracing; filtering is independent of it.
    #[instrument(skip(self), fields(path = %path.display(), business_type = %business_type))]
    pub async fn detect_text(
        &self,
        path: &Path,
        business_type: BusinessType,
    ) -> Result<Vec<TextDetection>, AnalysisError> {
        let decoded = decode_blocking(path).await?;
        self.detect_decoded(Arc::new(decoded.pixels)).await
    }

    /// Runs detection on an already decoded buffer in the blocking pool.
    pub async fn detect_decoded(
        &self,
        pixels: Arc<RgbImage>,
    ) -> Result<Vec<TextDetection>, AnalysisError> {
        let engines = Arc::clone(&self.engines);
        run_blocking(move || Ok(detect_pixels(&engines, &pixels))).await
    }

    /// Detected text paired with a quality score for `business_type`.
    #[instrument(skip(self), fields(path = %path.display(), business_type = %business_type))]
    pub async fn assess_quality(
        &self,
        path: &Path,
        business_type: BusinessType,
    ) -> Result<Vec<TextQualityAssessment>, AnalysisError> {
        let detections = self.detect_text(path, business_type).await?;
        Ok(assess_detections(detections, business_type))
    }
}

/// Synchronous detection over a decoded buffer.
pub fn detect_pixels(engines: &OcrEngines, pixels: &RgbImage) -> Vec<TextDetection> {
    let raw = extract_raw(engines, pixels);
    if raw.is_empty() {
        return Vec::new();
    }

    let raw_count = raw.len();
    let filtered = filter_detections(raw);
    let filtered_count = filtered.len();
    let detections = deduplicate(filtered);

    info!(
        "Text detection: {} raw, {} after filtering, {} unique",
        raw_count,
        filtered_count,
        detections.len()
    );
    detections
}

fn extract_raw(engines: &OcrEngines, pixels: &RgbImage) -> Vec<RawTextDetection> {
    let primary = engines.primary();
    let fallback = engines.fallback();

    if primary.is_none() && fallback.is_none() {
        warn!("{}, returning no text", AnalysisError::EngineUnavailable);
        return Vec::new();
    }

    if let Some(engine) = primary {
        let raw = extract_with(engine.as_ref(), pixels);
        if !raw.is_empty() {
            return raw;
        }
        if fallback.is_some() {
            debug!("Primary engine found nothing, trying fallback");
        }
    }

    match fallback {
        Some(engine) => extract_with(engine.as_ref(), pixels),
        None => Vec::new(),
    }
}

/// Engine failures count as zero detections.
fn extract_with(engine: &dyn OcrEngine, pixels: &RgbImage) -> Vec<RawTextDetection> {
    match engine.extract(pixels) {
        Ok(raw) => {
            debug!("{} returned {} raw detections", engine.name(), raw.len());
            raw
        }
        Err(e) => {
            warn!("{} OCR failed: {:#}", engine.name(), e);
            Vec::new()
        }
    }
}

pub fn assess_detections(
    detections: Vec<TextDetection>,
    business_type: BusinessType,
) -> Vec<TextQualityAssessment> {
    detections
        .into_iter()
        .map(|d| TextQualityAssessment {
            quality_score: calculate_text_quality(&d.text, business_type),
            text: d.text,
            confidence: d.confidence,
        })
        .collect()
}
