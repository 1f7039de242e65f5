use crate::domain::text::entity::RawTextDetection;
use image::RgbImage;

/// Which slot an engine occupies when the detector picks engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// Neural recognizer, preferred when ready.
    Neural,
    /// Classical recognizer, used as a fallback.
    Classical,
}

/// An OCR backend.
///
/// Extraction is CPU-bound and blocking; callers run it on a blocking worker
/// thread. Confidences must already be normalized to [0, 1].
#[cfg_attr(test, mockall::automock)]
pub trait OcrEngine: Send + Sync {
    fn name(&self) -> &'static str;

    fn kind(&self) -> EngineKind;

    /// Whether the engine finished initialization and can serve requests.
    fn is_ready(&self) -> bool;

    /// Runs OCR over the whole image and returns every raw detection.
    fn extract(&self, image: &RgbImage) -> anyhow::Result<Vec<RawTextDetection>>;
}
