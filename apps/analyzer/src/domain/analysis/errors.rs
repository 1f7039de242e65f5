use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failures surfaced by the analysis use cases.
///
/// Engine-level OCR failures and clustering failures never appear here: those
/// are logged and degrade to empty results inside their pipelines.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No file matches the requested identifier.
    #[error("Image not found: {0}")]
    ImageNotFound(String),

    /// The file exists but cannot be parsed as an image.
    #[error("Cannot open image {}: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A request failed validation before any work started.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),

    /// No OCR backend could be initialized. Text detection maps this to an
    /// empty result instead of returning it.
    #[error("No OCR engine available")]
    EngineUnavailable,

    /// The combined analysis exceeded the orchestrator's deadline.
    #[error("Analysis timed out after {0:?}")]
    Timeout(Duration),

    /// Anything else raised while a sub-pipeline was running.
    #[error("Analysis failed: {0:#}")]
    Failed(#[from] anyhow::Error),
}

impl AnalysisError {
    /// Whether the caller should treat this as a "not found" rather than a
    /// processing failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ImageNotFound(_))
    }
}
