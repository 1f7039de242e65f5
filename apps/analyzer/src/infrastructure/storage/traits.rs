use crate::domain::analysis::errors::AnalysisError;
use async_trait::async_trait;
use std::path::PathBuf;

/// Resolves a caller-supplied image identifier to a readable file.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Returns the file backing `image_id`, or `AnalysisError::ImageNotFound`.
    async fn resolve(&self, image_id: &str) -> Result<PathBuf, AnalysisError>;
}
