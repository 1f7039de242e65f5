pub mod analyze_color;
pub mod analyze_image;
pub mod detect_text;

use crate::{
    domain::analysis::errors::AnalysisError,
    infrastructure::imaging::{DecodedImage, decode_image},
};
use std::path::Path;

/// Runs CPU-bound work on the blocking pool.
pub(crate) async fn run_blocking<T, F>(task: F) -> Result<T, AnalysisError>
where
    F: FnOnce() -> Result<T, AnalysisError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AnalysisError::Failed(anyhow::anyhow!("analysis worker failed: {}", e)))?
}

pub(crate) async fn decode_blocking(path: &Path) -> Result<DecodedImage, AnalysisError> {
    let path = path.to_path_buf();
    run_blocking(move || decode_image(&path)).await
}
