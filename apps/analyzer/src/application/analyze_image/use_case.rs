use crate::{
    application::{
        analyze_color::use_case::AnalyzeColorUseCase, analyze_image::dto::AnalyzeImageRequest,
        decode_blocking, detect_text::use_case::DetectTextUseCase,
    },
    domain::analysis::{
        entity::{AnalysisReport, AnalysisType},
        errors::AnalysisError,
    },
    infrastructure::storage::ImageSource,
};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};
use validator::Validate;

/// Top-level analysis of one image.
///
/// Resolves the identifier, decodes the file once, then runs the requested
/// color and text pipelines concurrently over the shared buffer. The whole
/// call is bounded by a deadline.
///
/// # Errors
/// - `InvalidRequest` when the request fails validation
/// - `ImageNotFound` when no file matches the identifier
/// - `ImageDecode` when the file is not a readable image
/// - `Timeout` when the deadline passes
/// - `Failed` for anything raised inside a sub-pipeline
pub struct AnalyzeImageUseCase {
    source: Arc<dyn ImageSource>,
    color: AnalyzeColorUseCase,
    text: DetectTextUseCase,
    timeout: Duration,
}

impl AnalyzeImageUseCase {
    pub fn new(
        source: Arc<dyn ImageSource>,
        color: AnalyzeColorUseCase,
        text: DetectTextUseCase,
        timeout: Duration,
    ) -> Self {
        Self {
            source,
            color,
            text,
            timeout,
        }
    }

    #[instrument(skip(self, request), fields(
        image_id = %request.image_id,
        types = ?request.analysis_types,
        business_type = ?request.business_type,
        n_colors = ?request.n_colors
    ))]
    pub async fn execute(
        &self,
        request: AnalyzeImageRequest,
    ) -> Result<AnalysisReport, AnalysisError> {
        request.validate()?;
        let started = Instant::now();

        let path = self.source.resolve(&request.image_id).await?;

        let outcome = match tokio::time::timeout(self.timeout, self.run(&request, &path)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(AnalysisError::Timeout(self.timeout)),
        };

        let mut report = match outcome {
            Ok(report) => report,
            Err(e) => {
                error!("Analysis of '{}' failed: {}", request.image_id, e);
                return Err(e);
            }
        };

        report.processing_time = started.elapsed().as_secs_f64();
        info!("Analyzed '{}' in {:.3}s", request.image_id, report.processing_time);
        Ok(report)
    }

    async fn run(
        &self,
        request: &AnalyzeImageRequest,
        path: &Path,
    ) -> Result<AnalysisReport, AnalysisError> {
        let decoded = decode_blocking(path).await?;
        let pixels = Arc::new(decoded.pixels);
        let business_type = request.parsed_business_type();

        let color = async {
            if !request.wants(AnalysisType::Color) {
                return Ok(None);
            }
            self.color
                .analyze_decoded(Arc::clone(&pixels), request.n_colors)
                .await
                .map(Some)
        };
        let text = async {
            if !request.wants(AnalysisType::Text) {
                return Ok(None);
            }
            self.text
                .detect_decoded(Arc::clone(&pixels))
                .await
                .map(Some)
        };

        let (color_analysis, text_detection) = tokio::join!(color, text);
        let color_analysis = color_analysis.map_err(wrap_pipeline_error)?;
        let text_detection = text_detection.map_err(wrap_pipeline_error)?;

        Ok(AnalysisReport {
            id: request.image_id.clone(),
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            business_type,
            upload_time: decoded.modified,
            image_stats: decoded.metadata,
            color_analysis,
            text_detection,
            processing_time: 0.0,
        })
    }
}

/// Sub-pipeline failures surface as `Failed`, keeping their cause.
fn wrap_pipeline_error(err: AnalysisError) -> AnalysisError {
    match err {
        AnalysisError::Failed(_) => err,
        other => AnalysisError::Failed(anyhow::Error::new(other).context("sub-pipeline failed")),
    }
}
