use crate::{
    application::analyze_image::{dto::AnalyzeImageRequest, use_case::AnalyzeImageUseCase},
    domain::analysis::{entity::AnalysisReport, errors::AnalysisError},
};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Outcome of one request in a batch.
pub type BatchOutcome = Result<AnalysisReport, AnalysisError>;

/// Runs many analyses with a bounded number in flight.
pub struct BatchAnalyzer {
    use_case: Arc<AnalyzeImageUseCase>,
    permits: Arc<Semaphore>,
}

impl BatchAnalyzer {
    pub fn new(use_case: Arc<AnalyzeImageUseCase>, max_concurrent: usize) -> Self {
        Self {
            use_case,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Returns one outcome per request, in request order.
    pub async fn run(&self, requests: Vec<AnalyzeImageRequest>) -> Vec<BatchOutcome> {
        let total = requests.len();
        let mut tasks = JoinSet::new();

        for (index, request) in requests.into_iter().enumerate() {
            let use_case = Arc::clone(&self.use_case);
            let permits = Arc::clone(&self.permits);
            tasks.spawn(async move {
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return (index, Err(AnalysisError::Failed(anyhow::anyhow!(e))));
                    }
                };
                (index, use_case.execute(request).await)
            });
        }

        let mut outcomes: Vec<Option<BatchOutcome>> = (0..total).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = Some(outcome),
                Err(e) => warn!("Batch task aborted: {}", e),
            }
        }

        let outcomes: Vec<BatchOutcome> = outcomes
            .into_iter()
            .map(|o| {
                o.unwrap_or_else(|| {
                    Err(AnalysisError::Failed(anyhow::anyhow!("analysis task aborted")))
                })
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.is_err()).count();
        info!("Batch finished: {} ok, {} failed", total - failed, failed);
        outcomes
    }
}
