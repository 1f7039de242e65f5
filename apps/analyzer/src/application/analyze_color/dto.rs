use crate::domain::shared::thresholds::{DEFAULT_DOMINANT_COLORS, MAX_DOMINANT_COLORS};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalyzeColorRequest {
    #[validate(length(min = 1, message = "Image path cannot be empty"))]
    pub image_path: String,

    #[validate(range(min = 1, max = MAX_DOMINANT_COLORS))]
    #[serde(default = "default_n_colors")]
    pub n_colors: usize,
}

fn default_n_colors() -> usize {
    DEFAULT_DOMINANT_COLORS
}

impl AnalyzeColorRequest {
    pub fn new(image_path: impl Into<String>, n_colors: usize) -> Self {
        Self {
            image_path: image_path.into(),
            n_colors,
        }
    }
}
