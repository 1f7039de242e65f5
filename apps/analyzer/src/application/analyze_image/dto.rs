use crate::domain::{
    analysis::entity::AnalysisType, shared::thresholds::MAX_DOMINANT_COLORS,
    text::value_objects::BusinessType,
};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalyzeImageRequest {
    /// Upload identifier or direct file path
    #[validate(length(min = 1, message = "Image identifier cannot be empty"))]
    pub image_id: String,

    #[validate(length(min = 1, message = "At least one analysis type is required"))]
    #[serde(default = "default_analysis_types")]
    pub analysis_types: Vec<AnalysisType>,

    /// Free-form label; unknown values score as `General`
    pub business_type: Option<String>,

    /// Dominant color count; the configured default applies when absent
    #[validate(range(min = 1, max = MAX_DOMINANT_COLORS))]
    pub n_colors: Option<usize>,
}

fn default_analysis_types() -> Vec<AnalysisType> {
    AnalysisType::ALL.to_vec()
}

impl AnalyzeImageRequest {
    /// Request running every analysis type with default settings.
    pub fn new(image_id: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            analysis_types: default_analysis_types(),
            business_type: None,
            n_colors: None,
        }
    }

    pub fn with_types(mut self, analysis_types: Vec<AnalysisType>) -> Self {
        self.analysis_types = analysis_types;
        self
    }

    pub fn with_business_type(mut self, business_type: impl Into<String>) -> Self {
        self.business_type = Some(business_type.into());
        self
    }

    pub fn with_colors(mut self, n_colors: usize) -> Self {
        self.n_colors = Some(n_colors);
        self
    }

    pub fn wants(&self, analysis_type: AnalysisType) -> bool {
        self.analysis_types.contains(&analysis_type)
    }

    pub fn parsed_business_type(&self) -> Option<BusinessType> {
        self.business_type.as_deref().map(BusinessType::from_label)
    }
}
