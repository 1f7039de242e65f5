use crate::domain::text::value_objects::BusinessType;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DetectTextRequest {
    #[validate(length(min = 1, message = "Image path cannot be empty"))]
    pub image_path: String,

    /// Free-form label; unknown or missing values score as `General`
    pub business_type: Option<String>,
}

impl DetectTextRequest {
    pub fn business_type(&self) -> BusinessType {
        BusinessType::from(self.business_type.as_deref())
    }
}
