use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Business category used to weight keyword relevance of detected text.
///
/// Unrecognized labels map to `General`, which applies only the shared
/// keyword set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum BusinessType {
    Retail,
    Restaurant,
    Salon,
    #[default]
    General,
}

impl BusinessType {
    pub const ALL: [BusinessType; 4] = [
        BusinessType::Retail,
        BusinessType::Restaurant,
        BusinessType::Salon,
        BusinessType::General,
    ];

    /// Lenient parse: matching ignores case and surrounding whitespace,
    /// anything unknown becomes `General`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(label))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retail => "Retail",
            Self::Restaurant => "Restaurant",
            Self::Salon => "Salon",
            Self::General => "General",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Retail => "Retail stores and shops",
            Self::Restaurant => "Restaurants and food service",
            Self::Salon => "Beauty salons and spas",
            Self::General => "General purpose analysis",
        }
    }

    /// `(name, description)` pairs for every supported category.
    pub fn catalogue() -> Vec<(&'static str, &'static str)> {
        Self::ALL
            .iter()
            .map(|t| (t.as_str(), t.description()))
            .collect()
    }
}

impl From<&str> for BusinessType {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl From<Option<&str>> for BusinessType {
    fn from(label: Option<&str>) -> Self {
        label.map(Self::from_label).unwrap_or_default()
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
