//! Text cleaning, scoring and reconciliation of OCR output.

pub mod cleaning;
pub mod entity;
pub mod filtering;
pub mod keywords;
pub mod quality;
pub mod value_objects;

pub use cleaning::clean_text;
pub use quality::{calculate_text_quality, is_meaningful_text};
