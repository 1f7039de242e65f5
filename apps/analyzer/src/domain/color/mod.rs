//! Color math over decoded RGB buffers.

pub mod clustering;
pub mod entity;
pub mod harmony;
pub mod hsv;
pub mod statistics;
pub mod temperature;

pub use clustering::extract_dominant_colors;
pub use harmony::calculate_color_harmony;
pub use statistics::analyze_basic_stats;
pub use temperature::calculate_color_temperature;
