pub mod analysis;
pub mod color;
pub mod shared;
pub mod text;
