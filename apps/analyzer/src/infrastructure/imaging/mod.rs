pub mod decoder;

pub use decoder::{DecodedImage, decode_image};
