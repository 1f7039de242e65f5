pub mod local_image_store;
pub mod traits;

pub use local_image_store::LocalImageStore;
pub use traits::ImageSource;
