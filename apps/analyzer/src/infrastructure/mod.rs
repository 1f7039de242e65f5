pub mod imaging;
pub mod ml;
pub mod storage;
