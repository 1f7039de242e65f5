pub mod engine_registry;
pub mod onnx_text_detector;
pub mod tesseract_service;
pub mod traits;

pub use engine_registry::{OcrEngines, engines, init_engines};
pub use onnx_text_detector::OnnxTextDetector;
pub use tesseract_service::TesseractService;
pub use traits::{EngineKind, OcrEngine};
