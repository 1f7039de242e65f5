use super::onnx_text_detector::OnnxTextDetector;
use super::tesseract_service::TesseractService;
use super::traits::{EngineKind, OcrEngine};
use crate::config::Config;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

static ENGINES: OnceCell<Arc<OcrEngines>> = OnceCell::new();

/// The OCR engines available to this process, in preference order.
///
/// Built once at startup and shared read-only. After [`OcrEngines::shutdown`]
/// no engine is handed out any more.
pub struct OcrEngines {
    engines: Vec<Arc<dyn OcrEngine>>,
    closed: AtomicBool,
}

impl OcrEngines {
    pub fn new(engines: Vec<Arc<dyn OcrEngine>>) -> Self {
        Self {
            engines,
            closed: AtomicBool::new(false),
        }
    }

    /// No engines at all; text detection degrades to empty results.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Constructs the neural and classical engines from configuration.
    ///
    /// An engine that fails to load is logged and left out.
    pub fn from_config(config: &Config) -> Self {
        let mut engines: Vec<Arc<dyn OcrEngine>> = Vec::new();

        match OnnxTextDetector::new(
            &config.ocr_detection_model_path,
            &config.ocr_recognition_model_path,
            &config.ocr_charset_path,
            config.enable_neural_ocr,
        ) {
            Ok(detector) => engines.push(Arc::new(detector)),
            Err(e) => warn!("Neural OCR failed to initialize: {:#}", e),
        }

        engines.push(Arc::new(TesseractService::new(
            &config.tesseract_bin,
            &config.tesseract_lang,
            config.enable_tesseract,
        )));

        let registry = Self::new(engines);
        info!(
            "OCR engines ready: [{}]",
            registry
                .ready()
                .map(|e| e.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        registry
    }

    fn ready(&self) -> impl Iterator<Item = &Arc<dyn OcrEngine>> {
        let closed = self.closed.load(Ordering::Acquire);
        self.engines
            .iter()
            .filter(move |e| !closed && e.is_ready())
    }

    /// The first ready neural engine.
    pub fn primary(&self) -> Option<Arc<dyn OcrEngine>> {
        self.ready()
            .find(|e| e.kind() == EngineKind::Neural)
            .cloned()
    }

    /// The first ready classical engine.
    pub fn fallback(&self) -> Option<Arc<dyn OcrEngine>> {
        self.ready()
            .find(|e| e.kind() == EngineKind::Classical)
            .cloned()
    }

    pub fn any_ready(&self) -> bool {
        self.ready().next().is_some()
    }

    pub fn shutdown(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            info!("OCR engines shut down");
        }
    }
}

/// Initializes the process-wide engine handle on first call; later calls
/// return the same handle and ignore `config`.
pub fn init_engines(config: &Config) -> Arc<OcrEngines> {
    ENGINES
        .get_or_init(|| Arc::new(OcrEngines::from_config(config)))
        .clone()
}

/// The process-wide engine handle, if initialized.
pub fn engines() -> Option<Arc<OcrEngines>> {
    ENGINES.get().cloned()
}
