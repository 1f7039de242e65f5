use analyzer::{
    application::{
        analyze_color::use_case::AnalyzeColorUseCase,
        analyze_image::use_case::AnalyzeImageUseCase, detect_text::use_case::DetectTextUseCase,
    },
    domain::text::entity::{RawTextDetection, TextRegion},
    infrastructure::{
        ml::{EngineKind, OcrEngine, OcrEngines},
        storage::LocalImageStore,
    },
};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

pub enum Behaviour {
    Detect(Vec<RawTextDetection>),
    Fail,
    Sleep(Duration),
}

/// Scripted OCR engine that counts its calls.
pub struct TestOcrEngine {
    kind: EngineKind,
    behaviour: Behaviour,
    pub calls: AtomicUsize,
}

impl TestOcrEngine {
    pub fn new(kind: EngineKind, behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            kind,
            behaviour,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OcrEngine for TestOcrEngine {
    fn name(&self) -> &'static str {
        match self.kind {
            EngineKind::Neural => "test-neural",
            EngineKind::Classical => "test-classical",
        }
    }

    fn kind(&self) -> EngineKind {
        self.kind
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn extract(&self, _image: &RgbImage) -> anyhow::Result<Vec<RawTextDetection>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            Behaviour::Detect(detections) => Ok(detections.clone()),
            Behaviour::Fail => Err(anyhow::anyhow!("scripted failure")),
            Behaviour::Sleep(duration) => {
                std::thread::sleep(*duration);
                Ok(Vec::new())
            }
        }
    }
}

pub fn rect(text: &str, confidence: f32, x: i32) -> RawTextDetection {
    RawTextDetection {
        text: text.to_string(),
        confidence,
        region: TextRegion::Rect {
            x,
            y: 10,
            width: 40,
            height: 12,
        },
    }
}

pub fn polygon(text: &str, confidence: f32) -> RawTextDetection {
    RawTextDetection {
        text: text.to_string(),
        confidence,
        region: TextRegion::Polygon(vec![[1.0, 2.0], [50.0, 2.0], [50.0, 20.0], [1.0, 20.0]]),
    }
}

pub struct TestApp {
    pub dir: TempDir,
    pub use_case: AnalyzeImageUseCase,
}

impl TestApp {
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.path().join(file_name)
    }
}

pub fn engines(list: Vec<Arc<TestOcrEngine>>) -> Arc<OcrEngines> {
    Arc::new(OcrEngines::new(
        list.into_iter()
            .map(|e| e as Arc<dyn OcrEngine>)
            .collect(),
    ))
}

pub fn spawn_app(engines: Arc<OcrEngines>, timeout: Duration) -> TestApp {
    let dir = tempfile::tempdir().expect("failed to create upload dir");
    let use_case = AnalyzeImageUseCase::new(
        Arc::new(LocalImageStore::new(
            dir.path(),
            vec!["png".into(), "jpg".into()],
        )),
        AnalyzeColorUseCase::new(5),
        DetectTextUseCase::new(engines),
        timeout,
    );
    TestApp { dir, use_case }
}

pub fn write_png(dir: &Path, name: &str, image: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).expect("failed to write test image");
    path
}

pub fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}
