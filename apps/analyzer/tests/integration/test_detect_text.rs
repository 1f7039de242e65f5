use super::helpers::{Behaviour, TestOcrEngine, engines, polygon, rect, solid, write_png};
use analyzer::{
    application::detect_text::{dto::DetectTextRequest, use_case::DetectTextUseCase},
    domain::{analysis::errors::AnalysisError, text::value_objects::BusinessType},
    infrastructure::ml::EngineKind,
};

fn sample_image() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "sign.png", &solid(16, 16, [240, 240, 240]));
    (dir, path)
}

#[tokio::test]
async fn neural_results_win_and_fallback_is_skipped() {
    let neural = TestOcrEngine::new(
        EngineKind::Neural,
        Behaviour::Detect(vec![polygon("Hair Salon", 0.88)]),
    );
    let classical = TestOcrEngine::new(
        EngineKind::Classical,
        Behaviour::Detect(vec![rect("HAIR SALON", 0.95, 0)]),
    );
    let use_case = DetectTextUseCase::new(engines(vec![neural.clone(), classical.clone()]));
    let (_dir, path) = sample_image();

    let detections = use_case
        .detect_text(&path, BusinessType::Salon)
        .await
        .unwrap();

    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].text, "Hair Salon");
    assert_eq!(detections[0].bounding_box, [1, 2, 50, 2, 50, 20, 1, 20]);
    assert_eq!(neural.calls(), 1);
    assert_eq!(classical.calls(), 0);
}

#[tokio::test]
async fn failing_neural_engine_falls_back() {
    let neural = TestOcrEngine::new(EngineKind::Neural, Behaviour::Fail);
    let classical = TestOcrEngine::new(
        EngineKind::Classical,
        Behaviour::Detect(vec![rect("Fresh Bread", 0.77, 3), rect("fresh bread", 0.5, 9)]),
    );
    let use_case = DetectTextUseCase::new(engines(vec![neural.clone(), classical.clone()]));
    let (_dir, path) = sample_image();

    let detections = use_case
        .detect_text(&path, BusinessType::General)
        .await
        .unwrap();

    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].text, "Fresh Bread");
    assert_eq!(detections[0].confidence, 0.77);
    assert_eq!(neural.calls(), 1);
    assert_eq!(classical.calls(), 1);
}

#[tokio::test]
async fn no_engines_is_an_empty_success() {
    let use_case = DetectTextUseCase::new(engines(vec![]));
    let (_dir, path) = sample_image();

    let detections = use_case
        .execute(DetectTextRequest {
            image_path: path.to_string_lossy().to_string(),
            business_type: None,
        })
        .await
        .unwrap();
    assert!(detections.is_empty());
}

#[tokio::test]
async fn only_decode_failures_surface() {
    let use_case = DetectTextUseCase::new(engines(vec![TestOcrEngine::new(
        EngineKind::Neural,
        Behaviour::Fail,
    )]));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("text.png");
    std::fs::write(&path, b"plain text, not pixels").unwrap();

    let err = use_case
        .detect_text(&path, BusinessType::General)
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::ImageDecode { .. }));
}

#[tokio::test]
async fn quality_assessment_follows_business_type() {
    let neural = TestOcrEngine::new(
        EngineKind::Neural,
        Behaviour::Detect(vec![rect("Nails and Spa", 0.9, 0), rect("zzzz", 0.9, 50)]),
    );
    let use_case = DetectTextUseCase::new(engines(vec![neural]));
    let (_dir, path) = sample_image();

    let salon = use_case
        .assess_quality(&path, BusinessType::Salon)
        .await
        .unwrap();
    let retail = use_case
        .assess_quality(&path, BusinessType::Retail)
        .await
        .unwrap();

    assert_eq!(salon.len(), 1);
    assert_eq!(salon[0].text, "Nails and Spa");
    assert!(salon[0].quality_score > retail[0].quality_score);
}
