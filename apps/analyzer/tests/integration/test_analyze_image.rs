use super::helpers::{Behaviour, TestOcrEngine, engines, rect, solid, spawn_app, write_png};
use analyzer::{
    application::analyze_image::dto::AnalyzeImageRequest,
    domain::{
        analysis::{entity::AnalysisType, errors::AnalysisError},
        color::temperature::temperature_from_means,
        text::value_objects::BusinessType,
    },
    infrastructure::ml::{EngineKind, OcrEngines},
};
use image::{Rgb, RgbImage};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn all_white_image_end_to_end() {
    let app = spawn_app(Arc::new(OcrEngines::empty()), Duration::from_secs(30));
    write_png(app.dir.path(), "white.png", &solid(32, 24, [255, 255, 255]));

    let report = app
        .use_case
        .execute(AnalyzeImageRequest::new("white").with_types(vec![AnalysisType::Color]))
        .await
        .expect("analysis should succeed");

    let color = report.color_analysis.expect("color requested");
    assert_eq!(color.saturation, 0.0);
    assert_eq!(color.brightness, 255.0);
    assert_eq!(color.contrast, 0.0);

    // one unique color: a single dominant sample, so harmony is degenerate
    assert_eq!(color.dominant_colors.len(), 1);
    assert_eq!(color.dominant_colors[0].hex, "#ffffff");
    assert_eq!(color.color_harmony_score, 0.0);

    assert_eq!(
        color.color_temperature,
        temperature_from_means([255.0, 255.0, 255.0])
    );

    assert_eq!(report.image_stats.width, 32);
    assert_eq!(report.image_stats.height, 24);
    assert_eq!(report.image_stats.channels, 3);
    assert!(report.image_stats.file_size > 0);
}

#[tokio::test]
async fn color_and_text_share_one_request() {
    let neural = TestOcrEngine::new(
        EngineKind::Neural,
        Behaviour::Detect(vec![rect("GRAND OPENING", 0.92, 4), rect("x", 0.99, 60)]),
    );
    let app = spawn_app(engines(vec![neural.clone()]), Duration::from_secs(30));

    let image = RgbImage::from_fn(40, 20, |x, _| {
        if x < 20 {
            Rgb([220, 40, 40])
        } else {
            Rgb([40, 40, 220])
        }
    });
    write_png(app.dir.path(), "storefront.png", &image);

    let report = app
        .use_case
        .execute(
            AnalyzeImageRequest::new("storefront")
                .with_business_type("Retail")
                .with_colors(2),
        )
        .await
        .unwrap();

    assert_eq!(report.id, "storefront");
    assert_eq!(report.filename, "storefront.png");
    assert_eq!(report.business_type, Some(BusinessType::Retail));
    assert_eq!(report.color_analysis.unwrap().dominant_colors.len(), 2);

    let text = report.text_detection.unwrap();
    assert_eq!(text.len(), 1);
    assert_eq!(text[0].text, "GRAND OPENING");
    assert_eq!(text[0].bounding_box, [4, 10, 44, 10, 44, 22, 4, 22]);
    assert_eq!(neural.calls(), 1);
}

#[tokio::test]
async fn direct_paths_are_accepted() {
    let app = spawn_app(Arc::new(OcrEngines::empty()), Duration::from_secs(30));
    let elsewhere = tempfile::tempdir().unwrap();
    let path = write_png(elsewhere.path(), "menu-board.png", &solid(8, 8, [30, 30, 30]));

    let report = app
        .use_case
        .execute(AnalyzeImageRequest::new(path.to_string_lossy()))
        .await
        .unwrap();
    assert_eq!(report.filename, "menu-board.png");
    assert_eq!(report.text_detection, Some(vec![]));
}

#[tokio::test]
async fn unknown_identifier_is_not_found() {
    let app = spawn_app(Arc::new(OcrEngines::empty()), Duration::from_secs(30));
    let err = app
        .use_case
        .execute(AnalyzeImageRequest::new("does-not-exist"))
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::ImageNotFound(_)));
}

#[tokio::test]
async fn corrupt_file_is_a_decode_error() {
    let app = spawn_app(Arc::new(OcrEngines::empty()), Duration::from_secs(30));
    std::fs::write(app.path("broken.png"), b"definitely not a png").unwrap();

    let err = app
        .use_case
        .execute(AnalyzeImageRequest::new("broken"))
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::ImageDecode { .. }));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn slow_analysis_hits_the_deadline() {
    let slow = TestOcrEngine::new(
        EngineKind::Neural,
        Behaviour::Sleep(Duration::from_millis(500)),
    );
    let app = spawn_app(engines(vec![slow]), Duration::from_millis(50));
    write_png(app.dir.path(), "sign.png", &solid(8, 8, [200, 200, 0]));

    let err = app
        .use_case
        .execute(AnalyzeImageRequest::new("sign").with_types(vec![AnalysisType::Text]))
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Timeout(_)));
}

#[tokio::test]
async fn invalid_requests_fail_validation() {
    let app = spawn_app(Arc::new(OcrEngines::empty()), Duration::from_secs(30));
    let err = app
        .use_case
        .execute(AnalyzeImageRequest::new("anything").with_colors(0))
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidRequest(_)));
}
