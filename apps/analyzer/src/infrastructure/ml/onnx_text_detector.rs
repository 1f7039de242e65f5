use super::traits::{EngineKind, OcrEngine};
use crate::domain::text::entity::{RawTextDetection, TextRegion};
use anyhow::{Context, anyhow};
use image::RgbImage;
use image::imageops::{self, FilterType};
use ndarray::{Array, IxDyn};
use ort::{session::Session, value::Value};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, warn};

const DET_MAX_SIDE: u32 = 960;
const DET_STRIDE: u32 = 32;
const DET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const DET_STD: [f32; 3] = [0.229, 0.224, 0.225];
const DET_BINARY_THRESHOLD: f32 = 0.3;
const DET_BOX_THRESHOLD: f32 = 0.6;
const DET_MIN_SIDE: f32 = 3.0;
const DET_UNCLIP_RATIO: f32 = 1.5;

const REC_HEIGHT: u32 = 48;
const REC_MAX_WIDTH: u32 = 320;

/// Axis-aligned text box in detector-map or image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    /// Mean probability inside the connected component
    pub score: f32,
}

impl DetectedBox {
    fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    fn scaled(self, sx: f32, sy: f32) -> Self {
        Self {
            x0: self.x0 * sx,
            y0: self.y0 * sy,
            x1: self.x1 * sx,
            y1: self.y1 * sy,
            score: self.score,
        }
    }

    fn clamped(self, width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        Self {
            x0: self.x0.clamp(0.0, w),
            y0: self.y0.clamp(0.0, h),
            x1: self.x1.clamp(0.0, w),
            y1: self.y1.clamp(0.0, h),
            score: self.score,
        }
    }

    fn to_region(self) -> TextRegion {
        TextRegion::Polygon(vec![
            [self.x0, self.y0],
            [self.x1, self.y0],
            [self.x1, self.y1],
            [self.x0, self.y1],
        ])
    }
}

/// Neural OCR: a segmentation-style text detector followed by a CTC line
/// recognizer, both loaded as ONNX models.
pub struct OnnxTextDetector {
    // Session::run needs &mut, engines are shared behind &self
    detector: Option<Mutex<Session>>,
    recognizer: Option<Mutex<Session>>,
    charset: Vec<String>,
    enabled: bool,
}

impl OnnxTextDetector {
    /// Loads both models and the charset.
    ///
    /// Missing files leave the engine disabled; a model that exists but
    /// fails to load is an error.
    pub fn new(
        detection_model: &str,
        recognition_model: &str,
        charset_path: &str,
        enabled: bool,
    ) -> anyhow::Result<Self> {
        let missing: Vec<&str> = [detection_model, recognition_model, charset_path]
            .into_iter()
            .filter(|p| !Path::new(p).exists())
            .collect();

        if !enabled || !missing.is_empty() {
            if enabled {
                warn!(
                    "OCR model files not found ({}). Neural OCR disabled, falling back to Tesseract.",
                    missing.join(", ")
                );
            }
            return Ok(Self::disabled());
        }

        let charset_raw = std::fs::read_to_string(charset_path)
            .with_context(|| format!("failed to read charset {}", charset_path))?;
        let charset = parse_charset(&charset_raw);

        let detector = Session::builder()?.commit_from_file(detection_model)?;
        let recognizer = Session::builder()?.commit_from_file(recognition_model)?;

        info!("Neural OCR loaded ({} symbols in charset)", charset.len());

        Ok(Self {
            detector: Some(Mutex::new(detector)),
            recognizer: Some(Mutex::new(recognizer)),
            charset,
            enabled: true,
        })
    }

    pub fn disabled() -> Self {
        Self {
            detector: None,
            recognizer: None,
            charset: Vec::new(),
            enabled: false,
        }
    }

    fn detect_boxes(
        &self,
        session: &Mutex<Session>,
        image: &RgbImage,
    ) -> anyhow::Result<Vec<DetectedBox>> {
        let (width, height) = image.dimensions();
        let (input, map_w, map_h) = detection_input(image);

        let output = run_session(session, input)?;
        let shape = output.shape();
        if shape.len() < 2 {
            return Err(anyhow!("unexpected detector output shape {:?}", shape));
        }
        let out_h = shape[shape.len() - 2];
        let out_w = shape[shape.len() - 1];
        let probabilities: Vec<f32> = output.iter().take(out_w * out_h).copied().collect();

        if (out_w, out_h) != (map_w as usize, map_h as usize) {
            debug!("Detector map is {}x{}, input was {}x{}", out_w, out_h, map_w, map_h);
        }
        let sx = width as f32 / out_w as f32;
        let sy = height as f32 / out_h as f32;

        let boxes = boxes_from_probability_map(&probabilities, out_w, out_h)
            .into_iter()
            .map(|b| b.scaled(sx, sy).clamped(width, height))
            .filter(|b| b.width() >= 1.0 && b.height() >= 1.0)
            .collect::<Vec<_>>();

        debug!("Detector produced {} text boxes", boxes.len());
        Ok(boxes)
    }

    fn recognize(
        &self,
        session: &Mutex<Session>,
        image: &RgbImage,
        text_box: &DetectedBox,
    ) -> anyhow::Result<Option<(String, f32)>> {
        let x = text_box.x0.floor() as u32;
        let y = text_box.y0.floor() as u32;
        let w = (text_box.x1.ceil() as u32).saturating_sub(x).max(1);
        let h = (text_box.y1.ceil() as u32).saturating_sub(y).max(1);

        let crop = imageops::crop_imm(image, x, y, w, h).to_image();
        let input = recognition_input(&crop);

        let output = run_session(session, input)?;
        let shape = output.shape();
        if shape.len() != 3 {
            return Err(anyhow!("unexpected recognizer output shape {:?}", shape));
        }
        let (steps, classes) = (shape[1], shape[2]);
        let probabilities: Vec<f32> = output.iter().copied().collect();

        Ok(ctc_greedy_decode(&probabilities, steps, classes, &self.charset))
    }
}

impl OcrEngine for OnnxTextDetector {
    fn name(&self) -> &'static str {
        "onnx"
    }

    fn kind(&self) -> EngineKind {
        EngineKind::Neural
    }

    fn is_ready(&self) -> bool {
        self.enabled && self.detector.is_some() && self.recognizer.is_some()
    }

    fn extract(&self, image: &RgbImage) -> anyhow::Result<Vec<RawTextDetection>> {
        let (Some(detector), Some(recognizer)) = (&self.detector, &self.recognizer) else {
            return Ok(Vec::new());
        };
        if !self.enabled || image.width() == 0 || image.height() == 0 {
            return Ok(Vec::new());
        }

        let mut boxes = self.detect_boxes(detector, image)?;
        boxes.sort_by(|a, b| a.y0.total_cmp(&b.y0).then(a.x0.total_cmp(&b.x0)));

        let mut detections = Vec::with_capacity(boxes.len());
        for text_box in boxes {
            if let Some((text, confidence)) = self.recognize(recognizer, image, &text_box)? {
                detections.push(RawTextDetection {
                    text,
                    confidence,
                    region: text_box.to_region(),
                });
            }
        }

        Ok(detections)
    }
}

/// Runs a single-input session and copies the first output out of the lock.
fn run_session(
    session: &Mutex<Session>,
    input: Array<f32, IxDyn>,
) -> anyhow::Result<Array<f32, IxDyn>> {
    // Manual conversion (Shape + Data) to avoid version mismatch errors
    let input_shape: Vec<i64> = input.shape().iter().map(|&d| d as i64).collect();
    let input_data = input.into_raw_vec();
    let input_value = Value::from_array((input_shape, input_data))?;

    let mut session = session
        .lock()
        .map_err(|_| anyhow!("Failed to acquire session lock"))?;

    let outputs = session.run(ort::inputs![input_value])?;
    let (extract_shape, extract_data) = outputs[0].try_extract_tensor::<f32>()?;

    let shape_vec: Vec<usize> = extract_shape.iter().map(|&d| d as usize).collect();
    let output = Array::from_shape_vec(IxDyn(&shape_vec), extract_data.to_vec())?;
    Ok(output)
}

/// Rounds a side to the detector stride, never below one stride.
fn detection_side(side: u32, ratio: f32) -> u32 {
    let scaled = (side as f32 * ratio / DET_STRIDE as f32).round() as u32;
    scaled.max(1) * DET_STRIDE
}

/// Resizes so the longer side is at most 960 and both sides are multiples
/// of 32, then applies ImageNet normalization. Returns the NCHW tensor and
/// the resized width and height.
fn detection_input(image: &RgbImage) -> (Array<f32, IxDyn>, u32, u32) {
    let (width, height) = image.dimensions();
    let ratio = (DET_MAX_SIDE as f32 / width.max(height) as f32).min(1.0);
    let new_w = detection_side(width, ratio);
    let new_h = detection_side(height, ratio);

    let resized = imageops::resize(image, new_w, new_h, FilterType::Triangle);
    let mut array = Array::zeros(IxDyn(&[1, 3, new_h as usize, new_w as usize]));

    for (x, y, pixel) in resized.enumerate_pixels() {
        for c in 0..3 {
            let value = pixel[c] as f32 / 255.0;
            array[[0, c, y as usize, x as usize]] = (value - DET_MEAN[c]) / DET_STD[c];
        }
    }

    (array, new_w, new_h)
}

/// Resizes a line crop to the recognizer height, keeping aspect ratio up to
/// the maximum width, and scales pixels to [-1, 1].
fn recognition_input(crop: &RgbImage) -> Array<f32, IxDyn> {
    let (width, height) = crop.dimensions();
    let aspect = width as f32 / height.max(1) as f32;
    let new_w = ((REC_HEIGHT as f32 * aspect).round() as u32).clamp(1, REC_MAX_WIDTH);

    let resized = imageops::resize(crop, new_w, REC_HEIGHT, FilterType::Triangle);
    let mut array = Array::zeros(IxDyn(&[1, 3, REC_HEIGHT as usize, new_w as usize]));

    for (x, y, pixel) in resized.enumerate_pixels() {
        for c in 0..3 {
            array[[0, c, y as usize, x as usize]] = (pixel[c] as f32 / 255.0 - 0.5) / 0.5;
        }
    }

    array
}

/// Extracts text boxes from a row-major probability map.
///
/// Pixels above the binary threshold are grouped into 4-connected
/// components. A component survives when its mean probability reaches the
/// box threshold and both sides are at least three pixels; survivors are
/// expanded by `area * 1.5 / perimeter` on every side.
pub fn boxes_from_probability_map(map: &[f32], width: usize, height: usize) -> Vec<DetectedBox> {
    let mut visited = vec![false; width * height];
    let mut boxes = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..(width * height).min(map.len()) {
        if visited[start] || map[start] <= DET_BINARY_THRESHOLD {
            continue;
        }

        visited[start] = true;
        queue.push_back(start);

        let (mut min_x, mut min_y) = (usize::MAX, usize::MAX);
        let (mut max_x, mut max_y) = (0usize, 0usize);
        let mut sum = 0.0f32;
        let mut count = 0usize;

        while let Some(idx) = queue.pop_front() {
            let (x, y) = (idx % width, idx / width);
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
            sum += map[idx];
            count += 1;

            let mut neighbours = Vec::with_capacity(4);
            if x > 0 {
                neighbours.push(idx - 1);
            }
            if x + 1 < width {
                neighbours.push(idx + 1);
            }
            if y > 0 {
                neighbours.push(idx - width);
            }
            if y + 1 < height {
                neighbours.push(idx + width);
            }

            for next in neighbours {
                if next < map.len() && !visited[next] && map[next] > DET_BINARY_THRESHOLD {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        let score = sum / count as f32;
        let w = (max_x - min_x + 1) as f32;
        let h = (max_y - min_y + 1) as f32;
        if score < DET_BOX_THRESHOLD || w.min(h) < DET_MIN_SIDE {
            continue;
        }

        let offset = w * h * DET_UNCLIP_RATIO / (2.0 * (w + h));
        boxes.push(DetectedBox {
            x0: min_x as f32 - offset,
            y0: min_y as f32 - offset,
            x1: (max_x + 1) as f32 + offset,
            y1: (max_y + 1) as f32 + offset,
            score,
        });
    }

    boxes
}

/// Greedy CTC decoding over a `[steps, classes]` row-major probability
/// matrix.
///
/// Class 0 is the blank; class `i` maps to `charset[i - 1]`. Repeated
/// classes collapse. Confidence is the mean of the winning probabilities of
/// the emitted symbols; `None` when nothing is emitted.
pub fn ctc_greedy_decode(
    probabilities: &[f32],
    steps: usize,
    classes: usize,
    charset: &[String],
) -> Option<(String, f32)> {
    let mut text = String::new();
    let mut scores = Vec::new();
    let mut previous = 0usize;

    for step in 0..steps {
        let row = probabilities.get(step * classes..(step + 1) * classes)?;
        let (best, prob) = row
            .iter()
            .copied()
            .enumerate()
            .fold((0usize, f32::MIN), |acc, (i, p)| if p > acc.1 { (i, p) } else { acc });

        if best != 0 && best != previous {
            if let Some(symbol) = charset.get(best - 1) {
                text.push_str(symbol);
                scores.push(prob);
            }
        }
        previous = best;
    }

    if text.is_empty() {
        return None;
    }
    let confidence = scores.iter().sum::<f32>() / scores.len() as f32;
    Some((text, confidence))
}

/// One symbol per line; a trailing space symbol is appended when absent.
pub fn parse_charset(raw: &str) -> Vec<String> {
    let mut charset: Vec<String> = raw
        .lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .filter(|line| !line.is_empty())
        .collect();
    if !charset.iter().any(|s| s == " ") {
        charset.push(" ".to_string());
    }
    charset
}
