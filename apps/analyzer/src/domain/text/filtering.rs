use super::cleaning::clean_text;
use super::entity::{RawTextDetection, TextDetection};
use super::quality::is_meaningful_text;
use crate::domain::shared::thresholds::{MIN_OCR_CONFIDENCE, MIN_TEXT_LENGTH};
use std::collections::HashSet;
use tracing::debug;

/// Drops low-confidence, empty and noisy detections and cleans the rest.
pub fn filter_detections(raw: Vec<RawTextDetection>) -> Vec<TextDetection> {
    raw.into_iter()
        .filter_map(|detection| {
            if detection.confidence <= MIN_OCR_CONFIDENCE {
                debug!(
                    "Rejected '{}': confidence {:.3} <= {}",
                    detection.text, detection.confidence, MIN_OCR_CONFIDENCE
                );
                return None;
            }

            let cleaned = clean_text(&detection.text);
            if cleaned.chars().count() < MIN_TEXT_LENGTH {
                debug!("Rejected '{}': empty after cleaning", detection.text);
                return None;
            }

            if !is_meaningful_text(&cleaned) {
                debug!("Rejected '{}': not meaningful", cleaned);
                return None;
            }

            Some(TextDetection {
                text: cleaned,
                confidence: detection.confidence,
                bounding_box: detection.region.to_bounding_box(),
            })
        })
        .collect()
}

/// Keeps the highest-confidence occurrence of each case-insensitive text.
///
/// The output is ordered by descending confidence; equal confidences keep
/// their input order.
pub fn deduplicate(mut detections: Vec<TextDetection>) -> Vec<TextDetection> {
    detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut seen = HashSet::new();
    detections.retain(|d| seen.insert(d.text.to_lowercase()));
    detections
}
