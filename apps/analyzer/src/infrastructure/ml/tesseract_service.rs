use super::traits::{EngineKind, OcrEngine};
use crate::domain::text::entity::{RawTextDetection, TextRegion};
use anyhow::{Context, anyhow};
use image::{ImageFormat, RgbImage};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Word-level row in Tesseract's TSV output.
const TSV_WORD_LEVEL: i32 = 5;
const TSV_COLUMNS: usize = 12;

/// Classical OCR through the `tesseract` command-line tool.
pub struct TesseractService {
    binary: String,
    language: String,
    enabled: bool,
}

impl TesseractService {
    /// Probes the binary once; a missing or broken install leaves the engine
    /// disabled instead of failing.
    pub fn new(binary: &str, language: &str, enabled: bool) -> Self {
        let enabled = enabled && Self::probe(binary);
        if enabled {
            info!("Tesseract OCR available via '{}' ({})", binary, language);
        }
        Self {
            binary: binary.to_string(),
            language: language.to_string(),
            enabled,
        }
    }

    fn probe(binary: &str) -> bool {
        match Command::new(binary).arg("--version").output() {
            Ok(output) if output.status.success() => true,
            Ok(output) => {
                warn!(
                    "Tesseract probe failed: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                false
            }
            Err(e) => {
                warn!("Tesseract not found at '{}': {}", binary, e);
                false
            }
        }
    }

    fn run_tsv(&self, path: &Path) -> anyhow::Result<String> {
        let output = Command::new(&self.binary)
            .arg(path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("tsv")
            .output()
            .with_context(|| format!("failed to run {}", self.binary))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("tesseract failed: {}", stderr.trim()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl OcrEngine for TesseractService {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn kind(&self) -> EngineKind {
        EngineKind::Classical
    }

    fn is_ready(&self) -> bool {
        self.enabled
    }

    fn extract(&self, image: &RgbImage) -> anyhow::Result<Vec<RawTextDetection>> {
        if !self.enabled {
            return Ok(Vec::new());
        }

        let tmp = write_temp_png(image)?;
        let tsv = self.run_tsv(tmp.path())?;
        let detections = parse_tsv(&tsv);
        debug!("Tesseract returned {} word rows", detections.len());
        Ok(detections)
    }
}

/// Writes `image` to a fresh PNG file that lives as long as the handle.
fn write_temp_png(image: &RgbImage) -> anyhow::Result<NamedTempFile> {
    let mut tmp = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .context("failed to create temp file for OCR")?;
    image
        .write_to(&mut tmp, ImageFormat::Png)
        .context("failed to write temp image for OCR")?;
    tmp.flush().context("failed to flush temp image")?;
    Ok(tmp)
}

/// Parses word rows of `tesseract ... tsv` output.
///
/// Confidence is reported on a 0-100 scale and normalized here; rows without
/// text are skipped.
pub fn parse_tsv(tsv: &str) -> Vec<RawTextDetection> {
    let mut detections = Vec::new();

    for (idx, row) in tsv.lines().enumerate() {
        if idx == 0 {
            continue;
        }
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < TSV_COLUMNS {
            continue;
        }
        if cols[0].trim().parse::<i32>().unwrap_or(0) != TSV_WORD_LEVEL {
            continue;
        }
        let text = cols[11].trim();
        if text.is_empty() {
            continue;
        }

        let parse = |i: usize| cols[i].trim().parse::<i32>().unwrap_or(0);
        let confidence = cols[10].trim().parse::<f32>().unwrap_or(-1.0) / 100.0;

        detections.push(RawTextDetection {
            text: text.to_string(),
            confidence,
            region: TextRegion::Rect {
                x: parse(6),
                y: parse(7),
                width: parse(8),
                height: parse(9),
            },
        });
    }

    detections
}
