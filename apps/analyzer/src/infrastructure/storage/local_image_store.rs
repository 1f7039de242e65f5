use super::traits::ImageSource;
use crate::domain::analysis::errors::AnalysisError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Looks images up in a local upload directory.
///
/// An identifier that already names an existing file is used as-is.
/// Otherwise the directory is searched for `<identifier>.<ext>` with one of
/// the allowed extensions; the first match by file name wins.
pub struct LocalImageStore {
    upload_dir: PathBuf,
    allowed_extensions: Vec<String>,
}

impl LocalImageStore {
    pub fn new(upload_dir: impl Into<PathBuf>, allowed_extensions: Vec<String>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    fn is_allowed(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.allowed_extensions.contains(&e.to_ascii_lowercase()))
            .unwrap_or(false)
    }
}

#[async_trait]
impl ImageSource for LocalImageStore {
    #[instrument(skip(self), fields(upload_dir = %self.upload_dir.display()))]
    async fn resolve(&self, image_id: &str) -> Result<PathBuf, AnalysisError> {
        let not_found = || AnalysisError::ImageNotFound(image_id.to_string());

        if image_id.trim().is_empty() {
            return Err(not_found());
        }

        let direct = PathBuf::from(image_id);
        if tokio::fs::metadata(&direct)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
        {
            debug!("Identifier is a direct path");
            return Ok(direct);
        }

        // Identifiers are bare stems; anything with separators is not ours to search.
        if image_id.contains(['/', '\\']) {
            return Err(not_found());
        }

        let mut entries = match tokio::fs::read_dir(&self.upload_dir).await {
            Ok(entries) => entries,
            Err(_) => return Err(not_found()),
        };

        let mut matches = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            let stem_matches = path.file_stem().and_then(|s| s.to_str()) == Some(image_id);
            if stem_matches && self.is_allowed(&path) && path.is_file() {
                matches.push(path);
            }
        }

        matches.sort();
        let found = matches.into_iter().next().ok_or_else(not_found)?;
        debug!("Resolved to {}", found.display());
        Ok(found)
    }
}
