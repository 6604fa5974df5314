//! JSON-file persistence for the progress document.
//!
//! The whole document is read at startup and rewritten on every save;
//! there is no merging. A missing or corrupt file is replaced by the
//! default document on load.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::CoreError;
use crate::models::ProgressDocument;

#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, resetting it to defaults if it can't be read.
    ///
    /// The default is written back immediately, so the next load sees the
    /// same document.
    pub fn load(&self) -> ProgressDocument {
        match self.try_load() {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Progress data unreadable, resetting to defaults");
                let doc = ProgressDocument::default();
                if let Err(e) = self.try_save(&doc) {
                    warn!(path = %self.path.display(), error = %e, "Failed to write default progress data");
                }
                doc
            }
        }
    }

    /// Overwrite the stored document and hand it back.
    ///
    /// Write failures are logged, not returned.
    pub fn save(&self, doc: ProgressDocument) -> ProgressDocument {
        if let Err(e) = self.try_save(&doc) {
            warn!(path = %self.path.display(), error = %e, "Failed to save progress data");
        }
        doc
    }

    pub fn try_load(&self) -> Result<ProgressDocument, CoreError> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn try_save(&self, doc: &ProgressDocument) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(doc)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
