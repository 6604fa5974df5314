use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::fs::{FileSystem, LocalFs};
use crate::models::{Cover, Library, ProgressDocument};
use crate::progress::ProgressStore;
use crate::scanner;

/// Operations the presentation layer may call.
///
/// None of them fail: filesystem trouble shows up as a smaller library or
/// a default progress document.
pub struct Engine<F: FileSystem = LocalFs> {
    fs: F,
    media_dir: PathBuf,
    store: ProgressStore,
    default_cover: Option<PathBuf>,
}

impl Engine<LocalFs> {
    /// Engine on the local disk using the paths from `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(LocalFs, config.media_dir(), ProgressStore::new(config.data_file()))
            .with_default_cover(config.library.default_cover.clone())
    }
}

impl<F: FileSystem> Engine<F> {
    pub fn new(fs: F, media_dir: impl Into<PathBuf>, store: ProgressStore) -> Self {
        Self {
            fs,
            media_dir: media_dir.into(),
            store,
            default_cover: None,
        }
    }

    /// Image to show for items resolved to [`Cover::Default`].
    pub fn with_default_cover(mut self, path: Option<PathBuf>) -> Self {
        self.default_cover = path;
        self
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    /// Image path for `cover`. `None` means the built-in asset applies.
    pub fn cover_path<'a>(&'a self, cover: &'a Cover) -> Option<&'a Path> {
        match &self.default_cover {
            Some(fallback) => Some(cover.path_or(fallback)),
            None => match cover {
                Cover::File(path) => Some(path.as_path()),
                Cover::Default => None,
            },
        }
    }

    /// Rescan the media root from scratch.
    pub fn scan_library(&self) -> Library {
        scanner::scan_library(&self.fs, &self.media_dir)
    }

    pub fn load_progress(&self) -> ProgressDocument {
        self.store.load()
    }

    pub fn save_progress(&self, doc: ProgressDocument) -> ProgressDocument {
        self.store.save(doc)
    }
}
