//! Cover image lookup.
//!
//! Covers live next to the media they describe and share its base name.
//! Lookups never fail: a missing image falls back to a less specific one
//! and finally to [`Cover::Default`].

use std::path::{Path, PathBuf};

use crate::fs::FileSystem;
use crate::models::Cover;

/// Cover extensions in priority order.
const COVER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "svg"];

/// First existing `<base_dir>/<base_name>.<ext>`, trying extensions in
/// priority order.
pub fn find_cover<F: FileSystem + ?Sized>(
    fs: &F,
    base_dir: &Path,
    base_name: &str,
) -> Option<PathBuf> {
    COVER_EXTENSIONS
        .iter()
        .map(|ext| base_dir.join(format!("{base_name}.{ext}")))
        .find(|candidate| fs.exists(candidate))
}

pub fn cover_or_default(found: Option<PathBuf>) -> Cover {
    found.map_or(Cover::Default, Cover::File)
}

/// Final path component as a string, or empty.
pub(crate) fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File name without its last extension.
pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Most specific cover for an episode:
/// 1. `<season_dir>/<episode stem>.*`
/// 2. `<season_dir>/<season dir name>.*`
/// 3. `<show_dir>/<show dir name>.*`
/// 4. the built-in default
pub fn resolve_episode_cover<F: FileSystem + ?Sized>(
    fs: &F,
    episode_path: &Path,
    season_dir: &Path,
    show_dir: &Path,
) -> Cover {
    let found = find_cover(fs, season_dir, &file_stem(episode_path))
        .or_else(|| find_cover(fs, season_dir, &dir_name(season_dir)))
        .or_else(|| find_cover(fs, show_dir, &dir_name(show_dir)));
    cover_or_default(found)
}
