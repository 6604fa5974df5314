//! Folder shape detection.
//!
//! A folder's role in the library is decided purely by what it directly
//! contains:
//!
//! - **season**: flat, only videos and images, at least one video;
//! - **movie folder**: flat, at least one video, other files tolerated;
//! - **show**: has a season-shaped subfolder, or has loose videos next to
//!   any subfolder.
//!
//! The `*_entries` predicates are pure over a listing snapshot. The
//! folder-level wrappers list the directory first and fail closed: an
//! unreadable directory matches no shape.

use std::path::Path;

use crate::fs::{read_safe, Entry, FileSystem};
use crate::media_kind::{classify, MediaKind};

pub fn is_season_entries(entries: &[Entry]) -> bool {
    let mut has_video = false;

    for entry in entries {
        if entry.is_dir() {
            return false;
        }
        if entry.is_file() {
            match classify(&entry.name) {
                MediaKind::Video => has_video = true,
                MediaKind::Image => {}
                MediaKind::Other => return false,
            }
        }
    }

    has_video
}

pub fn is_movie_folder_entries(entries: &[Entry]) -> bool {
    let mut has_video = false;

    for entry in entries {
        if entry.is_dir() {
            return false;
        }
        if entry.is_file() && classify(&entry.name) == MediaKind::Video {
            has_video = true;
        }
    }

    has_video
}

pub fn is_season_folder<F: FileSystem + ?Sized>(fs: &F, dir: &Path) -> bool {
    is_season_entries(&read_safe(fs, dir))
}

pub fn detect_movie_folder<F: FileSystem + ?Sized>(fs: &F, dir: &Path) -> bool {
    is_movie_folder_entries(&read_safe(fs, dir))
}

/// Whether `dir` is laid out like a show.
///
/// Only one level below `dir` is inspected; deeper nesting never makes a
/// folder a show.
pub fn is_show_folder<F: FileSystem + ?Sized>(fs: &F, dir: &Path) -> bool {
    let mut has_season = false;
    let mut has_video = false;
    let mut has_subdir = false;

    for entry in read_safe(fs, dir) {
        if entry.is_dir() {
            has_subdir = true;
            if !has_season && is_season_folder(fs, &entry.path) {
                has_season = true;
            }
        } else if entry.is_file() && classify(&entry.name) == MediaKind::Video {
            has_video = true;
        }
    }

    has_season || (has_video && has_subdir)
}
