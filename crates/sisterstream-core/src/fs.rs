//! Filesystem access used by the classifier.
//!
//! Everything the scanner knows about the disk goes through [`FileSystem`]:
//! one-level directory listings, existence checks and creating the media
//! root. Detectors work on the [`Entry`] snapshots a listing returns.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Type of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Sockets, dangling symlinks and anything else that is neither.
    Other,
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

pub trait FileSystem {
    /// List the immediate entries of `dir` (non-recursive).
    fn list(&self, dir: &Path) -> io::Result<Vec<Entry>>;

    fn exists(&self, path: &Path) -> bool;

    fn create_dir_all(&self, dir: &Path) -> io::Result<()>;
}

/// List `dir`, treating any failure as an empty directory.
pub fn read_safe<F: FileSystem + ?Sized>(fs: &F, dir: &Path) -> Vec<Entry> {
    match fs.list(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(path = %dir.display(), error = %e, "Directory unreadable, treating as empty");
            Vec::new()
        }
    }
}

/// The local disk. Symlinks are followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn list(&self, dir: &Path) -> io::Result<Vec<Entry>> {
        if !dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not a directory: {}", dir.display()),
            ));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    // The root itself failing means the whole listing failed;
                    // a single broken child is only skipped.
                    if e.depth() == 0 {
                        return Err(e.into());
                    }
                    tracing::debug!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            let file_type = entry.file_type();
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                EntryKind::Other
            };

            entries.push(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path().to_path_buf(),
                kind,
            });
        }

        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        std::fs::create_dir_all(dir)
    }
}
