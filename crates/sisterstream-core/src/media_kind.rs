//! Extension-based media classification.

use serde::{Deserialize, Serialize};

/// Video file extensions recognized as playable media.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "webm"];

/// Image file extensions recognized as covers.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "svg"];

/// What a file is, judged only by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Image,
    Other,
}

/// Classify a filename by the text after its last `.` (case-insensitive).
pub fn classify(file_name: &str) -> MediaKind {
    let ext = match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => return MediaKind::Other,
    };

    if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Video
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Image
    } else {
        MediaKind::Other
    }
}

pub fn is_video(file_name: &str) -> bool {
    classify(file_name) == MediaKind::Video
}

pub fn is_image(file_name: &str) -> bool {
    classify(file_name) == MediaKind::Image
}
