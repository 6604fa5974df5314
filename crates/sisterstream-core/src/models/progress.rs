use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::config::PlaybackConfig;
use crate::models::library::{ItemKind, MediaRef};

/// Current time as epoch milliseconds, the unit of `last_watched`.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// UI colour scheme persisted alongside progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Watch progress for one file.
///
/// The display fields are copies taken at playback time; the library scan
/// stays the source of truth for names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    /// Seconds into the file.
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub last_position: f64,
    /// Total length in seconds; 0 while unknown.
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub duration: f64,
    /// Epoch milliseconds of the last write. Never moves backwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_watched: Option<i64>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_kind",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<ItemKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_title: Option<String>,
}

impl ProgressRecord {
    /// Watched share in percent, clamped to `0..=100`.
    pub fn percent(&self) -> f64 {
        if self.duration > 0.0 {
            (self.last_position / self.duration * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    pub fn last_watched_at(&self) -> Option<DateTime<Utc>> {
        self.last_watched.and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    pub fn is_in_progress(&self) -> bool {
        self.last_position > 0.0 && self.duration > 0.0
    }

    fn touch(&mut self, now_ms: i64) {
        self.last_watched = Some(self.last_watched.map_or(now_ms, |prev| prev.max(now_ms)));
    }

    fn describe(&mut self, media: MediaRef<'_>) {
        self.kind = Some(media.kind());
        match media {
            MediaRef::Movie(_) => {
                self.show = None;
                self.season = None;
            }
            MediaRef::Episode(ep) => {
                self.show = Some(ep.show.clone());
                self.season = Some(ep.season.clone());
            }
        }
        self.episode_title = Some(media.title().to_string());
    }
}

/// The persisted document: theme plus progress keyed by file path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressDocument {
    #[serde(default, deserialize_with = "lenient_theme")]
    pub theme: Theme,
    /// Keyed by the same file paths the library reports.
    #[serde(default, deserialize_with = "lenient_records")]
    pub movies: BTreeMap<String, ProgressRecord>,
}

// Players report unknown lengths as Infinity, which JSON stores as null.
fn lenient_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| v.is_finite()).unwrap_or(0.0))
}

fn lenient_kind<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<ItemKind>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_theme<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Theme, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

/// One malformed record is dropped instead of failing the whole document.
fn lenient_records<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, ProgressRecord>, D::Error> {
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|(path, value)| match serde_json::from_value(value) {
            Ok(record) => Some((path, record)),
            Err(e) => {
                warn!(path = %path, error = %e, "Dropping unreadable progress record");
                None
            }
        })
        .collect())
}

fn key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl ProgressDocument {
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn record(&self, file_path: &Path) -> Option<&ProgressRecord> {
        self.movies.get(&key(file_path))
    }

    fn entry(&mut self, media: MediaRef<'_>) -> &mut ProgressRecord {
        self.movies.entry(key(media.file_path())).or_default()
    }

    /// Note that playback of `media` started, keeping any saved position.
    pub fn start_playback(&mut self, media: MediaRef<'_>, now_ms: i64) -> &ProgressRecord {
        let record = self.entry(media);
        record.describe(media);
        record.touch(now_ms);
        record
    }

    /// Save the playhead. Ignored until the player knows a finite duration.
    ///
    /// Returns whether anything was written.
    pub fn record_position(
        &mut self,
        media: MediaRef<'_>,
        position: f64,
        duration: f64,
        now_ms: i64,
    ) -> bool {
        if !duration.is_finite() || duration <= 0.0 {
            return false;
        }
        let position = if position.is_finite() { position } else { 0.0 };
        let record = self.entry(media);
        record.duration = duration;
        record.last_position = position.clamp(0.0, duration);
        record.describe(media);
        record.touch(now_ms);
        true
    }

    /// Playback reached the end; the next start begins from zero.
    pub fn finish_playback(&mut self, media: MediaRef<'_>, duration: f64, now_ms: i64) {
        let record = self.entry(media);
        record.last_position = 0.0;
        if duration.is_finite() && duration > 0.0 {
            record.duration = duration;
        }
        record.describe(media);
        record.touch(now_ms);
    }

    /// Position worth offering to resume from, if any.
    ///
    /// Positions inside the first `resume_min_seconds` or the last
    /// `resume_tail_seconds` of `duration` are not offered.
    pub fn resume_position(
        &self,
        file_path: &Path,
        duration: f64,
        policy: &PlaybackConfig,
    ) -> Option<f64> {
        let pos = self.record(file_path)?.last_position;
        if !duration.is_finite() || duration <= 0.0 || pos <= 0.0 {
            return None;
        }
        if pos < policy.resume_min_seconds || pos > duration - policy.resume_tail_seconds {
            return None;
        }
        Some(pos)
    }

    /// Partially watched items, most recent first.
    pub fn continue_watching(&self) -> Vec<(&str, &ProgressRecord)> {
        let mut items: Vec<_> = self
            .movies
            .iter()
            .filter(|(_, r)| r.is_in_progress())
            .map(|(k, r)| (k.as_str(), r))
            .collect();
        sort_newest_first(&mut items);
        items
    }

    /// Everything ever played, most recent first, at most `limit` items.
    pub fn recently_watched(&self, limit: usize) -> Vec<(&str, &ProgressRecord)> {
        let mut items: Vec<_> = self
            .movies
            .iter()
            .filter(|(_, r)| r.last_watched.is_some())
            .map(|(k, r)| (k.as_str(), r))
            .collect();
        sort_newest_first(&mut items);
        items.truncate(limit);
        items
    }
}

fn sort_newest_first(items: &mut [(&str, &ProgressRecord)]) {
    items.sort_by(|(_, a), (_, b)| {
        b.last_watched
            .unwrap_or(0)
            .cmp(&a.last_watched.unwrap_or(0))
    });
}
