use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Cover art for a library item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "path", rename_all = "lowercase")]
pub enum Cover {
    /// An image found next to the media.
    File(PathBuf),
    /// No image was found; the presentation layer shows its built-in default.
    Default,
}

impl Cover {
    /// Concrete image path, substituting `default` for [`Cover::Default`].
    pub fn path_or<'a>(&'a self, default: &'a Path) -> &'a Path {
        match self {
            Self::File(path) => path,
            Self::Default => default,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

/// Kind of a playable item, as recorded in progress records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Movie,
    Episode,
}

/// Where a movie was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovieOrigin {
    /// A video file directly in the media root.
    Standalone,
    /// The first video of a movie folder.
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub title: String,
    pub cover: Cover,
    pub file_path: PathBuf,
    pub origin: MovieOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// File name without its extension.
    pub title: String,
    /// 1-based position within the season.
    pub episode_number: u32,
    pub file_path: PathBuf,
    pub cover: Cover,
    pub show: String,
    pub season: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub name: String,
    pub cover: Cover,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub name: String,
    pub cover: Cover,
    pub seasons: Vec<Season>,
}

impl Show {
    pub fn find_season(&self, name: &str) -> Option<&Season> {
        self.seasons.iter().find(|s| s.name == name)
    }

    pub fn episode_count(&self) -> usize {
        self.seasons.iter().map(|s| s.episodes.len()).sum()
    }
}

/// Everything one scan of the media root found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub movies: Vec<Movie>,
    pub shows: Vec<Show>,
}

/// A playable item borrowed from a [`Library`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaRef<'a> {
    Movie(&'a Movie),
    Episode(&'a Episode),
}

impl<'a> MediaRef<'a> {
    pub fn file_path(&self) -> &'a Path {
        match self {
            Self::Movie(m) => &m.file_path,
            Self::Episode(e) => &e.file_path,
        }
    }

    pub fn title(&self) -> &'a str {
        match self {
            Self::Movie(m) => &m.title,
            Self::Episode(e) => &e.title,
        }
    }

    pub fn cover(&self) -> &'a Cover {
        match self {
            Self::Movie(m) => &m.cover,
            Self::Episode(e) => &e.cover,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Movie(_) => ItemKind::Movie,
            Self::Episode(_) => ItemKind::Episode,
        }
    }
}

/// A season hit in search results, with its owning show.
#[derive(Debug, Clone, Copy)]
pub struct SeasonMatch<'a> {
    pub show: &'a Show,
    pub season: &'a Season,
}

/// Library items whose names contain a search query.
#[derive(Debug, Clone, Default)]
pub struct SearchResults<'a> {
    pub shows: Vec<&'a Show>,
    pub movies: Vec<&'a Movie>,
    pub seasons: Vec<SeasonMatch<'a>>,
    pub episodes: Vec<&'a Episode>,
}

impl SearchResults<'_> {
    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
            && self.movies.is_empty()
            && self.seasons.is_empty()
            && self.episodes.is_empty()
    }
}

impl Library {
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.shows.is_empty()
    }

    pub fn episode_count(&self) -> usize {
        self.shows.iter().map(Show::episode_count).sum()
    }

    pub fn find_show(&self, name: &str) -> Option<&Show> {
        self.shows.iter().find(|s| s.name == name)
    }

    fn episodes(&self) -> impl Iterator<Item = &Episode> {
        self.shows
            .iter()
            .flat_map(|show| show.seasons.iter())
            .flat_map(|season| season.episodes.iter())
    }

    /// Every playable item keyed by its file path.
    pub fn media_index(&self) -> HashMap<&Path, MediaRef<'_>> {
        let mut index = HashMap::with_capacity(self.movies.len() + self.episode_count());
        for movie in &self.movies {
            index.insert(movie.file_path.as_path(), MediaRef::Movie(movie));
        }
        for episode in self.episodes() {
            index.insert(episode.file_path.as_path(), MediaRef::Episode(episode));
        }
        index
    }

    /// Look up a playable item by file path.
    pub fn find_media(&self, file_path: &Path) -> Option<MediaRef<'_>> {
        self.movies
            .iter()
            .find(|m| m.file_path == file_path)
            .map(MediaRef::Movie)
            .or_else(|| {
                self.episodes()
                    .find(|e| e.file_path == file_path)
                    .map(MediaRef::Episode)
            })
    }

    /// The episode after `file_path` in the same season.
    ///
    /// Returns `None` for movies, unknown paths and the last episode of a
    /// season; playback never rolls over into the next season.
    pub fn next_episode(&self, file_path: &Path) -> Option<&Episode> {
        self.shows
            .iter()
            .flat_map(|show| show.seasons.iter())
            .find_map(|season| {
                let idx = season
                    .episodes
                    .iter()
                    .position(|e| e.file_path == file_path)?;
                season.episodes.get(idx + 1)
            })
    }

    /// Case-insensitive substring search over show names, movie titles,
    /// season names and episode titles.
    pub fn search(&self, query: &str) -> SearchResults<'_> {
        let query = query.trim().to_lowercase();
        let mut results = SearchResults::default();
        if query.is_empty() {
            return results;
        }
        let hit = |text: &str| text.to_lowercase().contains(&query);

        results.shows = self.shows.iter().filter(|s| hit(&s.name)).collect();
        results.movies = self.movies.iter().filter(|m| hit(&m.title)).collect();

        for show in &self.shows {
            for season in &show.seasons {
                if hit(&season.name) {
                    results.seasons.push(SeasonMatch { show, season });
                }
                results
                    .episodes
                    .extend(season.episodes.iter().filter(|e| hit(&e.title)));
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(show: &str, season: &str, title: &str, number: u32) -> Episode {
        Episode {
            title: title.into(),
            episode_number: number,
            file_path: PathBuf::from(format!("/media/{show}/{season}/{title}.mp4")),
            cover: Cover::Default,
            show: show.into(),
            season: season.into(),
        }
    }

    fn sample() -> Library {
        let s1 = Season {
            name: "Season 1".into(),
            cover: Cover::Default,
            episodes: vec![
                episode("Foo", "Season 1", "Pilot", 1),
                episode("Foo", "Season 1", "Second", 2),
            ],
        };
        let s2 = Season {
            name: "Season 2".into(),
            cover: Cover::Default,
            episodes: vec![episode("Foo", "Season 2", "Return", 1)],
        };
        Library {
            movies: vec![Movie {
                title: "Heat".into(),
                cover: Cover::File(PathBuf::from("/media/Heat.jpg")),
                file_path: PathBuf::from("/media/Heat.mp4"),
                origin: MovieOrigin::Standalone,
            }],
            shows: vec![Show {
                name: "Foo".into(),
                cover: Cover::Default,
                seasons: vec![s1, s2],
            }],
        }
    }

    #[test]
    fn test_media_index_covers_movies_and_episodes() {
        let lib = sample();
        let index = lib.media_index();
        assert_eq!(index.len(), 4);
        let heat = index[Path::new("/media/Heat.mp4")];
        assert_eq!(heat.kind(), ItemKind::Movie);
        assert_eq!(heat.title(), "Heat");
        let pilot = index[Path::new("/media/Foo/Season 1/Pilot.mp4")];
        assert_eq!(pilot.kind(), ItemKind::Episode);
    }

    #[test]
    fn test_next_episode_stays_in_season() {
        let lib = sample();
        let next = lib
            .next_episode(Path::new("/media/Foo/Season 1/Pilot.mp4"))
            .unwrap();
        assert_eq!(next.title, "Second");
        assert!(lib
            .next_episode(Path::new("/media/Foo/Season 1/Second.mp4"))
            .is_none());
        assert!(lib.next_episode(Path::new("/media/Heat.mp4")).is_none());
        assert!(lib.next_episode(Path::new("/nowhere.mp4")).is_none());
    }

    #[test]
    fn test_search_groups() {
        let lib = sample();
        let results = lib.search("  SEASON ");
        assert!(results.shows.is_empty());
        assert_eq!(results.seasons.len(), 2);
        assert_eq!(results.seasons[0].show.name, "Foo");

        let results = lib.search("e");
        assert_eq!(results.movies.len(), 1);
        // "Second" and "Return"; "Pilot" has no "e".
        assert_eq!(results.episodes.len(), 2);

        assert!(lib.search("   ").is_empty());
        assert!(lib.search("zzz").is_empty());
    }

    #[test]
    fn test_find_media() {
        let lib = sample();
        assert!(matches!(
            lib.find_media(Path::new("/media/Foo/Season 2/Return.mp4")),
            Some(MediaRef::Episode(e)) if e.episode_number == 1
        ));
        assert!(lib.find_media(Path::new("/media/nope.mp4")).is_none());
    }

    #[test]
    fn test_cover_serialization() {
        let json = serde_json::to_value(Cover::Default).unwrap();
        assert_eq!(json, serde_json::json!({ "source": "default" }));
        let json = serde_json::to_value(Cover::File(PathBuf::from("/a.jpg"))).unwrap();
        assert_eq!(json, serde_json::json!({ "source": "file", "path": "/a.jpg" }));
    }

    #[test]
    fn test_cover_path_or() {
        let fallback = Path::new("/assets/default-cover.svg");
        assert_eq!(Cover::Default.path_or(fallback), fallback);
        let file = Cover::File(PathBuf::from("/a.png"));
        assert_eq!(file.path_or(fallback), Path::new("/a.png"));
    }
}
