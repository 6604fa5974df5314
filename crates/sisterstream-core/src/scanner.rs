//! Media root scanner.
//!
//! Classifies the immediate entries of the media root into movies and
//! shows using folder shapes alone. Every scan rebuilds the [`Library`]
//! from scratch; unreadable directories count as empty and folders that
//! match no shape are skipped.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::cover::{cover_or_default, dir_name, file_stem, find_cover, resolve_episode_cover};
use crate::fs::{read_safe, Entry, FileSystem};
use crate::media_kind::is_video;
use crate::models::{Cover, Episode, Library, Movie, MovieOrigin, Season, Show};
use crate::natural;
use crate::shape::{detect_movie_folder, is_season_entries, is_season_folder, is_show_folder};

/// Season name used when a show keeps its episodes directly in its folder.
pub const FALLBACK_SEASON_NAME: &str = "Season 1";

/// Scan the media root into a [`Library`].
///
/// The root is created when missing. Root entries keep listing order;
/// seasons and episodes are ordered naturally.
pub fn scan_library<F: FileSystem + ?Sized>(fs: &F, root: &Path) -> Library {
    if !fs.exists(root) {
        if let Err(e) = fs.create_dir_all(root) {
            warn!(path = %root.display(), error = %e, "Failed to create media root");
        }
    }

    info!(path = %root.display(), "Scanning media root");

    let mut library = Library::default();
    let mut skipped = 0u32;

    for entry in read_safe(fs, root) {
        if entry.is_file() {
            if is_video(&entry.name) {
                library.movies.push(parse_movie_file(fs, root, &entry));
            }
            continue;
        }

        if !entry.is_dir() {
            continue;
        }

        // Show/season shape takes precedence over movie-folder shape.
        if is_show_folder(fs, &entry.path) || is_season_folder(fs, &entry.path) {
            library.shows.push(parse_show(fs, &entry.path));
        } else if detect_movie_folder(fs, &entry.path) {
            if let Some(movie) = parse_movie_folder(fs, &entry.path) {
                library.movies.push(movie);
            }
        } else {
            debug!(path = %entry.path.display(), "Folder matches no media shape, skipping");
            skipped += 1;
        }
    }

    info!(
        movies = library.movies.len(),
        shows = library.shows.len(),
        episodes = library.episode_count(),
        skipped,
        "Media scan complete"
    );

    library
}

fn parse_movie_file<F: FileSystem + ?Sized>(fs: &F, root: &Path, entry: &Entry) -> Movie {
    let title = file_stem(&entry.path);
    Movie {
        cover: cover_or_default(find_cover(fs, root, &title)),
        title,
        file_path: entry.path.clone(),
        origin: MovieOrigin::Standalone,
    }
}

/// A movie folder plays its first video in natural order and takes the
/// folder's name. Folders without videos yield nothing.
pub fn parse_movie_folder<F: FileSystem + ?Sized>(fs: &F, dir: &Path) -> Option<Movie> {
    let mut videos = video_files(read_safe(fs, dir));
    natural::sort_by_name(&mut videos, |e| e.name.as_str());

    let primary = videos.into_iter().next()?;
    let title = dir_name(dir);
    Some(Movie {
        cover: cover_or_default(find_cover(fs, dir, &title)),
        title,
        file_path: primary.path,
        origin: MovieOrigin::Folder,
    })
}

/// Parse a show folder into its seasons.
///
/// Season-shaped subfolders become seasons. Without any, loose videos in
/// the show folder form a single [`FALLBACK_SEASON_NAME`] season. A show
/// with neither comes back with no seasons.
pub fn parse_show<F: FileSystem + ?Sized>(fs: &F, show_dir: &Path) -> Show {
    let name = dir_name(show_dir);
    let cover = cover_or_default(find_cover(fs, show_dir, &name));

    let entries = read_safe(fs, show_dir);

    // Each season keeps the listing it was classified from.
    let mut season_dirs: Vec<(Entry, Vec<Entry>)> = entries
        .iter()
        .filter(|e| e.is_dir())
        .map(|e| (e.clone(), read_safe(fs, &e.path)))
        .filter(|(_, listing)| is_season_entries(listing))
        .collect();
    natural::sort_by_name(&mut season_dirs, |season| season.0.name.as_str());

    let mut seasons: Vec<Season> = season_dirs
        .into_iter()
        .map(|(dir, listing)| parse_season(fs, &dir.path, listing, show_dir, &name, &cover))
        .collect();

    if seasons.is_empty() {
        let loose = video_files(entries);
        if !loose.is_empty() {
            let episodes = build_episodes(
                fs,
                loose,
                show_dir,
                show_dir,
                &name,
                FALLBACK_SEASON_NAME,
            );
            seasons.push(Season {
                name: FALLBACK_SEASON_NAME.to_string(),
                cover: cover.clone(),
                episodes,
            });
        }
    }

    Show {
        name,
        cover,
        seasons,
    }
}

fn parse_season<F: FileSystem + ?Sized>(
    fs: &F,
    season_dir: &Path,
    listing: Vec<Entry>,
    show_dir: &Path,
    show_name: &str,
    show_cover: &Cover,
) -> Season {
    let name = dir_name(season_dir);
    let cover = find_cover(fs, season_dir, &name)
        .map(Cover::File)
        .unwrap_or_else(|| show_cover.clone());

    let videos = video_files(listing);
    let episodes = build_episodes(fs, videos, season_dir, show_dir, show_name, &name);

    Season {
        name,
        cover,
        episodes,
    }
}

/// Number videos 1..N in natural order.
fn build_episodes<F: FileSystem + ?Sized>(
    fs: &F,
    mut videos: Vec<Entry>,
    season_dir: &Path,
    show_dir: &Path,
    show_name: &str,
    season_name: &str,
) -> Vec<Episode> {
    natural::sort_by_name(&mut videos, |e| e.name.as_str());

    videos
        .into_iter()
        .zip(1u32..)
        .map(|(entry, number)| Episode {
            title: file_stem(&entry.path),
            episode_number: number,
            cover: resolve_episode_cover(fs, &entry.path, season_dir, show_dir),
            file_path: entry.path,
            show: show_name.to_string(),
            season: season_name.to_string(),
        })
        .collect()
}

fn video_files(entries: Vec<Entry>) -> Vec<Entry> {
    entries
        .into_iter()
        .filter(|e| e.is_file() && is_video(&e.name))
        .collect()
}
