use std::path::{Path, PathBuf};

use sisterstream_core::config::{AppConfig, PlaybackConfig};
use sisterstream_core::models::{Cover, ItemKind, MediaRef, ProgressDocument, Theme};
use sisterstream_core::progress::ProgressStore;
use sisterstream_core::Engine;
use tempfile::TempDir;

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"").unwrap();
}

fn engine(dir: &TempDir) -> Engine {
    let mut config = AppConfig::default();
    config.library.media_dir = Some(dir.path().join("movies"));
    config.storage.data_file = Some(dir.path().join("sisterstream-data.json"));
    Engine::from_config(&config)
}

fn populate(root: &Path) {
    touch(&root.join("movie.mp4"));
    touch(&root.join("movie.jpg"));
    touch(&root.join("Foo").join("Season 1").join("a.mp4"));
    touch(&root.join("Foo").join("Season 2").join("b.mp4"));
    touch(&root.join("Bar").join("e1.mp4"));
    touch(&root.join("Bar").join("e2.mp4"));
    touch(&root.join("Heat").join("heat.mkv"));
    touch(&root.join("Heat").join("heat.srt"));
    touch(&root.join("Posters").join("one.jpg"));
}

#[test]
fn test_scan_full_tree() {
    let dir = TempDir::new().unwrap();
    let engine = engine(&dir);
    let root = engine.media_dir().to_path_buf();
    populate(&root);

    let library = engine.scan_library();

    let mut movies: Vec<(&str, PathBuf)> = library
        .movies
        .iter()
        .map(|m| (m.title.as_str(), m.file_path.clone()))
        .collect();
    movies.sort();
    assert_eq!(
        movies,
        vec![
            ("Heat", root.join("Heat").join("heat.mkv")),
            ("movie", root.join("movie.mp4")),
        ]
    );
    let standalone = library.movies.iter().find(|m| m.title == "movie").unwrap();
    assert_eq!(standalone.cover, Cover::File(root.join("movie.jpg")));

    let foo = library.find_show("Foo").unwrap();
    assert_eq!(foo.seasons.len(), 2);
    assert_eq!(foo.seasons[0].name, "Season 1");
    assert_eq!(foo.seasons[1].name, "Season 2");
    assert!(foo
        .seasons
        .iter()
        .all(|s| s.episodes.len() == 1 && s.episodes[0].episode_number == 1));

    let bar = library.find_show("Bar").unwrap();
    assert_eq!(bar.seasons.len(), 1);
    assert_eq!(bar.seasons[0].name, "Season 1");
    let numbers: Vec<u32> = bar.seasons[0]
        .episodes
        .iter()
        .map(|e| e.episode_number)
        .collect();
    assert_eq!(numbers, vec![1, 2]);

    assert!(library.find_show("Posters").is_none());
    assert_eq!(library.shows.len(), 2);
    assert_eq!(library.episode_count(), 4);
}

#[test]
fn test_rescan_is_idempotent_and_tracks_renames() {
    let dir = TempDir::new().unwrap();
    let engine = engine(&dir);
    let root = engine.media_dir().to_path_buf();
    populate(&root);

    let first = engine.scan_library();
    assert_eq!(first, engine.scan_library());

    // Renaming e2 to e0 moves it to the front of the season.
    std::fs::rename(root.join("Bar").join("e2.mp4"), root.join("Bar").join("e0.mp4")).unwrap();
    let renamed = engine.scan_library();
    let bar = renamed.find_show("Bar").unwrap();
    let order: Vec<(&str, u32)> = bar.seasons[0]
        .episodes
        .iter()
        .map(|e| (e.title.as_str(), e.episode_number))
        .collect();
    assert_eq!(order, vec![("e0", 1), ("e1", 2)]);
}

#[test]
fn test_scan_empty_root() {
    let dir = TempDir::new().unwrap();
    let engine = engine(&dir);

    let library = engine.scan_library();

    assert!(library.is_empty());
    assert!(engine.media_dir().is_dir());
}

#[test]
fn test_progress_self_heals_and_roundtrips() {
    let dir = TempDir::new().unwrap();
    let engine = engine(&dir);

    let loaded = engine.load_progress();
    assert_eq!(loaded, ProgressDocument::default());
    assert_eq!(engine.load_progress(), loaded);

    let mut doc = loaded;
    doc.toggle_theme();
    let saved = engine.save_progress(doc.clone());
    assert_eq!(saved, doc);
    assert_eq!(engine.load_progress().theme, Theme::Light);
}

#[test]
fn test_playback_flow_joins_progress_to_library() {
    let dir = TempDir::new().unwrap();
    let engine = engine(&dir);
    let root = engine.media_dir().to_path_buf();
    populate(&root);

    let library = engine.scan_library();
    let mut doc = engine.load_progress();

    let a = root.join("Foo").join("Season 1").join("a.mp4");
    let media = library.find_media(&a).unwrap();
    doc.start_playback(media, 1_000);
    doc.record_position(media, 750.0, 1_500.0, 2_000);
    let doc = engine.save_progress(doc);

    let reloaded = engine.load_progress();
    assert_eq!(reloaded, doc);

    let record = reloaded.record(&a).unwrap();
    assert_eq!(record.kind, Some(ItemKind::Episode));
    assert_eq!(record.show.as_deref(), Some("Foo"));
    assert_eq!(record.season.as_deref(), Some("Season 1"));
    assert_eq!(record.percent(), 50.0);

    let policy = PlaybackConfig::default();
    assert_eq!(reloaded.resume_position(&a, 1_500.0, &policy), Some(750.0));

    let index = library.media_index();
    let continuing: Vec<MediaRef<'_>> = reloaded
        .continue_watching()
        .into_iter()
        .filter_map(|(path, _)| index.get(Path::new(path)).copied())
        .collect();
    assert_eq!(continuing.len(), 1);
    assert_eq!(continuing[0].file_path(), a.as_path());

    // Season 1 has a single episode and playback never crosses seasons.
    assert!(library.next_episode(&a).is_none());
    let e1 = root.join("Bar").join("e1.mp4");
    assert_eq!(
        library.next_episode(&e1).map(|e| e.file_path.clone()),
        Some(root.join("Bar").join("e2.mp4"))
    );
}

#[test]
fn test_store_can_be_pointed_anywhere() {
    let dir = TempDir::new().unwrap();
    let data: PathBuf = dir.path().join("state").join("progress.json");
    let engine = Engine::new(
        sisterstream_core::fs::LocalFs,
        dir.path().join("media"),
        ProgressStore::new(&data),
    );

    engine.save_progress(ProgressDocument::default());
    assert!(data.exists());
    assert!(engine.scan_library().is_empty());
}

#[test]
fn test_default_cover_from_config() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.library.media_dir = Some(dir.path().join("movies"));
    config.storage.data_file = Some(dir.path().join("sisterstream-data.json"));

    let plain = Engine::from_config(&config);
    assert_eq!(plain.cover_path(&Cover::Default), None);

    let fallback = dir.path().join("default-cover.svg");
    config.library.default_cover = Some(fallback.clone());
    let engine = Engine::from_config(&config);
    let root = engine.media_dir().to_path_buf();
    touch(&root.join("Heat").join("heat.mkv"));
    touch(&root.join("Heat").join("heat.srt"));
    touch(&root.join("movie.mp4"));
    let png = root.join("movie.png");
    touch(&png);

    let library = engine.scan_library();
    let heat = library.movies.iter().find(|m| m.title == "Heat").unwrap();
    let movie = library.movies.iter().find(|m| m.title == "movie").unwrap();
    assert_eq!(engine.cover_path(&heat.cover), Some(fallback.as_path()));
    assert_eq!(engine.cover_path(&movie.cover), Some(png.as_path()));
}
