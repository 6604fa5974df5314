pub mod library;
pub mod progress;

pub use library::{
    Cover, Episode, ItemKind, Library, MediaRef, Movie, MovieOrigin, SearchResults, Season,
    SeasonMatch, Show,
};
pub use progress::{now_ms, ProgressDocument, ProgressRecord, Theme};
