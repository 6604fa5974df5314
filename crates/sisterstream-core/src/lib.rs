pub mod config;
pub mod cover;
pub mod engine;
pub mod error;
pub mod fs;
pub mod media_kind;
pub mod models;
pub mod natural;
pub mod progress;
pub mod scanner;
pub mod shape;

pub use engine::Engine;
pub use error::CoreError;
