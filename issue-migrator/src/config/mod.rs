//! Configuration loading.
//!
//! Holds the optional TOML settings file and the destination repository
//! identifier. Command line flags are merged on top of [`Settings`] by the
//! caller.

mod error;
mod repository;
mod settings;

pub use error::ConfigError;
pub use repository::RepoSlug;
pub use settings::Settings;
