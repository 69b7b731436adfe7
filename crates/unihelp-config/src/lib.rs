//! Unihelp Config - Configuration management for Unihelp.

mod config;
mod error;
mod paths;
mod vocabulary;

pub use config::*;
pub use error::{ConfigError, ConfigResult};
pub use paths::AppPaths;
pub use vocabulary::Vocabulary;
