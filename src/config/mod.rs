//! Configuration loading
//!
//! Reads the YAML config file, optionally expands `${VAR}` placeholders from
//! the environment, and merges the document strictly into [`Config`].

pub mod error;
pub mod expand;
pub mod loader;
pub mod types;

pub use error::{LoadError, LoadErrorKind};
pub use expand::{expand_env, expand_with};
pub use loader::load_config;
pub use types::Config;
