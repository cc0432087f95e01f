/**
 * project module
 * Builder configuration: paths, label language, creator policy
 */

pub mod config;

pub use config::{BuilderConfig, PathsConfig, DEFAULT_CONFIG_FILE, DEFAULT_MERGED_NAME};
