//! CLI command implementations.

pub mod init;
pub mod inspect;
pub mod path;
pub mod search;
pub mod topics;

use anyhow::Result;
use pathwise::Config;
use std::path::Path;

/// Explicit config file, or pathwise.toml discovery, or defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
