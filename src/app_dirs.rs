//! Resolve the configuration directory consulted for settings files.
//!
//! The helper respects an environment override while falling back to the
//! platform-appropriate location provided by the `directories` crate.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "sift";
const APPLICATION: &str = "sift";

const CONFIG_DIR_ENV: &str = "SIFT_CONFIG_DIR";

/// Return the configuration directory used to locate settings files.
///
/// An empty override value is treated the same as an unset one so callers
/// can use shell defaults without worrying about empty expansions.
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(value) = env::var_os(CONFIG_DIR_ENV) {
        if !value.is_empty() {
            return Ok(PathBuf::from(value));
        }
    }

    let dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .ok_or_else(|| anyhow!("unable to determine project directories for sift"))?;
    Ok(dirs.config_local_dir().to_path_buf())
}
