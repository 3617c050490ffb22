use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable overriding the road network location.
pub const NETWORK_ENV_VAR: &str = "ROADROUTE_NETWORK";

/// Default entry name for the network inside the data directory.
const NETWORK_DIRNAME: &str = "network";

/// Resolve the default network location using platform-specific project directories.
pub fn default_network_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "roadroute", "roadroute").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(NETWORK_DIRNAME))
}

/// Locate the road network to load.
///
/// Precedence: `explicit` (e.g. a CLI flag), then the `ROADROUTE_NETWORK`
/// environment variable, then [`default_network_path`]. The resolved path
/// must exist.
pub fn resolve_network_path(explicit: Option<&Path>) -> Result<PathBuf> {
    let env_override = env::var_os(NETWORK_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);
    resolve_with(explicit, env_override)
}

fn resolve_with(explicit: Option<&Path>, env_override: Option<PathBuf>) -> Result<PathBuf> {
    let (path, origin) = match (explicit, env_override) {
        (Some(path), _) => (path.to_path_buf(), "argument"),
        (None, Some(path)) => (path, NETWORK_ENV_VAR),
        (None, None) => (default_network_path()?, "default"),
    };

    debug!(path = %path.display(), origin, "resolved road network path");

    if path.exists() {
        Ok(path)
    } else {
        Err(Error::NetworkNotFound { path })
    }
}
