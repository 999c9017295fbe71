use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::RoutemapConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".routemap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse config from a TOML string
pub fn parse_config(contents: &str, origin: &Path) -> Result<RoutemapConfig> {
    toml::from_str::<RoutemapConfig>(contents)
        .map_err(|e| Error::configuration(origin, e.message().to_string()))
}

/// Load an explicitly named config file. Any failure is an error.
pub fn load_config_from_path(path: &Path) -> Result<RoutemapConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read config file", path, e))?;
    let config = parse_config(&contents, path)?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Discover `.routemap.toml` in `start` or one of its ancestors.
///
/// A missing file means defaults. A file that exists but cannot be read or
/// parsed is reported and skipped.
pub fn load_config(start: &Path) -> RoutemapConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config(&path))
        .unwrap_or_else(|| {
            debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            RoutemapConfig::default()
        })
}

fn try_load_config(path: &Path) -> Option<RoutemapConfig> {
    match fs::read_to_string(path) {
        Ok(contents) => match parse_config(&contents, path) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                warn!("{}. Using defaults.", e);
                None
            }
        },
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to read config file {}: {}", path.display(), e);
            }
            None
        }
    }
}
