use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::RpcConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".netlinx-rpc.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<RpcConfig> {
    let config = toml::from_str::<RpcConfig>(contents)
        .map_err(|e| Error::configuration(format!("Failed to parse {CONFIG_FILE_NAME}: {e}")))?;

    regex::Regex::new(&config.scan.exclude)?;
    if config.scan.extensions.is_empty() {
        return Err(Error::configuration("scan.extensions must not be empty"));
    }
    for pattern in &config.scan.audit_ignore {
        glob::Pattern::new(pattern).map_err(|e| {
            Error::configuration(format!("Invalid audit_ignore pattern '{pattern}': {e}"))
        })?;
    }

    Ok(config)
}

/// Generate directory ancestors up to a depth limit
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

/// Find the nearest config file at or above `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Load configuration for a project rooted at `start`.
///
/// A missing file means defaults; a present but unreadable or invalid file
/// is an error rather than a silent fallback.
pub fn load_config(start: &Path) -> Result<RpcConfig> {
    let Some(path) = find_config(start) else {
        tracing::debug!(
            "No {} found within {} directories of {}. Using defaults.",
            CONFIG_FILE_NAME,
            MAX_TRAVERSAL_DEPTH,
            start.display()
        );
        return Ok(RpcConfig::default());
    };

    let contents =
        read_config_file(&path).map_err(|e| Error::file_system("Failed to read config", &path, e))?;
    let config = parse_and_validate_config(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}
