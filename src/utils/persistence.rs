//! Platform directories and the JSON loader shared by config, scores and logging.

use crate::core::constants::APP_NAME;
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn project_dirs() -> io::Result<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })
}

/// Get the platform config directory, creating it if needed.
pub fn config_dir() -> io::Result<PathBuf> {
    let dir = project_dirs()?.config_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the platform data directory (scores, log file), creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let dir = project_dirs()?.data_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Load a JSON file. `Ok(None)` when the file does not exist.
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> io::Result<Option<T>> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
