//! File-backed logging. The terminal belongs to the TUI, so records go to
//! `flappy-heads.log` in the data directory instead of stderr.

use super::persistence::data_dir;
use env_logger::{Env, Target};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

/// Default log file location.
pub fn default_log_path() -> io::Result<PathBuf> {
    Ok(data_dir()?.join("flappy-heads.log"))
}

/// Install the global logger, appending to `path`.
///
/// Filter defaults to `info` and honours `RUST_LOG`.
pub fn init(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))
}
