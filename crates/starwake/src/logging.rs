//! File logging.
//!
//! The terminal belongs to the UI, so log records go to `starwake.log` in
//! the platform data directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use env_logger::{Env, Target, WriteStyle};
use starwake_config::Config;

const LOG_FILE: &str = "starwake.log";

/// Install the global logger. `RUST_LOG` wins over `default_level`.
///
/// Returns the log file path, or `None` when no log file could be opened,
/// in which case logging stays disabled.
pub fn init(default_level: &str) -> Option<PathBuf> {
    let dir = Config::project_dirs()?.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .try_init()
        .ok()?;

    Some(path)
}
