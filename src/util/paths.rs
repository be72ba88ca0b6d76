//! Locations under the rush-demo data directory

use std::path::PathBuf;

/// `~/.rush-demo`, or `.rush-demo` in the working directory when there is no home.
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".rush-demo"))
        .unwrap_or_else(|| PathBuf::from(".rush-demo"))
}

pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

pub fn log_file_path() -> PathBuf {
    logs_dir().join("rush-demo.log")
}

/// Config file read when `--config` is not given.
pub fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}
