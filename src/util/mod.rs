//! Utility modules

pub mod paths;

pub use paths::{config_path, log_file_path, logs_dir};
