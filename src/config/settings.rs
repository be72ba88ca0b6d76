use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::bytecode::DecodeOptions;
use crate::util::paths::config_path;

use super::worlds::{default_world_bindings, WorldBinding, WorldBindings};

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Frame timing and screen geometry
    pub playback: PlaybackConfig,
    /// Localized string table demo text resolves against
    pub localization_table: String,
    /// Decoder strictness
    pub decode: DecodeOptions,
    /// Demo id to stage placement
    pub world_bindings: WorldBindings,
}

/// Frame timing and screen geometry used during playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Milliseconds per tick (20 FPS by default)
    pub tick_ms: u64,
    /// Viewport width in pixels
    pub viewport_width: u32,
    /// Viewport height in pixels
    pub viewport_height: u32,
    /// Edge length of a stage block in pixels
    pub block_size: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            viewport_width: 240,
            viewport_height: 320,
            block_size: 24,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            localization_table: "lang.xx".into(),
            decode: DecodeOptions::default(),
            world_bindings: default_world_bindings(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlPlaybackConfig {
    pub tick_ms: Option<u64>,
    pub viewport_width: Option<u32>,
    pub viewport_height: Option<u32>,
    pub block_size: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlLocalizationConfig {
    pub table: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlDecodeConfig {
    pub strict_opcodes: Option<bool>,
    pub strict_text: Option<bool>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub playback: Option<TomlPlaybackConfig>,
    pub localization: Option<TomlLocalizationConfig>,
    pub decode: Option<TomlDecodeConfig>,
    /// Extra or replacement world bindings
    #[serde(default)]
    pub worlds: Vec<WorldBinding>,
}

impl Config {
    /// Load configuration from the default location, merging with defaults.
    ///
    /// A missing file gets the bundled example written in its place; an
    /// unreadable or invalid one is logged and ignored.
    pub fn load() -> Self {
        let config_file = config_path();

        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        match Self::load_from_path(&config_file) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %config_file.display(),
                    error = %e,
                    "Ignoring config file"
                );
                Config::default()
            }
        }
    }

    /// Load configuration from `path`, merging with defaults.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let toml_config = toml::from_str::<TomlConfig>(contents)?;
        let mut config = Config::default();
        config.apply(toml_config);
        Ok(config)
    }

    fn apply(&mut self, toml_config: TomlConfig) {
        if let Some(playback) = toml_config.playback {
            if let Some(tick_ms) = playback.tick_ms {
                self.playback.tick_ms = tick_ms;
            }
            if let Some(width) = playback.viewport_width {
                self.playback.viewport_width = width;
            }
            if let Some(height) = playback.viewport_height {
                self.playback.viewport_height = height;
            }
            if let Some(block_size) = playback.block_size {
                self.playback.block_size = block_size;
            }
        }

        if let Some(table) = toml_config.localization.and_then(|l| l.table) {
            self.localization_table = table;
        }

        if let Some(decode) = toml_config.decode {
            if let Some(strict) = decode.strict_opcodes {
                self.decode.strict_opcodes = strict;
            }
            if let Some(strict) = decode.strict_text {
                self.decode.strict_text = strict;
            }
        }

        self.world_bindings.merge(toml_config.worlds);
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::warn!(error = %e, "Failed to create config directory");
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }
}
