mod settings;
pub mod worlds;

pub use settings::{Config, PlaybackConfig, TomlConfig, EXAMPLE_CONFIG};
pub use worlds::{default_world_bindings, WorldBinding, WorldBindings};
