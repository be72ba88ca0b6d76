pub mod assets;
pub mod bytecode;
pub mod config;
pub mod playback;
pub mod text;
pub mod util;

pub use assets::{
    LocalizationSource, Raster, SharedStage, SpriteSheet, SpriteSource, StageImage, StageLayers,
    StageRenderer, WorldSource,
};
pub use bytecode::{
    build_forest, encode_archive, encode_program, DecodeError, DecodeOptions, Decoder,
    DemoArchive, DemoProgram, Operation,
};
pub use config::{Config, PlaybackConfig, WorldBinding, WorldBindings};
pub use playback::{
    PlaybackError, PlaybackSession, PlaybackStatus, PresentationCommand, TickReport,
};
pub use text::LocalizedStrings;
