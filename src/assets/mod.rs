//! Collaborators the playback core depends on but does not implement.
//!
//! Sprite decoding, world files, stage rendering rules and localized text all
//! live outside this crate. Playback only needs the capabilities below, and
//! every async one is awaited once, before the first tick.

pub mod localization;
pub mod raster;
pub mod stage;

use async_trait::async_trait;
use serde::Serialize;

pub use localization::LineFileStrings;
pub use raster::{pack_rgba, PixelRun, Raster, StageImage};
pub use stage::{SharedStage, StageError, StageLayers};

/// Sprite sheets playback draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteSheet {
    /// The player character (`o.f`).
    Hero,
    /// Portrait heads shown next to chat (`demoSpr.bin` entry 0).
    Portrait,
    /// Portrait frame backgrounds (`demoSpr.bin` entry 2).
    PortraitBackground,
    /// Emotion symbols blinking beside the portrait (`demoSpr.bin` entry 1).
    PortraitDecoration,
}

impl SpriteSheet {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpriteSheet::Hero => "hero",
            SpriteSheet::Portrait => "portrait",
            SpriteSheet::PortraitBackground => "portrait_background",
            SpriteSheet::PortraitDecoration => "portrait_decoration",
        }
    }
}

/// Sprite codec: one frame of one sheet, or `None` when unavailable.
#[async_trait]
pub trait SpriteSource: Send + Sync {
    async fn frame(&self, sheet: SpriteSheet, frame: u16) -> Option<Raster>;
}

/// World files: the block layers of a stage, or `None` when unavailable.
#[async_trait]
pub trait WorldSource: Send + Sync {
    async fn stage(&self, world: u8, stage: u8) -> Option<SharedStage>;
}

/// Stage rendering rules. Called synchronously after every block mutation.
pub trait StageRenderer: Send {
    fn render(&mut self, world: u8, stage: u8, layers: &StageLayers) -> Option<StageImage>;
}

/// Localized string tables by identifier (e.g. `lang.xx`).
#[async_trait]
pub trait LocalizationSource: Send + Sync {
    async fn strings(&self, table: &str) -> Option<Vec<String>>;
}
