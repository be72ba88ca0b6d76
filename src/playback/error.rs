use crate::assets::SpriteSheet;

/// External data a playback step needed but could not get.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MissingAsset {
    #[error("sprite frame {frame} of the {} sheet", .sheet.as_str())]
    Sprite { sheet: SpriteSheet, frame: u16 },

    #[error("stage {stage} of world {world}")]
    Stage { world: u8, stage: u8 },

    #[error("render of stage {stage} in world {world}")]
    StageRender { world: u8, stage: u8 },
}

/// Reason a playback session stopped for good.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    #[error("cannot execute opcode {opcode}")]
    UnknownOpcode { opcode: u8 },

    #[error("missing asset: {0}")]
    MissingAsset(#[from] MissingAsset),

    #[error("demo {demo_id} has no world binding")]
    Unplaceable { demo_id: u16 },

    #[error("demo {demo_id} has no operations")]
    EmptyProgram { demo_id: u16 },
}
