//! Decoded demo operations.

use std::fmt;

use serde::Serialize;

use super::opcode::Opcode;

/// Hero walking direction as stored in `PlayerMove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
    /// Byte outside 1..=4; kept so the stream re-encodes unchanged.
    Unknown(u8),
}

impl Direction {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => Direction::Up,
            2 => Direction::Right,
            3 => Direction::Down,
            4 => Direction::Left,
            other => Direction::Unknown(other),
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Direction::Up => 1,
            Direction::Right => 2,
            Direction::Down => 3,
            Direction::Left => 4,
            Direction::Unknown(byte) => byte,
        }
    }

    /// Unit step in screen coordinates (y grows downwards).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Unknown(_) => (0, 0),
        }
    }
}

/// Text carried by chat and hint operations.
///
/// `raw` is the numeric key stored in the bytecode; `resolved` is the
/// localized string it maps to, when the lookup succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoText {
    pub raw: String,
    pub resolved: Option<String>,
}

impl DemoText {
    pub fn unresolved(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            resolved: None,
        }
    }

    /// Text to put on screen: the localized string, else the raw key.
    pub fn display(&self) -> &str {
        self.resolved.as_deref().unwrap_or(&self.raw)
    }
}

/// A single demo instruction.
///
/// Straight out of the decoder a `ParallelBlock` has no `children`; the tree
/// pass in [`super::tree`] moves the following `child_count` operations into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    ParallelBlock {
        child_count: u8,
        children: Vec<Operation>,
    },
    MoveCamera {
        block_x: u16,
        block_y: u16,
        frame_count: u16,
    },
    PaintChat {
        line_count: u8,
        offset_y: u16,
        text: DemoText,
    },
    Delay {
        frame_count: u32,
    },
    PlayerMove {
        direction: Direction,
    },
    SetDemoSprite {
        hero_sprite_id: u16,
        background_anim_id: u16,
    },
    SetPosAndShow {
        x: u16,
        y: u16,
    },
    HideDemoSprite,
    ShowDecoSymbol {
        frame_index: u16,
        blink_count: u8,
    },
    HideDecoSymbol {
        unused: u16,
        need_hide: u8,
    },
    ScreenBlink {
        blink_count: u8,
        color: [u8; 3],
    },
    SetBlockShort {
        block_x: u16,
        block_y: u16,
        block_id: u8,
        special_data: u8,
    },
    SetBlockLong {
        block_x: u16,
        block_y: u16,
        block_id: u32,
    },
    PaintHint {
        text: DemoText,
    },
    /// Opcode this build cannot execute. The decoder stops before such bytes,
    /// so only forests assembled by other tooling contain it.
    Unknown {
        opcode: u8,
    },
}

impl Operation {
    /// Parallel block owning `children`.
    ///
    /// # Panics
    ///
    /// The child count is a single byte on the wire, so more than 255 children panics.
    pub fn parallel(children: Vec<Operation>) -> Self {
        Operation::ParallelBlock {
            child_count: u8::try_from(children.len())
                .expect("parallel block holds at most 255 children"),
            children,
        }
    }

    pub fn opcode(&self) -> Option<Opcode> {
        Some(match self {
            Operation::ParallelBlock { .. } => Opcode::ParallelBlock,
            Operation::MoveCamera { .. } => Opcode::MoveCamera,
            Operation::PaintChat { .. } => Opcode::PaintChat,
            Operation::Delay { .. } => Opcode::Delay,
            Operation::PlayerMove { .. } => Opcode::PlayerMove,
            Operation::SetDemoSprite { .. } => Opcode::SetDemoSprite,
            Operation::SetPosAndShow { .. } => Opcode::SetPosAndShow,
            Operation::HideDemoSprite => Opcode::HideDemoSprite,
            Operation::ShowDecoSymbol { .. } => Opcode::ShowDecoSymbol,
            Operation::HideDecoSymbol { .. } => Opcode::HideDecoSymbol,
            Operation::ScreenBlink { .. } => Opcode::ScreenBlink,
            Operation::SetBlockShort { .. } => Opcode::SetBlockShort,
            Operation::SetBlockLong { .. } => Opcode::SetBlockLong,
            Operation::PaintHint { .. } => Opcode::PaintHint,
            Operation::Unknown { .. } => return None,
        })
    }

    pub fn opcode_byte(&self) -> u8 {
        if let Operation::Unknown { opcode } = self {
            return *opcode;
        }
        self.opcode().map(Opcode::as_byte).unwrap_or_default()
    }

    pub fn name(&self) -> &'static str {
        self.opcode().map(Opcode::name).unwrap_or("Unknown")
    }

    /// Children of a parallel block; empty for every other kind.
    pub fn children(&self) -> &[Operation] {
        match self {
            Operation::ParallelBlock { children, .. } => children,
            _ => &[],
        }
    }

    /// Number of operations in this subtree, the node itself included.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Operation::subtree_len)
            .sum::<usize>()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        match self {
            Operation::ParallelBlock { child_count, .. } => {
                write!(f, "child_count: {child_count}")?
            }
            Operation::MoveCamera {
                block_x,
                block_y,
                frame_count,
            } => write!(
                f,
                "block_x: {block_x}, block_y: {block_y}, frame_count: {frame_count}"
            )?,
            Operation::PaintChat {
                line_count,
                offset_y,
                text,
            } => write!(
                f,
                "line_count: {line_count}, offset_y: {offset_y}, raw: {:?}, text: {:?}",
                text.raw, text.resolved
            )?,
            Operation::Delay { frame_count } => write!(f, "frame_count: {frame_count}")?,
            Operation::PlayerMove { direction } => write!(f, "direction: {direction:?}")?,
            Operation::SetDemoSprite {
                hero_sprite_id,
                background_anim_id,
            } => write!(
                f,
                "hero_sprite_id: {hero_sprite_id}, background_anim_id: {background_anim_id}"
            )?,
            Operation::SetPosAndShow { x, y } => write!(f, "x: {x}, y: {y}")?,
            Operation::HideDemoSprite => {}
            Operation::ShowDecoSymbol {
                frame_index,
                blink_count,
            } => write!(f, "frame_index: {frame_index}, blink_count: {blink_count}")?,
            Operation::HideDecoSymbol { unused, need_hide } => {
                write!(f, "unused: {unused}, need_hide: {need_hide}")?
            }
            Operation::ScreenBlink { blink_count, color } => write!(
                f,
                "blink_count: {blink_count}, color: #{:02x}{:02x}{:02x}",
                color[0], color[1], color[2]
            )?,
            Operation::SetBlockShort {
                block_x,
                block_y,
                block_id,
                special_data,
            } => write!(
                f,
                "block_x: {block_x}, block_y: {block_y}, block_id: {block_id}, special_data: {special_data}"
            )?,
            Operation::SetBlockLong {
                block_x,
                block_y,
                block_id,
            } => write!(f, "block_x: {block_x}, block_y: {block_y}, block_id: {block_id}")?,
            Operation::PaintHint { text } => {
                write!(f, "raw: {:?}, text: {:?}", text.raw, text.resolved)?
            }
            Operation::Unknown { opcode } => write!(f, "opcode: {opcode}")?,
        }
        write!(f, ")")
    }
}
