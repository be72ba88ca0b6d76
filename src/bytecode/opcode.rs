use serde::Serialize;

/// One-byte operation tag of the demo bytecode.
///
/// The numbering has gaps; bytes outside this set are opcodes added by later
/// game builds and are not understood by this decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Opcode {
    ParallelBlock = 0,
    MoveCamera = 1,
    PaintChat = 2,
    Delay = 6,
    PlayerMove = 10,
    SetDemoSprite = 11,
    SetPosAndShow = 12,
    HideDemoSprite = 15,
    ShowDecoSymbol = 16,
    HideDecoSymbol = 17,
    ScreenBlink = 18,
    SetBlockShort = 25,
    SetBlockLong = 26,
    PaintHint = 27,
}

impl Opcode {
    pub const ALL: [Opcode; 14] = [
        Opcode::ParallelBlock,
        Opcode::MoveCamera,
        Opcode::PaintChat,
        Opcode::Delay,
        Opcode::PlayerMove,
        Opcode::SetDemoSprite,
        Opcode::SetPosAndShow,
        Opcode::HideDemoSprite,
        Opcode::ShowDecoSymbol,
        Opcode::HideDecoSymbol,
        Opcode::ScreenBlink,
        Opcode::SetBlockShort,
        Opcode::SetBlockLong,
        Opcode::PaintHint,
    ];

    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_byte() == byte)
    }

    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Opcode::ParallelBlock => "ParallelBlock",
            Opcode::MoveCamera => "MoveCamera",
            Opcode::PaintChat => "PaintChat",
            Opcode::Delay => "Delay",
            Opcode::PlayerMove => "PlayerMove",
            Opcode::SetDemoSprite => "SetDemoSprite",
            Opcode::SetPosAndShow => "SetPosAndShow",
            Opcode::HideDemoSprite => "HideDemoSprite",
            Opcode::ShowDecoSymbol => "ShowDecoSymbol",
            Opcode::HideDecoSymbol => "HideDecoSymbol",
            Opcode::ScreenBlink => "ScreenBlink",
            Opcode::SetBlockShort => "SetBlockShort",
            Opcode::SetBlockLong => "SetBlockLong",
            Opcode::PaintHint => "PaintHint",
        }
    }
}
