//! Demo program decoder.
//!
//! ## Layout
//!
//! ```text
//! Program: demo_id(u16) | opcode_count(u16) | payload_size(u32) | payload
//! Payload: sprite_count(u16) | sprite_id(u16) * sprite_count | operations
//! Operation: opcode(u8) + fields (see `decode_fields`)
//! ```
//!
//! `opcode_count` only covers top-level operations. Every parallel block
//! raises the number of operations still to read by its child count, so the
//! stream length is discovered while decoding.

use serde::Serialize;

use super::cursor::ByteCursor;
use super::error::DecodeError;
use super::opcode::Opcode;
use super::operation::{DemoText, Direction, Operation};
use super::program::DemoProgram;
use crate::text::{self, LocalizedStrings};

/// Knobs for how forgiving the decoder is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Fail on unrecognized opcodes instead of stopping early.
    pub strict_opcodes: bool,
    /// Fail on text fields that are not valid UTF-8 instead of replacing
    /// invalid sequences.
    pub strict_text: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict_opcodes: false,
            strict_text: true,
        }
    }
}

/// Where decoding stopped on an opcode this decoder does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EarlyStop {
    pub offset: usize,
    pub opcode: u8,
}

/// Program header plus the still-undecoded payload.
#[derive(Debug, Clone, Copy)]
pub struct RawProgram<'a> {
    pub demo_id: u16,
    pub declared_count: u16,
    pub payload: &'a [u8],
    /// Absolute offset of `payload[0]`.
    pub payload_offset: usize,
}

impl<'a> RawProgram<'a> {
    /// Read a program header and slice its payload.
    pub fn read(cursor: &mut ByteCursor<'a>) -> Result<Self, DecodeError> {
        let demo_id = cursor.read_u16_le()?;
        let declared_count = cursor.read_u16_le()?;
        let payload_size = cursor.read_u32_le()? as usize;
        let payload_offset = cursor.position();
        let payload = cursor.read_bytes(payload_size)?;
        Ok(Self {
            demo_id,
            declared_count,
            payload,
            payload_offset,
        })
    }
}

/// Decoder output before tree reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedProgram {
    pub demo_id: u16,
    pub declared_count: u16,
    /// Sorted ascending, no duplicates.
    pub sprite_ids: Vec<u16>,
    /// Operations in stream order; parallel blocks have no children yet.
    pub operations: Vec<Operation>,
    pub payload: Vec<u8>,
    /// Offset into `payload` where the operation stream starts.
    pub operations_start: usize,
    pub stopped_at: Option<EarlyStop>,
}

impl DecodedProgram {
    pub fn into_program(self) -> DemoProgram {
        DemoProgram::from_decoded(self)
    }
}

/// Decodes demo programs, resolving chat/hint text against an optional
/// localized string table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder<'s> {
    options: DecodeOptions,
    strings: Option<&'s LocalizedStrings>,
}

impl<'s> Decoder<'s> {
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            options,
            strings: None,
        }
    }

    pub fn with_strings(mut self, strings: Option<&'s LocalizedStrings>) -> Self {
        self.strings = strings;
        self
    }

    /// Decode one program (header included) from the start of `bytes`.
    pub fn decode_program(&self, bytes: &[u8]) -> Result<DecodedProgram, DecodeError> {
        let mut cursor = ByteCursor::new(bytes);
        let raw = RawProgram::read(&mut cursor)?;
        self.decode_raw(&raw)
    }

    /// Decode the payload of a program whose header was already read.
    pub fn decode_raw(&self, raw: &RawProgram<'_>) -> Result<DecodedProgram, DecodeError> {
        let mut cursor = ByteCursor::with_base(raw.payload, raw.payload_offset);

        let sprite_count = cursor.read_u16_le()?;
        let mut sprite_ids = (0..sprite_count)
            .map(|_| cursor.read_u16_le())
            .collect::<Result<Vec<_>, _>>()?;
        sprite_ids.sort_unstable();
        sprite_ids.dedup();

        let operations_start = cursor.position() - raw.payload_offset;
        let (operations, stopped_at) = self.decode_operations(&mut cursor, raw.declared_count)?;

        if stopped_at.is_none() && !cursor.is_empty() {
            tracing::debug!(
                demo_id = raw.demo_id,
                trailing = cursor.remaining(),
                "Demo payload has bytes after the last operation"
            );
        }
        tracing::debug!(
            demo_id = raw.demo_id,
            declared = raw.declared_count,
            decoded = operations.len(),
            sprites = sprite_ids.len(),
            "Decoded demo program"
        );

        Ok(DecodedProgram {
            demo_id: raw.demo_id,
            declared_count: raw.declared_count,
            sprite_ids,
            operations,
            payload: raw.payload.to_vec(),
            operations_start,
            stopped_at,
        })
    }

    /// Decode the flat operation stream.
    ///
    /// `bound` starts at the declared top-level count and grows by the child
    /// count of every parallel block, before those children are read.
    fn decode_operations(
        &self,
        cursor: &mut ByteCursor<'_>,
        declared_count: u16,
    ) -> Result<(Vec<Operation>, Option<EarlyStop>), DecodeError> {
        let mut bound = usize::from(declared_count);
        let mut operations = Vec::with_capacity(bound);

        while operations.len() < bound {
            let offset = cursor.position();
            let byte = cursor.read_u8()?;
            let Some(opcode) = Opcode::from_byte(byte) else {
                if self.options.strict_opcodes {
                    return Err(DecodeError::UnknownOpcode {
                        offset,
                        opcode: byte,
                    });
                }
                // Later game builds added opcodes; keep what was understood.
                tracing::warn!(
                    offset,
                    opcode = byte,
                    decoded = operations.len(),
                    expected = bound,
                    "Unknown demo opcode, dropping the rest of the stream"
                );
                return Ok((
                    operations,
                    Some(EarlyStop {
                        offset,
                        opcode: byte,
                    }),
                ));
            };

            let operation = self.decode_fields(opcode, cursor)?;
            if let Operation::ParallelBlock { child_count, .. } = &operation {
                bound += usize::from(*child_count);
            }
            operations.push(operation);
        }

        Ok((operations, None))
    }

    fn decode_fields(
        &self,
        opcode: Opcode,
        c: &mut ByteCursor<'_>,
    ) -> Result<Operation, DecodeError> {
        Ok(match opcode {
            Opcode::ParallelBlock => Operation::ParallelBlock {
                child_count: c.read_u8()?,
                children: Vec::new(),
            },
            Opcode::MoveCamera => Operation::MoveCamera {
                block_x: c.read_u16_le()?,
                block_y: c.read_u16_le()?,
                frame_count: c.read_u16_le()?,
            },
            Opcode::PaintChat => {
                let line_count = c.read_u8()?;
                let offset_y = c.read_u16_le()?;
                let len = c.read_u16_le()?;
                let text = self.read_demo_text(c, len)?;
                Operation::PaintChat {
                    line_count,
                    offset_y,
                    text,
                }
            }
            Opcode::Delay => Operation::Delay {
                frame_count: c.read_u32_le()?,
            },
            Opcode::PlayerMove => Operation::PlayerMove {
                direction: Direction::from_byte(c.read_u8()?),
            },
            Opcode::SetDemoSprite => Operation::SetDemoSprite {
                hero_sprite_id: c.read_u16_le()?,
                background_anim_id: c.read_u16_le()?,
            },
            Opcode::SetPosAndShow => Operation::SetPosAndShow {
                x: c.read_u16_le()?,
                y: c.read_u16_le()?,
            },
            Opcode::HideDemoSprite => Operation::HideDemoSprite,
            Opcode::ShowDecoSymbol => Operation::ShowDecoSymbol {
                frame_index: c.read_u16_le()?,
                blink_count: c.read_u8()?,
            },
            Opcode::HideDecoSymbol => Operation::HideDecoSymbol {
                unused: c.read_u16_le()?,
                need_hide: c.read_u8()?,
            },
            Opcode::ScreenBlink => Operation::ScreenBlink {
                blink_count: c.read_u8()?,
                color: [c.read_u8()?, c.read_u8()?, c.read_u8()?],
            },
            Opcode::SetBlockShort => Operation::SetBlockShort {
                block_x: c.read_u16_le()?,
                block_y: c.read_u16_le()?,
                block_id: c.read_u8()?,
                special_data: c.read_u8()?,
            },
            Opcode::SetBlockLong => Operation::SetBlockLong {
                block_x: c.read_u16_le()?,
                block_y: c.read_u16_le()?,
                block_id: c.read_u32_le()?,
            },
            Opcode::PaintHint => {
                let len = c.read_u16_le()?;
                Operation::PaintHint {
                    text: self.read_demo_text(c, len)?,
                }
            }
        })
    }

    fn read_demo_text(&self, c: &mut ByteCursor<'_>, len: u16) -> Result<DemoText, DecodeError> {
        let raw = c.read_text(usize::from(len), self.options.strict_text)?;
        let resolved = text::resolve(&raw, self.strings);
        if resolved.is_none() && self.strings.is_some() {
            tracing::debug!(raw = %raw, "Demo text key has no localized string");
        }
        Ok(DemoText { raw, resolved })
    }
}
