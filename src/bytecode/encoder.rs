//! Writes operations back into the demo bytecode layout.
//!
//! The decoder's derived data (resolved text, reconstructed tree) is not
//! stored: text is written from its raw key and a parallel block's children
//! are flattened right after it.

use super::operation::Operation;

/// Little-endian byte sink.
#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn bytes(&mut self, v: &[u8]) {
        self.buf.extend_from_slice(v);
    }

    /// Length-prefixed (u16) text.
    fn text(&mut self, v: &str) {
        self.u16(v.len() as u16);
        self.bytes(v.as_bytes());
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Write one operation. A parallel block's `children`, if present, follow it.
pub fn write_operation(w: &mut ByteWriter, op: &Operation) {
    w.u8(op.opcode_byte());
    match op {
        Operation::ParallelBlock {
            child_count,
            children,
        } => {
            w.u8(*child_count);
            for child in children {
                write_operation(w, child);
            }
        }
        Operation::MoveCamera {
            block_x,
            block_y,
            frame_count,
        } => {
            w.u16(*block_x);
            w.u16(*block_y);
            w.u16(*frame_count);
        }
        Operation::PaintChat {
            line_count,
            offset_y,
            text,
        } => {
            w.u8(*line_count);
            w.u16(*offset_y);
            w.text(&text.raw);
        }
        Operation::Delay { frame_count } => w.u32(*frame_count),
        Operation::PlayerMove { direction } => w.u8(direction.as_byte()),
        Operation::SetDemoSprite {
            hero_sprite_id,
            background_anim_id,
        } => {
            w.u16(*hero_sprite_id);
            w.u16(*background_anim_id);
        }
        Operation::SetPosAndShow { x, y } => {
            w.u16(*x);
            w.u16(*y);
        }
        Operation::HideDemoSprite | Operation::Unknown { .. } => {}
        Operation::ShowDecoSymbol {
            frame_index,
            blink_count,
        } => {
            w.u16(*frame_index);
            w.u8(*blink_count);
        }
        Operation::HideDecoSymbol { unused, need_hide } => {
            w.u16(*unused);
            w.u8(*need_hide);
        }
        Operation::ScreenBlink { blink_count, color } => {
            w.u8(*blink_count);
            w.bytes(color);
        }
        Operation::SetBlockShort {
            block_x,
            block_y,
            block_id,
            special_data,
        } => {
            w.u16(*block_x);
            w.u16(*block_y);
            w.u8(*block_id);
            w.u8(*special_data);
        }
        Operation::SetBlockLong {
            block_x,
            block_y,
            block_id,
        } => {
            w.u16(*block_x);
            w.u16(*block_y);
            w.u32(*block_id);
        }
        Operation::PaintHint { text } => w.text(&text.raw),
    }
}

/// Encode an operation stream (flat or tree form) without any header.
pub fn encode_operations(ops: &[Operation]) -> Vec<u8> {
    let mut w = ByteWriter::new();
    for op in ops {
        write_operation(&mut w, op);
    }
    w.into_inner()
}

/// Encode a full program from its top-level operations. The declared count is
/// `forest.len()`; sprite ids are written in the given order.
pub fn encode_program(demo_id: u16, sprite_ids: &[u16], forest: &[Operation]) -> Vec<u8> {
    let mut payload = ByteWriter::new();
    payload.u16(sprite_ids.len() as u16);
    for id in sprite_ids {
        payload.u16(*id);
    }
    for op in forest {
        write_operation(&mut payload, op);
    }
    let payload = payload.into_inner();

    let mut w = ByteWriter::new();
    w.u16(demo_id);
    w.u16(forest.len() as u16);
    w.u32(payload.len() as u32);
    w.bytes(&payload);
    w.into_inner()
}

/// Encode a demo chunk: program count followed by each program.
pub fn encode_archive(programs: &[Vec<u8>]) -> Vec<u8> {
    let mut w = ByteWriter::new();
    w.u16(programs.len() as u16);
    for program in programs {
        w.bytes(program);
    }
    w.into_inner()
}
