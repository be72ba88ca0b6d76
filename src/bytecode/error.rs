//! Error types for demo bytecode decoding.

/// Error raised while reading a demo program.
///
/// Offsets are absolute positions within the buffer handed to the decoder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A read needed more bytes than the buffer has left.
    #[error("read of {requested} byte(s) at offset {offset} overruns buffer ({remaining} left)")]
    OutOfRange {
        offset: usize,
        requested: usize,
        remaining: usize,
    },

    /// A field decoded but its contents are structurally invalid.
    #[error("malformed bytecode at offset {offset}: {reason}")]
    Malformed { offset: usize, reason: String },

    /// Opcode byte not known to this decoder (only raised in strict mode).
    #[error("unknown opcode {opcode} at offset {offset}")]
    UnknownOpcode { offset: usize, opcode: u8 },
}

impl DecodeError {
    /// Byte offset the error refers to.
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::OutOfRange { offset, .. }
            | DecodeError::Malformed { offset, .. }
            | DecodeError::UnknownOpcode { offset, .. } => *offset,
        }
    }
}
