use serde::Serialize;

use super::decoder::{DecodedProgram, EarlyStop};
use super::operation::Operation;
use super::tree::build_forest;

/// A decoded demo program with its operation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoProgram {
    pub demo_id: u16,
    /// Top-level operation count from the header.
    pub declared_count: u16,
    /// Sprites the program needs, sorted ascending without duplicates.
    pub sprite_ids: Vec<u16>,
    #[serde(skip)]
    pub payload: Vec<u8>,
    #[serde(skip)]
    pub operations_start: usize,
    pub operations: Vec<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<EarlyStop>,
}

impl DemoProgram {
    pub fn from_decoded(decoded: DecodedProgram) -> Self {
        Self {
            demo_id: decoded.demo_id,
            declared_count: decoded.declared_count,
            sprite_ids: decoded.sprite_ids,
            payload: decoded.payload,
            operations_start: decoded.operations_start,
            operations: build_forest(decoded.operations),
            stopped_at: decoded.stopped_at,
        }
    }

    /// Raw bytes of the operation stream (payload minus the sprite list).
    pub fn operation_bytes(&self) -> &[u8] {
        &self.payload[self.operations_start..]
    }

    /// Number of operations decoded, block children included.
    pub fn decoded_len(&self) -> usize {
        self.operations.iter().map(Operation::subtree_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Whether decoding stopped on an unknown opcode.
    pub fn is_partial(&self) -> bool {
        self.stopped_at.is_some()
    }
}
