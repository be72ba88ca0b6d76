//! Demo bytecode: reading, writing and tree reconstruction.

pub mod archive;
pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod opcode;
pub mod operation;
pub mod program;
pub mod tree;

pub use archive::{ArchiveError, DemoArchive};
pub use cursor::ByteCursor;
pub use decoder::{DecodeOptions, DecodedProgram, Decoder, EarlyStop, RawProgram};
pub use encoder::{encode_archive, encode_operations, encode_program, ByteWriter};
pub use error::DecodeError;
pub use opcode::Opcode;
pub use operation::{DemoText, Direction, Operation};
pub use program::DemoProgram;
pub use tree::{build_forest, flatten_forest};
