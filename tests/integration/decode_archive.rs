//! Integration tests for reading demo chunks
//!
//! Covers the chunk reader, text resolution against a localization source and
//! the per-program failure policy.

use super::common::fixtures::{sample_program_bytes, FakeStrings, SAMPLE_DEMO_ID};
use rush_demo::assets::LineFileStrings;
use rush_demo::bytecode::{
    encode_archive, encode_operations, encode_program, flatten_forest, ByteWriter, DecodeError,
    DecodeOptions, Decoder, DemoArchive, EarlyStop, Operation,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn two_program_archive() -> Vec<u8> {
    let second = encode_program(22, &[], &[Operation::Delay { frame_count: 1 }]);
    encode_archive(&[sample_program_bytes(), second])
}

fn chat_text(archive: &DemoArchive) -> (String, Option<String>) {
    let program = archive.program(SAMPLE_DEMO_ID).expect("sample program");
    match &program.operations[2] {
        Operation::PaintChat { text, .. } => (text.raw.clone(), text.resolved.clone()),
        other => panic!("expected chat, got {other}"),
    }
}

/// Test that a whole chunk decodes with text resolved through the table
#[tokio::test]
async fn test_archive_decodes_every_program() {
    let bytes = two_program_archive();
    let archive = DemoArchive::load(
        &bytes,
        DecodeOptions::default(),
        &FakeStrings::numbered(120),
        "lang.xx",
    )
    .await
    .expect("Failed to decode archive");

    assert!(archive.is_complete());
    assert_eq!(archive.declared_programs, 2);

    let sample = archive.program(SAMPLE_DEMO_ID).expect("sample program");
    assert_eq!(sample.sprite_ids, vec![3, 7]);
    assert_eq!(sample.operations.len(), 8);
    assert_eq!(sample.decoded_len(), 10);
    assert_eq!(sample.operations[3].children().len(), 2);
    assert!(!sample.is_partial());

    assert_eq!(chat_text(&archive), ("12".into(), Some("text 83".into())));
    assert!(archive.program(22).is_some());
}

/// Test that a missing string table leaves the raw key in place
#[tokio::test]
async fn test_missing_table_keeps_raw_text() {
    let bytes = two_program_archive();
    let archive = DemoArchive::load(
        &bytes,
        DecodeOptions::default(),
        &FakeStrings::numbered(120),
        "lang.fr",
    )
    .await
    .expect("Failed to decode archive");

    assert_eq!(chat_text(&archive), ("12".into(), None));
}

/// Test that a table shorter than the mapped index yields the placeholder
#[tokio::test]
async fn test_short_table_yields_placeholder() {
    let bytes = two_program_archive();
    let archive = DemoArchive::load(
        &bytes,
        DecodeOptions::default(),
        &FakeStrings::numbered(10),
        "lang.xx",
    )
    .await
    .expect("Failed to decode archive");

    assert_eq!(chat_text(&archive).1.as_deref(), Some("null"));
}

/// Test loading the string table from a newline-separated file
#[tokio::test]
async fn test_strings_from_line_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for i in 0..100 {
        writeln!(file, "line {i}").expect("Failed to write strings");
    }

    let bytes = two_program_archive();
    let source = LineFileStrings::new(file.path());
    let archive = DemoArchive::load(&bytes, DecodeOptions::default(), &source, "lang.xx")
        .await
        .expect("Failed to decode archive");

    assert_eq!(chat_text(&archive).1.as_deref(), Some("line 83"));
}

/// Test that an unknown opcode keeps the decoded prefix in lenient mode
#[test]
fn test_unknown_opcode_stops_early() {
    let bytes = encode_program(
        5,
        &[],
        &[
            Operation::Delay { frame_count: 2 },
            Operation::Unknown { opcode: 0x63 },
            Operation::Delay { frame_count: 1 },
        ],
    );

    let program = Decoder::default()
        .decode_program(&bytes)
        .expect("Lenient decode should succeed")
        .into_program();
    assert_eq!(program.operations, vec![Operation::Delay { frame_count: 2 }]);
    assert_eq!(
        program.stopped_at,
        Some(EarlyStop {
            offset: 15,
            opcode: 0x63
        })
    );

    let strict = DecodeOptions {
        strict_opcodes: true,
        ..DecodeOptions::default()
    };
    assert_eq!(
        Decoder::new(strict).decode_program(&bytes).err(),
        Some(DecodeError::UnknownOpcode {
            offset: 15,
            opcode: 0x63
        })
    );
}

/// Test that one broken program does not hide the ones after it
#[test]
fn test_broken_program_is_reported_and_skipped() {
    let mut broken = ByteWriter::new();
    broken.u16(9);
    broken.u16(1);
    broken.u32(4);
    broken.bytes(&[0, 0, 6, 1]);

    let bytes = encode_archive(&[broken.into_inner(), sample_program_bytes()]);
    let archive = DemoArchive::decode(&bytes, &Decoder::default()).expect("Chunk header is fine");

    assert!(!archive.is_complete());
    assert_eq!(archive.programs.len(), 1);
    assert_eq!(archive.programs[0].demo_id, SAMPLE_DEMO_ID);

    assert_eq!(archive.errors.len(), 1);
    let error = &archive.errors[0];
    assert_eq!((error.index, error.demo_id), (0, Some(9)));
    assert!(matches!(error.source, DecodeError::OutOfRange { .. }));
    assert!(error.to_string().starts_with("demo program #0 (id 9): "));
}

/// Test that a truncated program header ends the chunk
#[test]
fn test_truncated_chunk_stops_reading() {
    let mut bytes = encode_archive(&[sample_program_bytes()]);
    bytes[0] = 3;

    let archive = DemoArchive::decode(&bytes, &Decoder::default()).expect("Chunk header is fine");
    assert_eq!(archive.programs.len(), 1);
    assert_eq!(archive.errors.len(), 1);
    assert_eq!((archive.errors[0].index, archive.errors[0].demo_id), (1, None));
}

/// Test that an empty input cannot even give a program count
#[test]
fn test_empty_chunk_fails() {
    assert!(matches!(
        DemoArchive::decode(&[], &Decoder::default()),
        Err(DecodeError::OutOfRange { offset: 0, .. })
    ));
}

/// Test that the decoded tree re-encodes to the original operation bytes
#[test]
fn test_tree_reencodes_to_source_bytes() {
    let bytes = encode_archive(&[sample_program_bytes()]);
    let archive = DemoArchive::decode(&bytes, &Decoder::default()).expect("Failed to decode");
    let program = &archive.programs[0];

    let flat = flatten_forest(&program.operations);
    assert_eq!(flat.len(), program.decoded_len());
    assert_eq!(encode_operations(&flat), program.operation_bytes());
}
