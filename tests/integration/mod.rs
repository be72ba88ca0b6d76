//! Integration tests for rush-demo
//!
//! These tests verify that decoding, text resolution and playback work
//! together correctly.

#[path = "../common/mod.rs"]
pub mod common;

pub mod cli;
pub mod decode_archive;
pub mod properties;
