//! Shared test utilities for rush-demo
//!
//! This module provides common helpers for integration tests:
//! - In-memory sprite, world, renderer and localization collaborators
//! - A sample demo forest and its encoded bytes

pub mod fixtures;
