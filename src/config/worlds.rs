//! Default world bindings
//!
//! Demo programs do not say where they take place. The game hardcodes a
//! stage and an origin block for each demo id; this is that table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Where a demo program plays: stage plus the block the camera and hero
/// start on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldBinding {
    pub demo_id: u16,
    pub world: u8,
    pub stage: u8,
    /// Origin block X
    pub x: u16,
    /// Origin block Y
    pub y: u16,
}

/// Bindings keyed by demo id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorldBindings {
    by_demo: BTreeMap<u16, WorldBinding>,
}

impl WorldBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, demo_id: u16) -> Option<&WorldBinding> {
        self.by_demo.get(&demo_id)
    }

    /// Add or replace the binding for `binding.demo_id`.
    pub fn insert(&mut self, binding: WorldBinding) {
        self.by_demo.insert(binding.demo_id, binding);
    }

    /// Apply `other` on top of these bindings.
    pub fn merge(&mut self, other: impl IntoIterator<Item = WorldBinding>) {
        for binding in other {
            self.insert(binding);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorldBinding> {
        self.by_demo.values()
    }

    pub fn len(&self) -> usize {
        self.by_demo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_demo.is_empty()
    }
}

fn bind(bindings: &mut WorldBindings, demo_id: u16, world: u8, stage: u8, x: u16, y: u16) {
    bindings.insert(WorldBinding {
        demo_id,
        world,
        stage,
        x,
        y,
    });
}

/// Bindings shipped with the game.
pub fn default_world_bindings() -> WorldBindings {
    let mut b = WorldBindings::new();

    // World 0, the tutorial stage hosts most of them
    bind(&mut b, 10, 0, 13, 31, 7);
    bind(&mut b, 11, 0, 13, 28, 6);
    bind(&mut b, 13, 0, 13, 37, 7);
    bind(&mut b, 16, 0, 13, 46, 7);
    bind(&mut b, 28, 0, 13, 57, 8);
    bind(&mut b, 29, 0, 13, 6, 4);
    // No trigger block in the stage; placed left of the entrance
    bind(&mut b, 20, 0, 0, 19, 9);
    bind(&mut b, 22, 0, 3, 26, 18);
    bind(&mut b, 30, 0, 2, 6, 18);
    bind(&mut b, 33, 0, 8, 6, 5);

    // World 1
    bind(&mut b, 23, 1, 2, 24, 25);
    bind(&mut b, 24, 1, 7, 20, 12);
    bind(&mut b, 34, 1, 9, 9, 20);

    // World 2
    bind(&mut b, 25, 2, 5, 32, 22);
    bind(&mut b, 35, 2, 10, 8, 16);

    b
}
