use std::collections::{HashMap, HashSet};

/// Position of an operation in the forest: the top-level index followed by
/// child indices into nested parallel blocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpPath(Vec<usize>);

impl OpPath {
    pub fn top(index: usize) -> Self {
        Self(vec![index])
    }

    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }

    /// True for strict descendants of `ancestor`.
    pub fn is_within(&self, ancestor: &OpPath) -> bool {
        self.0.len() > ancestor.0.len() && self.0.starts_with(&ancestor.0)
    }
}

/// Per-operation values that must survive between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scratch {
    /// Camera block position when a pan started.
    CameraOrigin { block_x: f64, block_y: f64 },
}

/// Where playback is: the active top-level operation, its tick, the block
/// children already finished and the scratch values of running operations.
#[derive(Debug, Clone, Default)]
pub struct InterpreterCursor {
    pub index: usize,
    pub tick: u32,
    latched: HashSet<OpPath>,
    scratch: HashMap<OpPath, Scratch>,
}

impl InterpreterCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_latched(&self, path: &OpPath) -> bool {
        self.latched.contains(path)
    }

    pub fn latch(&mut self, path: OpPath) {
        self.latched.insert(path);
    }

    pub fn scratch(&self, path: &OpPath) -> Option<Scratch> {
        self.scratch.get(path).copied()
    }

    pub fn set_scratch(&mut self, path: OpPath, value: Scratch) {
        self.scratch.insert(path, value);
    }

    /// Forget latches and scratch of everything below `block`.
    pub fn clear_within(&mut self, block: &OpPath) {
        self.latched.retain(|path| !path.is_within(block));
        self.scratch.retain(|path, _| !path.is_within(block));
    }

    /// Move on to the next top-level operation.
    pub fn advance(&mut self) {
        self.index += 1;
        self.tick = 0;
        self.latched.clear();
        self.scratch.clear();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
