//! Block layers of one stage.

use std::sync::Arc;

use parking_lot::Mutex;

/// Stage layers shared between the world collaborator and a playback session.
pub type SharedStage = Arc<Mutex<StageLayers>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error("{layer} layer has {actual} cells, expected {expected} ({width}x{height})")]
    LayerSize {
        layer: &'static str,
        actual: usize,
        expected: usize,
        width: u16,
        height: u16,
    },
}

/// Three row-major layers, one byte per block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageLayers {
    width: u16,
    height: u16,
    pub background: Vec<u8>,
    pub player: Vec<u8>,
    pub foreground: Vec<u8>,
}

impl StageLayers {
    pub fn new(
        width: u16,
        height: u16,
        background: Vec<u8>,
        player: Vec<u8>,
        foreground: Vec<u8>,
    ) -> Result<Self, StageError> {
        let expected = usize::from(width) * usize::from(height);
        for (layer, cells) in [
            ("background", &background),
            ("player", &player),
            ("foreground", &foreground),
        ] {
            if cells.len() != expected {
                return Err(StageError::LayerSize {
                    layer,
                    actual: cells.len(),
                    expected,
                    width,
                    height,
                });
            }
        }
        Ok(Self {
            width,
            height,
            background,
            player,
            foreground,
        })
    }

    /// Stage with every layer zeroed.
    pub fn empty(width: u16, height: u16) -> Self {
        let cells = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            background: vec![0; cells],
            player: vec![0; cells],
            foreground: vec![0; cells],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Cell index, or `None` outside the stage.
    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(x) + usize::from(y) * usize::from(self.width))
    }

    pub fn into_shared(self) -> SharedStage {
        Arc::new(Mutex::new(self))
    }

    /// Overwrite every layer with `snapshot`, reusing the allocations.
    pub fn restore_from(&mut self, snapshot: &StageLayers) {
        self.width = snapshot.width;
        self.height = snapshot.height;
        self.background.clone_from(&snapshot.background);
        self.player.clone_from(&snapshot.player);
        self.foreground.clone_from(&snapshot.foreground);
    }
}
