use crate::assets::{SharedStage, StageImage, StageLayers, StageRenderer};
use crate::config::WorldBinding;

/// The stage a session plays on: shared layers, the snapshot they are reset
/// to on loop, and the renderer that turns them into an image.
pub struct StageBinding {
    binding: WorldBinding,
    layers: SharedStage,
    snapshot: StageLayers,
    renderer: Box<dyn StageRenderer>,
}

impl std::fmt::Debug for StageBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageBinding")
            .field("binding", &self.binding)
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}

impl StageBinding {
    /// Snapshot `layers` as they are now.
    pub fn new(
        binding: WorldBinding,
        layers: SharedStage,
        renderer: Box<dyn StageRenderer>,
    ) -> Self {
        let snapshot = layers.lock().clone();
        Self {
            binding,
            layers,
            snapshot,
            renderer,
        }
    }

    pub fn binding(&self) -> &WorldBinding {
        &self.binding
    }

    pub fn layers(&self) -> &SharedStage {
        &self.layers
    }

    pub fn snapshot(&self) -> &StageLayers {
        &self.snapshot
    }

    /// Write one cell. `foreground` is left untouched when `None`.
    /// Returns false when the cell is outside the stage.
    pub fn set_block(&self, x: u16, y: u16, player: u8, foreground: Option<u8>) -> bool {
        let mut layers = self.layers.lock();
        let Some(index) = layers.index(x, y) else {
            return false;
        };
        layers.player[index] = player;
        if let Some(foreground) = foreground {
            layers.foreground[index] = foreground;
        }
        true
    }

    /// Put the layers back to the pre-playback snapshot.
    pub fn restore(&self) {
        self.layers.lock().restore_from(&self.snapshot);
    }

    pub fn render(&mut self) -> Option<StageImage> {
        let layers = self.layers.lock();
        self.renderer
            .render(self.binding.world, self.binding.stage, &layers)
    }
}
