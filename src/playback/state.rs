use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::{PixelRun, Raster, SpriteSheet};
use crate::config::PlaybackConfig;

use super::error::{MissingAsset, PlaybackError};
use super::scene::{ids, z, Element, PresentationCommand, Scene};
use super::stage::StageBinding;

/// Camera centre in block coordinates. Fractional while panning.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub block_x: f64,
    pub block_y: f64,
}

impl Camera {
    pub fn at(block_x: f64, block_y: f64) -> Self {
        Self { block_x, block_y }
    }

    /// Top-left corner of the viewport in stage pixels, centring the block.
    pub fn pixel_position(&self, config: &PlaybackConfig) -> (i32, i32) {
        let block = f64::from(config.block_size);
        let half_block = f64::from(config.block_size / 2);
        let x = self.block_x * block - f64::from(config.viewport_width / 2) + half_block;
        let y = self.block_y * block - f64::from(config.viewport_height / 2) + half_block;
        (x.floor() as i32, y.floor() as i32)
    }
}

/// Sprite frames resolved before the first tick.
#[derive(Debug, Clone, Default)]
pub struct SpriteCache {
    frames: HashMap<(SpriteSheet, u16), Arc<Raster>>,
}

impl SpriteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sheet: SpriteSheet, frame: u16, raster: Raster) {
        self.frames.insert((sheet, frame), Arc::new(raster));
    }

    pub fn get(&self, sheet: SpriteSheet, frame: u16) -> Option<Arc<Raster>> {
        self.frames.get(&(sheet, frame)).cloned()
    }

    /// Like [`get`](Self::get), but a missing frame is a playback error.
    pub fn require(&self, sheet: SpriteSheet, frame: u16) -> Result<Arc<Raster>, PlaybackError> {
        self.get(sheet, frame)
            .ok_or(PlaybackError::MissingAsset(MissingAsset::Sprite { sheet, frame }))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Everything a running demo mutates besides its cursor.
#[derive(Debug)]
pub struct PlaybackState {
    pub config: PlaybackConfig,
    pub camera: Camera,
    pub scene: Scene,
    pub stage: StageBinding,
    pub sprites: SpriteCache,
    pub hero: Arc<Raster>,
    /// Laser beams reported by the latest stage render.
    pub pixel_runs: Vec<PixelRun>,
    last_camera_px: Option<(i32, i32)>,
}

impl PlaybackState {
    pub fn new(
        config: PlaybackConfig,
        stage: StageBinding,
        hero: Raster,
        sprites: SpriteCache,
    ) -> Self {
        Self {
            config,
            camera: Camera::default(),
            scene: Scene::new(),
            stage,
            sprites,
            hero: Arc::new(hero),
            pixel_runs: Vec::new(),
            last_camera_px: None,
        }
    }

    pub fn camera_px(&self) -> (i32, i32) {
        self.camera.pixel_position(&self.config)
    }

    /// Pixel position of the hero at the stage origin, feet on the block's
    /// bottom edge.
    pub fn hero_origin_px(&self) -> (i32, i32) {
        let binding = self.stage.binding();
        let block = self.config.block_size as i32;
        (
            i32::from(binding.x) * block,
            i32::from(binding.y) * block + block - self.hero.height as i32,
        )
    }

    /// Stage origin in block coordinates.
    pub fn origin_block(&self) -> (f64, f64) {
        let binding = self.stage.binding();
        (f64::from(binding.x), f64::from(binding.y))
    }

    /// Re-render the stage and replace the stage element.
    pub fn render_stage(&mut self) -> Result<(), PlaybackError> {
        let binding = *self.stage.binding();
        let image = self.stage.render().ok_or(MissingAsset::StageRender {
            world: binding.world,
            stage: binding.stage,
        })?;
        self.scene.upsert(
            ids::STAGE,
            Element::image(vec![image.raster], 0, 0, z::STAGE),
        );
        self.pixel_runs = image.pixel_runs;
        Ok(())
    }

    /// Commands for the tick just finished: element changes, then the camera
    /// when it moved, then the current laser beams.
    pub fn finish_tick(&mut self) -> Vec<PresentationCommand> {
        let mut commands = self.scene.drain();
        let camera = self.camera_px();
        if self.last_camera_px != Some(camera) {
            self.last_camera_px = Some(camera);
            commands.push(PresentationCommand::Camera {
                x: camera.0,
                y: camera.1,
            });
        }
        commands.extend(self.pixel_runs.iter().copied().map(PresentationCommand::PixelRun));
        commands
    }
}
