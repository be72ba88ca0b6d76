use std::collections::BTreeSet;
use std::time::Duration;

use crate::assets::{SpriteSheet, SpriteSource, StageRenderer, WorldSource};
use crate::bytecode::{DemoProgram, Operation};
use crate::config::Config;

use super::error::{MissingAsset, PlaybackError};
use super::interpreter::{Interpreter, PlaybackStatus, TickReport};
use super::stage::StageBinding;
use super::state::{PlaybackState, SpriteCache};

/// Hero frame drawn standing at the stage origin.
pub const HERO_FRAME: u16 = 2;

/// A demo program bound to its stage with every asset it needs resolved.
#[derive(Debug)]
pub struct PlaybackSession {
    demo_id: u16,
    interpreter: Interpreter,
    tick_interval: Duration,
}

impl PlaybackSession {
    /// Resolve the program's world binding, stage and sprite frames, then
    /// perform the initial setup so the first [`tick`](Self::tick) can draw.
    ///
    /// Portrait and decoration frames that cannot be loaded are not fatal
    /// here; playback halts when an operation actually needs one.
    pub async fn prepare(
        program: &DemoProgram,
        config: &Config,
        sprites: &dyn SpriteSource,
        world: &dyn WorldSource,
        renderer: Box<dyn StageRenderer>,
    ) -> Result<Self, PlaybackError> {
        let demo_id = program.demo_id;
        if program.operations.is_empty() {
            return Err(PlaybackError::EmptyProgram { demo_id });
        }

        let binding = *config
            .world_bindings
            .get(demo_id)
            .ok_or(PlaybackError::Unplaceable { demo_id })?;

        let layers = world
            .stage(binding.world, binding.stage)
            .await
            .ok_or(MissingAsset::Stage {
                world: binding.world,
                stage: binding.stage,
            })?;

        let hero = sprites
            .frame(SpriteSheet::Hero, HERO_FRAME)
            .await
            .ok_or(MissingAsset::Sprite {
                sheet: SpriteSheet::Hero,
                frame: HERO_FRAME,
            })?;

        let mut cache = SpriteCache::new();
        for (sheet, frame) in required_frames(&program.operations) {
            match sprites.frame(sheet, frame).await {
                Some(raster) => cache.insert(sheet, frame, raster),
                None => tracing::warn!(
                    demo_id,
                    sheet = sheet.as_str(),
                    frame,
                    "Sprite frame unavailable"
                ),
            }
        }

        tracing::debug!(
            demo_id,
            world = binding.world,
            stage = binding.stage,
            operations = program.operations.len(),
            frames = cache.len(),
            "Prepared demo playback"
        );

        let stage = StageBinding::new(binding, layers, renderer);
        let state = PlaybackState::new(config.playback, stage, hero, cache);
        let interpreter = Interpreter::new(program.operations.clone(), state)?;

        Ok(Self {
            demo_id,
            interpreter,
            tick_interval: Duration::from_millis(config.playback.tick_ms),
        })
    }

    pub fn demo_id(&self) -> u16 {
        self.demo_id
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Advance one frame.
    pub fn tick(&mut self) -> TickReport {
        self.interpreter.tick()
    }

    /// Tick on the configured interval, handing each report to `on_frame`,
    /// until playback halts or `max_ticks` frames were produced.
    pub async fn run<F>(&mut self, max_ticks: u64, mut on_frame: F) -> PlaybackStatus
    where
        F: FnMut(&TickReport),
    {
        let period = self.tick_interval.max(Duration::from_millis(1));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        let mut status = PlaybackStatus::Running;
        for _ in 0..max_ticks {
            interval.tick().await;
            let report = self.tick();
            on_frame(&report);
            status = report.status;
            if matches!(status, PlaybackStatus::Halted(_)) {
                break;
            }
        }
        status
    }
}

/// Sprite frames the operations in `forest` may draw, block children included.
pub fn required_frames(forest: &[Operation]) -> BTreeSet<(SpriteSheet, u16)> {
    let mut frames = BTreeSet::new();
    collect_frames(forest, &mut frames);
    frames
}

fn collect_frames(operations: &[Operation], frames: &mut BTreeSet<(SpriteSheet, u16)>) {
    for operation in operations {
        match operation {
            Operation::ParallelBlock { children, .. } => collect_frames(children, frames),
            Operation::SetDemoSprite {
                hero_sprite_id,
                background_anim_id,
            } => {
                frames.insert((SpriteSheet::Portrait, *hero_sprite_id));
                frames.insert((SpriteSheet::PortraitBackground, background_anim_id & 1));
            }
            Operation::ShowDecoSymbol { frame_index, .. } => {
                frames.insert((SpriteSheet::PortraitDecoration, *frame_index));
            }
            _ => {}
        }
    }
}
