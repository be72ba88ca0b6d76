//! Tick-driven execution of an operation forest.
//!
//! Each call to [`Interpreter::tick`] produces one frame. The active top-level
//! operation is stepped with the tick count it has spent so far; when it
//! reports completion the cursor moves on, and operations that complete
//! without consuming the tick let the next one run in the same frame.

use std::sync::Arc;

use crate::assets::{Raster, SpriteSheet};
use crate::bytecode::{Direction, Operation};

use super::cursor::{InterpreterCursor, OpPath, Scratch};
use super::error::PlaybackError;
use super::scene::{ids, z, Element, PresentationCommand};
use super::state::{Camera, PlaybackState};

/// Horizontal margin of chat and hint text from the viewport edge.
const TEXT_MARGIN: i32 = 5;
/// Pixels the chat line scrolls per tick.
const CHAT_SPEED: i32 = 5;
/// Hint text offset from the viewport top.
const HINT_OFFSET_Y: i32 = 270;
/// Ticks a hint stays up before completing.
const HINT_TICKS: u32 = 20;
/// Ticks per visible or hidden half of a blink.
const BLINK_INTERVAL: u32 = 5;
/// Decoration symbol offset from the portrait.
const DECORATION_OFFSET_X: i32 = 75;
/// Ticks the hero takes to walk one block.
const PLAYER_MOVE_STEPS: u32 = 12;

/// Result of stepping one operation for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// The operation is finished.
    pub advance: bool,
    /// The frame is spent. Only meaningful together with `advance`.
    pub consumes_tick: bool,
    /// Playback must stop.
    pub halt: Option<PlaybackError>,
}

impl StepOutcome {
    fn until(advance: bool) -> Self {
        Self {
            advance,
            consumes_tick: true,
            halt: None,
        }
    }

    fn done() -> Self {
        Self::until(true)
    }

    fn instant() -> Self {
        Self {
            advance: true,
            consumes_tick: false,
            halt: None,
        }
    }

    fn halt(error: PlaybackError) -> Self {
        Self {
            advance: false,
            consumes_tick: true,
            halt: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackStatus {
    Running,
    /// The forest wrapped around during this tick.
    Looped,
    /// Terminal. Further ticks do nothing.
    Halted(PlaybackError),
}

/// What one tick produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub status: PlaybackStatus,
    pub commands: Vec<PresentationCommand>,
}

pub struct Interpreter {
    forest: Arc<[Operation]>,
    cursor: InterpreterCursor,
    state: PlaybackState,
    halted: Option<PlaybackError>,
    ticks: u64,
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("operations", &self.forest.len())
            .field("cursor", &self.cursor)
            .field("halted", &self.halted)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl Interpreter {
    /// Place camera and hero at the stage origin and render the stage.
    pub fn new(forest: Vec<Operation>, state: PlaybackState) -> Result<Self, PlaybackError> {
        if forest.is_empty() {
            return Err(PlaybackError::EmptyProgram {
                demo_id: state.stage.binding().demo_id,
            });
        }
        let mut interpreter = Self {
            forest: forest.into(),
            cursor: InterpreterCursor::new(),
            state,
            halted: None,
            ticks: 0,
        };
        interpreter.reset_world()?;
        Ok(interpreter)
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn cursor(&self) -> &InterpreterCursor {
        &self.cursor
    }

    pub fn camera(&self) -> Camera {
        self.state.camera
    }

    pub fn operations(&self) -> &[Operation] {
        &self.forest
    }

    pub fn halt_reason(&self) -> Option<&PlaybackError> {
        self.halted.as_ref()
    }

    /// Ticks run so far. Calls after a halt are not counted.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick(&mut self) -> TickReport {
        if let Some(error) = &self.halted {
            return TickReport {
                status: PlaybackStatus::Halted(error.clone()),
                commands: Vec::new(),
            };
        }
        self.ticks += 1;

        let forest = Arc::clone(&self.forest);
        let mut looped = false;
        let mut chained = 0;
        loop {
            let index = self.cursor.index;
            let operation = &forest[index];
            let outcome = self.step(operation, &OpPath::top(index));

            if let Some(error) = outcome.halt {
                tracing::info!(
                    demo_id = self.state.stage.binding().demo_id,
                    index,
                    operation = operation.name(),
                    error = %error,
                    "Demo playback halted"
                );
                self.halted = Some(error);
                break;
            }
            if !outcome.advance {
                self.cursor.tick += 1;
                break;
            }

            self.cursor.advance();
            if self.cursor.index >= forest.len() {
                if let Err(error) = self.restart() {
                    tracing::info!(error = %error, "Demo playback halted while looping");
                    self.halted = Some(error);
                    break;
                }
                looped = true;
            }
            chained += 1;
            if outcome.consumes_tick || chained >= forest.len() {
                break;
            }
        }

        let status = match &self.halted {
            Some(error) => PlaybackStatus::Halted(error.clone()),
            None if looped => PlaybackStatus::Looped,
            None => PlaybackStatus::Running,
        };
        TickReport {
            status,
            commands: self.state.finish_tick(),
        }
    }

    /// Run `operation` for the current tick. `path` keys its latches and
    /// scratch values.
    pub fn step(&mut self, operation: &Operation, path: &OpPath) -> StepOutcome {
        self.try_step(operation, path)
            .unwrap_or_else(StepOutcome::halt)
    }

    fn try_step(&mut self, operation: &Operation, path: &OpPath) -> Result<StepOutcome, PlaybackError> {
        let t = self.cursor.tick;
        let outcome = match operation {
            Operation::ParallelBlock { children, .. } => self.step_parallel(children, path),
            Operation::MoveCamera {
                block_x,
                block_y,
                frame_count,
            } => self.move_camera(path, t, *block_x, *block_y, *frame_count),
            Operation::Delay { frame_count } => {
                StepOutcome::until(u64::from(t) + 1 >= u64::from(*frame_count))
            }
            Operation::SetBlockShort {
                block_x,
                block_y,
                block_id,
                special_data,
            } => self.set_block(*block_x, *block_y, *block_id, Some(*special_data))?,
            Operation::SetBlockLong {
                block_x,
                block_y,
                block_id,
            } => self.set_block(*block_x, *block_y, *block_id as u8, None)?,
            Operation::SetDemoSprite {
                hero_sprite_id,
                background_anim_id,
            } => self.set_demo_sprite(*hero_sprite_id, *background_anim_id)?,
            Operation::SetPosAndShow { x, y } => {
                let (cx, cy) = self.state.camera_px();
                let scene = &mut self.state.scene;
                scene.set_position(ids::DEMO_SPRITE, cx + i32::from(*x), cy + i32::from(*y));
                scene.set_visible(ids::DEMO_SPRITE, true);
                StepOutcome::done()
            }
            Operation::HideDemoSprite => {
                self.state.scene.set_visible(ids::DEMO_SPRITE, false);
                self.state.scene.remove(ids::DECORATION);
                StepOutcome::done()
            }
            Operation::PaintChat { offset_y, text, .. } => {
                let (cx, cy) = self.state.camera_px();
                let x = cx + TEXT_MARGIN + t as i32 * CHAT_SPEED;
                let y = cy + i32::from(*offset_y);
                self.place_text(ids::CHAT, text.display(), x, y);
                let advance = x - cx >= self.state.config.viewport_width as i32;
                if advance {
                    self.state.scene.remove(ids::CHAT);
                }
                StepOutcome::until(advance)
            }
            Operation::PaintHint { text } => {
                let (cx, cy) = self.state.camera_px();
                self.place_text(ids::HINT, text.display(), cx + TEXT_MARGIN, cy + HINT_OFFSET_Y);
                let advance = t >= HINT_TICKS;
                if advance {
                    self.state.scene.remove(ids::HINT);
                }
                StepOutcome::until(advance)
            }
            Operation::ShowDecoSymbol {
                frame_index,
                blink_count,
            } => {
                if !self.state.scene.contains(ids::DECORATION) {
                    let frame = self
                        .state
                        .sprites
                        .require(SpriteSheet::PortraitDecoration, *frame_index)?;
                    let (x, y) = self
                        .state
                        .scene
                        .get(ids::DEMO_SPRITE)
                        .map_or((0, 0), |sprite| (sprite.x, sprite.y));
                    self.state.scene.upsert(
                        ids::DECORATION,
                        Element::image(vec![frame], x + DECORATION_OFFSET_X, y, z::OVERLAY_TEXT),
                    );
                }
                self.blink(ids::DECORATION, t, *blink_count)
            }
            Operation::HideDecoSymbol { .. } => {
                self.state.scene.remove(ids::DECORATION);
                StepOutcome::done()
            }
            Operation::ScreenBlink { blink_count, color } => {
                if !self.state.scene.contains(ids::BLINK_OVERLAY) {
                    let config = self.state.config;
                    let [r, g, b] = *color;
                    let overlay = Raster::solid(
                        config.viewport_width,
                        config.viewport_height,
                        [r, g, b, 0xFF],
                    );
                    let (cx, cy) = self.state.camera_px();
                    self.state.scene.upsert(
                        ids::BLINK_OVERLAY,
                        Element::image(vec![Arc::new(overlay)], cx, cy, z::SCREEN_BLINK),
                    );
                }
                self.blink(ids::BLINK_OVERLAY, t, *blink_count)
            }
            Operation::PlayerMove { direction } => {
                self.walk_hero(*direction);
                StepOutcome::until(t + 1 >= PLAYER_MOVE_STEPS)
            }
            Operation::Unknown { opcode } => {
                return Err(PlaybackError::UnknownOpcode { opcode: *opcode })
            }
        };
        Ok(outcome)
    }

    fn step_parallel(&mut self, children: &[Operation], path: &OpPath) -> StepOutcome {
        let mut outcome = StepOutcome::done();
        for (index, child) in children.iter().enumerate() {
            let child_path = path.child(index);
            if self.cursor.is_latched(&child_path) {
                continue;
            }
            let child_outcome = self.step(child, &child_path);
            if child_outcome.halt.is_some() {
                return child_outcome;
            }
            if child_outcome.advance {
                self.cursor.latch(child_path);
            } else {
                outcome.advance = false;
            }
            if !child_outcome.consumes_tick {
                outcome.consumes_tick = false;
            }
        }
        if outcome.advance {
            self.cursor.clear_within(path);
        }
        outcome
    }

    fn move_camera(
        &mut self,
        path: &OpPath,
        t: u32,
        block_x: u16,
        block_y: u16,
        frame_count: u16,
    ) -> StepOutcome {
        let origin = match self.cursor.scratch(path) {
            Some(Scratch::CameraOrigin { block_x, block_y }) if t != 0 => (block_x, block_y),
            _ => {
                let camera = self.state.camera;
                self.cursor.set_scratch(
                    path.clone(),
                    Scratch::CameraOrigin {
                        block_x: camera.block_x,
                        block_y: camera.block_y,
                    },
                );
                (camera.block_x, camera.block_y)
            }
        };

        // A zero-frame pan completes where it started; a one-frame pan lands on the target.
        let progress = if frame_count == 0 {
            0.0
        } else if frame_count == 1 {
            1.0
        } else {
            (f64::from(t) / f64::from(frame_count - 1)).min(1.0)
        };
        let target = (f64::from(block_x), f64::from(block_y));
        self.state.camera = Camera::at(
            origin.0 + (target.0 - origin.0) * progress,
            origin.1 + (target.1 - origin.1) * progress,
        );
        StepOutcome::until(u64::from(t) + 1 >= u64::from(frame_count))
    }

    fn set_block(
        &mut self,
        block_x: u16,
        block_y: u16,
        player: u8,
        foreground: Option<u8>,
    ) -> Result<StepOutcome, PlaybackError> {
        if self
            .state
            .stage
            .set_block(block_x, block_y, player, foreground)
        {
            self.state.render_stage()?;
        } else {
            tracing::warn!(block_x, block_y, "Block write outside the stage skipped");
        }
        Ok(StepOutcome::instant())
    }

    fn set_demo_sprite(
        &mut self,
        hero_sprite_id: u16,
        background_anim_id: u16,
    ) -> Result<StepOutcome, PlaybackError> {
        let sprites = &self.state.sprites;
        let background = sprites.require(SpriteSheet::PortraitBackground, background_anim_id & 1)?;
        let portrait = sprites.require(SpriteSheet::Portrait, hero_sprite_id)?;

        let (visible, x, y) = self
            .state
            .scene
            .get(ids::DEMO_SPRITE)
            .map_or((false, 0, 0), |sprite| (sprite.visible, sprite.x, sprite.y));
        let mut element = Element::image(vec![background, portrait], x, y, z::OVERLAY_TEXT);
        element.visible = visible;
        self.state.scene.upsert(ids::DEMO_SPRITE, element);
        Ok(StepOutcome::instant())
    }

    fn place_text(&mut self, id: &'static str, text: &str, x: i32, y: i32) {
        let scene = &mut self.state.scene;
        if scene.contains(id) {
            scene.set_position(id, x, y);
        } else {
            scene.upsert(id, Element::text(text, x, y, z::OVERLAY_TEXT));
        }
    }

    /// Toggle `id` every [`BLINK_INTERVAL`] ticks and remove it once
    /// `blink_count` blinks are over.
    fn blink(&mut self, id: &'static str, t: u32, blink_count: u8) -> StepOutcome {
        let scene = &mut self.state.scene;
        scene.set_visible(id, (t / BLINK_INTERVAL) % 2 == 0);
        let advance = t >= u32::from(blink_count) * 2 * BLINK_INTERVAL;
        if advance {
            scene.remove(id);
        }
        StepOutcome::until(advance)
    }

    fn walk_hero(&mut self, direction: Direction) {
        let step = self.state.config.block_size as i32 / PLAYER_MOVE_STEPS as i32;
        let (dx, dy) = direction.delta();
        let scene = &mut self.state.scene;
        if let Some((x, y)) = scene.get(ids::HERO).map(|hero| (hero.x, hero.y)) {
            scene.set_position(ids::HERO, x + dx * step, y + dy * step);
        }
    }

    /// Restore the stage snapshot and put camera and hero back at the origin.
    fn reset_world(&mut self) -> Result<(), PlaybackError> {
        self.state.stage.restore();

        let (block_x, block_y) = self.state.origin_block();
        self.state.camera = Camera::at(block_x, block_y);

        let (hero_x, hero_y) = self.state.hero_origin_px();
        if self.state.scene.contains(ids::HERO) {
            self.state.scene.set_position(ids::HERO, hero_x, hero_y);
        } else {
            let hero = Element::image(vec![Arc::clone(&self.state.hero)], hero_x, hero_y, z::HERO);
            self.state.scene.upsert(ids::HERO, hero);
        }

        self.state.render_stage()
    }

    fn restart(&mut self) -> Result<(), PlaybackError> {
        tracing::info!(
            demo_id = self.state.stage.binding().demo_id,
            ticks = self.ticks,
            "Demo looped"
        );
        self.cursor.reset();
        self.reset_world()
    }
}
