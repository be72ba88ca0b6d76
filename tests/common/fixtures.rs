//! In-memory collaborators and sample demo data

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rush_demo::assets::{
    LocalizationSource, Raster, SharedStage, SpriteSheet, SpriteSource, StageImage, StageLayers,
    StageRenderer, WorldSource,
};
use rush_demo::bytecode::{encode_program, DemoText, Direction, Operation};

/// Demo id bound to world 0, stage 0 with the origin at (19, 9).
pub const SAMPLE_DEMO_ID: u16 = 20;

/// Sprite codec backed by a map of frames
#[derive(Default)]
pub struct FakeSprites {
    frames: HashMap<(SpriteSheet, u16), Raster>,
}

impl FakeSprites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hero frame 2, portraits 0..4, both backgrounds and decorations 0..2.
    pub fn standard() -> Self {
        let mut sprites = Self::new();
        sprites.insert(SpriteSheet::Hero, 2, Raster::solid(24, 30, [0x20, 0x40, 0x60, 0xFF]));
        for frame in 0..4 {
            sprites.insert(SpriteSheet::Portrait, frame, Raster::solid(64, 64, [frame as u8, 0, 0, 0xFF]));
        }
        for frame in 0..2 {
            sprites.insert(
                SpriteSheet::PortraitBackground,
                frame,
                Raster::solid(64, 64, [0, frame as u8, 0, 0xFF]),
            );
            sprites.insert(
                SpriteSheet::PortraitDecoration,
                frame,
                Raster::solid(16, 16, [0, 0, frame as u8, 0xFF]),
            );
        }
        sprites
    }

    pub fn insert(&mut self, sheet: SpriteSheet, frame: u16, raster: Raster) {
        self.frames.insert((sheet, frame), raster);
    }

    pub fn without(mut self, sheet: SpriteSheet, frame: u16) -> Self {
        self.frames.remove(&(sheet, frame));
        self
    }
}

#[async_trait]
impl SpriteSource for FakeSprites {
    async fn frame(&self, sheet: SpriteSheet, frame: u16) -> Option<Raster> {
        self.frames.get(&(sheet, frame)).cloned()
    }
}

/// World files backed by a map of shared stages
#[derive(Default)]
pub struct FakeWorld {
    stages: HashMap<(u8, u8), SharedStage>,
}

impl FakeWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// A world holding `layers` as its only stage.
    pub fn with_stage(world: u8, stage: u8, layers: StageLayers) -> (Self, SharedStage) {
        let shared = layers.into_shared();
        let mut fake = Self::new();
        fake.stages.insert((world, stage), Arc::clone(&shared));
        (fake, shared)
    }
}

#[async_trait]
impl WorldSource for FakeWorld {
    async fn stage(&self, world: u8, stage: u8) -> Option<SharedStage> {
        self.stages.get(&(world, stage)).cloned()
    }
}

/// Renderer that counts calls and returns a stage-sized black image
#[derive(Clone, Default)]
pub struct CountingRenderer {
    pub renders: Arc<AtomicUsize>,
}

impl CountingRenderer {
    pub fn count(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
}

impl StageRenderer for CountingRenderer {
    fn render(&mut self, _world: u8, _stage: u8, layers: &StageLayers) -> Option<StageImage> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        let raster = Raster::solid(
            u32::from(layers.width()) * 24,
            u32::from(layers.height()) * 24,
            [0, 0, 0, 0xFF],
        );
        Some(StageImage::new(raster))
    }
}

/// Renderer with no rendering rules available
pub struct NoRenderer;

impl StageRenderer for NoRenderer {
    fn render(&mut self, _world: u8, _stage: u8, _layers: &StageLayers) -> Option<StageImage> {
        None
    }
}

/// Localization source holding one table
pub struct FakeStrings {
    pub table: String,
    pub strings: Vec<String>,
}

impl FakeStrings {
    /// `lang.xx` with `len` entries named `text {index}`.
    pub fn numbered(len: usize) -> Self {
        Self {
            table: "lang.xx".into(),
            strings: (0..len).map(|i| format!("text {i}")).collect(),
        }
    }
}

#[async_trait]
impl LocalizationSource for FakeStrings {
    async fn strings(&self, table: &str) -> Option<Vec<String>> {
        (table == self.table).then(|| self.strings.clone())
    }
}

/// A short scene: portrait in, chat line, camera pan while walking, a block
/// change, a blinking symbol, portrait out.
pub fn sample_forest() -> Vec<Operation> {
    vec![
        Operation::SetDemoSprite {
            hero_sprite_id: 1,
            background_anim_id: 0,
        },
        Operation::SetPosAndShow { x: 10, y: 200 },
        Operation::PaintChat {
            line_count: 1,
            offset_y: 40,
            text: DemoText::unresolved("12"),
        },
        Operation::parallel(vec![
            Operation::MoveCamera {
                block_x: 22,
                block_y: 9,
                frame_count: 4,
            },
            Operation::PlayerMove {
                direction: Direction::Right,
            },
        ]),
        Operation::SetBlockShort {
            block_x: 20,
            block_y: 9,
            block_id: 5,
            special_data: 1,
        },
        Operation::ShowDecoSymbol {
            frame_index: 0,
            blink_count: 1,
        },
        Operation::HideDemoSprite,
        Operation::Delay { frame_count: 3 },
    ]
}

/// Ticks one pass over [`sample_forest`] takes.
///
/// Portrait setup 1, chat 48, parallel block 12, set-block plus symbol 11,
/// hide 1, delay 3.
pub const SAMPLE_FOREST_TICKS: usize = 1 + 48 + 12 + 11 + 1 + 3;

pub fn sample_program_bytes() -> Vec<u8> {
    encode_program(SAMPLE_DEMO_ID, &[7, 3, 7], &sample_forest())
}

pub fn sample_stage() -> StageLayers {
    StageLayers::empty(32, 24)
}
