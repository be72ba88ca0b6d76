//! Demo playback: a tick-driven interpreter over a decoded operation forest.

pub mod cursor;
pub mod error;
pub mod interpreter;
pub mod scene;
pub mod session;
pub mod stage;
pub mod state;

pub use cursor::{InterpreterCursor, OpPath, Scratch};
pub use error::{MissingAsset, PlaybackError};
pub use interpreter::{Interpreter, PlaybackStatus, StepOutcome, TickReport};
pub use scene::{Element, ElementKind, PresentationCommand, Scene};
pub use session::{required_frames, PlaybackSession, HERO_FRAME};
pub use stage::StageBinding;
pub use state::{Camera, PlaybackState, SpriteCache};
