//! Named presentation elements and the commands that describe their changes.

use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::{PixelRun, Raster};

/// Element identifiers used by playback.
pub mod ids {
    pub const STAGE: &str = "stage_image";
    pub const HERO: &str = "hero";
    pub const DEMO_SPRITE: &str = "demo_sprite";
    pub const DECORATION: &str = "demo_sprite_decoration";
    pub const CHAT: &str = "chat";
    pub const HINT: &str = "hint";
    pub const BLINK_OVERLAY: &str = "blink_overlay";
}

/// Draw order. Higher values are drawn on top.
pub mod z {
    pub const STAGE: i32 = 0;
    pub const HERO: i32 = 11;
    pub const OVERLAY_TEXT: i32 = 12;
    pub const SCREEN_BLINK: i32 = 1000;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Images stacked bottom to top at the same position.
    Image(Vec<Arc<Raster>>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub visible: bool,
}

impl Element {
    pub fn image(layers: Vec<Arc<Raster>>, x: i32, y: i32, z: i32) -> Self {
        Self {
            kind: ElementKind::Image(layers),
            x,
            y,
            z,
            visible: true,
        }
    }

    pub fn text(text: impl Into<String>, x: i32, y: i32, z: i32) -> Self {
        Self {
            kind: ElementKind::Text(text.into()),
            x,
            y,
            z,
            visible: true,
        }
    }
}

/// One instruction for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationCommand {
    /// Create or fully replace a named element.
    Upsert { id: &'static str, element: Element },
    Remove { id: &'static str },
    SetVisible { id: &'static str, visible: bool },
    SetPosition { id: &'static str, x: i32, y: i32 },
    /// Raw pixel write drawn over the stage for this tick only.
    PixelRun(PixelRun),
    /// Camera top-left in stage pixels.
    Camera { x: i32, y: i32 },
}

/// Current set of named elements plus the commands issued since the last
/// drain.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    elements: HashMap<&'static str, Element>,
    pending: Vec<PresentationCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn upsert(&mut self, id: &'static str, element: Element) {
        self.elements.insert(id, element.clone());
        self.pending.push(PresentationCommand::Upsert { id, element });
    }

    pub fn remove(&mut self, id: &'static str) {
        if self.elements.remove(id).is_some() {
            self.pending.push(PresentationCommand::Remove { id });
        }
    }

    /// Missing elements are left alone.
    pub fn set_visible(&mut self, id: &'static str, visible: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            if element.visible != visible {
                element.visible = visible;
                self.pending
                    .push(PresentationCommand::SetVisible { id, visible });
            }
        }
    }

    /// Missing elements are left alone.
    pub fn set_position(&mut self, id: &'static str, x: i32, y: i32) {
        if let Some(element) = self.elements.get_mut(id) {
            if (element.x, element.y) != (x, y) {
                element.x = x;
                element.y = y;
                self.pending
                    .push(PresentationCommand::SetPosition { id, x, y });
            }
        }
    }

    /// Queue a command that does not touch an element.
    pub fn push(&mut self, command: PresentationCommand) {
        self.pending.push(command);
    }

    /// Commands issued since the previous call, in issue order.
    pub fn drain(&mut self) -> Vec<PresentationCommand> {
        std::mem::take(&mut self.pending)
    }
}
