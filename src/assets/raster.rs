use std::sync::Arc;

use serde::Serialize;

/// Pack an RGBA colour into the `0xRRGGBBAA` pixel format used by [`Raster`].
pub fn pack_rgba(rgba: [u8; 4]) -> u32 {
    u32::from_be_bytes(rgba)
}

/// Decoded image as handed over by the sprite codec or stage renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    /// Offset of the image's anchor from its top-left corner.
    pub origin_x: i32,
    pub origin_y: i32,
    /// Row-major `0xRRGGBBAA` pixels, `width * height` long.
    pub pixels: Vec<u32>,
}

impl Raster {
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        Self {
            width,
            height,
            origin_x: 0,
            origin_y: 0,
            pixels,
        }
    }

    /// Single-colour image.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::new(width, height, vec![pack_rgba(rgba); (width * height) as usize])
    }

    pub fn with_origin(mut self, origin_x: i32, origin_y: i32) -> Self {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
        self
    }
}

/// Horizontal run of identical pixels written straight to the frame.
///
/// The stage renderer reports laser beams this way; they are drawn on top of
/// the stage image rather than baked into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelRun {
    pub x: i32,
    pub y: i32,
    pub len: u32,
    pub color: u32,
}

/// Output of a stage re-render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageImage {
    pub raster: Arc<Raster>,
    pub pixel_runs: Vec<PixelRun>,
}

impl StageImage {
    pub fn new(raster: Raster) -> Self {
        Self {
            raster: Arc::new(raster),
            pixel_runs: Vec::new(),
        }
    }

    pub fn with_pixel_runs(mut self, runs: Vec<PixelRun>) -> Self {
        self.pixel_runs = runs;
        self
    }
}
