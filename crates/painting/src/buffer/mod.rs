//! The persistent paint buffer: a square RGBA pixel grid with tile-based
//! dirty tracking for incremental GPU uploads.

mod data_access;
mod dirty_tracking;
mod stamping;

use std::collections::HashSet;

use tracing::debug;
use wallpaint_config::{PaintConfig, MAX_TEXTURE_SIZE};

use crate::error::BufferError;
use crate::surface::{CpuSurface, TRANSPARENT};

pub use stamping::{stamp_diameter, uv_to_pixel, StampRegion};

/// Tile coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
}

/// Square paint buffer owned by exactly one surface.
///
/// Dimensions are fixed at creation. Pixels change only through
/// [`PaintBuffer::stamp`] and [`PaintBuffer::clear`].
pub struct PaintBuffer {
    pub(crate) surface: CpuSurface,
    pub(crate) tile_size: u32,
    tiles_x: u32,
    tiles_y: u32,
    pub(crate) dirty_tiles: HashSet<TileCoord>,
}

impl PaintBuffer {
    /// Allocate a fully transparent `size x size` buffer
    pub fn new(size: u32, tile_size: u32) -> Result<Self, BufferError> {
        if size == 0 || size > MAX_TEXTURE_SIZE {
            return Err(BufferError::InvalidSize {
                size,
                max: MAX_TEXTURE_SIZE,
            });
        }
        if tile_size == 0 {
            return Err(BufferError::InvalidTileSize);
        }

        let tiles = size.div_ceil(tile_size);
        debug!(
            "PaintBuffer::new: {}x{} ({}x{} tiles of {})",
            size, size, tiles, tiles, tile_size
        );

        Ok(Self {
            surface: CpuSurface::new(size, size),
            tile_size,
            tiles_x: tiles,
            tiles_y: tiles,
            dirty_tiles: HashSet::new(),
        })
    }

    pub fn from_config(config: &PaintConfig) -> Result<Self, BufferError> {
        Self::new(config.texture_size, config.tile_size)
    }

    /// Edge length in pixels
    #[inline]
    pub fn size(&self) -> u32 {
        self.surface.width
    }

    #[inline]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    #[inline]
    pub fn tiles_x(&self) -> u32 {
        self.tiles_x
    }

    #[inline]
    pub fn tiles_y(&self) -> u32 {
        self.tiles_y
    }

    /// Reset every pixel to transparent and mark the whole buffer dirty
    pub fn clear(&mut self) {
        self.surface.fill(TRANSPARENT);
        self.mark_all_dirty();
    }

    /// Get a pixel, None if out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        self.surface.get_pixel(x, y)
    }

    /// Whether every pixel is fully transparent
    pub fn is_transparent(&self) -> bool {
        self.surface.pixels().iter().all(|p| p[3] == 0.0)
    }

    /// Raw pixel data for a full GPU upload (Rgba32Float layout)
    pub fn as_bytes(&self) -> &[u8] {
        self.surface.as_bytes()
    }

    /// Read-only access to all pixels
    pub fn pixels(&self) -> &[[f32; 4]] {
        self.surface.pixels()
    }
}
