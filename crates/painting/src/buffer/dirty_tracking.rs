//! Dirty tile tracking for incremental texture updates

use tracing::debug;

use super::{PaintBuffer, TileCoord};

impl PaintBuffer {
    /// Mark a rectangular region as dirty, clamped to the buffer
    pub(crate) fn mark_region_dirty(&mut self, x: u32, y: u32, w: u32, h: u32) {
        if w == 0 || h == 0 || x >= self.surface.width || y >= self.surface.height {
            return;
        }

        let x_end = x.saturating_add(w).min(self.surface.width);
        let y_end = y.saturating_add(h).min(self.surface.height);

        let tile_x_start = x / self.tile_size;
        let tile_y_start = y / self.tile_size;
        let tile_x_end = (x_end - 1) / self.tile_size;
        let tile_y_end = (y_end - 1) / self.tile_size;

        let tiles_before = self.dirty_tiles.len();
        for ty in tile_y_start..=tile_y_end {
            for tx in tile_x_start..=tile_x_end {
                self.dirty_tiles.insert(TileCoord { x: tx, y: ty });
            }
        }

        debug!(
            "mark_region_dirty: ({}, {}) {}x{} -> {} new tiles (total {})",
            x,
            y,
            w,
            h,
            self.dirty_tiles.len() - tiles_before,
            self.dirty_tiles.len()
        );
    }

    pub(crate) fn mark_all_dirty(&mut self) {
        for ty in 0..self.tiles_y() {
            for tx in 0..self.tiles_x() {
                self.dirty_tiles.insert(TileCoord { x: tx, y: ty });
            }
        }
    }

    /// Get all dirty tiles and clear the dirty set
    pub fn take_dirty_tiles(&mut self) -> Vec<TileCoord> {
        self.dirty_tiles.drain().collect()
    }

    #[inline]
    pub fn has_dirty_tiles(&self) -> bool {
        !self.dirty_tiles.is_empty()
    }

    #[inline]
    pub fn dirty_tile_count(&self) -> usize {
        self.dirty_tiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::super::PaintBuffer;

    #[test]
    fn test_take_dirty_tiles() {
        let mut buffer = PaintBuffer::new(256, 128).unwrap();

        buffer.mark_region_dirty(0, 0, 1, 1);
        assert!(buffer.has_dirty_tiles());
        assert_eq!(buffer.dirty_tile_count(), 1);

        buffer.mark_region_dirty(130, 130, 1, 1);
        assert_eq!(buffer.dirty_tile_count(), 2);

        // Out of bounds is ignored
        buffer.mark_region_dirty(256, 0, 4, 4);
        assert_eq!(buffer.dirty_tile_count(), 2);

        let tiles = buffer.take_dirty_tiles();
        assert_eq!(tiles.len(), 2);
        assert!(!buffer.has_dirty_tiles());
    }

    #[test]
    fn test_mark_region_dirty() {
        let mut buffer = PaintBuffer::new(256, 128).unwrap();
        // Region spanning all 4 tiles
        buffer.mark_region_dirty(100, 100, 56, 56);
        assert_eq!(buffer.dirty_tile_count(), 4);
    }

    #[test]
    fn test_mark_region_dirty_clamps() {
        let mut buffer = PaintBuffer::new(256, 128).unwrap();
        buffer.mark_region_dirty(200, 200, u32::MAX, u32::MAX);
        assert_eq!(buffer.dirty_tile_count(), 1);
    }
}
