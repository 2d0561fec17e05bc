//! Tile data access for partial uploads

use crate::types::Rgba8;

use super::{PaintBuffer, TileCoord};

impl PaintBuffer {
    /// Pixel data for one tile, row-major.
    /// Edge tiles may be smaller than `tile_size x tile_size`.
    pub fn get_tile_data(&self, coord: TileCoord) -> Vec<[f32; 4]> {
        let (tile_x, tile_y, tile_w, tile_h) = self.get_tile_bounds(coord);
        let stride = self.surface.width as usize;
        let pixels = self.surface.pixels();

        let mut data = Vec::with_capacity((tile_w * tile_h) as usize);
        for row in tile_y..tile_y + tile_h {
            let start = row as usize * stride + tile_x as usize;
            data.extend_from_slice(&pixels[start..start + tile_w as usize]);
        }
        data
    }

    /// Tile bounds (x, y, width, height) in pixel coordinates
    pub fn get_tile_bounds(&self, coord: TileCoord) -> (u32, u32, u32, u32) {
        let tile_start_x = coord.x * self.tile_size;
        let tile_start_y = coord.y * self.tile_size;

        let tile_width = self
            .tile_size
            .min(self.surface.width.saturating_sub(tile_start_x));
        let tile_height = self
            .tile_size
            .min(self.surface.height.saturating_sub(tile_start_y));

        (tile_start_x, tile_start_y, tile_width, tile_height)
    }

    /// A pixel quantized to 8-bit RGBA
    pub fn get_pixel_rgba8(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.get_pixel(x, y).map(Rgba8::from_f32)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{PaintBuffer, TileCoord};
    use crate::stamp::BrushStamp;

    #[test]
    fn test_get_tile_data() {
        let mut buffer = PaintBuffer::new(256, 128).unwrap();
        let stamp = BrushStamp::hard_square(1);
        buffer.stamp(0, 0, 1, &stamp, [1.0, 0.0, 0.0, 1.0]);

        let tile_data = buffer.get_tile_data(TileCoord { x: 0, y: 0 });
        assert_eq!(tile_data.len(), 128 * 128);
        assert_eq!(tile_data[0], [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(tile_data[1], [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_edge_tile_data() {
        let buffer = PaintBuffer::new(150, 128).unwrap();
        let tile_data = buffer.get_tile_data(TileCoord { x: 1, y: 1 });
        assert_eq!(tile_data.len(), 22 * 22);
    }

    #[test]
    fn test_get_tile_bounds() {
        let buffer = PaintBuffer::new(150, 128).unwrap();
        assert_eq!(buffer.get_tile_bounds(TileCoord { x: 0, y: 0 }), (0, 0, 128, 128));
        assert_eq!(buffer.get_tile_bounds(TileCoord { x: 1, y: 1 }), (128, 128, 22, 22));
    }
}
