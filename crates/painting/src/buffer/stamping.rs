//! Stamp compositing - the only write path into the paint buffer besides clear

use glam::Vec2;
use tracing::debug;

use super::PaintBuffer;
use crate::constants::MIN_STAMP_DIAMETER;
use crate::stamp::BrushStamp;

/// Pixel region written by one stamp, already clipped to the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StampRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Convert a surface-local coordinate in [0, 1] to a buffer pixel
#[inline]
pub fn uv_to_pixel(uv: Vec2, texture_size: u32) -> (i64, i64) {
    let size = texture_size as f32;
    ((uv.x * size).round() as i64, (uv.y * size).round() as i64)
}

/// Stamp diameter in pixels for a size scale.
///
/// `round(scale * texture_size / divisor)`, never below one pixel. NaN and
/// negative scales also yield one pixel.
#[inline]
pub fn stamp_diameter(size_scale: f32, texture_size: u32, divisor: f32) -> u32 {
    let diameter = (size_scale * texture_size as f32 / divisor).round();
    if diameter.is_nan() || diameter < MIN_STAMP_DIAMETER as f32 {
        MIN_STAMP_DIAMETER
    } else {
        // Saturating float-to-int cast
        diameter as u32
    }
}

impl PaintBuffer {
    /// Composite `stamp`, tinted by `color`, as a `diameter` square centred
    /// on pixel `(px, py)`.
    ///
    /// Stamp alpha multiplies the color's alpha and the result is blended
    /// source-over onto the buffer. Pixels outside the buffer are clipped.
    /// Returns the written region, or None when the square misses the buffer.
    pub fn stamp(
        &mut self,
        px: i64,
        py: i64,
        diameter: u32,
        stamp: &BrushStamp,
        color: [f32; 4],
    ) -> Option<StampRegion> {
        let diameter = diameter.max(MIN_STAMP_DIAMETER);
        let side = diameter as i64;
        let size = self.surface.width as i64;

        // Centres further out than one side length cannot touch the buffer
        let px = px.clamp(-side, size + side);
        let py = py.clamp(-side, size + side);
        let x0 = px - side / 2;
        let y0 = py - side / 2;

        let x_min = x0.clamp(0, size);
        let y_min = y0.clamp(0, size);
        let x_max = (x0 + side).clamp(0, size);
        let y_max = (y0 + side).clamp(0, size);

        if x_min >= x_max || y_min >= y_max {
            debug!(
                "PaintBuffer::stamp: ({}, {}) d={} outside buffer",
                px, py, diameter
            );
            return None;
        }

        let inv_side = 1.0 / side as f32;
        for y in y_min..y_max {
            let v = ((y - y0) as f32 + 0.5) * inv_side;
            for x in x_min..x_max {
                let u = ((x - x0) as f32 + 0.5) * inv_side;
                let coverage = stamp.sample(u, v);
                if coverage > 0.0 {
                    self.surface.blend_pixel(x as u32, y as u32, color, coverage);
                }
            }
        }

        let region = StampRegion {
            x: x_min as u32,
            y: y_min as u32,
            width: (x_max - x_min) as u32,
            height: (y_max - y_min) as u32,
        };
        self.mark_region_dirty(region.x, region.y, region.width, region.height);

        debug!(
            "PaintBuffer::stamp: ({}, {}) d={} '{}' -> region {:?}",
            px,
            py,
            diameter,
            stamp.name(),
            region
        );
        Some(region)
    }
}
