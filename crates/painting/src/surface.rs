//! CPU pixel grid backing the paint buffer - Rgba32Float compatible storage

/// A straight-alpha RGBA pixel grid.
/// Stores pixels as [f32; 4] in row-major order, row 0 at v = 0.
pub struct CpuSurface {
    pub width: u32,
    pub height: u32,
    pixels: Vec<[f32; 4]>,
}

/// Fully transparent pixel
pub const TRANSPARENT: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

impl CpuSurface {
    /// Create a new surface with the given dimensions, initialized to transparent
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![TRANSPARENT; pixel_count],
        }
    }

    /// Reset every pixel to the given color
    pub fn fill(&mut self, color: [f32; 4]) {
        self.pixels.fill(color);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Composite `color` over the existing pixel (Porter-Duff source-over,
    /// straight alpha). `coverage` scales the color's alpha.
    ///
    /// The resulting alpha is never lower than the existing alpha.
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [f32; 4], coverage: f32) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        self.pixels[i] = source_over(color, coverage, self.pixels[i]);
    }

    /// Get raw pixel data for GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }
}

/// Straight-alpha source-over
#[inline]
pub fn source_over(src: [f32; 4], coverage: f32, dst: [f32; 4]) -> [f32; 4] {
    let src_alpha = (src[3] * coverage).clamp(0.0, 1.0);
    if src_alpha <= 0.0 {
        return dst;
    }
    let dst_weight = dst[3] * (1.0 - src_alpha);
    let out_alpha = src_alpha + dst_weight;
    if out_alpha <= 0.0 {
        return TRANSPARENT;
    }
    let channel = |c: usize| (src[c] * src_alpha + dst[c] * dst_weight) / out_alpha;
    [channel(0), channel(1), channel(2), out_alpha]
}
