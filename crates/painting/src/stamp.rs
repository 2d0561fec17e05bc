//! Brush stamps - square alpha masks that define a brush's shape
//!
//! A stamp carries only coverage. The color comes from the active paint
//! color at stamp time, so one stamp serves every swatch.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use tracing::debug;
use wallpaint_config::DEFAULT_STAMP_SIZE;

use crate::error::StampError;

/// An immutable square alpha mask
#[derive(Debug, Clone, PartialEq)]
pub struct BrushStamp {
    name: String,
    size: u32,
    /// Row-major alpha values in 0..=1
    alpha: Vec<f32>,
}

impl BrushStamp {
    /// Build a stamp from raw alpha values
    pub fn from_alpha(
        name: impl Into<String>,
        size: u32,
        alpha: Vec<f32>,
    ) -> Result<Self, StampError> {
        if size == 0 {
            return Err(StampError::Empty);
        }
        let expected = (size as usize) * (size as usize);
        if alpha.len() != expected {
            return Err(StampError::DataLength {
                expected,
                actual: alpha.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            size,
            alpha: alpha.into_iter().map(|a| a.clamp(0.0, 1.0)).collect(),
        })
    }

    /// Build a stamp from 8-bit RGBA pixels. Only the alpha channel is kept.
    pub fn from_rgba8(
        name: impl Into<String>,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<Self, StampError> {
        if width != height {
            return Err(StampError::NotSquare { width, height });
        }
        let expected = (width as usize) * (height as usize) * 4;
        if rgba.len() != expected {
            return Err(StampError::DataLength {
                expected,
                actual: rgba.len(),
            });
        }
        let alpha = rgba.chunks_exact(4).map(|px| px[3] as f32 / 255.0).collect();
        Self::from_alpha(name, width, alpha)
    }

    /// Build a stamp from a decoded image
    pub fn from_image(name: impl Into<String>, image: &image::RgbaImage) -> Result<Self, StampError> {
        Self::from_rgba8(name, image.width(), image.height(), image.as_raw())
    }

    /// Decode a stamp from an image file (PNG, JPEG, ...)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StampError> {
        let path = path.as_ref();
        let image = image::open(path)?.to_rgba8();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "brush".to_string());
        let stamp = Self::from_image(name, &image)?;
        debug!("Loaded brush stamp '{}' ({}x{})", stamp.name, stamp.size, stamp.size);
        Ok(stamp)
    }

    /// Synthesize a soft round brush.
    ///
    /// Alpha is 1 at the centre texel and falls to 0 at distance `size / 2`
    /// along a smoothstep profile, so the rim fades without a hard ring.
    pub fn soft_round(size: u32) -> Self {
        let size = size.max(1);
        let center = size as f32 / 2.0;
        let radius = size as f32 / 2.0;

        let mut alpha = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 - center;
                let dy = y as f32 - center;
                let distance = (dx * dx + dy * dy).sqrt();
                let t = (1.0 - distance / radius).clamp(0.0, 1.0);
                alpha.push(smoothstep(t));
            }
        }

        Self {
            name: "Soft Round".to_string(),
            size,
            alpha,
        }
    }

    /// A fully opaque square brush
    pub fn hard_square(size: u32) -> Self {
        let size = size.max(1);
        Self {
            name: "Square".to_string(),
            size,
            alpha: vec![1.0; (size * size) as usize],
        }
    }

    /// The process-wide default stamp, synthesized on first use
    pub fn default_shared() -> Arc<BrushStamp> {
        static DEFAULT: OnceLock<Arc<BrushStamp>> = OnceLock::new();
        DEFAULT
            .get_or_init(|| Arc::new(BrushStamp::soft_round(DEFAULT_STAMP_SIZE)))
            .clone()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Edge length in texels
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Alpha of one texel, None when out of range
    #[inline]
    pub fn texel_alpha(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(self.alpha[(y as usize) * (self.size as usize) + x as usize])
    }

    /// Nearest-texel alpha lookup over the stamp's unit square
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        let max = self.size - 1;
        let tx = ((u * self.size as f32).floor().max(0.0) as u32).min(max);
        let ty = ((v * self.size as f32).floor().max(0.0) as u32).min(max);
        self.alpha[(ty as usize) * (self.size as usize) + tx as usize]
    }
}

/// Hermite smoothstep on 0..=1
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stamp_center_and_edge() {
        let stamp = BrushStamp::soft_round(64);
        assert_eq!(stamp.size(), 64);
        assert_eq!(stamp.texel_alpha(32, 32), Some(1.0));
        // Distance exactly equal to the radius
        assert_eq!(stamp.texel_alpha(0, 32), Some(0.0));
        assert_eq!(stamp.texel_alpha(32, 0), Some(0.0));
        // Corners are beyond the radius
        assert_eq!(stamp.texel_alpha(0, 0), Some(0.0));
    }

    #[test]
    fn test_default_stamp_profile_is_smooth() {
        let stamp = BrushStamp::soft_round(64);
        // Half way out: linear would give 0.5, smoothstep(0.5) is also 0.5
        let mid = stamp.texel_alpha(48, 32).unwrap();
        assert!((mid - 0.5).abs() < 1e-5);
        // Near the rim smoothstep is below the linear ramp
        let near_rim = stamp.texel_alpha(60, 32).unwrap();
        let linear = 1.0 - 28.0 / 32.0;
        assert!(near_rim < linear);
        assert!(near_rim > 0.0);
    }

    #[test]
    fn test_default_shared_is_single_instance() {
        let a = BrushStamp::default_shared();
        let b = BrushStamp::default_shared();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.size(), DEFAULT_STAMP_SIZE);
    }

    #[test]
    fn test_sample_nearest() {
        let stamp = BrushStamp::soft_round(64);
        assert_eq!(stamp.sample(0.5, 0.5), 1.0);
        assert_eq!(stamp.sample(0.0, 0.5), 0.0);
        // Out of range coordinates clamp to the border
        assert_eq!(stamp.sample(2.0, 0.5), stamp.texel_alpha(63, 32).unwrap());
    }

    #[test]
    fn test_from_rgba8_uses_alpha_only() {
        let rgba = [
            10, 20, 30, 255, //
            0, 0, 0, 0, //
            255, 255, 255, 51, //
            1, 2, 3, 255,
        ];
        let stamp = BrushStamp::from_rgba8("test", 2, 2, &rgba).unwrap();
        assert_eq!(stamp.texel_alpha(0, 0), Some(1.0));
        assert_eq!(stamp.texel_alpha(1, 0), Some(0.0));
        assert!((stamp.texel_alpha(0, 1).unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_non_square() {
        let err = BrushStamp::from_rgba8("wide", 4, 2, &[0; 32]).unwrap_err();
        assert!(matches!(err, StampError::NotSquare { width: 4, height: 2 }));
    }

    #[test]
    fn test_rejects_bad_length() {
        let err = BrushStamp::from_alpha("short", 4, vec![1.0; 3]).unwrap_err();
        assert!(matches!(
            err,
            StampError::DataLength {
                expected: 16,
                actual: 3
            }
        ));
        assert!(matches!(
            BrushStamp::from_alpha("empty", 0, vec![]),
            Err(StampError::Empty)
        ));
    }

    #[test]
    fn test_from_image() {
        let image = image::RgbaImage::from_pixel(8, 8, image::Rgba([255, 255, 255, 128]));
        let stamp = BrushStamp::from_image("flat", &image).unwrap();
        assert_eq!(stamp.size(), 8);
        assert!((stamp.sample(0.3, 0.7) - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_hard_square() {
        let stamp = BrushStamp::hard_square(16);
        assert_eq!(stamp.texel_alpha(0, 0), Some(1.0));
        assert_eq!(stamp.texel_alpha(15, 15), Some(1.0));
    }
}
