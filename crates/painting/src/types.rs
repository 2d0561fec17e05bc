use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifies one paintable surface among the colliders of a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

/// Which device produced a pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerSource {
    /// Primary mouse button
    Mouse,
    /// First active touch, with its finger id
    Touch(u64),
}

/// Press lifecycle of the sampled pointer this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    /// Button or touch went down this frame
    Began,
    /// Still held (moved or stationary)
    Moved,
    /// Released or cancelled this frame
    Ended,
}

/// One frame of pointer input, in screen pixels (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub position: Vec2,
    pub source: PointerSource,
    pub phase: PointerPhase,
}

impl PointerSample {
    pub fn mouse(position: Vec2, phase: PointerPhase) -> Self {
        Self {
            position,
            source: PointerSource::Mouse,
            phase,
        }
    }

    pub fn touch(id: u64, position: Vec2, phase: PointerPhase) -> Self {
        Self {
            position,
            source: PointerSource::Touch(id),
            phase,
        }
    }
}

/// 8-bit RGBA color as produced by swatch UIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba8(pub [u8; 4]);

impl Rgba8 {
    pub const RED: Self = Self([255, 0, 0, 255]);
    pub const GREEN: Self = Self([0, 255, 0, 255]);
    pub const BLUE: Self = Self([0, 0, 255, 255]);
    pub const WHITE: Self = Self([255, 255, 255, 255]);
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);

    /// Convert to the paint buffer's float representation
    pub fn to_f32(self) -> [f32; 4] {
        self.0.map(|c| c as f32 / 255.0)
    }

    /// Quantize a float color, clamping each channel to 0..=1
    pub fn from_f32(color: [f32; 4]) -> Self {
        Self(color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
    }
}

impl From<Rgba8> for [f32; 4] {
    fn from(color: Rgba8) -> Self {
        color.to_f32()
    }
}
