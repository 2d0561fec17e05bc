//! Capabilities the engine queries each frame
//!
//! The host supplies the pointer sample, answers whether a screen position
//! is claimed by interactive UI, and resolves a screen position to a
//! surface-local coordinate. Tests drive the engine with synthetic values.

use glam::Vec2;

use crate::types::PointerSample;

/// Supplies at most one pointer sample per frame.
///
/// Implementations prefer an active touch over the mouse.
pub trait InputSampler {
    fn sample(&self) -> Option<PointerSample>;
}

/// Answers whether UI has input priority at a screen position
pub trait UiOcclusion {
    fn is_claimed(&self, sample: &PointerSample) -> bool;
}

/// Maps a screen position to a surface-local coordinate in [0, 1]²
pub trait SurfaceResolver {
    fn resolve(&self, screen: Vec2) -> Option<Vec2>;
}

impl InputSampler for Option<PointerSample> {
    fn sample(&self) -> Option<PointerSample> {
        *self
    }
}

impl InputSampler for PointerSample {
    fn sample(&self) -> Option<PointerSample> {
        Some(*self)
    }
}

/// No UI on screen
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUi;

impl UiOcclusion for NoUi {
    fn is_claimed(&self, _sample: &PointerSample) -> bool {
        false
    }
}

/// UI made of axis-aligned screen rectangles (min, max), inclusive
#[derive(Debug, Clone, Default)]
pub struct ClaimedRegions {
    pub regions: Vec<(Vec2, Vec2)>,
}

impl ClaimedRegions {
    pub fn push(&mut self, min: Vec2, max: Vec2) {
        self.regions.push((min, max));
    }
}

impl UiOcclusion for ClaimedRegions {
    fn is_claimed(&self, sample: &PointerSample) -> bool {
        let p = sample.position;
        self.regions
            .iter()
            .any(|(min, max)| p.cmpge(*min).all() && p.cmple(*max).all())
    }
}

impl<F> SurfaceResolver for F
where
    F: Fn(Vec2) -> Option<Vec2>,
{
    fn resolve(&self, screen: Vec2) -> Option<Vec2> {
        self(screen)
    }
}

/// Resolver for a host with no usable camera: always fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCamera;

impl SurfaceResolver for NoCamera {
    fn resolve(&self, _screen: Vec2) -> Option<Vec2> {
        None
    }
}
