//! Per-frame input state machine and stamping

use glam::Vec2;
use tracing::{debug, info};

use super::{PaintSurfaceEngine, StrokeState};
use crate::buffer::{stamp_diameter, uv_to_pixel, StampRegion};
use crate::input::{InputSampler, SurfaceResolver, UiOcclusion};
use crate::types::PointerPhase;

/// One stamp composited during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StampRecord {
    /// Buffer pixel the stamp was centred on
    pub pixel: (i64, i64),
    /// Stamp side length in pixels
    pub diameter: u32,
    /// Pixels written, None if the square fell entirely outside the buffer
    pub region: Option<StampRegion>,
}

/// What one call to [`PaintSurfaceEngine::update`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Painting is disabled
    Inert,
    /// No stroke in progress and none started
    Idle,
    /// A press resolved onto the surface and stamped
    StrokeStarted(StampRecord),
    /// A held pointer stamped at its new position
    Stamped(StampRecord),
    /// Stroke continues but the pointer did not resolve this frame
    Held,
    /// The stroke in progress ended this frame
    StrokeEnded,
}

impl FrameOutcome {
    /// The stamp applied this frame, if any
    pub fn stamp(&self) -> Option<&StampRecord> {
        match self {
            FrameOutcome::StrokeStarted(record) | FrameOutcome::Stamped(record) => Some(record),
            _ => None,
        }
    }
}

impl PaintSurfaceEngine {
    /// Run one frame of the stroke state machine.
    ///
    /// Applies at most one stamp. Never fails: anything that cannot be
    /// resolved simply produces no stamp this frame.
    pub fn update(
        &mut self,
        input: &impl InputSampler,
        ui: &impl UiOcclusion,
        resolver: &impl SurfaceResolver,
    ) -> FrameOutcome {
        self.sync_toggle();

        if !self.can_draw {
            return match self.end_stroke("painting disabled") {
                FrameOutcome::StrokeEnded => FrameOutcome::StrokeEnded,
                _ => FrameOutcome::Inert,
            };
        }

        let Some(sample) = input.sample() else {
            return self.end_stroke("no active pointer");
        };

        if ui.is_claimed(&sample) {
            return self.end_stroke("pointer over UI");
        }

        match sample.phase {
            PointerPhase::Began => {
                if self.state == StrokeState::Drawing {
                    debug!("Paint surface '{}': press while drawing, restarting", self.label);
                    self.state = StrokeState::Idle;
                }
                match resolve(resolver, sample.position) {
                    Some(uv) => {
                        let record = self.stamp_at(uv);
                        self.state = StrokeState::Drawing;
                        debug!(
                            "Paint surface '{}': stroke started at {:?}",
                            self.label, record.pixel
                        );
                        FrameOutcome::StrokeStarted(record)
                    }
                    None => FrameOutcome::Idle,
                }
            }
            PointerPhase::Moved => {
                if self.state != StrokeState::Drawing {
                    return FrameOutcome::Idle;
                }
                // A miss keeps the stroke alive
                match resolve(resolver, sample.position) {
                    Some(uv) => FrameOutcome::Stamped(self.stamp_at(uv)),
                    None => FrameOutcome::Held,
                }
            }
            PointerPhase::Ended => self.end_stroke("pointer released"),
        }
    }

    /// Pick up toggle writes made since the previous frame
    fn sync_toggle(&mut self) {
        if !self.toggle_bound {
            return;
        }
        if let Some(value) = self.subscription.poll_toggle() {
            let enabled = value >= self.toggle_threshold;
            if enabled != self.can_draw {
                info!(
                    "Paint surface '{}': painting {}",
                    self.label,
                    if enabled { "enabled" } else { "disabled" }
                );
            }
            self.can_draw = enabled;
        }
    }

    fn end_stroke(&mut self, reason: &str) -> FrameOutcome {
        if self.state == StrokeState::Drawing {
            self.state = StrokeState::Idle;
            debug!("Paint surface '{}': stroke ended ({})", self.label, reason);
            FrameOutcome::StrokeEnded
        } else {
            FrameOutcome::Idle
        }
    }

    /// Composite the active stamp with the current color and size at `uv`
    fn stamp_at(&mut self, uv: Vec2) -> StampRecord {
        let size = self.buffer.size();
        let pixel = uv_to_pixel(uv, size);
        let diameter = stamp_diameter(
            self.subscription.brush_size(),
            size,
            self.size_scale_divisor,
        );
        let stamp = self.active_stamp();
        let color = self.subscription.color();

        let region = self.buffer.stamp(pixel.0, pixel.1, diameter, &stamp, color);
        StampRecord {
            pixel,
            diameter,
            region,
        }
    }
}

/// Resolve a screen position, treating non-finite coordinates as a miss
fn resolve(resolver: &impl SurfaceResolver, screen: Vec2) -> Option<Vec2> {
    resolver.resolve(screen).filter(|uv| uv.is_finite())
}
