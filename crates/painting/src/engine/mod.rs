//! Paint Surface Engine
//!
//! One engine owns the paint buffer of one surface. Each frame the host
//! calls [`PaintSurfaceEngine::update`] with its input, UI-occlusion and
//! coordinate-resolution capabilities; the engine decides whether a stroke
//! is in progress and stamps the active brush at most once.

mod stroke;

use std::sync::Arc;

use tracing::{info, warn};
use wallpaint_config::{PaintConfig, DEFAULT_STAMP_SIZE};

use crate::buffer::{PaintBuffer, TileCoord};
use crate::context::{ContextSubscription, PaintContext};
use crate::error::BufferError;
use crate::stamp::BrushStamp;

pub use stroke::{FrameOutcome, StampRecord};

/// Construction options that are not part of [`PaintConfig`]
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Name used in log messages
    pub label: String,
    /// Follow the context's paint-enabled toggle. When false the engine is
    /// always enabled.
    pub toggle_bound: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            label: "surface".to_string(),
            toggle_bound: true,
        }
    }
}

impl EngineOptions {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }
}

/// Stroke state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Drawing,
}

/// Paints one surface from per-frame pointer samples
pub struct PaintSurfaceEngine {
    label: String,
    buffer: PaintBuffer,
    subscription: ContextSubscription,
    /// Used until an external stamp is selected
    fallback_stamp: Arc<BrushStamp>,
    state: StrokeState,
    can_draw: bool,
    toggle_bound: bool,
    toggle_threshold: f32,
    size_scale_divisor: f32,
}

impl PaintSurfaceEngine {
    /// Allocate a transparent buffer and subscribe to `context`.
    ///
    /// `can_draw` starts from the toggle's current value.
    pub fn new(
        config: &PaintConfig,
        context: &PaintContext,
        options: EngineOptions,
    ) -> Result<Self, BufferError> {
        let buffer = PaintBuffer::from_config(config)?;
        let subscription = context.subscribe();

        let fallback_stamp = if config.default_stamp_size == DEFAULT_STAMP_SIZE {
            BrushStamp::default_shared()
        } else {
            Arc::new(BrushStamp::soft_round(config.default_stamp_size))
        };

        let can_draw = if options.toggle_bound {
            config.toggle_enabled(subscription.toggle_value())
        } else {
            warn!(
                "Paint surface '{}' has no enable toggle bound; painting is always enabled",
                options.label
            );
            true
        };

        info!(
            "Paint surface '{}' ready: {}x{} buffer, painting {}",
            options.label,
            buffer.size(),
            buffer.size(),
            if can_draw { "enabled" } else { "disabled" }
        );

        Ok(Self {
            label: options.label,
            buffer,
            subscription,
            fallback_stamp,
            state: StrokeState::Idle,
            can_draw,
            toggle_bound: options.toggle_bound,
            toggle_threshold: config.toggle_threshold,
            size_scale_divisor: config.size_scale_divisor,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == StrokeState::Drawing
    }

    /// Enable state as of the start of the last update
    pub fn can_draw(&self) -> bool {
        self.can_draw
    }

    pub fn buffer(&self) -> &PaintBuffer {
        &self.buffer
    }

    /// Reset every pixel to transparent. Stroke state is untouched.
    pub fn clear(&mut self) {
        self.buffer.clear();
        info!("Paint surface '{}' cleared", self.label);
    }

    /// Tiles changed since the last call, for incremental upload
    pub fn take_dirty_tiles(&mut self) -> Vec<TileCoord> {
        self.buffer.take_dirty_tiles()
    }

    pub fn has_dirty_tiles(&self) -> bool {
        self.buffer.has_dirty_tiles()
    }

    /// The stamp used for the next composite
    pub fn active_stamp(&self) -> Arc<BrushStamp> {
        self.subscription
            .brush_stamp()
            .unwrap_or_else(|| self.fallback_stamp.clone())
    }
}

impl Drop for PaintSurfaceEngine {
    fn drop(&mut self) {
        info!("Paint surface '{}' released", self.label);
    }
}
