//! Wallpaint surface painting engine
//!
//! This crate paints brush stamps into per-surface paint buffers from
//! per-frame pointer input. It has no engine or windowing dependency:
//! - [`engine`] - Per-surface stroke state machine ([`PaintSurfaceEngine`])
//! - [`buffer`] - Square RGBA paint buffer with tile dirty tracking
//! - [`stamp`] - Brush stamp alpha masks and the default soft brush
//! - [`context`] - Shared active color, stamp, size and enable toggle
//! - [`input`] - Capabilities the host supplies each frame
//! - [`raycast`] - Ray-mesh intersection and screen-to-surface resolution
//! - [`camera`] - Pinhole camera for screen-space rays
//! - [`surface`] - CPU float RGBA surface and source-over blending

pub mod buffer;
pub mod camera;
pub mod constants;
pub mod context;
pub mod engine;
pub mod error;
pub mod input;
pub mod raycast;
pub mod stamp;
pub mod surface;
pub mod types;

pub use buffer::{PaintBuffer, StampRegion, TileCoord};
pub use camera::ScreenCamera;
pub use constants::*;
pub use context::{ContextSubscription, PaintContext};
pub use engine::{EngineOptions, FrameOutcome, PaintSurfaceEngine, StampRecord, StrokeState};
pub use error::{BufferError, StampError};
pub use input::{InputSampler, SurfaceResolver, UiOcclusion};
pub use raycast::{MeshRaycastData, Ray, RaycastResolver, ScreenRays, SurfaceCollider, SurfaceHit};
pub use stamp::BrushStamp;
pub use types::*;
