//! Paintable surface components, shared brush state and surface commands

use std::sync::Arc;

use bevy::ecs::message::Message;
use bevy::prelude::*;
use painting::{BufferError, EngineOptions, PaintContext, PaintSurfaceEngine, SurfaceId};
use wallpaint_config::PaintConfig;

/// Component owning the paint engine of one surface entity.
///
/// The entity also needs a `Mesh3d` with UVs and a
/// `MeshMaterial3d<StandardMaterial>` to show the paint.
#[derive(Component)]
pub struct PaintableSurface {
    pub engine: PaintSurfaceEngine,
}

impl PaintableSurface {
    /// Create an engine subscribed to `context`, following its enable toggle
    pub fn from_config(
        config: &PaintConfig,
        context: &PaintContext,
        label: impl Into<String>,
    ) -> Result<Self, BufferError> {
        Self::with_options(config, context, EngineOptions::labeled(label))
    }

    pub fn with_options(
        config: &PaintConfig,
        context: &PaintContext,
        options: EngineOptions,
    ) -> Result<Self, BufferError> {
        Ok(Self {
            engine: PaintSurfaceEngine::new(config, context, options)?,
        })
    }
}

/// Surface identity used for raycast ownership checks
pub fn surface_id(entity: Entity) -> SurfaceId {
    SurfaceId(entity.to_bits())
}

/// Component linking a paintable surface to its GPU texture
#[derive(Component)]
pub struct SurfaceTexture {
    /// Handle to the Bevy Image asset
    pub image_handle: Handle<Image>,
}

/// Marker for geometry that blocks paint rays without being paintable
#[derive(Component, Default)]
pub struct PaintOccluder;

/// Marker for the camera that paint rays are cast from
#[derive(Component, Default)]
pub struct PaintCamera;

/// The brush state shared by every surface
#[derive(Resource, Clone)]
pub struct SharedPaintContext(pub Arc<PaintContext>);

impl FromWorld for SharedPaintContext {
    fn from_world(world: &mut World) -> Self {
        let context = match world.get_resource::<PaintConfig>() {
            Some(config) => PaintContext::from_config(config),
            None => PaintContext::default(),
        };
        Self(Arc::new(context))
    }
}

impl std::ops::Deref for SharedPaintContext {
    type Target = PaintContext;

    fn deref(&self) -> &PaintContext {
        &self.0
    }
}

/// Message for external surface controls
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintSurfaceCommand {
    /// Reset one surface, or every surface with None, to transparent
    Clear(Option<Entity>),
}
