//! Bevy integration for Wallpaint
//!
//! Binds a [`painting::PaintSurfaceEngine`] to each entity carrying a
//! [`PaintableSurface`]: the plugin gives the surface a texture, feeds its
//! engine mouse/touch input every frame and resolves the pointer onto the
//! surface by casting rays from the [`PaintCamera`] into cached colliders.

use bevy::prelude::*;
use wallpaint_config::PaintConfig;

mod collider;
mod painting_system;
mod pointer;
mod surface;

pub use collider::{PaintCollider, mesh_raycast_data};
pub use painting_system::SurfaceMaterialBound;
pub use pointer::{CameraRays, UiPointerCapture, sample_pointer};
pub use surface::{
    PaintCamera, PaintOccluder, PaintSurfaceCommand, PaintableSurface, SharedPaintContext,
    SurfaceTexture, surface_id,
};

/// Plugin for paintable surfaces
///
/// Reads [`PaintConfig`] if the app inserted one, otherwise uses defaults.
pub struct WallPaintPlugin;

impl Plugin for WallPaintPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PaintConfig>()
            .init_resource::<SharedPaintContext>()
            .init_resource::<UiPointerCapture>()
            .add_message::<PaintSurfaceCommand>()
            .add_systems(
                Update,
                (
                    collider::build_surface_colliders,
                    painting_system::setup_surface_textures,
                    painting_system::drive_paint_engines,
                    painting_system::handle_surface_commands,
                    painting_system::upload_dirty_tiles,
                )
                    .chain(),
            );
    }
}
