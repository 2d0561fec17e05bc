//! Painting system for Bevy integration
//!
//! Creates a texture per paintable surface, drives each surface's engine
//! once per frame and uploads dirty tiles to the GPU.

use bevy::asset::RenderAssetUsages;
use bevy::input::mouse::MouseButton;
use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages};
use bevy::window::PrimaryWindow;
use painting::{BYTES_PER_PIXEL, FrameOutcome, RaycastResolver};

use crate::collider::{PaintCollider, gather_colliders};
use crate::pointer::{CameraRays, UiPointerCapture, sample_pointer};
use crate::surface::{
    PaintCamera, PaintSurfaceCommand, PaintableSurface, SurfaceTexture, surface_id,
};

/// Marker component indicating the material shows the surface texture
#[derive(Component)]
pub struct SurfaceMaterialBound;

/// Create textures for new paintable surfaces and bind them to their material
pub(crate) fn setup_surface_textures(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    query: Query<
        (
            Entity,
            &PaintableSurface,
            Option<&MeshMaterial3d<StandardMaterial>>,
        ),
        Without<SurfaceTexture>,
    >,
) {
    for (entity, surface, mesh_material) in query.iter() {
        let buffer = surface.engine.buffer();
        let size = buffer.size();

        // Rgba32Float matches the buffer's [f32; 4] pixels directly
        let mut image = Image::new_fill(
            Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            bytemuck::bytes_of(&[0.0f32; 4]),
            TextureFormat::Rgba32Float,
            RenderAssetUsages::all(),
        );
        image.texture_descriptor.usage = TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST;
        image.data = Some(buffer.as_bytes().to_vec());

        let handle = images.add(image);
        commands.entity(entity).insert(SurfaceTexture {
            image_handle: handle.clone(),
        });

        match mesh_material.and_then(|m| materials.get_mut(&m.0)) {
            Some(material) => {
                material.base_color_texture = Some(handle);
                material.base_color = Color::WHITE;
                material.alpha_mode = AlphaMode::Blend;
                material.double_sided = true;
                commands.entity(entity).insert(SurfaceMaterialBound);
            }
            None => warn!(
                "Paint surface '{}' has no StandardMaterial; its paint will not be visible",
                surface.engine.label()
            ),
        }

        info!(
            "Created texture for paint surface '{}' ({}x{})",
            surface.engine.label(),
            size,
            size
        );
    }
}

/// Run one update of every surface engine
#[allow(clippy::too_many_arguments)]
pub(crate) fn drive_paint_engines(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Option<Res<Touches>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<PaintCamera>>,
    colliders: Query<(Entity, &PaintCollider, &GlobalTransform)>,
    ui: Res<UiPointerCapture>,
    mut surfaces: Query<(Entity, &mut PaintableSurface)>,
    mut warned_no_camera: Local<bool>,
) {
    let cursor = windows.single().ok().and_then(Window::cursor_position);
    let sample = sample_pointer(&mouse, cursor, touches.as_deref());

    let camera = match cameras.single() {
        Ok((camera, transform)) => Some(CameraRays { camera, transform }),
        Err(_) => {
            if !*warned_no_camera {
                warn!("No single PaintCamera found; paint surfaces stay idle");
                *warned_no_camera = true;
            }
            None
        }
    };

    let placed = gather_colliders(colliders.iter());

    for (entity, mut surface) in surfaces.iter_mut() {
        let resolver = RaycastResolver::new(camera.as_ref(), &placed, surface_id(entity));
        let outcome = surface.engine.update(&sample, &*ui, &resolver);
        match outcome {
            FrameOutcome::StrokeStarted(record) => {
                debug!(
                    "Stroke started on '{}' at {:?}",
                    surface.engine.label(),
                    record.pixel
                );
            }
            FrameOutcome::StrokeEnded => {
                debug!("Stroke ended on '{}'", surface.engine.label());
            }
            _ => {}
        }
    }
}

/// Apply clear commands
pub(crate) fn handle_surface_commands(
    mut commands: MessageReader<PaintSurfaceCommand>,
    mut surfaces: Query<(Entity, &mut PaintableSurface)>,
) {
    for command in commands.read() {
        match *command {
            PaintSurfaceCommand::Clear(Some(target)) => match surfaces.get_mut(target) {
                Ok((_, mut surface)) => surface.engine.clear(),
                Err(_) => warn!("Clear requested for {:?}, which is not a paint surface", target),
            },
            PaintSurfaceCommand::Clear(None) => {
                for (_, mut surface) in surfaces.iter_mut() {
                    surface.engine.clear();
                }
            }
        }
    }
}

/// Upload dirty tiles to GPU
pub(crate) fn upload_dirty_tiles(
    mut images: ResMut<Assets<Image>>,
    mut query: Query<(&mut PaintableSurface, &SurfaceTexture)>,
) {
    for (mut surface, texture) in query.iter_mut() {
        if !surface.engine.has_dirty_tiles() {
            continue;
        }
        let dirty_tiles = surface.engine.take_dirty_tiles();

        let Some(image) = images.get_mut(&texture.image_handle) else {
            continue;
        };

        let buffer = surface.engine.buffer();
        let Some(ref mut image_data) = image.data else {
            image.data = Some(buffer.as_bytes().to_vec());
            continue;
        };

        let surface_width = buffer.size();

        for tile_coord in dirty_tiles {
            let tile_data = buffer.get_tile_data(tile_coord);
            let (tile_x, tile_y, tile_w, tile_h) = buffer.get_tile_bounds(tile_coord);

            // Image data is stored row by row
            for local_y in 0..tile_h {
                let global_y = tile_y + local_y;
                let src_start = (local_y * tile_w) as usize;
                let src_end = src_start + tile_w as usize;
                if src_end > tile_data.len() {
                    break;
                }
                let src_bytes: &[u8] = bytemuck::cast_slice(&tile_data[src_start..src_end]);

                let dst_start = ((global_y * surface_width + tile_x) as usize) * BYTES_PER_PIXEL;
                let dst_end = dst_start + tile_w as usize * BYTES_PER_PIXEL;
                if dst_end <= image_data.len() {
                    image_data[dst_start..dst_end].copy_from_slice(src_bytes);
                }
            }
        }
    }
}
