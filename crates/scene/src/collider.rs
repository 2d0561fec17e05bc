//! Raycast geometry for paintable surfaces and occluders
//!
//! Mesh assets are converted once into [`MeshRaycastData`]; world
//! placement is read from `GlobalTransform` every frame so moving
//! surfaces keep resolving correctly.

use std::sync::Arc;

use bevy::mesh::{Indices, VertexAttributeValues};
use bevy::prelude::*;
use painting::{MeshRaycastData, SurfaceCollider};

use crate::surface::{PaintOccluder, PaintableSurface, surface_id};

/// Cached collision geometry of a surface or occluder
#[derive(Component, Clone)]
pub struct PaintCollider {
    pub mesh: Arc<MeshRaycastData>,
}

/// Extract positions, triangle indices and UVs from a Bevy mesh.
///
/// Returns None when the mesh has no float3 positions. Non-indexed meshes
/// are treated as a plain triangle list.
pub fn mesh_raycast_data(mesh: &Mesh) -> Option<MeshRaycastData> {
    let positions = match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
        Some(VertexAttributeValues::Float32x3(v)) => v,
        _ => return None,
    };

    let indices = match mesh.indices() {
        Some(Indices::U32(i)) => i.clone(),
        Some(Indices::U16(i)) => i.iter().map(|&x| x as u32).collect(),
        None => (0..positions.len() as u32).collect(),
    };

    let uvs = match mesh.attribute(Mesh::ATTRIBUTE_UV_0) {
        Some(VertexAttributeValues::Float32x2(v)) => {
            v.iter().map(|&uv| glam::Vec2::from_array(uv)).collect()
        }
        _ => Vec::new(),
    };

    Some(MeshRaycastData {
        positions: positions
            .iter()
            .map(|&p| glam::Vec3::from_array(p))
            .collect(),
        indices,
        uvs,
    })
}

/// Build colliders for surfaces and occluders whose mesh has loaded
pub(crate) fn build_surface_colliders(
    mut commands: Commands,
    meshes: Res<Assets<Mesh>>,
    query: Query<
        (Entity, &Mesh3d, Option<&Name>),
        (
            Or<(With<PaintableSurface>, With<PaintOccluder>)>,
            Without<PaintCollider>,
        ),
    >,
) {
    for (entity, mesh_handle, name) in query.iter() {
        let Some(mesh) = meshes.get(&mesh_handle.0) else {
            continue;
        };
        let Some(data) = mesh_raycast_data(mesh) else {
            warn!("Mesh of {:?} has no positions; it cannot be hit by paint rays", entity);
            continue;
        };

        info!(
            "Built paint collider for {} ({} triangles, uvs: {})",
            name.map(Name::as_str).unwrap_or("unnamed entity"),
            data.triangle_count(),
            data.has_uvs()
        );
        commands.entity(entity).insert(PaintCollider {
            mesh: Arc::new(data),
        });
    }
}

/// World-placed colliders for this frame
pub(crate) fn gather_colliders<'a>(
    query: impl IntoIterator<Item = (Entity, &'a PaintCollider, &'a GlobalTransform)>,
) -> Vec<SurfaceCollider> {
    query
        .into_iter()
        .map(|(entity, collider, transform)| {
            SurfaceCollider::new(
                surface_id(entity),
                to_core_affine(&transform.affine()),
                collider.mesh.clone(),
            )
        })
        .collect()
}

fn to_core_affine(affine: &bevy::math::Affine3A) -> glam::Affine3A {
    glam::Affine3A::from_cols_array(&affine.to_cols_array())
}
