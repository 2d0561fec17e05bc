//! Ray-mesh intersection for coordinate resolution.
//!
//! Moller-Trumbore ray-triangle tests with barycentric UV interpolation.
//! A pointer resolves to a surface only when the closest hit among all
//! colliders belongs to that surface.

use std::sync::Arc;

use glam::{Affine3A, Vec2, Vec3};

use crate::input::SurfaceResolver;
use crate::types::SurfaceId;

/// Epsilon for floating point comparisons in ray intersection
const EPSILON: f32 = 1e-6;

/// A world-space ray with a normalized direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Produces a world-space ray through a screen position
pub trait ScreenRays {
    fn screen_point_to_ray(&self, screen: Vec2) -> Option<Ray>;
}

/// Result of a ray-triangle intersection test
#[derive(Debug, Clone, Copy)]
pub struct TriangleHit {
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// Barycentric coordinate u (weight for vertex 1)
    pub u: f32,
    /// Barycentric coordinate v (weight for vertex 2)
    pub v: f32,
}

/// Moller-Trumbore ray-triangle intersection algorithm.
///
/// Returns the hit distance and barycentric coordinates if the ray
/// intersects the triangle in front of its origin. Both faces count.
pub fn ray_triangle_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<TriangleHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = ray_dir.cross(edge2);
    let det = edge1.dot(pvec);

    // Ray lies in the triangle's plane
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = ray_origin - v0;

    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = ray_dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;
    if t < EPSILON {
        return None;
    }

    Some(TriangleHit { t, u, v })
}

/// Interpolate a Vec2 attribute (like UVs) using barycentric coordinates.
pub fn interpolate_vec2(v0: Vec2, v1: Vec2, v2: Vec2, u: f32, v: f32) -> Vec2 {
    let w = 1.0 - u - v;
    v0 * w + v1 * u + v2 * v
}

/// Collision geometry of one surface, in its local space
#[derive(Debug, Clone, Default)]
pub struct MeshRaycastData {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Triangle indices (3 per triangle)
    pub indices: Vec<u32>,
    /// Vertex UVs (same length as positions, or empty if the mesh has none)
    pub uvs: Vec<Vec2>,
}

impl MeshRaycastData {
    /// An XY-plane quad centred on the origin, facing +Z.
    /// UV (0, 0) is the top-left corner.
    pub fn quad(width: f32, height: f32) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self {
            positions: vec![
                Vec3::new(-hw, hh, 0.0),
                Vec3::new(hw, hh, 0.0),
                Vec3::new(hw, -hh, 0.0),
                Vec3::new(-hw, -hh, 0.0),
            ],
            indices: vec![0, 3, 2, 0, 2, 1],
            uvs: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty() && self.uvs.len() == self.positions.len()
    }

    fn triangle_indices(&self, tri_index: usize) -> Option<[usize; 3]> {
        let base = tri_index * 3;
        let tri = [
            *self.indices.get(base)? as usize,
            *self.indices.get(base + 1)? as usize,
            *self.indices.get(base + 2)? as usize,
        ];
        tri.iter()
            .all(|&i| i < self.positions.len())
            .then_some(tri)
    }
}

/// Closest intersection of a ray with one mesh
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit {
    /// World-space intersection point
    pub world_pos: Vec3,
    /// World-space distance from the ray origin
    pub distance: f32,
    /// Triangle index
    pub face_id: u32,
    /// Interpolated texture coordinate, None if the mesh has no UVs
    pub uv: Option<Vec2>,
}

/// Cast a local-space ray against mesh data and return the closest
/// triangle and its barycentric hit.
pub fn raycast_mesh(
    ray_origin: Vec3,
    ray_dir: Vec3,
    mesh_data: &MeshRaycastData,
) -> Option<(u32, TriangleHit)> {
    let mut closest_hit: Option<(u32, TriangleHit)> = None;

    // Brute force; surfaces are walls and simple props
    for tri_idx in 0..mesh_data.triangle_count() {
        let Some([i0, i1, i2]) = mesh_data.triangle_indices(tri_idx) else {
            continue;
        };
        let (v0, v1, v2) = (
            mesh_data.positions[i0],
            mesh_data.positions[i1],
            mesh_data.positions[i2],
        );

        if let Some(hit) = ray_triangle_intersection(ray_origin, ray_dir, v0, v1, v2) {
            let dominated = matches!(&closest_hit, Some((_, prev)) if hit.t >= prev.t);
            if !dominated {
                closest_hit = Some((tri_idx as u32, hit));
            }
        }
    }

    closest_hit
}

/// A surface's geometry placed in the world
#[derive(Debug, Clone)]
pub struct SurfaceCollider {
    pub id: SurfaceId,
    pub world_from_local: Affine3A,
    pub mesh: Arc<MeshRaycastData>,
}

impl SurfaceCollider {
    pub fn new(id: SurfaceId, world_from_local: Affine3A, mesh: Arc<MeshRaycastData>) -> Self {
        Self {
            id,
            world_from_local,
            mesh,
        }
    }

    /// Intersect a world-space ray with this collider
    pub fn raycast(&self, ray: &Ray) -> Option<SurfaceHit> {
        let local_from_world = self.world_from_local.inverse();
        let local_origin = local_from_world.transform_point3(ray.origin);
        let local_dir = local_from_world
            .transform_vector3(ray.direction)
            .normalize_or_zero();
        if local_dir == Vec3::ZERO {
            return None;
        }

        let (face_id, hit) = raycast_mesh(local_origin, local_dir, &self.mesh)?;
        let local_pos = local_origin + local_dir * hit.t;
        let world_pos = self.world_from_local.transform_point3(local_pos);

        let uv = if self.mesh.has_uvs() {
            let [i0, i1, i2] = self.mesh.triangle_indices(face_id as usize)?;
            Some(interpolate_vec2(
                self.mesh.uvs[i0],
                self.mesh.uvs[i1],
                self.mesh.uvs[i2],
                hit.u,
                hit.v,
            ))
        } else {
            None
        };

        Some(SurfaceHit {
            world_pos,
            distance: ray.origin.distance(world_pos),
            face_id,
            uv,
        })
    }
}

/// Closest hit across a set of colliders
pub fn closest_hit<'a>(
    colliders: impl IntoIterator<Item = &'a SurfaceCollider>,
    ray: &Ray,
) -> Option<(SurfaceId, SurfaceHit)> {
    colliders
        .into_iter()
        .filter_map(|collider| collider.raycast(ray).map(|hit| (collider.id, hit)))
        .min_by(|(_, a), (_, b)| a.distance.total_cmp(&b.distance))
}

/// Resolves pointer positions for one target surface by casting a camera
/// ray into a set of colliders.
pub struct RaycastResolver<'a, C: ScreenRays> {
    camera: Option<&'a C>,
    colliders: &'a [SurfaceCollider],
    target: SurfaceId,
}

impl<'a, C: ScreenRays> RaycastResolver<'a, C> {
    /// A missing camera makes every resolution fail
    pub fn new(camera: Option<&'a C>, colliders: &'a [SurfaceCollider], target: SurfaceId) -> Self {
        Self {
            camera,
            colliders,
            target,
        }
    }
}

impl<C: ScreenRays> SurfaceResolver for RaycastResolver<'_, C> {
    fn resolve(&self, screen: Vec2) -> Option<Vec2> {
        let ray = self.camera?.screen_point_to_ray(screen)?;
        let (id, hit) = closest_hit(self.colliders, &ray)?;
        if id != self.target {
            return None;
        }
        hit.uv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::ScreenCamera;

    fn camera() -> ScreenCamera {
        ScreenCamera::look_at(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            Vec3::Y,
            std::f32::consts::FRAC_PI_3,
            Vec2::new(800.0, 800.0),
            0.1,
            100.0,
        )
    }

    fn wall(id: u64, z: f32) -> SurfaceCollider {
        SurfaceCollider::new(
            SurfaceId(id),
            Affine3A::from_translation(Vec3::new(0.0, 0.0, z)),
            Arc::new(MeshRaycastData::quad(2.0, 2.0)),
        )
    }

    #[test]
    fn test_ray_triangle_hit() {
        let v0 = Vec3::new(0.0, 0.0, 0.0);
        let v1 = Vec3::new(1.0, 0.0, 0.0);
        let v2 = Vec3::new(0.0, 1.0, 0.0);

        let origin = Vec3::new(0.25, 0.25, 1.0);
        let dir = Vec3::new(0.0, 0.0, -1.0);

        let hit = ray_triangle_intersection(origin, dir, v0, v1, v2).unwrap();
        assert!((hit.t - 1.0).abs() < EPSILON);
        assert!((hit.u - 0.25).abs() < EPSILON);
        assert!((hit.v - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_ray_triangle_miss() {
        let v0 = Vec3::new(0.0, 0.0, 0.0);
        let v1 = Vec3::new(1.0, 0.0, 0.0);
        let v2 = Vec3::new(0.0, 1.0, 0.0);

        let origin = Vec3::new(2.0, 2.0, 1.0);
        let dir = Vec3::new(0.0, 0.0, -1.0);
        assert!(ray_triangle_intersection(origin, dir, v0, v1, v2).is_none());
    }

    #[test]
    fn test_ray_triangle_behind() {
        let v0 = Vec3::new(0.0, 0.0, 0.0);
        let v1 = Vec3::new(1.0, 0.0, 0.0);
        let v2 = Vec3::new(0.0, 1.0, 0.0);

        let origin = Vec3::new(0.25, 0.25, 1.0);
        let dir = Vec3::new(0.0, 0.0, 1.0);
        assert!(ray_triangle_intersection(origin, dir, v0, v1, v2).is_none());
    }

    #[test]
    fn test_interpolate_vec2() {
        let v0 = Vec2::new(0.0, 0.0);
        let v1 = Vec2::new(1.0, 0.0);
        let v2 = Vec2::new(0.0, 1.0);

        assert!((interpolate_vec2(v0, v1, v2, 0.0, 0.0) - v0).length() < EPSILON);
        assert!((interpolate_vec2(v0, v1, v2, 1.0, 0.0) - v1).length() < EPSILON);
        assert!((interpolate_vec2(v0, v1, v2, 0.0, 1.0) - v2).length() < EPSILON);

        let center = (v0 + v1 + v2) / 3.0;
        let result = interpolate_vec2(v0, v1, v2, 1.0 / 3.0, 1.0 / 3.0);
        assert!((result - center).length() < EPSILON);
    }

    #[test]
    fn test_quad_uv_corners() {
        let collider = wall(1, 0.0);
        let ray = |x: f32, y: f32| Ray {
            origin: Vec3::new(x, y, 1.0),
            direction: Vec3::NEG_Z,
        };

        let top_left = collider.raycast(&ray(-0.5, 0.5)).unwrap().uv.unwrap();
        assert!((top_left - Vec2::new(0.25, 0.25)).length() < 1e-4);

        let bottom_right = collider.raycast(&ray(0.5, -0.5)).unwrap().uv.unwrap();
        assert!((bottom_right - Vec2::new(0.75, 0.75)).length() < 1e-4);

        assert!(collider.raycast(&ray(1.5, 0.0)).is_none());
    }

    #[test]
    fn test_mesh_without_uvs_has_no_uv() {
        let mut mesh = MeshRaycastData::quad(2.0, 2.0);
        mesh.uvs.clear();
        let collider = SurfaceCollider::new(SurfaceId(3), Affine3A::IDENTITY, Arc::new(mesh));
        let hit = collider
            .raycast(&Ray {
                origin: Vec3::new(0.0, 0.0, 1.0),
                direction: Vec3::NEG_Z,
            })
            .unwrap();
        assert!(hit.uv.is_none());
        assert!((hit.distance - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_resolver_center() {
        let camera = camera();
        let colliders = vec![wall(1, 0.0)];
        let resolver = RaycastResolver::new(Some(&camera), &colliders, SurfaceId(1));

        let uv = resolver.resolve(Vec2::new(400.0, 400.0)).unwrap();
        assert!((uv - Vec2::splat(0.5)).length() < 1e-4);
    }

    #[test]
    fn test_resolver_fails_for_other_surface() {
        let camera = camera();
        // Surface 2 sits in front of surface 1
        let colliders = vec![wall(1, 0.0), wall(2, 1.0)];

        let behind = RaycastResolver::new(Some(&camera), &colliders, SurfaceId(1));
        assert!(behind.resolve(Vec2::new(400.0, 400.0)).is_none());

        let front = RaycastResolver::new(Some(&camera), &colliders, SurfaceId(2));
        assert!(front.resolve(Vec2::new(400.0, 400.0)).is_some());
    }

    #[test]
    fn test_resolver_miss_and_no_camera() {
        let camera = camera();
        let colliders = vec![wall(1, 0.0)];

        let resolver = RaycastResolver::new(Some(&camera), &colliders, SurfaceId(1));
        assert!(resolver.resolve(Vec2::new(5.0, 5.0)).is_none());

        let blind = RaycastResolver::<ScreenCamera>::new(None, &colliders, SurfaceId(1));
        assert!(blind.resolve(Vec2::new(400.0, 400.0)).is_none());
    }

    #[test]
    fn test_rotated_collider() {
        // Wall turned to face +X, placed at x = -2
        let transform = Affine3A::from_translation(Vec3::new(-2.0, 0.0, 0.0))
            * Affine3A::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let collider = SurfaceCollider::new(
            SurfaceId(9),
            transform,
            Arc::new(MeshRaycastData::quad(2.0, 2.0)),
        );
        let hit = collider
            .raycast(&Ray {
                origin: Vec3::new(0.0, 0.0, 0.0),
                direction: Vec3::NEG_X,
            })
            .unwrap();
        assert!((hit.distance - 2.0).abs() < 1e-4);
        assert!((hit.uv.unwrap() - Vec2::splat(0.5)).length() < 1e-4);
    }
}
