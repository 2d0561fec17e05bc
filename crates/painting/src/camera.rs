//! Pinhole camera for turning screen positions into world-space rays

use glam::{Affine3A, Mat4, Vec2, Vec3};

use crate::raycast::{Ray, ScreenRays};

/// A perspective camera with a screen-space viewport.
///
/// Screen coordinates have their origin at the top-left corner with y
/// pointing down, matching window cursor positions.
#[derive(Debug, Clone, Copy)]
pub struct ScreenCamera {
    /// Camera placement in the world
    pub world_from_view: Affine3A,
    /// Perspective projection (view space looks down -Z)
    pub clip_from_view: Mat4,
    /// Viewport size in screen pixels
    pub viewport_size: Vec2,
}

impl ScreenCamera {
    /// Camera at `eye` looking at `target`
    pub fn look_at(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y_radians: f32,
        viewport_size: Vec2,
        near: f32,
        far: f32,
    ) -> Self {
        let aspect = if viewport_size.y > 0.0 {
            viewport_size.x / viewport_size.y
        } else {
            1.0
        };
        Self {
            world_from_view: Affine3A::look_at_rh(eye, target, up).inverse(),
            clip_from_view: Mat4::perspective_rh(fov_y_radians, aspect, near, far),
            viewport_size,
        }
    }

    /// World-space camera position
    pub fn position(&self) -> Vec3 {
        self.world_from_view.translation.into()
    }
}

impl ScreenRays for ScreenCamera {
    fn screen_point_to_ray(&self, screen: Vec2) -> Option<Ray> {
        if self.viewport_size.x <= 0.0 || self.viewport_size.y <= 0.0 || !screen.is_finite() {
            return None;
        }

        let ndc = Vec2::new(
            2.0 * screen.x / self.viewport_size.x - 1.0,
            1.0 - 2.0 * screen.y / self.viewport_size.y,
        );

        // Any depth inside the frustum gives a point on the pixel's ray
        let view_point = self
            .clip_from_view
            .inverse()
            .project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        if !view_point.is_finite() {
            return None;
        }

        let view_dir = view_point.normalize_or_zero();
        if view_dir == Vec3::ZERO {
            return None;
        }

        Some(Ray {
            origin: self.position(),
            direction: self.world_from_view.transform_vector3(view_dir).normalize(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> ScreenCamera {
        ScreenCamera::look_at(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            Vec3::Y,
            std::f32::consts::FRAC_PI_3,
            Vec2::new(800.0, 600.0),
            0.1,
            100.0,
        )
    }

    #[test]
    fn test_center_ray_points_forward() {
        let ray = camera().screen_point_to_ray(Vec2::new(400.0, 300.0)).unwrap();
        assert!((ray.origin - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-4);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn test_screen_y_points_down() {
        let camera = camera();
        let upper = camera.screen_point_to_ray(Vec2::new(400.0, 100.0)).unwrap();
        let right = camera.screen_point_to_ray(Vec2::new(700.0, 300.0)).unwrap();
        assert!(upper.direction.y > 0.0);
        assert!(right.direction.x > 0.0);
    }

    #[test]
    fn test_empty_viewport_has_no_rays() {
        let mut camera = camera();
        camera.viewport_size = Vec2::ZERO;
        assert!(camera.screen_point_to_ray(Vec2::new(1.0, 1.0)).is_none());
    }
}
