//! Pointer sampling, UI capture and camera rays for the paint engines

use bevy::input::mouse::MouseButton;
use bevy::input::touch::Touches;
use bevy::prelude::*;
use painting::{PointerPhase, PointerSample, ScreenRays, UiOcclusion};

/// The host UI's claim on the pointer.
///
/// UI code sets `captured` while the pointer interacts with a widget and
/// may list screen rectangles (logical pixels, top-left origin) that always
/// take input priority over the paint surfaces.
#[derive(Resource, Default, Debug, Clone)]
pub struct UiPointerCapture {
    pub captured: bool,
    pub regions: Vec<Rect>,
}

impl UiPointerCapture {
    pub fn claim_region(&mut self, rect: Rect) {
        self.regions.push(rect);
    }
}

impl UiOcclusion for UiPointerCapture {
    fn is_claimed(&self, sample: &PointerSample) -> bool {
        if self.captured {
            return true;
        }
        let position = to_bevy_vec2(sample.position);
        self.regions.iter().any(|rect| rect.contains(position))
    }
}

/// Build this frame's pointer sample, preferring an active touch over
/// the mouse.
///
/// `cursor` is the primary window's cursor position, if inside the window.
pub fn sample_pointer(
    mouse: &ButtonInput<MouseButton>,
    cursor: Option<Vec2>,
    touches: Option<&Touches>,
) -> Option<PointerSample> {
    if let Some(touches) = touches {
        if let Some(sample) = sample_touch(touches) {
            return Some(sample);
        }
    }

    let phase = if mouse.just_pressed(MouseButton::Left) {
        PointerPhase::Began
    } else if mouse.just_released(MouseButton::Left) {
        PointerPhase::Ended
    } else if mouse.pressed(MouseButton::Left) {
        PointerPhase::Moved
    } else {
        return None;
    };

    let position = cursor?;
    Some(PointerSample::mouse(to_core_vec2(position), phase))
}

fn sample_touch(touches: &Touches) -> Option<PointerSample> {
    if let Some(touch) = touches.iter_just_pressed().next() {
        return Some(PointerSample::touch(
            touch.id(),
            to_core_vec2(touch.position()),
            PointerPhase::Began,
        ));
    }
    if let Some(touch) = touches.iter().next() {
        return Some(PointerSample::touch(
            touch.id(),
            to_core_vec2(touch.position()),
            PointerPhase::Moved,
        ));
    }
    touches.iter_just_released().next().map(|touch| {
        PointerSample::touch(
            touch.id(),
            to_core_vec2(touch.position()),
            PointerPhase::Ended,
        )
    })
}

/// A Bevy camera as a source of screen rays
pub struct CameraRays<'a> {
    pub camera: &'a Camera,
    pub transform: &'a GlobalTransform,
}

impl ScreenRays for CameraRays<'_> {
    fn screen_point_to_ray(&self, screen: glam::Vec2) -> Option<painting::Ray> {
        let ray = self
            .camera
            .viewport_to_world(self.transform, to_bevy_vec2(screen))
            .ok()?;
        Some(painting::Ray {
            origin: glam::Vec3::from_array(ray.origin.to_array()),
            direction: glam::Vec3::from_array(ray.direction.as_vec3().to_array()),
        })
    }
}

fn to_core_vec2(v: Vec2) -> glam::Vec2 {
    glam::Vec2::from_array(v.to_array())
}

fn to_bevy_vec2(v: glam::Vec2) -> Vec2 {
    Vec2::from_array(v.to_array())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::input::touch::{TouchInput, TouchPhase, touch_screen_input_system};
    use painting::PointerSource;

    fn touch_world() -> World {
        let mut world = World::new();
        world.init_resource::<Touches>();
        world.init_resource::<Messages<TouchInput>>();
        world
    }

    fn touch(world: &mut World, id: u64, position: Vec2, phase: TouchPhase) {
        world.write_message(TouchInput {
            phase,
            position,
            window: Entity::PLACEHOLDER,
            force: None,
            id,
        });
        world.run_system_once(touch_screen_input_system).unwrap();
        world.resource_mut::<Messages<TouchInput>>().clear();
    }

    #[test]
    fn test_mouse_phases() {
        let mut mouse = ButtonInput::<MouseButton>::default();
        let cursor = Some(Vec2::new(10.0, 20.0));
        assert!(sample_pointer(&mouse, cursor, None).is_none());

        mouse.press(MouseButton::Left);
        let began = sample_pointer(&mouse, cursor, None).unwrap();
        assert_eq!(began.phase, PointerPhase::Began);
        assert_eq!(began.source, PointerSource::Mouse);
        assert_eq!(began.position, glam::Vec2::new(10.0, 20.0));

        mouse.clear();
        assert_eq!(
            sample_pointer(&mouse, cursor, None).unwrap().phase,
            PointerPhase::Moved
        );

        mouse.release(MouseButton::Left);
        assert_eq!(
            sample_pointer(&mouse, cursor, None).unwrap().phase,
            PointerPhase::Ended
        );
    }

    #[test]
    fn test_mouse_outside_window() {
        let mut mouse = ButtonInput::<MouseButton>::default();
        mouse.press(MouseButton::Left);
        assert!(sample_pointer(&mouse, None, None).is_none());
    }

    #[test]
    fn test_mouse_used_without_touches() {
        let mut mouse = ButtonInput::<MouseButton>::default();
        mouse.press(MouseButton::Left);
        let touches = Touches::default();

        let sample = sample_pointer(&mouse, Some(Vec2::ONE), Some(&touches)).unwrap();
        assert_eq!(sample.source, PointerSource::Mouse);
    }

    #[test]
    fn test_ui_capture() {
        let mut capture = UiPointerCapture::default();
        let sample = PointerSample::mouse(glam::Vec2::new(50.0, 50.0), PointerPhase::Began);
        assert!(!capture.is_claimed(&sample));

        capture.claim_region(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(capture.is_claimed(&sample));

        capture.regions.clear();
        capture.captured = true;
        assert!(capture.is_claimed(&sample));
    }

    #[test]
    fn test_touch_began_beats_held_mouse() {
        let mut world = touch_world();
        touch(&mut world, 7, Vec2::new(5.0, 6.0), TouchPhase::Started);

        let mut mouse = ButtonInput::<MouseButton>::default();
        mouse.press(MouseButton::Left);
        mouse.clear();

        let sample = sample_pointer(
            &mouse,
            Some(Vec2::new(100.0, 100.0)),
            Some(world.resource::<Touches>()),
        )
        .unwrap();
        assert_eq!(sample.source, PointerSource::Touch(7));
        assert_eq!(sample.phase, PointerPhase::Began);
        assert_eq!(sample.position, glam::Vec2::new(5.0, 6.0));
    }

    #[test]
    fn test_held_touch_is_moved() {
        let mut world = touch_world();
        touch(&mut world, 3, Vec2::new(5.0, 6.0), TouchPhase::Started);
        touch(&mut world, 3, Vec2::new(8.0, 9.0), TouchPhase::Moved);

        let mouse = ButtonInput::<MouseButton>::default();
        let sample = sample_pointer(&mouse, None, Some(world.resource::<Touches>())).unwrap();
        assert_eq!(sample.source, PointerSource::Touch(3));
        assert_eq!(sample.phase, PointerPhase::Moved);
        assert_eq!(sample.position, glam::Vec2::new(8.0, 9.0));
    }

    #[test]
    fn test_released_touch_is_ended() {
        let mut world = touch_world();
        touch(&mut world, 4, Vec2::new(5.0, 6.0), TouchPhase::Started);
        touch(&mut world, 4, Vec2::new(5.0, 6.0), TouchPhase::Ended);

        let mouse = ButtonInput::<MouseButton>::default();
        let sample = sample_pointer(&mouse, None, Some(world.resource::<Touches>())).unwrap();
        assert_eq!(sample.source, PointerSource::Touch(4));
        assert_eq!(sample.phase, PointerPhase::Ended);
    }
}
