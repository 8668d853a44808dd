//! Camera state and input-driven movement

use nalgebra::{Point3, Vector3};

use crate::terminal::Action;

/// Horizontal/vertical field-of-view extents mapped across the display grid.
pub const FOV_EXTENTS: (f32, f32) = (1.0, 0.25);
/// Distance from the camera to the projection plane.
pub const PROJECTION_DISTANCE: f32 = 0.25;

/// Translating pinhole camera with fixed projection geometry.
///
/// Only the position ever changes, one unit step per input event; the
/// field-of-view extents and plane distance are fixed for the session.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Point3<f32>,
    pub fov: (f32, f32),
    pub projection_distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, -25.0),
            fov: FOV_EXTENTS,
            projection_distance: PROJECTION_DISTANCE,
        }
    }
}

impl Camera {
    pub fn new(position: Point3<f32>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Translate the camera by the unit step the action maps to.
    /// Non-movement actions leave the position unchanged.
    pub fn apply(&mut self, action: Action) {
        self.position += movement(action);
    }
}

fn movement(action: Action) -> Vector3<f32> {
    match action {
        Action::Forward => Vector3::new(0.0, 0.0, 1.0),
        Action::Back => Vector3::new(0.0, 0.0, -1.0),
        Action::Right => Vector3::new(1.0, 0.0, 0.0),
        Action::Left => Vector3::new(-1.0, 0.0, 0.0),
        Action::Up => Vector3::new(0.0, 1.0, 0.0),
        Action::Down => Vector3::new(0.0, -1.0, 0.0),
        Action::Quit | Action::None => Vector3::zeros(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_twice_from_start() {
        let mut camera = Camera::default();
        assert_eq!(camera.position, Point3::new(0.0, 0.0, -25.0));
        camera.apply(Action::Forward);
        camera.apply(Action::Forward);
        assert_eq!(camera.position, Point3::new(0.0, 0.0, -23.0));
    }

    #[test]
    fn test_unmapped_key_is_a_noop() {
        let mut camera = Camera::default();
        camera.apply(Action::None);
        assert_eq!(camera.position, Point3::new(0.0, 0.0, -25.0));
    }

    #[test]
    fn test_opposite_steps_cancel() {
        let mut camera = Camera::new(Point3::new(1.0, 2.0, 3.0));
        camera.apply(Action::Up);
        camera.apply(Action::Down);
        camera.apply(Action::Left);
        camera.apply(Action::Right);
        assert_eq!(camera.position, Point3::new(1.0, 2.0, 3.0));
    }
}
