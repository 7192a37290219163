//! # First-Person Camera
//!
//! A yaw/pitch camera that walks through the scene. Looking around is free;
//! walking goes through [`MovementConstraint`] so the camera's box never
//! ends a tick inside an obstacle.
//!
//! ## Coordinate System
//! Right-handed, Y-up. With the default yaw of -90 degrees the camera faces
//! -Z. Angles are stored in degrees and converted when the basis is rebuilt.

use crate::core::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use crate::physics::collision::{ObbError, OrientedBoundingBox};
use crate::physics::movement::{MoveDecision, MoveDirection, MovementConstraint, MovingBody};
use crate::physics::registry::CollidableRegistry;

/// Pitch limit in degrees when pitch is constrained
pub const PITCH_LIMIT: f32 = 89.0;

/// Half-size of the camera's box
const BODY_HALF_EXTENT: f32 = 0.5;

/// Shortest cross product accepted as a right vector
const MIN_BASIS_LENGTH: f32 = 1e-6;

/// First-person camera with a collidable body
///
/// The body is a unit cube centered on the camera. Its extents never change;
/// walking only moves its world transform, in lock-step with `position`.
#[derive(Debug, Clone)]
pub struct FirstPersonCamera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    movement_speed: f32,
    mouse_sensitivity: f32,
    zoom: f32,
    bounds: OrientedBoundingBox,
}

impl FirstPersonCamera {
    /// Create a camera at `position` with default tuning
    pub fn new(position: Vec3) -> Result<Self, ObbError> {
        Self::from_config(&CameraConfig::at(position))
    }

    /// Create a camera from its configuration section
    pub fn from_config(config: &CameraConfig) -> Result<Self, ObbError> {
        let half = Vec3::repeat(BODY_HALF_EXTENT);
        let bounds = OrientedBoundingBox::new(-half, half)?
            .with_world_transform(Mat4::new_translation(&config.position));

        let mut camera = Self {
            position: config.position,
            front: Vec3::new(0.0, 0.0, -1.0),
            up: config.world_up,
            right: Vec3::x(),
            world_up: config.world_up,
            yaw: config.yaw,
            pitch: config.pitch,
            movement_speed: config.movement_speed,
            mouse_sensitivity: config.mouse_sensitivity,
            zoom: config.zoom,
            bounds,
        };
        if config.constrain_pitch {
            camera.pitch = camera.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        camera.update_vectors();

        log::debug!(
            "Camera created at {:?} (yaw {:.1}, pitch {:.1})",
            camera.position, camera.yaw, camera.pitch
        );
        Ok(camera)
    }

    /// World position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit facing direction
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit right vector
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit camera up vector
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Heading in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Elevation in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Units per second
    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    /// The camera's collidable box
    pub fn bounding_box(&self) -> &OrientedBoundingBox {
        &self.bounds
    }

    /// Unit vector a keyboard direction moves along
    pub fn direction_vector(&self, direction: MoveDirection) -> Vec3 {
        match direction {
            MoveDirection::Forward => self.front,
            MoveDirection::Backward => -self.front,
            MoveDirection::Left => -self.right,
            MoveDirection::Right => self.right,
        }
    }

    /// Walk one tick in `direction`, unless that would overlap an obstacle
    pub fn process_keyboard<R>(&mut self, direction: MoveDirection, delta_time: f32, registry: &R) -> MoveDecision
    where
        R: CollidableRegistry + ?Sized,
    {
        let along = self.direction_vector(direction);
        let speed = self.movement_speed;
        MovementConstraint::step(self, along, speed, delta_time, registry)
    }

    /// Turn by a mouse delta; orientation is never collision-gated
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        if !x_offset.is_finite() || !y_offset.is_finite() {
            log::warn!("Ignoring non-finite mouse delta ({}, {})", x_offset, y_offset);
            return;
        }

        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
        log::trace!("Camera turned to yaw {:.2}, pitch {:.2}", self.yaw, self.pitch);
    }

    /// Right-handed look-at view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.front, self.up)
    }

    /// Perspective projection with `zoom` as the vertical field of view
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, utils::deg_to_rad(self.zoom), near, far)
    }

    fn update_vectors(&mut self) {
        self.front = front_from_angles(self.yaw, self.pitch);

        // Facing along world up leaves no horizon; keep the last right vector
        let right = self.front.cross(&self.world_up);
        if right.magnitude() > MIN_BASIS_LENGTH {
            self.right = right.normalize();
        } else {
            log::warn!("View direction {:?} is parallel to world up, keeping previous right vector", self.front);
        }
        self.up = self.right.cross(&self.front).normalize();
    }
}

/// Unit view direction for a yaw and pitch in degrees
pub fn front_from_angles(yaw_degrees: f32, pitch_degrees: f32) -> Vec3 {
    let yaw = utils::deg_to_rad(yaw_degrees);
    let pitch = utils::deg_to_rad(pitch_degrees);

    Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize()
}

impl MovingBody for FirstPersonCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn bounding_box(&self) -> &OrientedBoundingBox {
        &self.bounds
    }

    fn apply_displacement(&mut self, displacement: Vec3) {
        self.position += displacement;
        self.bounds.translate_world(displacement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn no_obstacles() -> Vec<OrientedBoundingBox> {
        Vec::new()
    }

    #[test]
    fn test_default_orientation_faces_negative_z() {
        let camera = FirstPersonCamera::new(Vec3::zeros()).unwrap();

        assert_relative_eq!(camera.front(), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(camera.right(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(camera.up(), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_forward_moves_speed_times_time() {
        let mut camera = FirstPersonCamera::new(Vec3::new(0.0, 0.0, 3.0)).unwrap();

        let decision = camera.process_keyboard(MoveDirection::Forward, 0.4, &no_obstacles());

        assert!(decision.is_committed());
        assert_relative_eq!(camera.position(), Vec3::new(0.0, 0.0, 2.0), epsilon = 1e-6);
        assert_relative_eq!(camera.bounding_box().world_center(), camera.position(), epsilon = 1e-6);
    }

    #[test]
    fn test_strafe_uses_right_vector() {
        let mut camera = FirstPersonCamera::new(Vec3::zeros()).unwrap();

        camera.process_keyboard(MoveDirection::Left, 1.0, &no_obstacles());
        assert_relative_eq!(camera.position(), Vec3::new(-2.5, 0.0, 0.0), epsilon = 1e-6);

        camera.process_keyboard(MoveDirection::Right, 2.0, &no_obstacles());
        assert_relative_eq!(camera.position(), Vec3::new(2.5, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_box_extents_unchanged_by_walking() {
        let mut camera = FirstPersonCamera::new(Vec3::zeros()).unwrap();
        let local_min = camera.bounding_box().local_min();
        let local_max = camera.bounding_box().local_max();

        for _ in 0..5 {
            camera.process_keyboard(MoveDirection::Backward, 0.1, &no_obstacles());
        }

        assert_eq!(camera.bounding_box().local_min(), local_min);
        assert_eq!(camera.bounding_box().local_max(), local_max);
    }

    #[test]
    fn test_mouse_movement_scales_and_clamps_pitch() {
        let mut camera = FirstPersonCamera::new(Vec3::zeros()).unwrap();

        camera.process_mouse_movement(100.0, 0.0, true);
        assert_relative_eq!(camera.yaw(), -80.0, epsilon = 1e-4);

        camera.process_mouse_movement(0.0, 5000.0, true);
        assert_eq!(camera.pitch(), PITCH_LIMIT);

        camera.process_mouse_movement(0.0, -20000.0, true);
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn test_unconstrained_pitch_passes_limit() {
        let mut camera = FirstPersonCamera::new(Vec3::zeros()).unwrap();

        camera.process_mouse_movement(0.0, 1000.0, false);

        assert_relative_eq!(camera.pitch(), 100.0, epsilon = 1e-4);
    }

    #[test]
    fn test_turning_keeps_basis_orthonormal() {
        let mut camera = FirstPersonCamera::new(Vec3::zeros()).unwrap();
        camera.process_mouse_movement(313.0, 271.0, true);

        assert_relative_eq!(camera.front().norm(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.right().norm(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.front().dot(&camera.right()), 0.0, epsilon = 1e-5);
        assert_relative_eq!(camera.front().dot(&camera.up()), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_world_up_along_view_keeps_finite_basis() {
        let config = CameraConfig {
            world_up: Vec3::new(0.0, 0.0, -1.0),
            ..CameraConfig::default()
        };
        let mut camera = FirstPersonCamera::from_config(&config).unwrap();

        assert!(utils::is_finite_vec3(&camera.right()));
        assert!(utils::is_finite_vec3(&camera.up()));

        camera.process_mouse_movement(0.0, 0.0, true);
        camera.process_keyboard(MoveDirection::Right, 0.1, &no_obstacles());
        assert!(utils::is_finite_vec3(&camera.position()));
    }

    #[test]
    fn test_configured_angles_set_heading() {
        let config = CameraConfig::at(Vec3::zeros()).with_angles(0.0, 30.0);
        let camera = FirstPersonCamera::from_config(&config).unwrap();

        assert_relative_eq!(utils::rad_to_deg(camera.front().y.asin()), 30.0, epsilon = 1e-3);
        assert_relative_eq!(camera.front().z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_view_matrix_moves_eye_to_origin() {
        let camera = FirstPersonCamera::new(Vec3::new(1.0, 2.0, 3.0)).unwrap();
        let view = camera.view_matrix();

        assert_relative_eq!(view.transform_point3(&camera.position()), Vec3::zeros(), epsilon = 1e-5);
        // A point straight ahead lands on the view -Z axis
        let ahead = view.transform_point3(&(camera.position() + camera.front() * 4.0));
        assert_relative_eq!(ahead, Vec3::new(0.0, 0.0, -4.0), epsilon = 1e-5);
    }

    #[test]
    fn test_projection_uses_zoom_as_fov() {
        let camera = FirstPersonCamera::new(Vec3::zeros()).unwrap();
        let projection = camera.projection_matrix(1.0, 0.1, 100.0);

        let expected = 1.0 / (utils::deg_to_rad(camera.zoom()) * 0.5).tan();
        assert_relative_eq!(projection[(1, 1)], expected, epsilon = 1e-5);
    }
}
