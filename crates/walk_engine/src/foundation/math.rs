//! Math utilities and types
//!
//! Provides the nalgebra aliases and the handful of matrix helpers the
//! collision kernel and camera need.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix4,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// True when every component is neither NaN nor infinite
    pub fn is_finite_vec3(v: &Vec3) -> bool {
        v.iter().all(|c| c.is_finite())
    }
}

/// Extension trait for Mat4 with the affine helpers used by boxes and cameras
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Build an affine matrix from three basis columns and a translation
    fn from_basis(x: Vec3, y: Vec3, z: Vec3, translation: Vec3) -> Mat4;

    /// Column `index` (0..3) of the linear part
    fn linear_column(&self, index: usize) -> Vec3;

    /// Translation component (column 3)
    fn translation_part(&self) -> Vec3;

    /// Apply the full affine transform to a point
    fn transform_point3(&self, point: &Vec3) -> Vec3;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn from_basis(x: Vec3, y: Vec3, z: Vec3, translation: Vec3) -> Mat4 {
        // Mat4::new takes its arguments row by row
        Mat4::new(
            x.x, y.x, z.x, translation.x,
            x.y, y.y, z.y, translation.y,
            x.z, y.z, z.z, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    fn linear_column(&self, index: usize) -> Vec3 {
        Vec3::new(self[(0, index)], self[(1, index)], self[(2, index)])
    }

    fn translation_part(&self) -> Vec3 {
        Vec3::new(self[(0, 3)], self[(1, 3)], self[(2, 3)])
    }

    fn transform_point3(&self, point: &Vec3) -> Vec3 {
        (self * Vec4::new(point.x, point.y, point.z, 1.0)).xyz()
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }
}
