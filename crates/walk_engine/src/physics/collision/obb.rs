//! Oriented bounding box
//!
//! The box keeps its extents in object space and is positioned purely by a
//! world transform. Extents are fixed at construction; every later move,
//! turn or rescale replaces the transform.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use super::shape::{Bounds, LocalBounds};
use thiserror::Error;

/// Total extent given to an axis whose min and max corners coincide
pub const DEGENERATE_EXTENT: f32 = 0.01;

/// Corner index pairs forming the 12 edges of a box, in [`OrientedBoundingBox::world_corners`] order
pub const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0), // front face
    (4, 5), (5, 6), (6, 7), (7, 4), // back face
    (0, 4), (1, 5), (2, 6), (3, 7), // connecting edges
];

/// Box construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObbError {
    /// A corner had a NaN or infinite component
    #[error("bounding box corners must be finite, got min {min:?} max {max:?}")]
    NonFiniteCorner {
        /// Requested minimum corner
        min: Vec3,
        /// Requested maximum corner
        max: Vec3,
    },
}

/// Box with object-space extents and a world transform
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedBoundingBox {
    local_min: Vec3,
    local_max: Vec3,
    world_transform: Mat4,
}

impl OrientedBoundingBox {
    /// Create a box from object-space corners with an identity transform
    ///
    /// Corners are reordered per axis if swapped. Any axis with zero extent is
    /// widened to [`DEGENERATE_EXTENT`] around its value, so flat shapes such
    /// as quads still produce a solid box.
    pub fn new(local_min: Vec3, local_max: Vec3) -> Result<Self, ObbError> {
        if !utils::is_finite_vec3(&local_min) || !utils::is_finite_vec3(&local_max) {
            return Err(ObbError::NonFiniteCorner { min: local_min, max: local_max });
        }

        let mut min = local_min.inf(&local_max);
        let mut max = local_min.sup(&local_max);

        for k in 0..3 {
            if min[k] == max[k] {
                min[k] -= DEGENERATE_EXTENT * 0.5;
                max[k] += DEGENERATE_EXTENT * 0.5;
                log::debug!("Inflated degenerate box axis {} to {:?}..{:?}", k, min[k], max[k]);
            }
        }

        Ok(Self {
            local_min: min,
            local_max: max,
            world_transform: Mat4::identity(),
        })
    }

    /// Create a box from precomputed bounds
    pub fn from_bounds(bounds: &Bounds) -> Result<Self, ObbError> {
        Self::new(bounds.min, bounds.max)
    }

    /// Create a box around a shape
    pub fn from_shape<S: LocalBounds + ?Sized>(shape: &S) -> Result<Self, ObbError> {
        Self::from_bounds(&shape.local_bounds())
    }

    /// Builder-style transform assignment
    #[must_use]
    pub fn with_world_transform(mut self, transform: Mat4) -> Self {
        self.world_transform = transform;
        self
    }

    /// Minimum object-space corner
    pub fn local_min(&self) -> Vec3 {
        self.local_min
    }

    /// Maximum object-space corner
    pub fn local_max(&self) -> Vec3 {
        self.local_max
    }

    /// Object-space center
    pub fn local_center(&self) -> Vec3 {
        (self.local_min + self.local_max) * 0.5
    }

    /// Object-space half size along each local axis
    pub fn local_half_extent(&self) -> Vec3 {
        (self.local_max - self.local_min) * 0.5
    }

    /// Current world transform
    pub fn world_transform(&self) -> &Mat4 {
        &self.world_transform
    }

    /// Replace the world transform. No geometry is recomputed.
    pub fn set_world_transform(&mut self, transform: Mat4) {
        self.world_transform = transform;
    }

    /// Shift the box in world space, leaving orientation and scale alone
    pub fn translate_world(&mut self, delta: Vec3) {
        self.world_transform = Mat4::new_translation(&delta) * self.world_transform;
    }

    /// Half-width of the box's shadow on `axis` when placed by `transform`
    ///
    /// `axis` should be unit length. The transform's columns carry any
    /// rotation and scale, so nothing here assumes an orthonormal basis.
    pub fn project_half_width(&self, transform: &Mat4, axis: &Vec3) -> f32 {
        let half = self.local_half_extent();
        (0..3)
            .map(|i| (transform.linear_column(i) * half[i]).dot(axis).abs())
            .sum()
    }

    /// World-space center when placed by `transform`
    pub fn center_under(&self, transform: &Mat4) -> Vec3 {
        transform.transform_point3(&self.local_center())
    }

    /// World-space center under the current transform
    pub fn world_center(&self) -> Vec3 {
        self.center_under(&self.world_transform)
    }

    /// World-space orientation axes (transform columns, scale included)
    pub fn world_axes(&self) -> [Vec3; 3] {
        [
            self.world_transform.linear_column(0),
            self.world_transform.linear_column(1),
            self.world_transform.linear_column(2),
        ]
    }

    /// The 8 corners placed by `transform`: front face (max z) counter-clockwise
    /// from bottom-left, then the back face in the same order
    pub fn world_corners(&self, transform: &Mat4) -> [Vec3; 8] {
        let (lo, hi) = (self.local_min, self.local_max);
        [
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
        ]
        .map(|corner| transform.transform_point3(&corner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision::shape::QuadShape;
    use crate::foundation::math::Vec2;
    use approx::assert_relative_eq;

    fn unit_box() -> OrientedBoundingBox {
        OrientedBoundingBox::new(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 0.5, 0.5)).unwrap()
    }

    #[test]
    fn test_derived_center_and_extent() {
        let obb = OrientedBoundingBox::new(Vec3::new(0.0, -1.0, 2.0), Vec3::new(2.0, 1.0, 6.0)).unwrap();

        assert_eq!(obb.local_center(), Vec3::new(1.0, 0.0, 4.0));
        assert_eq!(obb.local_half_extent(), Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(*obb.world_transform(), Mat4::identity());
    }

    #[test]
    fn test_degenerate_axis_inflated() {
        let obb = OrientedBoundingBox::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)).unwrap();

        let extent = obb.local_max() - obb.local_min();
        assert_relative_eq!(extent.x, DEGENERATE_EXTENT, epsilon = 1e-6);
        assert_relative_eq!(obb.local_center().x, 1.0, epsilon = 1e-6);
        // Untouched axes keep their size
        assert_eq!(extent.y, 1.0);
        assert_eq!(extent.z, 1.0);
    }

    #[test]
    fn test_flat_quad_gets_depth() {
        let quad = QuadShape::new(Vec2::zeros(), Vec2::new(1.0, 1.0)).unwrap();
        let obb = OrientedBoundingBox::from_shape(&quad).unwrap();

        assert!(obb.local_half_extent().z > 0.0);
    }

    #[test]
    fn test_swapped_corners_reordered() {
        let obb = OrientedBoundingBox::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(-1.0, -1.0, -1.0)).unwrap();

        assert_eq!(obb.local_min(), Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(obb.local_max(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_non_finite_corner_rejected() {
        let result = OrientedBoundingBox::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(matches!(result, Err(ObbError::NonFiniteCorner { .. })));

        let result = OrientedBoundingBox::new(Vec3::zeros(), Vec3::new(1.0, f32::INFINITY, 1.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_projection_scales_with_transform() {
        let obb = unit_box();
        let scaled = Mat4::new_nonuniform_scaling(&Vec3::new(4.0, 1.0, 1.0));

        let x = Vec3::x();
        assert_relative_eq!(obb.project_half_width(&Mat4::identity(), &x), 0.5);
        assert_relative_eq!(obb.project_half_width(&scaled, &x), 2.0);

        // Diagonal shadow of a unit cube is half the face diagonal
        let diagonal = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert_relative_eq!(
            obb.project_half_width(&Mat4::identity(), &diagonal),
            std::f32::consts::FRAC_1_SQRT_2,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_center_includes_scale() {
        let obb = OrientedBoundingBox::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0)).unwrap();
        let transform = Mat4::new_translation(&Vec3::new(10.0, 0.0, 0.0))
            * Mat4::new_nonuniform_scaling(&Vec3::new(3.0, 1.0, 1.0));

        assert_relative_eq!(obb.center_under(&transform), Vec3::new(13.0, 1.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_translate_world_keeps_orientation() {
        let mut obb = unit_box().with_world_transform(Mat4::rotation_y(0.3));
        let axes_before = obb.world_axes();

        obb.translate_world(Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(obb.world_axes(), axes_before);
        assert_relative_eq!(obb.world_center(), Vec3::new(1.0, 2.0, 3.0), epsilon = 1e-6);
        // Extents never change
        assert_eq!(obb.local_half_extent(), Vec3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_corners_and_edges() {
        let obb = unit_box();
        let corners = obb.world_corners(&Mat4::new_translation(&Vec3::new(0.0, 0.0, 1.0)));

        assert_eq!(corners[0], Vec3::new(-0.5, -0.5, 1.5));
        assert_eq!(corners[6], Vec3::new(0.5, 0.5, 0.5));

        // Every edge joins corners that differ along exactly one axis
        for (a, b) in BOX_EDGES {
            let d = corners[a] - corners[b];
            let changed = d.iter().filter(|c| c.abs() > 1e-6).count();
            assert_eq!(changed, 1, "edge {a}-{b}");
        }
    }
}
