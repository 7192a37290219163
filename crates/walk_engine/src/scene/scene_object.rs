//! Placed collidable objects
//!
//! An object pairs a shape with a placement. The shape fixes the box
//! extents once; the placement only ever replaces the box's world transform.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use crate::physics::collision::{ObbError, OrientedBoundingBox, ShapeKind};

/// Translation, Euler rotation (radians) and scale of an object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// World translation
    pub translation: Vec3,
    /// Rotation about X, Y and Z in radians
    pub rotation: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Placement {
    /// Placement with only a translation
    pub fn at(translation: Vec3) -> Self {
        Self { translation, ..Default::default() }
    }

    /// Set the Euler rotation in radians
    #[must_use]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the scale
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// True if every component is finite
    pub fn is_finite(&self) -> bool {
        utils::is_finite_vec3(&self.translation)
            && utils::is_finite_vec3(&self.rotation)
            && utils::is_finite_vec3(&self.scale)
    }

    /// Model matrix `Rx * Ry * Rz * T * S`
    ///
    /// Rotation is applied after translation, so a rotated object orbits the
    /// world origin rather than spinning in place. Scenes authored against
    /// this convention depend on it.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::rotation_x(self.rotation.x)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_z(self.rotation.z)
            * Mat4::new_translation(&self.translation)
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// A shape placed in the world with its bounding box
#[derive(Debug, Clone)]
pub struct SceneObject {
    shape: ShapeKind,
    placement: Placement,
    bounds: OrientedBoundingBox,
}

impl SceneObject {
    /// Build the object's box from the shape and place it
    pub fn new(shape: ShapeKind, placement: Placement) -> Result<Self, ObbError> {
        let bounds = OrientedBoundingBox::from_shape(&shape)?
            .with_world_transform(placement.model_matrix());

        log::debug!(
            "Created {} with local bounds {:?}..{:?}",
            shape.name(),
            bounds.local_min(),
            bounds.local_max()
        );

        Ok(Self { shape, placement, bounds })
    }

    /// The object's shape
    pub fn shape(&self) -> &ShapeKind {
        &self.shape
    }

    /// Current placement
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// The object's box
    pub fn bounding_box(&self) -> &OrientedBoundingBox {
        &self.bounds
    }

    /// Replace the placement; the box transform follows wholesale
    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
        self.bounds.set_world_transform(placement.model_matrix());
    }
}
