//! Scene Manager - owner of every collidable object
//!
//! Objects live in a slot map so handles stay valid across removals. The
//! manager is also the obstacle registry handed to movement checks: while a
//! check borrows it, no object can be added, removed or re-placed.

use slotmap::{new_key_type, SlotMap};

use crate::core::config::SceneConfig;
use crate::physics::collision::{ObbError, OrientedBoundingBox, ShapeError, ShapeKind};
use crate::physics::registry::CollidableRegistry;
use crate::scene::scene_object::{Placement, SceneObject};

new_key_type! {
    /// Stable handle to an object in a [`SceneManager`]
    pub struct ObjectId;
}

/// Errors raised while building or editing a scene
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Shape parameters were rejected
    #[error("Invalid shape: {0}")]
    Shape(#[from] ShapeError),

    /// The object's box could not be built
    #[error("Invalid bounding box: {0}")]
    Bounds(#[from] ObbError),

    /// Placement had a NaN or infinite component
    #[error("Placement must be finite: {0:?}")]
    InvalidPlacement(Placement),

    /// Handle does not refer to a live object
    #[error("Unknown object {0:?}")]
    UnknownObject(ObjectId),
}

/// Collidable scene storage
#[derive(Debug, Default)]
pub struct SceneManager {
    objects: SlotMap<ObjectId, SceneObject>,
}

impl SceneManager {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every object described by `config`, in order
    pub fn from_config(config: &SceneConfig) -> Result<Self, SceneError> {
        let mut scene = Self::new();
        for object in &config.objects {
            let shape = object.shape.to_shape()?;
            let id = scene.insert(shape, object.placement())?;
            log::debug!(
                "Scene object {} ({}) -> {:?}",
                object.name.as_deref().unwrap_or("<unnamed>"),
                shape.name(),
                id
            );
        }
        log::info!("Scene built with {} objects", scene.len());
        Ok(scene)
    }

    /// Add an object and return its handle
    pub fn insert(&mut self, shape: ShapeKind, placement: Placement) -> Result<ObjectId, SceneError> {
        if !placement.is_finite() {
            return Err(SceneError::InvalidPlacement(placement));
        }
        let object = SceneObject::new(shape, placement)?;
        Ok(self.objects.insert(object))
    }

    /// Remove an object, returning it if it was live
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        self.objects.remove(id)
    }

    /// Look up an object
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    /// Move an object; its box transform is replaced wholesale
    pub fn set_placement(&mut self, id: ObjectId, placement: Placement) -> Result<(), SceneError> {
        if !placement.is_finite() {
            return Err(SceneError::InvalidPlacement(placement));
        }
        let object = self.objects.get_mut(id).ok_or(SceneError::UnknownObject(id))?;
        object.set_placement(placement);
        Ok(())
    }

    /// Iterate live objects with their handles
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter()
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if the scene has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl CollidableRegistry for SceneManager {
    type Iter<'a> = std::iter::Map<
        slotmap::basic::Values<'a, ObjectId, SceneObject>,
        fn(&SceneObject) -> &OrientedBoundingBox,
    >
    where
        Self: 'a;

    fn obstacles(&self) -> Self::Iter<'_> {
        let bounds: fn(&SceneObject) -> &OrientedBoundingBox = SceneObject::bounding_box;
        self.objects.values().map(bounds)
    }

    fn obstacle_count(&self) -> usize {
        self.objects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ObjectConfig, ShapeConfig};
    use crate::foundation::math::{Vec2, Vec3};
    use crate::physics::collision::CuboidShape;
    use approx::assert_relative_eq;

    fn cube() -> ShapeKind {
        ShapeKind::Cuboid(CuboidShape::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)).unwrap())
    }

    #[test]
    fn test_default_config_builds() {
        let scene = SceneManager::from_config(&SceneConfig::default()).unwrap();

        assert_eq!(scene.len(), 2);
        assert_eq!(scene.obstacle_count(), 2);
        assert_eq!(scene.obstacles().count(), 2);
    }

    #[test]
    fn test_invalid_shape_in_config() {
        let config = SceneConfig::empty().with_object(ObjectConfig::new(
            ShapeConfig::Quad { center: Vec2::zeros(), size: Vec2::new(0.0, 1.0) },
            Vec3::zeros(),
        ));

        assert!(matches!(SceneManager::from_config(&config), Err(SceneError::Shape(_))));
    }

    #[test]
    fn test_insert_rejects_non_finite_placement() {
        let mut scene = SceneManager::new();
        let result = scene.insert(cube(), Placement::at(Vec3::new(f32::NAN, 0.0, 0.0)));

        assert!(matches!(result, Err(SceneError::InvalidPlacement(_))));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_remove_keeps_other_handles() {
        let mut scene = SceneManager::new();
        let a = scene.insert(cube(), Placement::at(Vec3::new(1.0, 0.0, 0.0))).unwrap();
        let b = scene.insert(cube(), Placement::at(Vec3::new(2.0, 0.0, 0.0))).unwrap();

        assert!(scene.remove(a).is_some());
        assert!(scene.get(a).is_none());
        assert!(scene.remove(a).is_none());

        let remaining = scene.get(b).unwrap();
        assert_relative_eq!(remaining.bounding_box().world_center(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(scene.obstacle_count(), 1);
    }

    #[test]
    fn test_set_placement_moves_obstacle() {
        let mut scene = SceneManager::new();
        let id = scene.insert(cube(), Placement::default()).unwrap();

        scene.set_placement(id, Placement::at(Vec3::new(0.0, 0.0, -4.0))).unwrap();

        let center = scene.obstacles().next().unwrap().world_center();
        assert_relative_eq!(center, Vec3::new(0.0, 0.0, -4.0));

        scene.remove(id);
        assert!(matches!(
            scene.set_placement(id, Placement::default()),
            Err(SceneError::UnknownObject(_))
        ));
    }
}
