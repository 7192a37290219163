//! Obstacle registry seam
//!
//! Whoever owns the scene hands the movement step a read-only view of every
//! obstacle box. The borrow taken by [`CollidableRegistry::obstacles`] keeps
//! the set from being mutated while a movement check walks it.

use crate::physics::collision::OrientedBoundingBox;

/// Enumerable set of obstacle boxes, each carrying its current world transform
pub trait CollidableRegistry {
    /// Iterator over the obstacles
    type Iter<'a>: Iterator<Item = &'a OrientedBoundingBox>
    where
        Self: 'a;

    /// Iterate every active obstacle
    fn obstacles(&self) -> Self::Iter<'_>;

    /// Number of active obstacles
    fn obstacle_count(&self) -> usize {
        self.obstacles().count()
    }
}

impl CollidableRegistry for [OrientedBoundingBox] {
    type Iter<'a> = std::slice::Iter<'a, OrientedBoundingBox>
    where
        Self: 'a;

    fn obstacles(&self) -> Self::Iter<'_> {
        self.iter()
    }

    fn obstacle_count(&self) -> usize {
        self.len()
    }
}

impl CollidableRegistry for Vec<OrientedBoundingBox> {
    type Iter<'a> = std::slice::Iter<'a, OrientedBoundingBox>
    where
        Self: 'a;

    fn obstacles(&self) -> Self::Iter<'_> {
        self.iter()
    }

    fn obstacle_count(&self) -> usize {
        self.len()
    }
}
