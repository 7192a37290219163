//! Physics module for collision detection and movement gating
//!
//! Provides exact oriented-box overlap tests and the per-tick movement
//! constraint built on them.

pub mod collision;
pub mod movement;
pub mod registry;

#[cfg(test)]
mod tests;

pub use collision::{
    OrientedBoundingBox,
    ObbError,
    SeparatingAxisTest,
    Operand,
    LocalBounds,
    ShapeKind,
};
pub use movement::{MovementConstraint, MoveDecision, MoveDirection, MovingBody};
pub use registry::CollidableRegistry;
