//! Oriented-box collision detection
//!
//! Every collidable is a single convex box. Boxes are stored with
//! object-space extents and positioned by a world transform; the separating
//! axis test reads both transforms at query time.
//!
//! # Module Organization
//!
//! - [`shape`] - Shape descriptors that produce object-space corners
//! - [`obb`] - The oriented bounding box itself
//! - [`sat`] - Separating axis test with speculative translation
//!
//! # Key Types
//!
//! - [`OrientedBoundingBox`] - Extents plus world transform
//! - [`SeparatingAxisTest`] - Overlap query between two boxes
//! - [`LocalBounds`] - Anything that can report its min/max corners

pub mod shape;
pub mod obb;
pub mod sat;

pub use shape::{
    Bounds, LocalBounds, ShapeError, ShapeKind,
    TriangleShape, QuadShape, CircleShape, CuboidShape, SphereShape,
};
pub use obb::{OrientedBoundingBox, ObbError, BOX_EDGES, DEGENERATE_EXTENT};
pub use sat::{
    intersects_after, AxisKind, BodyRole, CandidateAxes, Operand, SeparatingAxis,
    SeparatingAxisTest, AXIS_LENGTH_EPSILON,
};
