//! Separating Axis Theorem test for oriented boxes
//!
//! Two convex boxes are disjoint iff some axis exists onto which their
//! shadows do not overlap. For boxes there are 15 candidates:
//! - 3 face normals of A
//! - 3 face normals of B
//! - 9 cross products of an A axis with a B axis (edge-edge cases)
//!
//! A cross product of near-parallel axes is too short to normalise and is
//! dropped; the face normals already cover that configuration.
//!
//! Each operand carries a [`BodyRole`]. A mover is tested as if its pending
//! translation were already applied, so a movement step can ask "would this
//! move overlap?" without touching the box.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use super::obb::OrientedBoundingBox;

/// Candidate axes shorter than this are skipped
pub const AXIS_LENGTH_EPSILON: f32 = 1e-4;

/// Maximum number of candidate axes for a box pair
pub const MAX_CANDIDATE_AXES: usize = 15;

/// Which feature pair a candidate axis came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    /// Face normal `i` of operand A
    FaceA(usize),
    /// Face normal `j` of operand B
    FaceB(usize),
    /// Cross product of A's axis `a` with B's axis `b`
    Edge {
        /// Axis index on A
        a: usize,
        /// Axis index on B
        b: usize,
    },
}

impl AxisKind {
    /// True for the nine edge-edge axes
    pub fn is_edge(&self) -> bool {
        matches!(self, Self::Edge { .. })
    }
}

/// How an operand participates in a test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyRole {
    /// Tested as if already moved by `translation`
    Mover {
        /// Pending world-space translation
        translation: Vec3,
    },
    /// Tested where it currently is
    Static,
}

/// One side of a separating axis test
#[derive(Debug, Clone, Copy)]
pub struct Operand<'a> {
    obb: &'a OrientedBoundingBox,
    role: BodyRole,
}

impl<'a> Operand<'a> {
    /// Box tested at its pending position
    pub fn mover(obb: &'a OrientedBoundingBox, translation: Vec3) -> Self {
        Self { obb, role: BodyRole::Mover { translation } }
    }

    /// Box tested at its current position
    pub fn fixed(obb: &'a OrientedBoundingBox) -> Self {
        Self { obb, role: BodyRole::Static }
    }

    /// Role of this operand
    pub fn role(&self) -> BodyRole {
        self.role
    }

    /// The transform this operand is tested under
    pub fn effective_transform(&self) -> Mat4 {
        match self.role {
            BodyRole::Mover { translation } => {
                Mat4::new_translation(&translation) * self.obb.world_transform()
            }
            BodyRole::Static => *self.obb.world_transform(),
        }
    }
}

/// Fixed-capacity set of normalised candidate axes
///
/// Lives on the stack; building one never allocates.
#[derive(Debug, Clone)]
pub struct CandidateAxes {
    axes: [Vec3; MAX_CANDIDATE_AXES],
    kinds: [AxisKind; MAX_CANDIDATE_AXES],
    len: usize,
}

impl CandidateAxes {
    /// Collect the informative axes for boxes placed by `a` and `b`
    pub fn build(a: &Mat4, b: &Mat4) -> Self {
        let mut set = Self {
            axes: [Vec3::zeros(); MAX_CANDIDATE_AXES],
            kinds: [AxisKind::FaceA(0); MAX_CANDIDATE_AXES],
            len: 0,
        };

        let axes_a = [a.linear_column(0), a.linear_column(1), a.linear_column(2)];
        let axes_b = [b.linear_column(0), b.linear_column(1), b.linear_column(2)];

        for (i, axis) in axes_a.iter().enumerate() {
            set.push(AxisKind::FaceA(i), *axis);
        }
        for (j, axis) in axes_b.iter().enumerate() {
            set.push(AxisKind::FaceB(j), *axis);
        }
        for (i, axis_a) in axes_a.iter().enumerate() {
            for (j, axis_b) in axes_b.iter().enumerate() {
                set.push(AxisKind::Edge { a: i, b: j }, axis_a.cross(axis_b));
            }
        }

        set
    }

    fn push(&mut self, kind: AxisKind, raw: Vec3) {
        let length = raw.magnitude();
        // NaN lengths fail this comparison too
        if !(length >= AXIS_LENGTH_EPSILON) {
            return;
        }
        self.axes[self.len] = raw / length;
        self.kinds[self.len] = kind;
        self.len += 1;
    }

    /// Number of retained axes
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if every candidate was degenerate
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Retained axes in test order: faces of A, faces of B, then edges
    pub fn iter(&self) -> impl Iterator<Item = (AxisKind, Vec3)> + '_ {
        self.kinds[..self.len]
            .iter()
            .copied()
            .zip(self.axes[..self.len].iter().copied())
    }
}

/// Witness that two boxes do not overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparatingAxis {
    /// Feature pair the axis came from
    pub kind: AxisKind,
    /// Unit-length axis
    pub axis: Vec3,
    /// Distance between the box centers along the axis
    pub center_distance: f32,
    /// Sum of both shadow half-widths along the axis
    pub radius_sum: f32,
}

impl SeparatingAxis {
    /// Free space between the two shadows (zero when just touching)
    pub fn gap(&self) -> f32 {
        self.center_distance - self.radius_sum
    }
}

/// Overlap test between two boxes, each with its own role
#[derive(Debug, Clone, Copy)]
pub struct SeparatingAxisTest<'a> {
    a: Operand<'a>,
    b: Operand<'a>,
}

impl<'a> SeparatingAxisTest<'a> {
    /// Create a test between two operands
    pub fn new(a: Operand<'a>, b: Operand<'a>) -> Self {
        Self { a, b }
    }

    /// Would `mover`, shifted by `translation`, overlap the unmoved `obstacle`?
    pub fn speculative(
        mover: &'a OrientedBoundingBox,
        translation: Vec3,
        obstacle: &'a OrientedBoundingBox,
    ) -> Self {
        Self::new(Operand::mover(mover, translation), Operand::fixed(obstacle))
    }

    /// First axis that proves the boxes disjoint, or `None` if they overlap
    ///
    /// Shadows that exactly touch count as separated: a box may come to rest
    /// flush against another. Two zero-width shadows at the same spot still
    /// overlap.
    pub fn find_separating_axis(&self) -> Option<SeparatingAxis> {
        let transform_a = self.a.effective_transform();
        let transform_b = self.b.effective_transform();

        let center_a = self.a.obb.center_under(&transform_a);
        let center_b = self.b.obb.center_under(&transform_b);
        let offset = center_a - center_b;

        let candidates = CandidateAxes::build(&transform_a, &transform_b);

        for (kind, axis) in candidates.iter() {
            let r1 = self.a.obb.project_half_width(&transform_a, &axis);
            let r2 = self.b.obb.project_half_width(&transform_b, &axis);
            let center_distance = offset.dot(&axis).abs();
            let radius_sum = r1 + r2;

            let touching = center_distance == radius_sum && radius_sum > 0.0;
            if center_distance > radius_sum || touching {
                log::trace!(
                    "Separated on {:?} {:?}: distance {:.5} >= radii {:.5}",
                    kind, axis, center_distance, radius_sum
                );
                return Some(SeparatingAxis { kind, axis, center_distance, radius_sum });
            }
        }

        None
    }

    /// True if no candidate axis separates the boxes
    pub fn intersects(&self) -> bool {
        self.find_separating_axis().is_none()
    }
}

/// Would `mover` overlap `obstacle` after moving by `translation`?
pub fn intersects_after(
    mover: &OrientedBoundingBox,
    obstacle: &OrientedBoundingBox,
    translation: Vec3,
) -> bool {
    SeparatingAxisTest::speculative(mover, translation, obstacle).intersects()
}
