//! Collision-gated movement
//!
//! Each tick a body proposes one displacement. The displacement is checked
//! against every obstacle with the body's box as the moving operand; a
//! single overlap rejects the whole tick and the body stays exactly where it
//! was. Otherwise the body's position and box move together by the full
//! displacement before anything else can observe them.
//!
//! There is no sliding, clipping to first contact or per-axis retry, and no
//! state survives between ticks other than the body's own position and box.

use crate::foundation::math::{utils, Vec3};
use crate::physics::collision::{OrientedBoundingBox, SeparatingAxisTest};
use crate::physics::registry::CollidableRegistry;
use serde::{Deserialize, Serialize};

/// Discrete direction selector for one movement tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    /// Along the facing direction
    Forward,
    /// Against the facing direction
    Backward,
    /// Against the right vector
    Left,
    /// Along the right vector
    Right,
}

/// Outcome of one movement tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveDecision {
    /// The full displacement was applied
    Committed {
        /// Applied world-space displacement
        displacement: Vec3,
    },
    /// Nothing was applied
    Rejected {
        /// Displacement that was refused
        displacement: Vec3,
        /// Iteration index of the first obstacle that would have overlapped
        blocked_by: usize,
    },
}

impl MoveDecision {
    /// True if the body moved (or had nothing to move)
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    /// The displacement that was proposed this tick
    pub fn displacement(&self) -> Vec3 {
        match self {
            Self::Committed { displacement } | Self::Rejected { displacement, .. } => *displacement,
        }
    }
}

/// Something with a position and a box that move as one
pub trait MovingBody {
    /// Current world position
    fn position(&self) -> Vec3;

    /// Box tested against obstacles
    fn bounding_box(&self) -> &OrientedBoundingBox;

    /// Advance position and box translation by the same amount
    fn apply_displacement(&mut self, displacement: Vec3);
}

/// Per-tick movement gate
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementConstraint;

impl MovementConstraint {
    /// `direction * speed * elapsed`, or zero if the inputs can't produce a
    /// meaningful step (negative or non-finite time, non-finite result)
    pub fn displacement(direction: Vec3, speed: f32, elapsed_seconds: f32) -> Vec3 {
        if !elapsed_seconds.is_finite() || elapsed_seconds < 0.0 {
            log::warn!("Ignoring movement with invalid elapsed time {}", elapsed_seconds);
            return Vec3::zeros();
        }

        let displacement = direction * (speed * elapsed_seconds);
        if utils::is_finite_vec3(&displacement) {
            displacement
        } else {
            log::warn!("Ignoring non-finite displacement {:?}", displacement);
            Vec3::zeros()
        }
    }

    /// Decide a displacement for `mover` without applying it
    pub fn evaluate<R>(mover: &OrientedBoundingBox, displacement: Vec3, registry: &R) -> MoveDecision
    where
        R: CollidableRegistry + ?Sized,
    {
        if displacement == Vec3::zeros() {
            return MoveDecision::Committed { displacement };
        }

        let blocked = registry
            .obstacles()
            .position(|obstacle| SeparatingAxisTest::speculative(mover, displacement, obstacle).intersects());

        match blocked {
            Some(blocked_by) => MoveDecision::Rejected { displacement, blocked_by },
            None => MoveDecision::Committed { displacement },
        }
    }

    /// Run one tick for `body`: propose, test, then commit or discard
    pub fn step<B, R>(
        body: &mut B,
        direction: Vec3,
        speed: f32,
        elapsed_seconds: f32,
        registry: &R,
    ) -> MoveDecision
    where
        B: MovingBody + ?Sized,
        R: CollidableRegistry + ?Sized,
    {
        let displacement = Self::displacement(direction, speed, elapsed_seconds);
        let decision = Self::evaluate(body.bounding_box(), displacement, registry);

        match decision {
            MoveDecision::Committed { displacement } => {
                if displacement != Vec3::zeros() {
                    body.apply_displacement(displacement);
                }
                log::debug!("Move committed by {:?} to {:?}", displacement, body.position());
            }
            MoveDecision::Rejected { blocked_by, .. } => {
                log::debug!(
                    "Move by {:?} rejected, obstacle {} in the way; staying at {:?}",
                    displacement, blocked_by, body.position()
                );
            }
        }

        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4;
    use approx::assert_relative_eq;

    struct Walker {
        position: Vec3,
        bounds: OrientedBoundingBox,
    }

    impl Walker {
        fn at(position: Vec3) -> Self {
            let bounds = OrientedBoundingBox::new(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 0.5, 0.5))
                .unwrap()
                .with_world_transform(Mat4::new_translation(&position));
            Self { position, bounds }
        }
    }

    impl MovingBody for Walker {
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

    fn wall_at(x: f32) -> OrientedBoundingBox {
        OrientedBoundingBox::new(Vec3::new(-0.5, -5.0, -5.0), Vec3::new(0.5, 5.0, 5.0))
            .unwrap()
            .with_world_transform(Mat4::new_translation(&Vec3::new(x, 0.0, 0.0)))
    }

    #[test]
    fn test_displacement_formula() {
        let d = MovementConstraint::displacement(Vec3::new(0.0, 0.0, -1.0), 2.5, 0.4);
        assert_relative_eq!(d, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_invalid_time_gives_no_step() {
        let dir = Vec3::x();
        assert_eq!(MovementConstraint::displacement(dir, 1.0, -0.1), Vec3::zeros());
        assert_eq!(MovementConstraint::displacement(dir, 1.0, f32::NAN), Vec3::zeros());
        assert_eq!(MovementConstraint::displacement(dir, f32::INFINITY, 1.0), Vec3::zeros());
    }

    #[test]
    fn test_clear_path_commits_position_and_box() {
        let mut walker = Walker::at(Vec3::zeros());
        let obstacles = vec![wall_at(10.0)];

        let decision = MovementConstraint::step(&mut walker, Vec3::x(), 2.0, 0.5, &obstacles);

        assert!(decision.is_committed());
        assert_relative_eq!(walker.position, Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(walker.bounds.world_center(), walker.position);
    }

    #[test]
    fn test_blocked_path_changes_nothing() {
        let mut walker = Walker::at(Vec3::zeros());
        let obstacles = vec![wall_at(10.0), wall_at(1.5)];
        let transform_before = *walker.bounds.world_transform();

        let decision = MovementConstraint::step(&mut walker, Vec3::x(), 1.0, 0.6, &obstacles);

        assert_eq!(
            decision,
            MoveDecision::Rejected { displacement: Vec3::new(0.6, 0.0, 0.0), blocked_by: 1 }
        );
        assert_eq!(decision.displacement(), Vec3::new(0.6, 0.0, 0.0));
        assert_eq!(walker.position, Vec3::zeros());
        assert_eq!(*walker.bounds.world_transform(), transform_before);
    }

    #[test]
    fn test_no_obstacles_always_commits() {
        let mut walker = Walker::at(Vec3::new(1.0, 2.0, 3.0));
        let obstacles: Vec<OrientedBoundingBox> = Vec::new();

        let decision = MovementConstraint::step(&mut walker, Vec3::y(), 1.0, 1.0, &obstacles);

        assert!(decision.is_committed());
        assert_relative_eq!(walker.position, Vec3::new(1.0, 3.0, 3.0));
    }

    #[test]
    fn test_zero_step_commits_without_moving() {
        let mut walker = Walker::at(Vec3::zeros());
        // Already overlapping a wall; standing still is still allowed
        let obstacles = vec![wall_at(0.5)];

        let decision = MovementConstraint::step(&mut walker, Vec3::x(), 1.0, 0.0, &obstacles);

        assert_eq!(decision, MoveDecision::Committed { displacement: Vec3::zeros() });
        assert_eq!(walker.position, Vec3::zeros());
    }
}
