//! Scripted walkthrough
//!
//! Replays a fixed list of look and move inputs against a scene, one tick at
//! a time, and keeps score of what the movement gate allowed.

use serde::{Deserialize, Serialize};

use walk_engine::core::config::ApplicationConfig;
use walk_engine::foundation::math::Vec3;
use walk_engine::physics::{MoveDecision, MoveDirection};
use walk_engine::scene::{FirstPersonCamera, SceneManager};

use crate::AppError;

fn one_tick() -> u32 {
    1
}

/// One scripted input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Hold a movement key for `ticks` frames of `delta` seconds each
    Move {
        /// Key held
        direction: MoveDirection,
        /// Number of frames
        #[serde(default = "one_tick")]
        ticks: u32,
        /// Seconds per frame
        delta: f32,
    },
    /// Mouse delta applied once
    Look {
        /// Horizontal offset
        dx: f32,
        /// Vertical offset
        dy: f32,
    },
}

/// Running totals for a walkthrough
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WalkStats {
    /// Ticks whose displacement was applied
    pub committed: u32,
    /// Ticks refused by an obstacle
    pub rejected: u32,
    /// Sum of applied displacement lengths
    pub distance: f32,
}

/// Scene plus camera driven by a script
pub struct Walkthrough {
    scene: SceneManager,
    camera: FirstPersonCamera,
    constrain_pitch: bool,
    stats: WalkStats,
}

impl Walkthrough {
    /// Build the scene and camera described by `config`
    pub fn new(config: &ApplicationConfig) -> Result<Self, AppError> {
        let scene = SceneManager::from_config(&config.scene)?;
        let camera = FirstPersonCamera::from_config(&config.camera)?;

        log::info!(
            "Walkthrough ready: {} obstacles, camera at {:?}",
            scene.len(),
            camera.position()
        );

        Ok(Self {
            scene,
            camera,
            constrain_pitch: config.camera.constrain_pitch,
            stats: WalkStats::default(),
        })
    }

    /// The camera
    pub fn camera(&self) -> &FirstPersonCamera {
        &self.camera
    }

    /// Totals so far
    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// Apply one scripted step
    pub fn run_step(&mut self, step: &ScriptStep) {
        match *step {
            ScriptStep::Move { direction, ticks, delta } => {
                for _ in 0..ticks {
                    let decision = self.camera.process_keyboard(direction, delta, &self.scene);
                    self.record(direction, decision);
                }
            }
            ScriptStep::Look { dx, dy } => {
                self.camera.process_mouse_movement(dx, dy, self.constrain_pitch);
                log::debug!(
                    "Looked by ({}, {}): yaw {:.1}, pitch {:.1}",
                    dx, dy, self.camera.yaw(), self.camera.pitch()
                );
            }
        }
    }

    /// Apply every step in order and return the totals
    pub fn run(&mut self, script: &[ScriptStep]) -> WalkStats {
        for (index, step) in script.iter().enumerate() {
            log::debug!("Step {}: {:?}", index, step);
            self.run_step(step);
        }
        self.stats
    }

    fn record(&mut self, direction: MoveDirection, decision: MoveDecision) {
        match decision {
            MoveDecision::Committed { displacement } => {
                self.stats.committed += 1;
                self.stats.distance += displacement.norm();
            }
            MoveDecision::Rejected { blocked_by, .. } => {
                self.stats.rejected += 1;
                log::info!(
                    "{:?} blocked by obstacle {} at {:?}",
                    direction, blocked_by, self.camera.position()
                );
            }
        }
    }
}

/// A short stroll toward the default scene's panel
pub fn default_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep::Look { dx: 0.0, dy: 0.0 },
        ScriptStep::Move { direction: MoveDirection::Forward, ticks: 60, delta: 1.0 / 30.0 },
        ScriptStep::Move { direction: MoveDirection::Left, ticks: 15, delta: 1.0 / 30.0 },
        ScriptStep::Look { dx: 900.0, dy: 0.0 },
        ScriptStep::Move { direction: MoveDirection::Forward, ticks: 30, delta: 1.0 / 30.0 },
    ]
}

/// Final camera position as a displayable tuple
pub fn describe_position(position: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", position.x, position.y, position.z)
}
