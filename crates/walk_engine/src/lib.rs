//! # Walk Engine
//!
//! Collision-gated first-person movement built on exact oriented-box tests.
//!
//! ## Features
//!
//! - **Oriented Boxes**: Object-space extents positioned by a world transform
//! - **Separating Axis Test**: All 15 candidate axes, with speculative translation
//! - **Movement Gate**: All-or-nothing per tick, no partial moves
//! - **Scene Storage**: Slot-map backed obstacles built from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use walk_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::default();
//!     let scene = SceneManager::from_config(&config.scene)?;
//!     let mut camera = FirstPersonCamera::from_config(&config.camera)?;
//!
//!     let decision = camera.process_keyboard(MoveDirection::Forward, 0.016, &scene);
//!     if !decision.is_committed() {
//!         println!("blocked at {:?}", camera.position());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod physics;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::math::{Vec3, Mat4, Mat4Ext},
        physics::{
            CollidableRegistry, MoveDecision, MoveDirection, MovementConstraint, MovingBody,
            OrientedBoundingBox, SeparatingAxisTest,
        },
        scene::{FirstPersonCamera, Placement, SceneManager, SceneObject},
        core::config::{ApplicationConfig, CameraConfig, SceneConfig, Config},
    };
}
