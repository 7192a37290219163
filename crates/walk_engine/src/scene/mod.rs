//! Scene management system
//!
//! Holds the collidable objects a camera walks among and the camera itself.
//!
//! ## Architecture
//!
//! ```text
//! SceneConfig (data)
//!      ↓
//! SceneManager (objects + boxes)  ←  CollidableRegistry
//!      ↓
//! FirstPersonCamera (gated movement)
//! ```

mod camera;
mod scene_manager;
mod scene_object;

pub use camera::{front_from_angles, FirstPersonCamera, PITCH_LIMIT};
pub use scene_manager::{ObjectId, SceneError, SceneManager};
pub use scene_object::{Placement, SceneObject};
