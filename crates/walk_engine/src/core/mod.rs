//! # Core Engine Module
//!
//! Shared configuration for every subsystem.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for the engine, camera and scene

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    EngineConfig,
    CameraConfig,
    SceneConfig,
    ObjectConfig,
    ShapeConfig,
    Config,
    ConfigError,
};
