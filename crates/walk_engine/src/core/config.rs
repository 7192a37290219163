//! # Unified Configuration System
//!
//! Typed configuration for the engine, the first-person camera and the
//! collidable scene. Everything here is plain serde data; turning it into
//! live objects (shapes, boxes, cameras) happens in the owning modules so
//! validation errors carry their proper types.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: Logging and debug behaviour
//! - **Camera Config**: Start pose and movement tuning
//! - **Scene Config**: Obstacles with their shapes and placements

use serde::{Serialize, Deserialize};

use crate::foundation::math::{utils, Vec2, Vec3};
use crate::physics::collision::{
    CircleShape, CuboidShape, QuadShape, ShapeError, ShapeKind, SphereShape, TriangleShape,
};
use crate::scene::{front_from_angles, Placement, PITCH_LIMIT};

// Loading and saving live in `crate::config`
pub use crate::config::{Config, ConfigError};

/// # Engine Configuration
///
/// Core engine behaviour shared by every subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter (`RUST_LOG` overrides it)
    pub log_level: String,
    /// Log at `debug` regardless of `log_level`
    pub debug_mode: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: false,
        }
    }

    /// Set log level
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable debug mode
    #[must_use]
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    /// Default log filter to install: `debug` in debug mode, else `log_level`
    pub fn log_filter(&self) -> &str {
        if self.debug_mode {
            "debug"
        } else {
            &self.log_level
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Default yaw in degrees (facing -Z)
pub const DEFAULT_YAW: f32 = -90.0;
/// Default pitch in degrees
pub const DEFAULT_PITCH: f32 = 0.0;
/// Default movement speed in units per second
pub const DEFAULT_SPEED: f32 = 2.5;
/// Default mouse sensitivity in degrees per input unit
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
/// Default vertical field of view in degrees
pub const DEFAULT_ZOOM: f32 = 45.0;

/// # Camera Configuration
///
/// Start pose and tuning for the first-person camera. Angles are degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Start position
    pub position: Vec3,
    /// World up direction
    pub world_up: Vec3,
    /// Heading in degrees (-90 faces -Z)
    pub yaw: f32,
    /// Elevation in degrees
    pub pitch: f32,
    /// Units per second
    pub movement_speed: f32,
    /// Degrees per mouse input unit
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees
    pub zoom: f32,
    /// Clamp pitch to avoid flipping over the poles
    pub constrain_pitch: bool,
}

impl CameraConfig {
    /// Camera at `position` with default tuning
    pub fn at(position: Vec3) -> Self {
        Self { position, ..Default::default() }
    }

    /// Set movement speed
    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.movement_speed = speed;
        self
    }

    /// Set yaw and pitch in degrees
    #[must_use]
    pub fn with_angles(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !utils::is_finite_vec3(&self.position) {
            return Err(ConfigError::Invalid("camera position must be finite".to_string()));
        }
        if !utils::is_finite_vec3(&self.world_up) || self.world_up.magnitude() == 0.0 {
            return Err(ConfigError::Invalid("camera world_up must be a finite non-zero vector".to_string()));
        }
        if !self.yaw.is_finite() || !self.pitch.is_finite() {
            return Err(ConfigError::Invalid("camera angles must be finite".to_string()));
        }
        let pitch = if self.constrain_pitch { self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT) } else { self.pitch };
        let front = front_from_angles(self.yaw, pitch);
        if front.cross(&self.world_up.normalize()).magnitude() < 1e-4 {
            return Err(ConfigError::Invalid(format!(
                "camera world_up {:?} is parallel to the initial view direction {:?}",
                self.world_up, front
            )));
        }
        if !self.movement_speed.is_finite() || self.movement_speed < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "movement speed must be finite and non-negative, got {}",
                self.movement_speed
            )));
        }
        if !self.mouse_sensitivity.is_finite() {
            return Err(ConfigError::Invalid("mouse sensitivity must be finite".to_string()));
        }
        if !(self.zoom > 0.0 && self.zoom < 180.0) {
            return Err(ConfigError::Invalid(format!("zoom must be within (0, 180) degrees, got {}", self.zoom)));
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            world_up: Vec3::new(0.0, 1.0, 0.0),
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
            constrain_pitch: true,
        }
    }
}

/// Shape parameters as written in a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeConfig {
    /// Flat triangle in z = 0
    Triangle {
        /// First vertex
        v1: Vec2,
        /// Second vertex
        v2: Vec2,
        /// Third vertex
        v3: Vec2,
    },
    /// Flat rectangle in z = 0
    Quad {
        /// Center
        center: Vec2,
        /// Width and height
        size: Vec2,
    },
    /// Flat disc in z = 0
    Circle {
        /// Center
        center: Vec2,
        /// Radius
        radius: f32,
        /// Rim samples
        steps: u32,
    },
    /// Box
    Cuboid {
        /// Center
        center: Vec3,
        /// Full size
        size: Vec3,
    },
    /// Sphere
    Sphere {
        /// Center
        center: Vec3,
        /// Radius
        radius: f32,
        /// Lattice resolution
        steps: u32,
    },
}

impl ShapeConfig {
    /// Validate the parameters and build the shape
    pub fn to_shape(&self) -> Result<ShapeKind, ShapeError> {
        Ok(match *self {
            Self::Triangle { v1, v2, v3 } => ShapeKind::Triangle(TriangleShape::new(v1, v2, v3)?),
            Self::Quad { center, size } => ShapeKind::Quad(QuadShape::new(center, size)?),
            Self::Circle { center, radius, steps } => {
                ShapeKind::Circle(CircleShape::new(center, radius, steps)?)
            }
            Self::Cuboid { center, size } => ShapeKind::Cuboid(CuboidShape::new(center, size)?),
            Self::Sphere { center, radius, steps } => {
                ShapeKind::Sphere(SphereShape::new(center, radius, steps)?)
            }
        })
    }
}

fn unit_scale() -> Vec3 {
    Vec3::new(1.0, 1.0, 1.0)
}

/// One obstacle in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectConfig {
    /// Optional label used in logs
    #[serde(default)]
    pub name: Option<String>,
    /// Shape parameters
    pub shape: ShapeConfig,
    /// World translation
    #[serde(default)]
    pub translation: Vec3,
    /// Rotation about X, Y and Z in degrees
    #[serde(default)]
    pub rotation: Vec3,
    /// Per-axis scale
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
}

impl ObjectConfig {
    /// Unrotated, unscaled object at `translation`
    pub fn new(shape: ShapeConfig, translation: Vec3) -> Self {
        Self {
            name: None,
            shape,
            translation,
            rotation: Vec3::zeros(),
            scale: unit_scale(),
        }
    }

    /// Set a label
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the rotation in degrees
    #[must_use]
    pub fn with_rotation(mut self, degrees: Vec3) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set the scale
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Placement with the rotation converted to radians
    pub fn placement(&self) -> Placement {
        Placement {
            translation: self.translation,
            rotation: self.rotation.map(utils::deg_to_rad),
            scale: self.scale,
        }
    }
}

/// # Scene Configuration
///
/// The obstacles the camera walks among.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Obstacles, in registry order
    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
}

impl SceneConfig {
    /// Scene without obstacles
    pub fn empty() -> Self {
        Self { objects: Vec::new() }
    }

    /// Append an obstacle
    #[must_use]
    pub fn with_object(mut self, object: ObjectConfig) -> Self {
        self.objects.push(object);
        self
    }

    /// Validate every object's shape and placement
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, object) in self.objects.iter().enumerate() {
            let label = object.name.clone().unwrap_or_else(|| format!("#{index}"));
            object
                .shape
                .to_shape()
                .map_err(|e| ConfigError::Invalid(format!("object {label}: {e}")))?;
            if !object.placement().is_finite() {
                return Err(ConfigError::Invalid(format!("object {label}: placement must be finite")));
            }
        }
        Ok(())
    }
}

impl Default for SceneConfig {
    /// A floor panel and a tall box, the default demo layout
    fn default() -> Self {
        Self::empty()
            .with_object(
                ObjectConfig::new(
                    ShapeConfig::Quad { center: Vec2::zeros(), size: Vec2::new(1.0, 1.0) },
                    Vec3::new(1.0, 0.0, -3.0),
                )
                .named("panel")
                .with_scale(Vec3::new(5.0, 5.0, 5.0)),
            )
            .with_object(
                ObjectConfig::new(
                    ShapeConfig::Cuboid {
                        center: Vec3::new(1.0, 1.0, 1.0),
                        size: Vec3::new(1.0, 2.0, 1.0),
                    },
                    Vec3::new(0.0, 1.0, 0.0),
                )
                .named("pillar")
                .with_scale(Vec3::new(0.2, 0.2, 0.2)),
            )
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
/// This is the main configuration structure applications should use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    #[serde(default)]
    pub engine: EngineConfig,
    /// First-person camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Collidable scene configuration
    #[serde(default)]
    pub scene: SceneConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log level cannot be empty".to_string()));
        }
        self.camera.validate()?;
        self.scene.validate()
    }
}

impl Config for ApplicationConfig {}
