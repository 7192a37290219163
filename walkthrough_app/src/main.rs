//! Headless walkthrough demo
//!
//! Loads a scene and an input script, walks the first-person camera through
//! it and logs every blocked step. No window is opened.
//!
//! ```text
//! walkthrough [scene.toml | scene.ron]
//! ```

mod script;

use serde::{Deserialize, Serialize};

use walk_engine::config::{Config, ConfigError};
use walk_engine::core::config::{ApplicationConfig, CameraConfig, EngineConfig, SceneConfig};
use walk_engine::foundation::logging;
use walk_engine::foundation::math::Vec3;
use walk_engine::physics::ObbError;
use walk_engine::scene::SceneError;

use script::{describe_position, ScriptStep, Walkthrough};

/// Application errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scene could not be built
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Camera body could not be built
    #[error("Camera error: {0}")]
    Camera(#[from] ObbError),

    /// Bad command line
    #[error("Usage: {0}")]
    Usage(String),
}

/// Everything the demo reads from its file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct WalkthroughConfig {
    #[serde(default)]
    engine: EngineConfig,
    #[serde(default)]
    camera: CameraConfig,
    #[serde(default)]
    scene: SceneConfig,
    #[serde(default)]
    script: Vec<ScriptStep>,
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        let application = ApplicationConfig::default();
        Self {
            engine: application.engine,
            camera: CameraConfig::at(Vec3::new(1.0, 0.0, 0.0)),
            scene: application.scene,
            script: script::default_script(),
        }
    }
}

impl Config for WalkthroughConfig {}

impl WalkthroughConfig {
    fn application(&self) -> ApplicationConfig {
        ApplicationConfig {
            engine: self.engine.clone(),
            camera: self.camera.clone(),
            scene: self.scene.clone(),
        }
    }
}

fn load_config() -> Result<WalkthroughConfig, AppError> {
    let mut args = std::env::args().skip(1);
    let path = args.next();
    if args.next().is_some() {
        return Err(AppError::Usage("walkthrough [scene.toml | scene.ron]".to_string()));
    }

    match path {
        Some(path) => Ok(WalkthroughConfig::load_from_file(&path)?),
        None => Ok(WalkthroughConfig::default()),
    }
}

fn run() -> Result<(), AppError> {
    let config = load_config()?;
    let application = config.application();

    if logging::init_with_level(application.engine.log_filter()).is_err() {
        eprintln!("Logger already initialised");
    }
    log::info!("Starting walkthrough demo");

    application.validate()?;

    let mut walk = Walkthrough::new(&application)?;
    let start = std::time::Instant::now();
    let stats = walk.run(&config.script);

    log::info!(
        "Walkthrough finished in {:.2?}: {} steps committed, {} rejected, {:.3} units walked",
        start.elapsed(),
        stats.committed,
        stats.rejected,
        stats.distance
    );
    log::info!("Final camera position {}", describe_position(walk.camera().position()));
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        log::error!("Application error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
