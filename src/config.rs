//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`FG_SECTION__KEY`)
//!
//! Scene content itself (curve, container, source box) lives in the RON
//! template named by `scene.template`. The sections here only override it.

use figment::{Figment, providers::{Format, Toml, Env}};
use fold_physics::ParticleFlags;
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Scene template location
    #[serde(default)]
    pub scene: SceneConfig,
    /// Stepping and gravity
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Sediment overrides
    #[serde(default)]
    pub particles: ParticlesConfig,
    /// Key bindings
    #[serde(default)]
    pub input: InputConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`FG_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // FG_PHYSICS__HZ=30 -> physics.hz = 30
        figment = figment.merge(Env::prefixed("FG_").split("__"));

        Ok(figment.extract()?)
    }
}

/// Scene template configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Path of the RON scene template
    pub template: PathBuf,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("scenes/folded_geology.ron"),
        }
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Steps per second; 0 freezes the simulation
    pub hz: f32,
    /// Replaces the template gravity when set
    pub gravity: Option<[f32; 2]>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            hz: 60.0,
            gravity: None,
        }
    }
}

/// Sediment overrides, applied on top of the template
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticlesConfig {
    #[serde(default)]
    pub radius: Option<f32>,
    /// e.g. `"TENSILE | VISCOUS | COLOR_MIXING"`
    #[serde(default)]
    pub flags: Option<ParticleFlags>,
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Replaces the template's fault key when set
    pub fault_key: Option<char>,
    pub pause_key: char,
    pub single_step_key: char,
    pub restart_key: char,
    pub quit_key: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            fault_key: None,
            pause_key: 'p',
            single_step_key: 'o',
            restart_key: 'r',
            quit_key: 'q',
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log the overlay text every frame
    pub show_overlay: bool,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_overlay: false,
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
#[error("Configuration error: {0}")]
pub struct ConfigError(#[from] figment::Error);
