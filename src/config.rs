//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority
//! (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`S4D_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use sdf4d_field::{SliceState, Vec3, FAR_DISTANCE};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Scene file configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Distance-field configuration
    #[serde(default)]
    pub field: FieldConfig,
    /// Starting slice state
    #[serde(default)]
    pub slice: SliceConfig,
    /// Probe sweep configuration
    #[serde(default)]
    pub probe: ProbeConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`S4D_*`)
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

        // Environment variables override everything
        // S4D_SCENE__PATH=scenes/other.ron -> scene.path = "scenes/other.ron"
        figment = figment.merge(Env::prefixed("S4D_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Scene file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Path to the RON scene file
    pub path: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: "scenes/demo.ron".to_string(),
        }
    }
}

/// Distance-field configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Far sentinel distance (an empty field reports this)
    pub far_distance: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            far_distance: FAR_DISTANCE,
        }
    }
}

/// Starting slice state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceConfig {
    /// Offset of the slice along the W axis
    pub w_offset: f32,
    /// Hyper-rotation in radians [xw, yw, zw]
    pub w_rotation: [f32; 3],
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            w_offset: 0.0,
            w_rotation: [0.0, 0.0, 0.0],
        }
    }
}

impl SliceConfig {
    /// Convert to the engine's slice state
    pub fn to_slice_state(&self) -> SliceState {
        SliceState::new(self.w_offset, Vec3::from(self.w_rotation))
    }
}

/// Probe sweep configuration for the demo binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Half-extent of the sampled square in the xz plane
    pub extent: f32,
    /// Samples per axis
    pub resolution: u32,
    /// Height (y) of the sampled cross-section
    pub height: f32,
    /// Distances within this of zero count as surface hits
    pub surface_epsilon: f32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            extent: 4.0,
            resolution: 48,
            height: 0.0,
            surface_epsilon: 0.05,
        }
    }
}
