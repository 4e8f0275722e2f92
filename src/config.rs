//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SPATIUM_SECTION__KEY`)

use figment::{Figment, providers::{Env, Format, Serialized, Toml}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Camera placement and projection
    #[serde(default)]
    pub camera: CameraConfig,
    /// Grid of probe spheres to classify
    #[serde(default)]
    pub probes: ProbeConfig,
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
    /// 3. Environment variables (`SPATIUM_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        // Built-in defaults fill any key the files leave out
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // SPATIUM_CAMERA__FOVY=75 -> camera.fovy = 75
        figment = figment.merge(Env::prefixed("SPATIUM_").split("__"));

        let config: Self = figment.extract().map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot describe a camera frustum
    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(ConfigError::invalid(format!(
                "camera clip planes must satisfy 0 < near < far (near = {}, far = {})",
                camera.near, camera.far
            )));
        }
        if !(camera.fovy > 0.0 && camera.fovy < 180.0) {
            return Err(ConfigError::invalid(format!(
                "camera.fovy must be between 0 and 180 degrees, got {}",
                camera.fovy
            )));
        }
        if !(camera.aspect > 0.0) {
            return Err(ConfigError::invalid(format!(
                "camera.aspect must be positive, got {}",
                camera.aspect
            )));
        }
        if !(self.probes.spacing > 0.0 && self.probes.radius >= 0.0) {
            return Err(ConfigError::invalid(format!(
                "probe spacing must be positive and radius non-negative (spacing = {}, radius = {})",
                self.probes.spacing, self.probes.radius
            )));
        }
        Ok(())
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Eye position [x, y, z]
    pub position: [f64; 3],
    /// Heading about +Y in degrees
    pub azimuth: f64,
    /// Pitch about +X in degrees
    pub elevation: f64,
    /// Roll about +Z in degrees
    pub bank: f64,
    /// Vertical field of view in degrees
    pub fovy: f64,
    /// Width / height
    pub aspect: f64,
    /// Near clipping plane
    pub near: f64,
    /// Far clipping plane
    pub far: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 5.0],
            azimuth: 0.0,
            elevation: 0.0,
            bank: 0.0,
            fovy: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Probe grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Probes per axis; the grid holds `grid_size^3` spheres
    pub grid_size: u32,
    /// Distance between neighbouring probes
    pub spacing: f64,
    /// Probe sphere radius
    pub radius: f64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            grid_size: 9,
            spacing: 2.5,
            radius: 0.5,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log the classification of every probe
    pub log_probes: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_probes: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: String) -> Self {
        ConfigError { message }
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.camera.fovy, 60.0);
        assert_eq!(config.probes.grid_size, 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("fovy"));
        assert!(toml.contains("grid_size"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("[camera]\nposition = [1.0, 2.0, 3.0]\nazimuth = 0.0\nelevation = 0.0\nbank = 0.0\nfovy = 90.0\naspect = 1.0\nnear = 1.0\nfar = 10.0\n").unwrap();
        assert_eq!(config.camera.fovy, 90.0);
        assert_eq!(config.probes.grid_size, 9);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_validate_rejects_bad_clip_planes() {
        let mut config = AppConfig::default();
        config.camera.near = 10.0;
        config.camera.far = 1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
        assert!(err.to_string().contains("near"));
    }

    #[test]
    fn test_validate_rejects_bad_fov() {
        let mut config = AppConfig::default();
        config.camera.fovy = 180.0;
        assert!(config.validate().is_err());
        config.camera.fovy = f64::NAN;
        assert!(config.validate().is_err());
    }
}
