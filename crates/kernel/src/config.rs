//! Simulation and window configuration, loaded from YAML.
//!
//! Every field has a default, so an empty file (or no file) gives the stock demo:
//! an 800x450 window at 60 FPS, a camera at (0, 20, 10) looking at the origin,
//! 0.5 degrees of turn and 0.1 units of travel per tick.

use crate::heading::HeadingModel;
use headway_common::{Aabb, CameraParams, Viewport};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Window the desktop app opens. The simulation itself never reads this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            title: "headway - body and turret".into(),
            target_fps: 60,
        }
    }
}

impl WindowConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

/// Everything tunable about the demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub heading_model: HeadingModel,
    /// Degrees turned per tick while a turn is held.
    pub turn_rate_deg: f32,
    /// World units travelled per tick while throttle is held.
    pub drive_speed: f32,
    /// Planar heading restored by reset. Quaternion headings reset to identity.
    pub reset_heading_deg: f32,
    /// Height of the turret pivot above the body position.
    pub turret_mount_height: f32,
    /// Bearing reported when the turret has no usable target.
    pub fallback_bearing_deg: f32,
    /// Volume the pointer ray is picked against.
    pub ground_box: Aabb,
    pub camera: CameraParams,
    pub window: WindowConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            heading_model: HeadingModel::Planar,
            turn_rate_deg: 0.5,
            drive_speed: 0.1,
            reset_heading_deg: 0.1,
            turret_mount_height: 2.5,
            fallback_bearing_deg: 0.0,
            ground_box: Aabb::ground(),
            camera: CameraParams::default(),
            window: WindowConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("turn_rate_deg", self.turn_rate_deg)?;
        positive("drive_speed", self.drive_speed)?;
        finite("reset_heading_deg", self.reset_heading_deg)?;
        finite("turret_mount_height", self.turret_mount_height)?;
        finite("fallback_bearing_deg", self.fallback_bearing_deg)?;

        if !self.ground_box.is_valid() {
            return Err(invalid(
                "ground_box",
                format!("min {} must not exceed max {}", self.ground_box.min, self.ground_box.max),
            ));
        }
        if !self.camera.is_well_formed() {
            return Err(invalid(
                "camera",
                "position, target and up must be finite, distinct and not colinear, with fovy > 0",
            ));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window", "width and height must be non-zero"));
        }
        if self.window.target_fps == 0 {
            return Err(invalid("window.target_fps", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is not finite")))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(invalid(field, format!("{value} must be greater than zero")));
    }
    Ok(())
}
