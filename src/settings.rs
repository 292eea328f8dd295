//! Engine configuration
//!
//! Plain serde data with defaults, so a scene file only has to mention what
//! it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TICK_DT;
use crate::sim::{Engine, Vector2, WorldBounds};

/// Errors reading or writing settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// World rectangle, gravity and host tick configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub world: WorldBounds,
    /// Gravity as `[x, y]`
    pub gravity: Vector2,
    /// Seconds passed to `Engine::step` per host tick
    pub tick_dt: f64,
    /// Stop after this many ticks (hosts run forever when unset)
    pub max_ticks: Option<u64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            world: WorldBounds::default(),
            gravity: Vector2::ZERO,
            tick_dt: DEFAULT_TICK_DT,
            max_ticks: None,
        }
    }
}

impl EngineSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// An empty engine configured from these settings
    pub fn build_engine(&self) -> Engine {
        Engine::new(self.world, self.gravity)
    }
}
