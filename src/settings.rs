//! Tour settings
//!
//! Actor size, walking speed and the blocking policy. Missing fields fall
//! back to defaults so a settings file only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::world::MovePolicy;

/// Tour settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Collision radius of the player avatar (pixels)
    pub actor_radius: f32,
    /// Map grid cell size (pixels)
    pub tile_size: f32,
    /// Walking speed (pixels/s)
    pub move_speed: f32,
    /// Which floor types stop the avatar
    pub policy: MovePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            actor_radius: DEFAULT_ACTOR_RADIUS,
            tile_size: TILE_SIZE,
            move_speed: DEFAULT_MOVE_SPEED,
            policy: MovePolicy::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Sizes and speed must be positive and finite
    pub fn validate(&self) -> Result<(), SettingsError> {
        let fields = [
            ("actor_radius", self.actor_radius),
            ("tile_size", self.tile_size),
            ("move_speed", self.move_speed),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or broken
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}
