//! Session settings
//!
//! Read once when a session starts. Audio toggles are passed through to the
//! presentation layer; the simulation never reads them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which wave schedule the session plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Endless waves, starting loadout with armor
    #[default]
    Survival,
    /// Twenty training waves with a large health pool and budget
    Bootcamp,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Survival => "Survival",
            GameMode::Bootcamp => "Bootcamp",
        }
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "survival" => Ok(GameMode::Survival),
            "bootcamp" | "tutorial" => Ok(GameMode::Bootcamp),
            _ => Err(format!("unknown game mode '{s}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for the session
    pub seed: u64,
    pub mode: GameMode,

    // === Terrain ===
    /// Passable trees scattered in survival
    pub tree_count: u32,
    /// Solid rocks scattered in survival
    pub rock_count: u32,

    // === Audio ===
    pub music: bool,
    pub sound_fx: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            mode: GameMode::Survival,

            tree_count: 99,
            rock_count: 99,

            music: true,
            sound_fx: true,
        }
    }
}

impl Settings {
    /// Default settings for a given mode and seed
    pub fn for_mode(mode: GameMode, seed: u64) -> Self {
        Self {
            seed,
            mode,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings from {}: {e}", path.display());
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write settings as JSON
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip_keeps_mode() {
        let settings = Settings::for_mode(GameMode::Bootcamp, 42);
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 9, "rock_count": 3 }"#).unwrap();
        assert_eq!(settings.seed, 9);
        assert_eq!(settings.rock_count, 3);
        assert_eq!(settings.tree_count, 99);
        assert_eq!(settings.mode, GameMode::Survival);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ seed: ").is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::load("/nonexistent/frontline-settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Tutorial".parse::<GameMode>(), Ok(GameMode::Bootcamp));
        assert_eq!("survival".parse::<GameMode>(), Ok(GameMode::Survival));
        assert!("campaign".parse::<GameMode>().is_err());
        for mode in [GameMode::Survival, GameMode::Bootcamp] {
            assert_eq!(mode.as_str().parse::<GameMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("frontline-settings-{}.json", std::process::id()));
        let settings = Settings {
            rock_count: 4,
            music: false,
            ..Settings::for_mode(GameMode::Bootcamp, 77)
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }
}
