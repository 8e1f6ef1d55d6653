//! Engine configuration.
//!
//! Host values (tick rate, catalog location, log filter, demo frame budget)
//! plus the gameplay tunables. Loaded from and saved to `tinker.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tinker_gameplay::GameplaySettings;
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "tinker.toml";

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Host ===
    /// Fixed update rate in ticks per second
    pub tick_rate: u32,
    /// Item catalog file
    pub catalog_path: PathBuf,
    /// Default tracing filter directive (RUST_LOG still wins)
    pub log_filter: String,
    /// Frames the headless demo may spend waiting on a craft
    pub demo_frame_budget: u32,
    /// Seed for craft rolls (None = random)
    pub seed: Option<u64>,

    // === Gameplay ===
    /// Gameplay tunables
    pub gameplay: GameplaySettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            catalog_path: PathBuf::from("assets/items.toml"),
            log_filter: "tinker=info".to_string(),
            demo_frame_budget: 600,
            seed: None,
            gameplay: GameplaySettings::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the working directory.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        let mut config = match fs::File::open(path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    warn!("Failed to read config file: {e}");
                    return Self::default();
                }

                match toml::from_str::<Self>(&contents) {
                    Ok(config) => {
                        info!("Loaded config from {}", path.display());
                        config
                    },
                    Err(e) => {
                        warn!("Failed to parse config file: {e}");
                        return Self::default();
                    },
                }
            },
            Err(e) => {
                warn!("Failed to open config file: {e}");
                return Self::default();
            },
        };
        config.validate();
        config
    }

    /// Save configuration to the working directory.
    pub fn save(&self) -> io::Result<()> {
        self.save_to(CONFIG_FILE)
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        self.tick_rate = self.tick_rate.clamp(1, 1000);
        self.demo_frame_budget = self.demo_frame_budget.max(1);
        if self.log_filter.trim().is_empty() {
            self.log_filter = Self::default().log_filter;
        }
        self.gameplay.sanitize();
    }

    /// Seconds per fixed update.
    #[must_use]
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Tracing filter directives: a non-empty `env` value (from `RUST_LOG`)
    /// replaces `log_filter` entirely.
    #[must_use]
    pub fn log_directives<'a>(&'a self, env: Option<&'a str>) -> &'a str {
        match env {
            Some(directives) if !directives.trim().is_empty() => directives,
            _ => self.log_filter.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.log_filter, "tinker=info");
        assert_eq!(config.gameplay.inventory_size, 24);
    }

    #[test]
    fn test_env_directives_win_over_config() {
        let config = EngineConfig::default();
        assert_eq!(config.log_directives(None), "tinker=info");
        assert_eq!(config.log_directives(Some("  ")), "tinker=info");
        assert_eq!(
            config.log_directives(Some("tinker=trace")),
            "tinker=trace"
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = EngineConfig::default();
        config.tick_rate = 0;
        config.log_filter = "  ".to_string();
        config.gameplay.volumes.craft = 3.0;

        config.validate();

        assert_eq!(config.tick_rate, 1);
        assert_eq!(config.log_filter, "tinker=info");
        assert!((config.gameplay.volumes.craft - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join(CONFIG_FILE);

        let mut config = EngineConfig::default();
        config.tick_rate = 30;
        config.seed = Some(12345);
        config.gameplay.inventory_size = 8;
        config.gameplay.craft.settle_seconds = 0.5;

        config.save_to(&config_path).expect("Failed to save config");

        let loaded = EngineConfig::load_from(&config_path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "tick_rate = 120\n[gameplay]\ninventory_size = 4\n")
            .expect("Failed to write config");

        let loaded = EngineConfig::load_from(&config_path);
        assert_eq!(loaded.tick_rate, 120);
        assert_eq!(loaded.gameplay.inventory_size, 4);
        assert!((loaded.gameplay.craft.settle_seconds - 2.0).abs() < f32::EPSILON);
        assert_eq!(loaded.catalog_path, PathBuf::from("assets/items.toml"));
    }

    #[test]
    fn test_config_load_missing_or_invalid_file() {
        let config = EngineConfig::load_from("/nonexistent/path/tinker.toml");
        assert_eq!(config, EngineConfig::default());

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "tick_rate = \"fast\"").expect("Failed to write config");
        assert_eq!(EngineConfig::load_from(&config_path), EngineConfig::default());
    }
}
