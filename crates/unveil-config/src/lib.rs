//! Unveil motion configuration system
//!
//! This crate provides centralized configuration for the entrance motion
//! engine, loading settings from `unveil.toml` as an alternative to
//! environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Unveil
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MotionConfig {
    /// Honor a reduced-motion preference (entrances become instant)
    pub reduced_motion: bool,
    /// Entrance timeline settings
    pub entrance: EntranceConfig,
    /// Glitch emphasis oscillator settings
    pub glitch: GlitchConfig,
}

/// Entrance timeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EntranceConfig {
    /// Vertical rise distance in pixels for fade-in-up entrances
    pub rise_distance: f64,
    /// Default step duration in milliseconds
    pub duration_ms: f32,
    /// Default per-element stagger in milliseconds
    pub stagger_ms: f32,
    /// Viewport-entry threshold as a fraction of viewport height
    pub entry_threshold: f32,
}

/// Glitch emphasis oscillator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlitchConfig {
    /// Wall-clock period between glitch pulses in milliseconds
    pub interval_ms: f32,
    /// Duration of each glitch pulse in milliseconds
    pub window_ms: f32,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            rise_distance: 50.0,
            duration_ms: 800.0,
            stagger_ms: 200.0,
            entry_threshold: 0.8,
        }
    }
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3000.0,
            window_ms: 300.0,
        }
    }
}

impl MotionConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the unveil.toml configuration file
    ///
    /// # Returns
    /// * `Ok(MotionConfig)` - Successfully loaded configuration
    /// * `Err(String)` - Error message if loading failed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load configuration from the default location (unveil.toml in the
    /// current directory) or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file("unveil.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// This allows for temporary overrides without modifying the config file.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("UNVEIL_REDUCED_MOTION") {
            self.reduced_motion = val == "1" || val.eq_ignore_ascii_case("true");
        }

        // Entrance settings
        if let Ok(val) = std::env::var("UNVEIL_RISE_DISTANCE") {
            if let Ok(distance) = val.parse::<f64>() {
                self.entrance.rise_distance = distance;
            }
        }
        if let Ok(val) = std::env::var("UNVEIL_DURATION_MS") {
            if let Ok(duration) = val.parse::<f32>() {
                self.entrance.duration_ms = duration;
            }
        }
        if let Ok(val) = std::env::var("UNVEIL_STAGGER_MS") {
            if let Ok(stagger) = val.parse::<f32>() {
                self.entrance.stagger_ms = stagger;
            }
        }
        if let Ok(val) = std::env::var("UNVEIL_ENTRY_THRESHOLD") {
            if let Ok(threshold) = val.parse::<f32>() {
                self.entrance.entry_threshold = threshold;
            }
        }

        // Glitch settings
        if let Ok(val) = std::env::var("UNVEIL_GLITCH_INTERVAL_MS") {
            if let Ok(interval) = val.parse::<f32>() {
                self.glitch.interval_ms = interval;
            }
        }
        if let Ok(val) = std::env::var("UNVEIL_GLITCH_WINDOW_MS") {
            if let Ok(window) = val.parse::<f32>() {
                self.glitch.window_ms = window;
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// This is the recommended way to load configuration:
    /// 1. Load from unveil.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MotionConfig::default();
        assert!(!config.reduced_motion);
        assert_eq!(config.entrance.rise_distance, 50.0);
        assert_eq!(config.entrance.entry_threshold, 0.8);
        assert_eq!(config.glitch.interval_ms, 3000.0);
        assert_eq!(config.glitch.window_ms, 300.0);
    }

    #[test]
    fn test_toml_serialization() {
        let config = MotionConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: MotionConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.entrance.duration_ms, 800.0);
        assert_eq!(parsed.glitch.interval_ms, 3000.0);
    }

    #[test]
    fn test_partial_toml() {
        let parsed: MotionConfig = toml::from_str(
            r#"
            reduced_motion = true

            [glitch]
            interval_ms = 5000.0
            "#,
        )
        .unwrap();

        assert!(parsed.reduced_motion);
        assert_eq!(parsed.glitch.interval_ms, 5000.0);
        // Unspecified sections and fields fall back to defaults
        assert_eq!(parsed.glitch.window_ms, 300.0);
        assert_eq!(parsed.entrance.stagger_ms, 200.0);
    }

    #[test]
    fn test_load_or_default() {
        // Should not panic even if unveil.toml doesn't exist
        let config = MotionConfig::load_or_default();
        assert_eq!(config.entrance.duration_ms, 800.0);
    }

    #[test]
    fn test_merge_with_env() {
        // Set environment variables
        unsafe {
            std::env::set_var("UNVEIL_REDUCED_MOTION", "true");
            std::env::set_var("UNVEIL_STAGGER_MS", "150");
        }

        let mut config = MotionConfig::default();
        config.merge_with_env();

        assert!(config.reduced_motion);
        assert_eq!(config.entrance.stagger_ms, 150.0);

        // Clean up
        unsafe {
            std::env::remove_var("UNVEIL_REDUCED_MOTION");
            std::env::remove_var("UNVEIL_STAGGER_MS");
        }
    }
}
