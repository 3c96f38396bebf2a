use crate::error::{ensure_non_negative, ensure_positive, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub evader: EvaderConfig,
    #[serde(default)]
    pub agents: AgentsConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the sampling square is centred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingAnchor {
    /// World origin
    Origin,
    /// The evader's current position
    Evader,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaderConfig {
    /// Half-width of the sampling square
    #[serde(default = "default_vision_range")]
    pub vision_range: f32,
    /// Minimum distance between two candidates
    #[serde(default = "default_min_spacing")]
    pub min_spacing: f32,
    /// Resample episodes allowed per resample window
    #[serde(default = "default_sample_count_max")]
    pub sample_count_max: u32,
    /// Unseen idle time before the evader stops
    #[serde(default = "default_stop_debounce_seconds")]
    pub stop_debounce_seconds: f32,
    #[serde(default = "default_resample_window_seconds")]
    pub resample_window_seconds: f32,
    /// Cap on candidates per episode (0 = unlimited)
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    /// Height candidates are lifted to for ray queries
    #[serde(default)]
    pub probe_height: f32,
    #[serde(default = "default_sampling_anchor")]
    pub sampling_anchor: SamplingAnchor,
    /// Reserved for rate limiting; not read by the evader
    #[serde(default)]
    pub tick_rate: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentsConfig {
    #[serde(default = "default_evader_speed")]
    pub evader_speed: f32,
    #[serde(default = "default_pursuer_speed")]
    pub pursuer_speed: f32,
    #[serde(default = "default_acceleration")]
    pub acceleration: f32,
    #[serde(default = "default_evader_stopping_distance")]
    pub evader_stopping_distance: f32,
    #[serde(default = "default_pursuer_stopping_distance")]
    pub pursuer_stopping_distance: f32,
    #[serde(default = "default_body_radius")]
    pub body_radius: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_pixels_per_unit")]
    pub pixels_per_unit: f32,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_show_gizmos")]
    pub show_gizmos: bool,
    #[serde(default = "default_max_drawn_points")]
    pub max_drawn_points: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SceneConfig {
    /// JSON scene layout; the built-in courtyard is used when unset
    #[serde(default)]
    pub layout_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

// Default values
fn default_vision_range() -> f32 { 10.0 }
fn default_min_spacing() -> f32 { 1.0 }
fn default_sample_count_max() -> u32 { 50 }
fn default_stop_debounce_seconds() -> f32 { 2.0 }
fn default_resample_window_seconds() -> f32 { 1.0 }
fn default_max_candidates() -> usize { 400 }
fn default_sampling_anchor() -> SamplingAnchor { SamplingAnchor::Origin }
fn default_evader_speed() -> f32 { 6.0 }
fn default_pursuer_speed() -> f32 { 3.5 }
fn default_acceleration() -> f32 { 8.0 }
fn default_evader_stopping_distance() -> f32 { 0.1 }
fn default_pursuer_stopping_distance() -> f32 { 1.0 }
fn default_body_radius() -> f32 { 0.5 }
fn default_window_title() -> String { "Avoider - Hide From Pursuer".to_string() }
fn default_pixels_per_unit() -> f32 { 24.0 }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_show_gizmos() -> bool { true }
fn default_max_drawn_points() -> usize { 50 }
fn default_log_level() -> String { "info".to_string() }
fn default_snapshot_path() -> String { "evader_snapshot.json".to_string() }

impl Default for EvaderConfig {
    fn default() -> Self {
        Self {
            vision_range: default_vision_range(),
            min_spacing: default_min_spacing(),
            sample_count_max: default_sample_count_max(),
            stop_debounce_seconds: default_stop_debounce_seconds(),
            resample_window_seconds: default_resample_window_seconds(),
            max_candidates: default_max_candidates(),
            probe_height: 0.0,
            sampling_anchor: default_sampling_anchor(),
            tick_rate: 0.0,
        }
    }
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            evader_speed: default_evader_speed(),
            pursuer_speed: default_pursuer_speed(),
            acceleration: default_acceleration(),
            evader_stopping_distance: default_evader_stopping_distance(),
            pursuer_stopping_distance: default_pursuer_stopping_distance(),
            body_radius: default_body_radius(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            pixels_per_unit: default_pixels_per_unit(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            show_gizmos: default_show_gizmos(),
            max_drawn_points: default_max_drawn_points(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            snapshot_path: default_snapshot_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            evader: EvaderConfig::default(),
            agents: AgentsConfig::default(),
            visual: VisualConfig::default(),
            scene: SceneConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl EvaderConfig {
    /// Reject values that leave sampling or the debounce undefined
    pub fn validate(&self) -> Result<()> {
        ensure_positive("vision_range", self.vision_range)?;
        ensure_positive("min_spacing", self.min_spacing)?;
        ensure_non_negative("stop_debounce_seconds", self.stop_debounce_seconds)?;
        ensure_non_negative("resample_window_seconds", self.resample_window_seconds)?;
        ensure_non_negative("tick_rate", self.tick_rate)?;
        Ok(())
    }

    pub fn candidate_cap(&self) -> Option<usize> {
        (self.max_candidates > 0).then_some(self.max_candidates)
    }
}

impl AgentsConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("evader_speed", self.evader_speed)?;
        ensure_non_negative("pursuer_speed", self.pursuer_speed)?;
        ensure_non_negative("acceleration", self.acceleration)?;
        ensure_non_negative("evader_stopping_distance", self.evader_stopping_distance)?;
        ensure_non_negative("pursuer_stopping_distance", self.pursuer_stopping_distance)?;
        ensure_positive("body_radius", self.body_radius)?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Self {
        match fs::read_to_string("config.toml") {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded configuration from config.toml");
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config.toml: {}", e);
                    warn!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                info!("No config.toml found, using default configuration");
                Config::default()
            }
        }
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.evader.validate()?;
        self.agents.validate()?;
        ensure_positive("pixels_per_unit", self.visual.pixels_per_unit)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AvoiderError;
    use crate::evader::Evader;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.evader.stop_debounce_seconds, 2.0);
        assert_eq!(config.evader.sampling_anchor, SamplingAnchor::Origin);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [evader]
            vision_range = 6.5
            sampling_anchor = "evader"

            [agents]
            evader_speed = 9.0
            "#,
        )
        .unwrap();
        assert_eq!(config.evader.vision_range, 6.5);
        assert_eq!(config.evader.min_spacing, 1.0);
        assert_eq!(config.evader.sampling_anchor, SamplingAnchor::Evader);
        assert_eq!(config.agents.evader_speed, 9.0);
        assert_eq!(config.agents.pursuer_speed, 3.5);
    }

    #[test]
    fn test_negative_range_is_rejected() {
        let config = Config::from_toml_str("[evader]\nvision_range = -1.0\n").unwrap();
        match config.validate() {
            Err(AvoiderError::NonPositive { field, .. }) => assert_eq!(field, "vision_range"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_infinite_range_is_rejected() {
        let config = Config::from_toml_str("[evader]\nvision_range = inf\n").unwrap();
        assert!(config.evader.vision_range.is_infinite());
        assert!(matches!(
            config.validate(),
            Err(AvoiderError::NonPositive { field: "vision_range", .. })
        ));
        assert!(Evader::new(config.evader).is_err());
    }

    #[test]
    fn test_zero_spacing_is_rejected() {
        let evader = EvaderConfig {
            min_spacing: 0.0,
            ..EvaderConfig::default()
        };
        assert!(evader.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(matches!(
            Config::from_toml_str("[evader\nvision_range = 1"),
            Err(AvoiderError::Toml(_))
        ));
    }

    #[test]
    fn test_candidate_cap() {
        let mut evader = EvaderConfig::default();
        assert_eq!(evader.candidate_cap(), Some(400));
        evader.max_candidates = 0;
        assert_eq!(evader.candidate_cap(), None);
    }
}
