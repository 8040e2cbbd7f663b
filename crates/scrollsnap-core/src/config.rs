use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::snap::SnapConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub snap: SnapSettings,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Easing curve used by the snap animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Constant speed
    Linear,
    /// Ease-out quadratic: -c·(t/d)·(t/d − 2) + b
    #[default]
    Quadratic,
    /// Ease-out cubic
    Cubic,
    /// Ease-out quintic
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

/// How wheel input is turned into navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelMode {
    /// Let native scrolling run, then snap to the most visible section once
    /// the wheel has been quiet for the scroll debounce window
    #[default]
    Settle,
    /// Every wheel tick above the noise threshold steps one section
    Step,
}

/// Snap behaviour settings as read from the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapSettings {
    /// Below this viewport width snapping is switched off
    #[serde(default = "default_min_width")]
    pub min_width: f64,
    /// Below this viewport height snapping is switched off
    #[serde(default = "default_min_height")]
    pub min_height: f64,
    /// Animation length in frames (negative falls back to the default)
    #[serde(default = "default_duration_frames")]
    pub duration_frames: i64,
    #[serde(default)]
    pub easing: EasingType,
    /// Arrow-key navigation
    #[serde(default = "default_true")]
    pub keyboard: bool,
    /// Stay inert on mobile user agents
    #[serde(default = "default_true")]
    pub detect_mobile: bool,
    #[serde(default)]
    pub wheel_mode: WheelMode,
    /// Wheel deltas smaller than this are ignored in step mode
    #[serde(default = "default_wheel_threshold")]
    pub wheel_threshold: f64,
    #[serde(default = "default_debounce_ms")]
    pub resize_debounce_ms: u64,
    #[serde(default = "default_debounce_ms")]
    pub scroll_debounce_ms: u64,
    /// Experimental: weight the neighbour in the wheel direction by this factor
    #[serde(default)]
    pub gravitation: Option<f64>,
    /// Snap to the nearest section as soon as snapping switches on
    #[serde(default)]
    pub snap_on_start: bool,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            min_width: default_min_width(),
            min_height: default_min_height(),
            duration_frames: default_duration_frames(),
            easing: EasingType::default(),
            keyboard: default_true(),
            detect_mobile: default_true(),
            wheel_mode: WheelMode::default(),
            wheel_threshold: default_wheel_threshold(),
            resize_debounce_ms: default_debounce_ms(),
            scroll_debounce_ms: default_debounce_ms(),
            gravitation: None,
            snap_on_start: false,
        }
    }
}

impl SnapSettings {
    /// Build a controller configuration for the given elements
    pub fn to_config<E>(&self, elements: Vec<E>) -> SnapConfig<E> {
        SnapConfig {
            elements: Some(elements),
            min_width: Some(self.min_width),
            min_height: Some(self.min_height),
            duration: Some(self.duration_frames),
            easing: Some(self.easing.into()),
            keyboard: Some(self.keyboard),
            detect_mobile: Some(self.detect_mobile),
            wheel_mode: self.wheel_mode,
            wheel_threshold: self.wheel_threshold,
            resize_debounce: Duration::from_millis(self.resize_debounce_ms),
            scroll_debounce: Duration::from_millis(self.scroll_debounce_ms),
            gravitation: self.gravitation,
            snap_on_start: self.snap_on_start,
        }
    }
}

/// Terminal demo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Number of sections to stack
    #[serde(default = "default_sections")]
    pub sections: usize,
    /// Section height in rows (0 = one full viewport per section)
    #[serde(default)]
    pub section_height: u16,
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Rows scrolled per wheel notch when scrolling natively
    #[serde(default = "default_wheel_rows")]
    pub wheel_rows: u16,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            section_height: 0,
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            wheel_rows: default_wheel_rows(),
        }
    }
}

impl DemoConfig {
    /// Tick duration while animating
    pub fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scrollsnap")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_min_width() -> f64 {
    40.0
}

fn default_min_height() -> f64 {
    12.0
}

fn default_duration_frames() -> i64 {
    30
}

fn default_wheel_threshold() -> f64 {
    15.0
}

fn default_debounce_ms() -> u64 {
    200
}

fn default_sections() -> usize {
    6
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_wheel_rows() -> u16 {
    3
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults when it is missing
    pub fn load_from(config_path: &std::path::Path) -> crate::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Render the configuration as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/scrollsnap/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("scrollsnap")
            .join("config.toml")
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("scrollsnap.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
