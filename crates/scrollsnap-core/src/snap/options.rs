//! L4 Atomic Layer: Controller configuration and its validation

use std::time::Duration;

use tracing::error;

use super::easing::Timing;
use super::viewport::WheelMode;
use crate::error::ConfigError;

/// Animation length used when none (or a negative one) is given
pub const DEFAULT_DURATION: u32 = 30;
/// Wheel deltas below this are noise in step mode
pub const DEFAULT_WHEEL_THRESHOLD: f64 = 15.0;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Options passed to [`SnapController::init`](super::SnapController::init)
///
/// `elements`, `min_width` and `min_height` are required; everything else
/// falls back to a default during validation.
#[derive(Debug, Clone)]
pub struct SnapConfig<E> {
    /// Sections to snap to, in document order
    pub elements: Option<Vec<E>>,
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    /// Animation length in frames
    pub duration: Option<i64>,
    pub easing: Option<Timing>,
    pub keyboard: Option<bool>,
    pub detect_mobile: Option<bool>,
    pub wheel_mode: WheelMode,
    pub wheel_threshold: f64,
    pub resize_debounce: Duration,
    pub scroll_debounce: Duration,
    /// Experimental direction weighting for the settle path
    pub gravitation: Option<f64>,
    pub snap_on_start: bool,
}

impl<E> Default for SnapConfig<E> {
    fn default() -> Self {
        Self {
            elements: None,
            min_width: None,
            min_height: None,
            duration: None,
            easing: None,
            keyboard: None,
            detect_mobile: None,
            wheel_mode: WheelMode::default(),
            wheel_threshold: DEFAULT_WHEEL_THRESHOLD,
            resize_debounce: DEFAULT_DEBOUNCE,
            scroll_debounce: DEFAULT_DEBOUNCE,
            gravitation: None,
            snap_on_start: false,
        }
    }
}

impl<E> SnapConfig<E> {
    /// Configuration for `elements` with the given minimum viewport size
    pub fn new(elements: Vec<E>, min_width: f64, min_height: f64) -> Self {
        Self {
            elements: Some(elements),
            min_width: Some(min_width),
            min_height: Some(min_height),
            ..Default::default()
        }
    }

    pub fn duration(mut self, frames: i64) -> Self {
        self.duration = Some(frames);
        self
    }

    pub fn easing(mut self, timing: impl Into<Timing>) -> Self {
        self.easing = Some(timing.into());
        self
    }

    pub fn keyboard(mut self, enabled: bool) -> Self {
        self.keyboard = Some(enabled);
        self
    }

    pub fn detect_mobile(mut self, enabled: bool) -> Self {
        self.detect_mobile = Some(enabled);
        self
    }

    pub fn wheel_mode(mut self, mode: WheelMode) -> Self {
        self.wheel_mode = mode;
        self
    }

    pub fn gravitation(mut self, factor: f64) -> Self {
        self.gravitation = Some(factor);
        self
    }

    pub fn snap_on_start(mut self, enabled: bool) -> Self {
        self.snap_on_start = enabled;
        self
    }

    /// Check required options and fill in defaults
    ///
    /// Failures are logged before they are returned.
    pub fn validate(self) -> Result<ResolvedConfig<E>, ConfigError> {
        let result = self.resolve();
        if let Err(ref e) = result {
            error!("{}", e);
        }
        result
    }

    fn resolve(self) -> Result<ResolvedConfig<E>, ConfigError> {
        let elements = self.elements.ok_or(ConfigError::MissingElements)?;
        let min_width = valid_threshold(self.min_width).ok_or(ConfigError::MissingMinWidth)?;
        let min_height = valid_threshold(self.min_height).ok_or(ConfigError::MissingMinHeight)?;

        let duration = match self.duration {
            Some(frames) if frames >= 0 => u32::try_from(frames).unwrap_or(u32::MAX),
            _ => DEFAULT_DURATION,
        };

        Ok(ResolvedConfig {
            elements,
            min_width,
            min_height,
            duration,
            timing: self.easing.unwrap_or_default(),
            keyboard: self.keyboard != Some(false),
            detect_mobile: self.detect_mobile != Some(false),
            wheel_mode: self.wheel_mode,
            wheel_threshold: self.wheel_threshold.max(0.0),
            resize_debounce: self.resize_debounce,
            scroll_debounce: self.scroll_debounce,
            gravitation: self.gravitation.filter(|g| g.is_finite() && *g > 0.0),
            snap_on_start: self.snap_on_start,
        })
    }
}

fn valid_threshold(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan() && *v >= 0.0)
}

/// Validated configuration; fixed for the controller's lifetime
#[derive(Debug, Clone)]
pub struct ResolvedConfig<E> {
    pub elements: Vec<E>,
    pub min_width: f64,
    pub min_height: f64,
    pub duration: u32,
    pub timing: Timing,
    pub keyboard: bool,
    pub detect_mobile: bool,
    pub wheel_mode: WheelMode,
    pub wheel_threshold: f64,
    pub resize_debounce: Duration,
    pub scroll_debounce: Duration,
    pub gravitation: Option<f64>,
    pub snap_on_start: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EasingType;

    #[test]
    fn test_defaults_applied() {
        let config = SnapConfig::new(vec![1, 2, 3], 0.0, 0.0).validate().unwrap();
        assert_eq!(config.duration, DEFAULT_DURATION);
        assert!(config.keyboard);
        assert!(config.detect_mobile);
        assert_eq!(config.wheel_mode, WheelMode::Settle);
        assert!(matches!(config.timing, Timing::Builtin(EasingType::Quadratic)));
        assert_eq!(config.scroll_debounce, Duration::from_millis(200));
    }

    #[test]
    fn test_missing_elements() {
        let config = SnapConfig::<usize> {
            min_width: Some(0.0),
            min_height: Some(0.0),
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err(), ConfigError::MissingElements);
    }

    #[test]
    fn test_missing_or_negative_thresholds() {
        let missing_width = SnapConfig {
            elements: Some(vec![0usize]),
            min_height: Some(10.0),
            ..Default::default()
        };
        assert_eq!(missing_width.validate().unwrap_err(), ConfigError::MissingMinWidth);

        let negative_height = SnapConfig::new(vec![0usize], 10.0, -1.0);
        assert_eq!(negative_height.validate().unwrap_err(), ConfigError::MissingMinHeight);

        let nan_width = SnapConfig::new(vec![0usize], f64::NAN, 1.0);
        assert_eq!(nan_width.validate().unwrap_err(), ConfigError::MissingMinWidth);
    }

    #[test]
    fn test_negative_duration_falls_back() {
        let config = SnapConfig::new(vec![0usize], 0.0, 0.0)
            .duration(-5)
            .validate()
            .unwrap();
        assert_eq!(config.duration, DEFAULT_DURATION);

        let config = SnapConfig::new(vec![0usize], 0.0, 0.0)
            .duration(0)
            .validate()
            .unwrap();
        assert_eq!(config.duration, 0);
    }

    #[test]
    fn test_explicit_flags_kept() {
        let config = SnapConfig::new(vec![0usize], 0.0, 0.0)
            .keyboard(false)
            .detect_mobile(false)
            .wheel_mode(WheelMode::Step)
            .easing(EasingType::Linear)
            .validate()
            .unwrap();
        assert!(!config.keyboard);
        assert!(!config.detect_mobile);
        assert_eq!(config.wheel_mode, WheelMode::Step);
        assert!(matches!(config.timing, Timing::Builtin(EasingType::Linear)));
    }

    #[test]
    fn test_nonsense_gravitation_dropped() {
        let config = SnapConfig::new(vec![0usize], 0.0, 0.0)
            .gravitation(-2.0)
            .validate()
            .unwrap();
        assert_eq!(config.gravitation, None);
    }
}
