//! L4 Atomic Layer: Easing functions for the snap animation
//!
//! Every curve uses the classic `(t, b, c, d)` signature: current frame,
//! start value, change in value, duration in frames.

pub use crate::config::EasingType;

/// A custom `(frame, start, delta, duration) -> value` curve
pub type TimingFn = fn(f64, f64, f64, f64) -> f64;

/// Easing applied by the snap animation
#[derive(Debug, Clone, Copy)]
pub enum Timing {
    /// One of the built-in curves
    Builtin(EasingType),
    /// A caller supplied curve
    Custom(TimingFn),
}

impl Default for Timing {
    fn default() -> Self {
        Timing::Builtin(EasingType::Quadratic)
    }
}

impl From<EasingType> for Timing {
    fn from(easing: EasingType) -> Self {
        Timing::Builtin(easing)
    }
}

impl Timing {
    /// Evaluate the curve at frame `t` of `d`
    ///
    /// A zero (or negative) duration yields the final value `b + c`.
    #[inline]
    pub fn apply(&self, t: f64, b: f64, c: f64, d: f64) -> f64 {
        if d <= 0.0 {
            return b + c;
        }
        match self {
            Timing::Builtin(easing) => b + c * easing.progress(t / d),
            Timing::Custom(f) => f(t, b, c, d),
        }
    }
}

impl EasingType {
    /// Map linear progress in [0, 1] to eased progress in [0, 1]
    #[inline]
    pub fn progress(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => x,
            EasingType::Quadratic => ease_out_quad(x, 0.0, 1.0, 1.0),
            EasingType::Cubic => {
                let inv = 1.0 - x;
                1.0 - inv * inv * inv
            }
            EasingType::Quintic => {
                let inv = 1.0 - x;
                1.0 - inv * inv * inv * inv * inv
            }
            EasingType::EaseOut => {
                if x >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f64.powf(-10.0 * x)
                }
            }
        }
    }
}

/// Ease-out quadratic: `-c·(t/d)·(t/d − 2) + b`
#[inline]
pub fn ease_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let tx = t / d;
    -c * tx * (tx - 2.0) + b
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 5] = [
        EasingType::Linear,
        EasingType::Quadratic,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            assert!(easing.progress(0.0).abs() < 0.001, "{:?} at t=0", easing);
            assert!((easing.progress(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=10 {
                let x = i as f64 / 10.0;
                let v = easing.progress(x);
                assert!(v >= prev, "{:?} not monotonic at x={}", easing, x);
                prev = v;
            }
        }
    }

    #[test]
    fn test_ease_out_quad_matches_formula() {
        // halfway through, a quadratic ease-out has covered three quarters
        assert!((ease_out_quad(10.0, 0.0, 100.0, 20.0) - 75.0).abs() < 1e-9);
        assert!((ease_out_quad(20.0, 5.0, 100.0, 20.0) - 105.0).abs() < 1e-9);
        assert!((ease_out_quad(0.0, 5.0, 100.0, 20.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_builtin_quadratic_agrees_with_raw_curve() {
        let timing = Timing::default();
        for frame in 0..=30 {
            let t = frame as f64;
            let expected = ease_out_quad(t, 0.0, -480.0, 30.0);
            assert!((timing.apply(t, 0.0, -480.0, 30.0) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_duration_jumps_to_end() {
        assert_eq!(Timing::default().apply(0.0, 10.0, 90.0, 0.0), 100.0);
        let custom = Timing::Custom(|_, _, _, _| f64::NAN);
        assert_eq!(custom.apply(0.0, 10.0, 90.0, 0.0), 100.0);
    }

    #[test]
    fn test_custom_curve_is_used() {
        fn step(t: f64, b: f64, c: f64, d: f64) -> f64 {
            if t < d {
                b
            } else {
                b + c
            }
        }
        let timing = Timing::Custom(step);
        assert_eq!(timing.apply(5.0, 0.0, 50.0, 10.0), 0.0);
        assert_eq!(timing.apply(10.0, 0.0, 50.0, 10.0), 50.0);
    }
}
