//! L4 Atomic Layer: Debounce timers
//!
//! Timers are plain deadlines owned by the controller. The host passes the
//! current `Instant` in, so nothing here reads the clock on its own.

use std::time::{Duration, Instant};

/// A quiet-period timer: every `arm` pushes the deadline out again, and it
/// fires once after the last `arm` of a burst
#[derive(Debug, Clone)]
pub struct Debounce {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Cancel any pending deadline and schedule a new one
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true exactly once when the deadline has passed
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Earliest of two optional deadlines
pub fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(200);

    #[test]
    fn test_fires_once_after_quiet_period() {
        let t0 = Instant::now();
        let mut timer = Debounce::new(QUIET);
        timer.arm(t0);
        assert!(!timer.fire(t0 + Duration::from_millis(199)));
        assert!(timer.fire(t0 + QUIET));
        assert!(!timer.fire(t0 + Duration::from_millis(400)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_rearm_pushes_deadline() {
        let t0 = Instant::now();
        let mut timer = Debounce::new(QUIET);
        timer.arm(t0);
        timer.arm(t0 + Duration::from_millis(150));
        assert!(!timer.fire(t0 + Duration::from_millis(250)));
        assert!(timer.fire(t0 + Duration::from_millis(350)));
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut timer = Debounce::new(QUIET);
        timer.arm(t0);
        timer.cancel();
        assert!(!timer.fire(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn test_earliest() {
        let t0 = Instant::now();
        let t1 = t0 + QUIET;
        assert_eq!(earliest(Some(t1), Some(t0)), Some(t0));
        assert_eq!(earliest(None, Some(t1)), Some(t1));
        assert_eq!(earliest(Some(t0), None), Some(t0));
        assert_eq!(earliest(None, None), None);
    }
}
