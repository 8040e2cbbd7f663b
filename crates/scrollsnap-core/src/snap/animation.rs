//! L3 Molecular Layer: Frame-stepped snap animation
//!
//! The animation knows nothing about the viewport. Each frame the caller
//! asks for [`SnapAnimation::offset`], applies it, reads back the offset
//! the viewport actually settled on, and hands it to
//! [`SnapAnimation::advance`].

use super::easing::Timing;

/// Offsets closer than this to the maximum count as having reached it
pub const MAX_OFFSET_TOLERANCE: f64 = 0.5;

/// Result of advancing one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    Continue,
    Finished,
}

/// One snap from the current scroll offset to a section's top
#[derive(Debug, Clone)]
pub struct SnapAnimation {
    /// Index of the section being scrolled to
    target: usize,
    /// Scroll offset when the animation started
    start: f64,
    /// `start - target_top`
    delta: f64,
    frame: u32,
    duration: u32,
    timing: Timing,
}

impl SnapAnimation {
    pub fn new(target: usize, start: f64, target_top: f64, duration: u32, timing: Timing) -> Self {
        Self {
            target,
            start,
            delta: start - target_top,
            frame: 0,
            duration,
            timing,
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Scroll offset for the current frame
    #[inline]
    pub fn offset(&self) -> f64 {
        self.start
            - self
                .timing
                .apply(self.frame as f64, 0.0, self.delta, self.duration as f64)
    }

    /// Finish the current frame given the offset the viewport ended up at
    ///
    /// Stops once every frame has been shown, or when the viewport sits at
    /// its maximum offset on any frame after the first.
    pub fn advance(&mut self, applied: f64, max_top: f64) -> FrameStep {
        let reached_max = self.frame != 0 && (applied - max_top).abs() < MAX_OFFSET_TOLERANCE;
        if self.frame >= self.duration || reached_max {
            FrameStep::Finished
        } else {
            self.frame += 1;
            FrameStep::Continue
        }
    }
}
