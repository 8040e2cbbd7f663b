//! L4 Atomic Layer: Viewport and section geometry
//!
//! Pure functions over measured offsets. All values share one coordinate
//! space: offsets from the top of the scrolled content.

use serde::Serialize;

/// Viewport measurement taken on every pass
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ViewportMetrics {
    /// Current scroll offset
    pub top: f64,
    /// Largest reachable scroll offset
    pub max_top: f64,
    /// `top + height`
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewportMetrics {
    /// Metrics for a viewport of `width`×`height` scrolled to `top` over
    /// content that is `content_height` tall
    ///
    /// Content shorter than the viewport gives a `max_top` of zero.
    pub fn new(top: f64, width: f64, height: f64, content_height: f64) -> Self {
        Self {
            top,
            max_top: (content_height - height).max(0.0),
            bottom: top + height,
            width,
            height,
        }
    }

    /// Whether both dimensions reach the given minimums
    pub fn meets(&self, min_width: f64, min_height: f64) -> bool {
        self.width >= min_width && self.height >= min_height
    }
}

/// Layout box of one section as reported by the viewport adapter
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ElementRect {
    pub top: f64,
    pub height: f64,
}

/// Per-section measurement
#[derive(Debug, Clone, Serialize)]
pub struct ElementMetrics<E> {
    /// Position in the configured element sequence
    pub index: usize,
    pub active: bool,
    pub top: f64,
    pub bottom: f64,
    pub height: f64,
    /// Handle of the measured element
    pub element: E,
    /// Share of the section's height inside the viewport, 0–100
    pub visible_percentage: f64,
}

impl<E> ElementMetrics<E> {
    pub fn measure(index: usize, element: E, rect: ElementRect, viewport: &ViewportMetrics) -> Self {
        let bottom = rect.top + rect.height;
        Self {
            index,
            active: false,
            top: rect.top,
            bottom,
            height: rect.height,
            element,
            visible_percentage: visible_percentage(rect.top, bottom, viewport),
        }
    }
}

/// Pixels of the span `[top, bottom]` inside the viewport, never negative
#[inline]
pub fn visible_height(top: f64, bottom: f64, viewport: &ViewportMetrics) -> f64 {
    let start = viewport.top.max(top);
    let end = viewport.bottom.min(bottom);
    (end - start).max(0.0)
}

/// Percentage of the span `[top, bottom]` inside the viewport, in [0, 100]
///
/// Zero-height spans report 0.
pub fn visible_percentage(top: f64, bottom: f64, viewport: &ViewportMetrics) -> f64 {
    let height = bottom - top;
    if height <= 0.0 {
        return 0.0;
    }
    let percentage = 100.0 * visible_height(top, bottom, viewport) / height;
    if percentage.is_nan() {
        0.0
    } else {
        percentage.clamp(0.0, 100.0)
    }
}

/// Clamp a stepped index into `[0, max_pos - 1]`
///
/// Returns `None` when there are no positions at all.
pub fn normalize_position(new_pos: i64, max_pos: usize) -> Option<usize> {
    if max_pos == 0 {
        return None;
    }
    let last = max_pos as i64 - 1;
    Some(new_pos.clamp(0, last) as usize)
}

/// The section with the highest visible percentage; the first one wins ties
pub fn most_visible<E>(elements: &[ElementMetrics<E>]) -> Option<&ElementMetrics<E>> {
    elements.iter().fold(None, |best, candidate| match best {
        Some(current) if candidate.visible_percentage <= current.visible_percentage => Some(current),
        _ => Some(candidate),
    })
}

/// The last section whose top is at or above the viewport top
pub fn nearest<'a, E>(
    elements: &'a [ElementMetrics<E>],
    viewport: &ViewportMetrics,
) -> Option<&'a ElementMetrics<E>> {
    elements.iter().rev().find(|el| viewport.top >= el.top)
}
