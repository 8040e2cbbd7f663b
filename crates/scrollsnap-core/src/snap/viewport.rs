//! L4 Atomic Layer: The host surface the controller drives
//!
//! Anything that can report layout, move a scroll offset and route input
//! can host a [`SnapController`](super::SnapController): a browser binding,
//! a terminal, or the in-memory [`StackedViewport`](crate::layout::StackedViewport).

pub use crate::config::WheelMode;

use super::metrics::{ElementRect, ViewportMetrics};

/// Visual state of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    /// The section snapping currently targets
    Active,
    /// Any other section while snapping is on
    #[default]
    Inactive,
    /// Snapping is off; every section is shown plainly
    Inert,
}

/// Input subscriptions the controller asks the host for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    Wheel(WheelMode),
    Keydown,
}

/// Keys the controller cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    /// Anything else; always passed through
    Other,
}

/// Layout, scrolling and event plumbing of a snap host
pub trait Viewport {
    /// Handle identifying one section
    type Element: Clone;

    /// Current viewport measurement
    fn metrics(&self) -> ViewportMetrics;

    /// Layout box of a section, `None` when it cannot be measured
    fn element_rect(&self, element: &Self::Element) -> Option<ElementRect>;

    fn scroll_top(&self) -> f64;

    /// Move the scroll offset; hosts may clamp it
    fn set_scroll_top(&mut self, top: f64);

    fn mark(&mut self, element: &Self::Element, mark: Mark);

    /// Start delivering events for `listener`
    fn listen(&mut self, listener: Listener);

    /// Stop delivering events for `listener`
    fn unlisten(&mut self, listener: Listener);

    /// User agent string, when the host has one
    fn user_agent(&self) -> Option<&str> {
        None
    }
}
