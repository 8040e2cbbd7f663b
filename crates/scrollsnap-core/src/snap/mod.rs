//! Section snapping
//!
//! Keeps the section that is most visible in a scroll container fully in
//! view, moving there with an eased, frame-stepped animation whenever wheel
//! input settles or an arrow key is pressed.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - `(t, b, c, d)` easing curves
//! - `metrics` - Visibility geometry and index clamping
//! - `timing` - Debounce timers
//! - `options` - Configuration and validation
//! - `viewport` - The host adapter trait
//! - `device` - Mobile user agent detection
//!
//! ## L3 Molecular Layer
//! - `animation` - Frame stepper
//!
//! ## L2 Organism Layer
//! - `controller` - `SnapController`, the piece hosts talk to
//!
//! # Usage
//!
//! ```ignore
//! use scrollsnap_core::layout::StackedViewport;
//! use scrollsnap_core::snap::{Key, SnapConfig, SnapController};
//!
//! let viewport = StackedViewport::uniform(800.0, 600.0, 600.0, 4);
//! let mut snap = SnapController::new(viewport);
//! snap.init(SnapConfig::new(vec![0, 1, 2, 3], 320.0, 240.0))?;
//!
//! snap.on_key(Key::Down);
//! while snap.on_frame() {}
//! ```

// L4 Atomic Layer
pub mod device;
pub mod easing;
pub mod metrics;
pub mod options;
pub mod timing;
pub mod viewport;

// L3 Molecular Layer
pub mod animation;

// L2 Organism Layer
pub mod controller;

pub use animation::{FrameStep, SnapAnimation};
pub use controller::{Outcome, RunState, SnapController};
pub use easing::{EasingType, Timing, TimingFn};
pub use metrics::{normalize_position, ElementMetrics, ElementRect, ViewportMetrics};
pub use options::{ResolvedConfig, SnapConfig};
pub use viewport::{Key, Listener, Mark, Viewport, WheelMode};
