//! L2 Organism Layer: The snap controller
//!
//! Owns configuration, the latest measurements and animation state, and
//! reacts to resize, wheel and key input forwarded by the host.
//!
//! The host drives time explicitly:
//! - `tick(now)` fires due debounce timers
//! - `on_frame()` advances a running animation by one frame

use std::fmt;
use std::time::Instant;

use tracing::{debug, trace};

use super::animation::{FrameStep, SnapAnimation};
use super::device::is_mobile;
use super::metrics::{self, ElementMetrics, ViewportMetrics};
use super::options::{ResolvedConfig, SnapConfig, DEFAULT_DEBOUNCE};
use super::timing::{earliest, Debounce};
use super::viewport::{Key, Listener, Mark, Viewport, WheelMode};
use crate::error::InitError;

/// Lifecycle of a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// `init` has not succeeded yet
    Uninitialized,
    /// Listeners attached, snapping on
    Running,
    /// Viewport below the size thresholds, listeners detached
    Stopped,
}

/// What the controller did with a piece of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not handled; the host applies its default behaviour
    Ignored,
    /// Absorbed without navigating; the host should not apply its default
    Suppressed,
    /// Settle timer re-armed; native scrolling continues
    Deferred,
    /// A snap animation toward this index started
    Started(usize),
}

impl Outcome {
    /// Whether the host should skip its default action for the event
    pub fn suppresses_default(self) -> bool {
        matches!(self, Outcome::Suppressed | Outcome::Started(_))
    }
}

type Callback = Box<dyn FnOnce()>;

/// Snaps a scroll container to its most visible section
pub struct SnapController<V: Viewport> {
    viewport: V,
    config: Option<ResolvedConfig<V::Element>>,
    state: RunState,
    paused: bool,
    window: ViewportMetrics,
    elements: Vec<ElementMetrics<V::Element>>,
    /// Index of the active section, kept across measurement passes
    active: Option<usize>,
    animation: Option<SnapAnimation>,
    /// Invoked once when the current direct navigation finishes
    callback: Option<Callback>,
    listeners: Vec<Listener>,
    resize_timer: Debounce,
    scroll_timer: Debounce,
    /// Sign of the wheel delta that armed the settle timer
    wheel_direction: i64,
}

impl<V: Viewport> fmt::Debug for SnapController<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapController")
            .field("state", &self.state)
            .field("paused", &self.paused)
            .field("window", &self.window)
            .field("active", &self.active)
            .field("animation", &self.animation)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl<V: Viewport> SnapController<V> {
    /// Create an inert controller on top of a viewport
    pub fn new(viewport: V) -> Self {
        Self {
            viewport,
            config: None,
            state: RunState::Uninitialized,
            paused: false,
            window: ViewportMetrics::default(),
            elements: Vec::new(),
            active: None,
            animation: None,
            callback: None,
            listeners: Vec::new(),
            resize_timer: Debounce::new(DEFAULT_DEBOUNCE),
            scroll_timer: Debounce::new(DEFAULT_DEBOUNCE),
            wheel_direction: 0,
        }
    }

    /// Validate `config` and bring the controller up
    ///
    /// On failure the controller stays uninitialized with no listeners.
    /// Configuration errors are logged; a mobile user agent is not.
    pub fn init(&mut self, config: SnapConfig<V::Element>) -> Result<(), InitError> {
        if self.config.is_some() {
            return Err(InitError::AlreadyInitialized);
        }

        let config = config.validate()?;

        if config.detect_mobile && self.viewport.user_agent().is_some_and(is_mobile) {
            debug!("Mobile user agent detected, snapping stays off");
            return Err(InitError::MobileDevice);
        }

        self.resize_timer = Debounce::new(config.resize_debounce);
        self.scroll_timer = Debounce::new(config.scroll_debounce);
        debug!(
            elements = config.elements.len(),
            duration = config.duration,
            wheel_mode = ?config.wheel_mode,
            "Snap controller initialized"
        );
        self.config = Some(config);

        self.refresh();
        Ok(())
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Running and not paused: input is being acted on
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == RunState::Running && !self.paused
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether the host should keep calling `on_frame`
    #[inline]
    pub fn needs_frame(&self) -> bool {
        self.animation.is_some()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Measurements from the latest pass
    pub fn elements(&self) -> &[ElementMetrics<V::Element>] {
        &self.elements
    }

    pub fn viewport_metrics(&self) -> &ViewportMetrics {
        &self.window
    }

    /// Earliest pending debounce deadline, for sizing the host's poll timeout
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest(self.resize_timer.deadline(), self.scroll_timer.deadline())
    }

    /// Recompute viewport and section metrics from scratch
    pub fn measure(&mut self) {
        let Some(config) = self.config.as_ref() else {
            return;
        };

        self.window = self.viewport.metrics();
        let window = self.window;
        let active = self.active;
        let viewport = &self.viewport;
        self.elements = config
            .elements
            .iter()
            .enumerate()
            .filter_map(|(index, element)| {
                let rect = viewport.element_rect(element)?;
                let mut measured = ElementMetrics::measure(index, element.clone(), rect, &window);
                measured.active = active == Some(index);
                Some(measured)
            })
            .collect();
    }

    /// Measure, then switch snapping on or off for the current viewport size
    pub fn refresh(&mut self) {
        self.measure();
        let Some(config) = self.config.as_ref() else {
            return;
        };

        let big = self.window.meets(config.min_width, config.min_height);
        match self.state {
            RunState::Stopped | RunState::Uninitialized if big && !self.paused => self.start(),
            RunState::Running | RunState::Uninitialized if !big => self.stop(),
            _ => {}
        }
    }

    fn start(&mut self) {
        let Some(config) = self.config.as_ref() else {
            return;
        };
        let wheel = Listener::Wheel(config.wheel_mode);
        let keyboard = config.keyboard;
        let snap_on_start = config.snap_on_start;

        self.state = RunState::Running;
        self.attach(wheel);
        if keyboard {
            self.attach(Listener::Keydown);
        }

        self.active = None;
        for el in &mut self.elements {
            el.active = false;
            self.viewport.mark(&el.element, Mark::Inactive);
        }
        debug!(
            width = self.window.width,
            height = self.window.height,
            "Snapping started"
        );

        if snap_on_start {
            self.scroll_to_nearest();
        }
    }

    fn stop(&mut self) {
        self.state = RunState::Stopped;
        self.scroll_timer.cancel();
        for listener in std::mem::take(&mut self.listeners) {
            self.viewport.unlisten(listener);
        }

        self.active = None;
        for el in &mut self.elements {
            el.active = false;
            self.viewport.mark(&el.element, Mark::Inert);
        }
        debug!(
            width = self.window.width,
            height = self.window.height,
            "Snapping stopped"
        );
    }

    fn attach(&mut self, listener: Listener) {
        if !self.listeners.contains(&listener) {
            self.viewport.listen(listener);
            self.listeners.push(listener);
        }
    }

    /// Hold the controller off (or release it)
    ///
    /// Pausing leaves listeners and measurements alone; resuming re-runs
    /// the on/off decision straight away.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        debug!(paused, "Snap pause toggled");
        if !paused {
            self.refresh();
        }
    }

    /// The viewport changed size; re-measure once resizing quiets down
    pub fn on_resize(&mut self, now: Instant) {
        if self.config.is_some() {
            self.resize_timer.arm(now);
        }
    }

    /// Wheel or trackpad input with vertical delta `delta_y`
    pub fn on_wheel(&mut self, delta_y: f64, now: Instant) -> Outcome {
        let Some((mode, threshold)) = self
            .config
            .as_ref()
            .map(|c| (c.wheel_mode, c.wheel_threshold))
        else {
            return Outcome::Ignored;
        };
        if !self.is_active() {
            return Outcome::Ignored;
        }

        match mode {
            WheelMode::Settle => {
                if self.is_animating() {
                    return Outcome::Ignored;
                }
                self.wheel_direction = if delta_y > 0.0 { 1 } else { -1 };
                self.scroll_timer.arm(now);
                Outcome::Deferred
            }
            WheelMode::Step => {
                if self.is_animating() || delta_y.abs() < threshold {
                    return Outcome::Suppressed;
                }
                self.step(if delta_y > 0.0 { 1 } else { -1 })
            }
        }
    }

    /// Arrow-key navigation
    pub fn on_key(&mut self, key: Key) -> Outcome {
        let delta = match key {
            Key::Up => -1,
            Key::Down => 1,
            Key::Other => return Outcome::Ignored,
        };
        if !self.is_active() || self.is_animating() {
            return Outcome::Ignored;
        }
        self.step(delta)
    }

    /// Fire whichever debounce timers are due
    pub fn tick(&mut self, now: Instant) {
        if self.resize_timer.fire(now) {
            self.refresh();
        }
        if self.scroll_timer.fire(now) && self.is_active() && !self.is_animating() {
            self.settle();
        }
    }

    /// Advance the running animation by one frame
    ///
    /// Returns true while more frames are needed.
    pub fn on_frame(&mut self) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };

        let offset = animation.offset();
        self.viewport.set_scroll_top(offset);
        let applied = self.viewport.scroll_top();
        trace!(frame = animation.frame(), offset, applied, "Snap frame");

        match animation.advance(applied, self.window.max_top) {
            FrameStep::Continue => true,
            FrameStep::Finished => {
                debug!(target = animation.target(), frames = animation.frame() + 1, "Snap finished");
                self.animation = None;
                if let Some(callback) = self.callback.take() {
                    callback();
                }
                false
            }
        }
    }

    /// Animate straight to `index` (clamped into range)
    ///
    /// Works while paused or stopped, but not before `init` or while
    /// animating. A section that cannot be measured is not navigated to.
    pub fn scroll_to_index(&mut self, index: usize) -> Outcome {
        self.navigate_to_index(index, None)
    }

    /// Animate to `index` and run `callback` once the animation completes
    ///
    /// The callback is dropped without running when navigation is rejected.
    pub fn scroll_to_index_then<F>(&mut self, index: usize, callback: F) -> Outcome
    where
        F: FnOnce() + 'static,
    {
        self.navigate_to_index(index, Some(Box::new(callback)))
    }

    fn navigate_to_index(&mut self, index: usize, callback: Option<Callback>) -> Outcome {
        let Some(count) = self.config.as_ref().map(|c| c.elements.len()) else {
            return Outcome::Ignored;
        };
        if self.is_animating() {
            return Outcome::Ignored;
        }
        self.measure();
        let target = i64::try_from(index).unwrap_or(i64::MAX);
        let Some(position) = metrics::normalize_position(target, count)
            .and_then(|clamped| self.position_of(clamped))
        else {
            return Outcome::Ignored;
        };
        let outcome = self.animate_to(position);
        if outcome != Outcome::Ignored {
            self.callback = callback;
        }
        outcome
    }

    /// Animate to the last section whose top is at or above the viewport top
    pub fn scroll_to_nearest(&mut self) -> Outcome {
        if self.state != RunState::Running || self.is_animating() {
            return Outcome::Ignored;
        }
        self.measure();
        let nearest = metrics::nearest(&self.elements, &self.window).map(|el| el.index);
        match nearest.and_then(|clamped| self.position_of(clamped)) {
            Some(position) => self.animate_to(position),
            None => Outcome::Ignored,
        }
    }

    /// Position of the section with configured `index` in the latest pass
    fn position_of(&self, index: usize) -> Option<usize> {
        self.elements.iter().position(|el| el.index == index)
    }

    fn most_visible_position(&self) -> Option<usize> {
        metrics::most_visible(&self.elements).and_then(|el| self.position_of(el.index))
    }

    fn step(&mut self, delta: i64) -> Outcome {
        self.measure();
        let base = self
            .active
            .and_then(|clamped| self.position_of(clamped))
            .or_else(|| self.most_visible_position());
        let Some(base) = base else {
            return Outcome::Ignored;
        };
        match metrics::normalize_position(base as i64 + delta, self.elements.len()) {
            Some(position) => self.animate_to(position),
            None => Outcome::Ignored,
        }
    }

    /// Snap to the most visible section after wheel input settled
    fn settle(&mut self) {
        self.measure();
        let Some(mut target) = self.most_visible_position() else {
            return;
        };

        let gravitation = self.config.as_ref().and_then(|c| c.gravitation);
        if let Some(factor) = gravitation {
            let neighbour = target as i64 + self.wheel_direction;
            if let Some(next) = metrics::normalize_position(neighbour, self.elements.len()) {
                let top = self.elements[target].visible_percentage;
                let weighted = self.elements[next].visible_percentage * factor;
                if weighted > top {
                    trace!(from = target, to = next, weighted, "Gravitation moved snap target");
                    target = next;
                }
            }
        }

        self.animate_to(target);
    }

    /// Mark `position` active and start scrolling to it
    fn animate_to(&mut self, position: usize) -> Outcome {
        let Some(config) = self.config.as_ref() else {
            return Outcome::Ignored;
        };
        if position >= self.elements.len() {
            return Outcome::Ignored;
        }

        for el in &mut self.elements {
            el.active = false;
            self.viewport.mark(&el.element, Mark::Inactive);
        }
        let target = &mut self.elements[position];
        target.active = true;
        self.viewport.mark(&target.element, Mark::Active);

        let index = target.index;
        let start = self.viewport.scroll_top();
        self.active = Some(index);
        self.animation = Some(SnapAnimation::new(
            index,
            start,
            target.top,
            config.duration,
            config.timing,
        ));
        debug!(index, from = start, to = target.top, "Snap started");
        Outcome::Started(index)
    }
}
