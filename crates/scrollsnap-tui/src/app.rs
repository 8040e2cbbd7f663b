use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use scrollsnap_core::layout::StackedViewport;
use scrollsnap_core::snap::{Key, Listener, Outcome, Viewport};
use scrollsnap_core::{AppConfig, SnapController};
use tracing::{debug, warn};

use crate::input::Action;

/// Wheel delta reported for one notch, matching a browser's pixel-mode delta
pub const WHEEL_NOTCH_DELTA: f64 = 100.0;

/// Application state
pub struct App {
    /// Application configuration
    pub config: AppConfig,
    /// Snap controller over the stacked sections; rows are the layout unit
    pub snap: SnapController<StackedViewport>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Target of the last direct jump, reported once it completes
    jump_target: Option<usize>,
    /// Raised by the completion callback of a direct jump
    arrived: Rc<Cell<bool>>,
}

impl App {
    /// Build the section stack for a content area of `width`×`height` cells
    pub fn new(config: AppConfig, width: u16, height: u16) -> Self {
        let heights = section_heights(&config, height);
        let viewport = StackedViewport::new(f64::from(width), f64::from(height), heights);
        let mut snap = SnapController::new(viewport);

        let elements = (0..config.demo.sections).collect();
        let status_message = match snap.init(config.snap.to_config(elements)) {
            Ok(()) => None,
            Err(e) => {
                warn!("Snapping unavailable: {}", e);
                Some(format!("Snapping unavailable: {}", e))
            }
        };

        Self {
            config,
            snap,
            should_quit: false,
            status_message,
            jump_target: None,
            arrived: Rc::new(Cell::new(false)),
        }
    }

    /// The content area changed size
    pub fn resize(&mut self, width: u16, height: u16, now: Instant) {
        let heights = section_heights(&self.config, height);
        let viewport = self.snap.viewport_mut();
        viewport.set_section_heights(heights);
        viewport.resize(f64::from(width), f64::from(height));
        self.snap.on_resize(now);
    }

    /// Fire due timers, advance the animation by one frame and collect
    /// finished jumps
    pub fn tick(&mut self, now: Instant) {
        self.snap.tick(now);
        if self.snap.needs_frame() {
            self.snap.on_frame();
        }
        if self.arrived.take() {
            if let Some(index) = self.jump_target.take() {
                self.status_message = Some(format!("Arrived at section {}", index + 1));
            }
        }
    }

    /// Whether the loop should poll at the animation frame rate
    pub fn needs_fast_update(&self) -> bool {
        self.snap.needs_frame()
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Snap(key) => self.key(key),
            Action::JumpTo(index) => self.jump_to(index),
            Action::JumpToNearest => {
                if self.snap.scroll_to_nearest() == Outcome::Ignored {
                    self.status_message = Some("Snapping is off".to_string());
                }
            }
            Action::TogglePause => {
                let paused = !self.snap.is_paused();
                self.snap.set_paused(paused);
                self.status_message = Some(if paused { "Paused" } else { "Resumed" }.to_string());
            }
            Action::None => {}
        }
    }

    /// Key input: offered to the controller when it listens for keys,
    /// otherwise (or when it passes) the content scrolls by one row
    fn key(&mut self, key: Key) {
        let outcome = if self.snap.viewport().is_listening(Listener::Keydown) {
            self.snap.on_key(key)
        } else {
            Outcome::Ignored
        };
        if outcome.suppresses_default() {
            return;
        }
        let rows = match key {
            Key::Up => -1.0,
            Key::Down => 1.0,
            Key::Other => return,
        };
        self.snap.viewport_mut().scroll_by(rows);
    }

    /// Mouse wheel notches; positive scrolls down
    pub fn wheel(&mut self, notches: i8, now: Instant) {
        let listening = self
            .snap
            .viewport()
            .listeners()
            .iter()
            .any(|l| matches!(l, Listener::Wheel(_)));
        let outcome = if listening {
            self.snap.on_wheel(f64::from(notches) * WHEEL_NOTCH_DELTA, now)
        } else {
            Outcome::Ignored
        };
        if !outcome.suppresses_default() {
            let rows = f64::from(notches) * f64::from(self.config.demo.wheel_rows);
            self.snap.viewport_mut().scroll_by(rows);
        }
    }

    fn jump_to(&mut self, index: usize) {
        let arrived = Rc::clone(&self.arrived);
        match self.snap.scroll_to_index_then(index, move || arrived.set(true)) {
            Outcome::Started(target) => {
                debug!(target, "Jump started");
                self.jump_target = Some(target);
                self.status_message = None;
            }
            _ => self.status_message = Some("Jump not possible right now".to_string()),
        }
    }
}

/// Row height of every section: the configured one, or the full viewport
fn section_heights(config: &AppConfig, viewport_height: u16) -> Vec<f64> {
    let height = match config.demo.section_height {
        0 => viewport_height.max(1),
        rows => rows,
    };
    vec![f64::from(height); config.demo.sections]
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use scrollsnap_core::snap::RunState;
    use scrollsnap_core::WheelMode;

    use super::*;

    fn app(width: u16, height: u16) -> App {
        let mut config = AppConfig::default();
        config.snap.duration_frames = 5;
        App::new(config, width, height)
    }

    fn settle(app: &mut App) {
        let now = Instant::now();
        while app.needs_fast_update() {
            app.tick(now);
        }
    }

    #[test]
    fn test_sections_fill_the_viewport() {
        let app = app(80, 24);
        let viewport = app.snap.viewport();
        assert_eq!(viewport.section_count(), 6);
        assert_eq!(viewport.section_height(0), Some(24.0));
        assert_eq!(app.snap.state(), RunState::Running);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_arrow_keys_snap() {
        let mut app = app(80, 24);
        app.handle_action(Action::Snap(Key::Down));
        settle(&mut app);
        assert_eq!(app.snap.viewport().scroll_top(), 24.0);
        assert_eq!(app.snap.viewport().active_sections(), vec![1]);
    }

    #[test]
    fn test_small_terminal_scrolls_natively() {
        let mut app = app(30, 10);
        assert_eq!(app.snap.state(), RunState::Stopped);

        app.handle_action(Action::Snap(Key::Down));
        assert_eq!(app.snap.viewport().scroll_top(), 1.0);
        app.wheel(1, Instant::now());
        assert_eq!(app.snap.viewport().scroll_top(), 4.0);
        assert!(!app.needs_fast_update());
    }

    #[test]
    fn test_wheel_settles_on_most_visible_section() {
        let mut app = app(80, 24);
        let t0 = Instant::now();
        for notch in 0..4u32 {
            app.wheel(1, t0 + Duration::from_millis(30) * notch);
        }
        assert_eq!(app.snap.viewport().scroll_top(), 12.0);
        assert!(!app.needs_fast_update());

        app.tick(t0 + Duration::from_millis(90 + 200));
        assert!(app.needs_fast_update());
        settle(&mut app);
        // 12 rows into a 24-row section: tie goes to the first
        assert_eq!(app.snap.viewport().scroll_top(), 0.0);
    }

    #[test]
    fn test_step_wheel_moves_one_section_per_notch() {
        let mut config = AppConfig::default();
        config.snap.wheel_mode = WheelMode::Step;
        let mut app = App::new(config, 80, 24);
        app.wheel(1, Instant::now());
        settle(&mut app);
        assert_eq!(app.snap.viewport().scroll_top(), 24.0);
    }

    #[test]
    fn test_jump_reports_arrival() {
        let mut app = app(80, 24);
        app.handle_action(Action::JumpTo(usize::MAX));
        assert!(app.status_message.is_none());
        settle(&mut app);
        assert_eq!(app.snap.active_index(), Some(5));
        assert_eq!(app.status_message.as_deref(), Some("Arrived at section 6"));
    }

    #[test]
    fn test_pause_toggle() {
        let mut app = app(80, 24);
        app.handle_action(Action::TogglePause);
        assert!(app.snap.is_paused());
        app.handle_action(Action::Snap(Key::Down));
        assert!(!app.needs_fast_update());
        assert_eq!(app.snap.viewport().scroll_top(), 1.0);

        app.handle_action(Action::TogglePause);
        assert!(!app.snap.is_paused());
        assert_eq!(app.status_message.as_deref(), Some("Resumed"));
    }

    #[test]
    fn test_resize_rebuilds_full_height_sections() {
        let mut app = app(80, 24);
        let t0 = Instant::now();
        app.resize(80, 30, t0);
        assert_eq!(app.snap.viewport().section_height(3), Some(30.0));

        app.resize(20, 30, t0);
        app.tick(t0 + Duration::from_millis(200));
        assert_eq!(app.snap.state(), RunState::Stopped);
    }
}
