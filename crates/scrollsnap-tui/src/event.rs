use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEventKind};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    animation_tick: Duration,
}

impl EventHandler {
    /// Handler that polls faster while an animation is running
    pub fn with_animation_tick(tick_rate_ms: u64, animation_tick: Duration) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_tick,
        }
    }

    /// Poll for the next event at the animation frame rate
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_tick)
    }

    /// Poll at the idle rate, waking early for a pending deadline
    pub fn next_until(&self, deadline: Option<Instant>) -> Result<Option<AppEvent>> {
        self.poll(idle_timeout(self.tick_rate, deadline, Instant::now()))
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            Ok(translate(event::read()?))
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Shorter of the tick rate and the time left until `deadline`
fn idle_timeout(tick_rate: Duration, deadline: Option<Instant>, now: Instant) -> Duration {
    match deadline {
        Some(deadline) => tick_rate.min(deadline.saturating_duration_since(now)),
        None => tick_rate,
    }
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // Only handle key press events, ignore release events
        // (crossterm 0.27+ sends release events on some systems)
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => Some(AppEvent::Wheel(1)),
            MouseEventKind::ScrollUp => Some(AppEvent::Wheel(-1)),
            _ => None,
        },
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// One mouse wheel notch: positive scrolls down
    Wheel(i8),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers, MouseEvent};

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_wheel_notches() {
        assert!(matches!(
            translate(mouse(MouseEventKind::ScrollDown)),
            Some(AppEvent::Wheel(1))
        ));
        assert!(matches!(
            translate(mouse(MouseEventKind::ScrollUp)),
            Some(AppEvent::Wheel(-1))
        ));
        assert!(translate(mouse(MouseEventKind::Moved)).is_none());
    }

    #[test]
    fn test_key_release_ignored() {
        let mut key = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert!(matches!(translate(Event::Key(key)), Some(AppEvent::Key(_))));
        key.kind = KeyEventKind::Release;
        assert!(translate(Event::Key(key)).is_none());
    }

    #[test]
    fn test_poll_rates() {
        let handler = EventHandler::with_animation_tick(100, Duration::from_millis(16));
        assert_eq!(handler.tick_rate, Duration::from_millis(100));
        assert_eq!(handler.animation_tick, Duration::from_millis(16));
    }

    #[test]
    fn test_idle_timeout_honours_deadline() {
        let now = Instant::now();
        let tick = Duration::from_millis(100);
        assert_eq!(idle_timeout(tick, None, now), tick);
        assert_eq!(
            idle_timeout(tick, Some(now + Duration::from_millis(30)), now),
            Duration::from_millis(30)
        );
        assert_eq!(idle_timeout(tick, Some(now), now + tick), Duration::ZERO);
    }
}
