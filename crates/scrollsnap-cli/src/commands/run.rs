use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tracing::info;

use scrollsnap_core::AppConfig;
use scrollsnap_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::{SectionsWidget, StatusBarWidget},
};

pub fn run(config: AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("scrollsnap"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, config: AppConfig) -> Result<()> {
    let size = terminal.size()?;
    let content = main_layout(Rect::new(0, 0, size.width, size.height))[0];

    // Create event handler with animation FPS support
    let event_handler = EventHandler::with_animation_tick(
        config.demo.tick_rate_ms,
        config.demo.animation_tick_duration(),
    );

    let mut app = App::new(config, content.width, content.height);
    info!(
        width = content.width,
        height = content.height,
        state = ?app.snap.state(),
        "Terminal demo started"
    );

    // Main loop
    loop {
        app.tick(Instant::now());

        // Draw UI
        terminal.draw(|frame| {
            let layout = main_layout(frame.area());
            SectionsWidget::render(frame, layout[0], &app);
            StatusBarWidget::render(frame, layout[1], &app);
        })?;

        // Handle events (frame rate while animating, otherwise wake for debounce deadlines)
        let event = if app.needs_fast_update() {
            event_handler.next_animation()?
        } else {
            event_handler.next_until(app.snap.next_deadline())?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => app.handle_action(handle_key_event(key)),
                AppEvent::Wheel(notches) => app.wheel(notches, Instant::now()),
                AppEvent::Resize(width, height) => {
                    let content = main_layout(Rect::new(0, 0, width, height))[0];
                    app.resize(content.width, content.height, Instant::now());
                }
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!("Terminal demo finished");
    Ok(())
}

/// Content area above a one-row status bar
fn main_layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area)
}
