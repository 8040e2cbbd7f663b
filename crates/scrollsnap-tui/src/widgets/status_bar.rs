use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use scrollsnap_core::snap::{RunState, Viewport};

use crate::app::App;
use crate::theme::GruvboxMaterial;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let status_text = match &app.status_message {
            Some(msg) => format!(" {}", msg),
            None => status_line(app),
        };

        let help_hint = " ↑/↓:snap 1-9:jump n:nearest p:pause q:quit ";
        let used = status_text.chars().count() + help_hint.chars().count();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default()
                    .fg(GruvboxMaterial::FG0)
                    .bg(GruvboxMaterial::BG2),
            ),
            Span::styled(
                " ".repeat(padding_len),
                Style::default().bg(GruvboxMaterial::BG2),
            ),
            Span::styled(
                help_hint,
                Style::default()
                    .fg(GruvboxMaterial::GREY2)
                    .bg(GruvboxMaterial::BG2),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

fn status_line(app: &App) -> String {
    let mode = match (app.snap.state(), app.snap.is_paused()) {
        (_, true) => "PAUSED",
        (RunState::Running, false) => "SNAP",
        (RunState::Stopped, false) => "FREE",
        (RunState::Uninitialized, false) => "OFF",
    };

    let viewport = app.snap.viewport();
    let count = viewport.section_count();
    let section = match app.snap.active_index() {
        Some(index) => format!("{}/{}", index + 1, count),
        None => format!("-/{}", count),
    };

    format!(
        " {} | Section {} | Row {:.0}/{:.0}",
        mode,
        section,
        viewport.scroll_top(),
        viewport.max_top()
    )
}

#[cfg(test)]
mod tests {
    use scrollsnap_core::AppConfig;

    use super::*;

    #[test]
    fn test_status_line() {
        let app = App::new(AppConfig::default(), 80, 24);
        assert_eq!(status_line(&app), " SNAP | Section -/6 | Row 0/120");

        let small = App::new(AppConfig::default(), 20, 24);
        assert!(status_line(&small).starts_with(" FREE"));
    }
}
