use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use scrollsnap_core::snap::{Mark, Viewport};

use crate::app::App;
use crate::theme::GruvboxMaterial;

pub struct SectionsWidget;

impl SectionsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let viewport = app.snap.viewport();
        let scroll_row = viewport.scroll_top().round();
        let count = viewport.section_count();

        for index in 0..count {
            let (Some(top), Some(height)) =
                (viewport.section_top(index), viewport.section_height(index))
            else {
                continue;
            };
            let Some(slice) = visible_slice(top - scroll_row, height, area.height) else {
                continue;
            };

            let mark = viewport.mark_of(index).unwrap_or_default();
            let lines = section_lines(index, count, height as u16, area.width, mark);
            let paragraph = Paragraph::new(lines)
                .style(Style::default().bg(GruvboxMaterial::section_bg(index)))
                .scroll((slice.skip, 0));

            let rect = Rect {
                x: area.x,
                y: area.y + slice.y,
                width: area.width,
                height: slice.height,
            };
            frame.render_widget(paragraph, rect);
        }
    }
}

/// Part of a section that falls inside the area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slice {
    /// First visible row, relative to the area
    y: u16,
    height: u16,
    /// Rows of the section scrolled off above the area
    skip: u16,
}

/// Clip a section starting `start` rows below the area top
fn visible_slice(start: f64, height: f64, area_height: u16) -> Option<Slice> {
    let end = start + height.round();
    let first = start.max(0.0);
    let last = end.min(f64::from(area_height));
    if last <= first {
        return None;
    }
    Some(Slice {
        y: first as u16,
        height: (last - first) as u16,
        skip: (first - start) as u16,
    })
}

fn section_lines(index: usize, count: usize, height: u16, width: u16, mark: Mark) -> Vec<Line<'static>> {
    let accent = GruvboxMaterial::section_accent(index);
    let (title_style, badge) = match mark {
        Mark::Active => (
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
            " ● active",
        ),
        Mark::Inactive => (Style::default().fg(GruvboxMaterial::GREY2), ""),
        Mark::Inert => (Style::default().fg(GruvboxMaterial::GREY0), " (snapping off)"),
    };

    let mut lines = vec![Line::default(); height as usize];
    if lines.is_empty() {
        return lines;
    }

    lines[0] = Line::from(vec![
        Span::styled(format!("▌ Section {}", index + 1), title_style),
        Span::styled(badge, Style::default().fg(accent)),
    ]);

    let middle = lines.len() / 2;
    if middle > 0 {
        lines[middle] = Line::from(Span::styled(
            format!("{} / {}", index + 1, count),
            title_style,
        ))
        .alignment(Alignment::Center);
    }

    let last = lines.len() - 1;
    if last > middle {
        lines[last] = Line::from(Span::styled(
            "─".repeat(width as usize),
            Style::default().fg(GruvboxMaterial::BG3),
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use scrollsnap_core::snap::Key;
    use scrollsnap_core::AppConfig;

    use super::*;
    use crate::input::Action;

    #[test]
    fn test_visible_slice() {
        assert_eq!(
            visible_slice(0.0, 10.0, 24),
            Some(Slice { y: 0, height: 10, skip: 0 })
        );
        assert_eq!(
            visible_slice(-4.0, 10.0, 24),
            Some(Slice { y: 0, height: 6, skip: 4 })
        );
        assert_eq!(
            visible_slice(20.0, 10.0, 24),
            Some(Slice { y: 20, height: 4, skip: 0 })
        );
        assert_eq!(visible_slice(-10.0, 10.0, 24), None);
        assert_eq!(visible_slice(24.0, 10.0, 24), None);
    }

    #[test]
    fn test_section_lines_layout() {
        let lines = section_lines(0, 3, 8, 20, Mark::Active);
        assert_eq!(lines.len(), 8);
        assert!(lines[0].to_string().contains("Section 1"));
        assert!(lines[0].to_string().contains("active"));
        assert_eq!(lines[4].to_string(), "1 / 3");
        assert_eq!(lines[7].to_string().chars().count(), 20);

        assert!(section_lines(0, 3, 0, 20, Mark::Inert).is_empty());
    }

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_render_follows_scroll_offset() {
        let mut config = AppConfig::default();
        config.snap.duration_frames = 0;
        let mut app = App::new(config, 60, 20);
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        terminal
            .draw(|frame| SectionsWidget::render(frame, frame.area(), &app))
            .unwrap();
        assert!(row(&terminal, 0).contains("Section 1"));

        app.handle_action(Action::Snap(Key::Down));
        app.tick(std::time::Instant::now());
        terminal
            .draw(|frame| SectionsWidget::render(frame, frame.area(), &app))
            .unwrap();
        assert!(row(&terminal, 0).contains("Section 2"));
        assert!(row(&terminal, 0).contains("active"));
    }
}
