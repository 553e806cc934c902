//! Top header bar with title and service address.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::theme::Theme;

pub(crate) fn draw_header(area: Rect, f: &mut ratatui::Frame, theme: &Theme, endpoint: &str) {
    let title = Line::from(vec![
        Span::styled(
            "RESUME MATCH",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  //  {endpoint}"),
            Style::default().fg(theme.text_dim),
        ),
    ]);
    let rule = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(theme.border),
    ));

    f.render_widget(Paragraph::new(vec![title, rule]), area);
}
