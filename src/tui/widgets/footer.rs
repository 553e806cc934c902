//! Keybind hints along the bottom row.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::theme::Theme;

pub(crate) fn draw_footer(area: Rect, f: &mut ratatui::Frame, theme: &Theme, hints: &[(&str, &str)]) {
    let spans: Vec<Span> = hints
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let sep = (i > 0).then(|| Span::styled(" │ ", Style::default().fg(theme.muted)));
            sep.into_iter().chain([
                Span::styled(*key, Style::default().fg(theme.accent)),
                Span::styled(format!(" {action}"), Style::default().fg(theme.muted)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
