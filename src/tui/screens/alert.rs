//! Blocking alert drawn over the page.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::tui::theme::Theme;

pub(crate) fn draw_alert(area: Rect, f: &mut ratatui::Frame, message: &str, theme: Theme) {
    let popup_area = centered_rect(70, 40, area);
    f.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  ✕  ", Style::default().fg(theme.weak)),
            Span::styled(
                "Request failed",
                Style::default().fg(theme.weak).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];
    // Server-supplied text, so no control characters reach the terminal.
    lines.extend(message.lines().map(|line| {
        let safe: String = line.chars().filter(|c| !c.is_control()).collect();
        Line::from(Span::styled(format!("  {safe}"), Style::default().fg(theme.text)))
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  [Enter to dismiss]",
        Style::default().fg(theme.muted),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.weak));

    let para = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(para, popup_area);
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(rows[1])[1]
}
