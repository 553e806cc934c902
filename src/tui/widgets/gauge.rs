//! Match score bar.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::report::score_bar;
use crate::tui::theme::Theme;

const LABEL: &str = "Match score ";

/// One line: label, bar sized to `width`, then the score text as rendered.
pub(crate) fn gauge_line(theme: &Theme, fill_percent: f64, score_text: &str, width: u16) -> Line<'static> {
    let color = theme.score_color(fill_percent);
    let suffix = format!("  {score_text}  {}", Theme::score_label(fill_percent));
    let bar_width = (width as usize)
        .saturating_sub(LABEL.len())
        .saturating_sub(suffix.chars().count());
    let (filled, empty) = score_bar(fill_percent, bar_width);

    Line::from(vec![
        Span::styled(LABEL, Style::default().fg(theme.text)),
        Span::styled(filled, Style::default().fg(color)),
        Span::styled(empty, Style::default().fg(theme.muted)),
        Span::styled(suffix, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}
