//! Skill tags laid out as wrapped chips.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::page::SkillList;
use crate::tui::theme::Theme;

/// Wrap tags into lines no wider than `width`. Tag text is shown literally.
pub(crate) fn tag_lines(list: &SkillList, color: Color, theme: &Theme, width: u16) -> Vec<Line<'static>> {
    if list.is_empty() {
        return vec![Line::from(Span::styled("(none)", Style::default().fg(theme.muted)))];
    }

    let width = width.max(1) as usize;
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0usize;

    for tag in list.tags() {
        let chip = format!("[{}]", tag.display_text());
        let len = chip.chars().count();
        if used > 0 && used + 1 + len > width {
            lines.push(Line::from(std::mem::take(&mut current)));
            used = 0;
        }
        if used > 0 {
            current.push(Span::raw(" "));
            used += 1;
        }
        current.push(Span::styled(chip, Style::default().fg(color)));
        used += len;
    }
    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}
