//! Results region: score bar plus matching and missing skills.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::page::ResultsRegion;
use crate::tui::state::{App, Focus};
use crate::tui::theme::Theme;
use crate::tui::widgets::card::CardWidget;
use crate::tui::widgets::{gauge, tags};

pub(crate) fn draw_results(
    area: Rect,
    f: &mut ratatui::Frame,
    app: &App,
    results: &ResultsRegion,
    theme: Theme,
) {
    if !results.is_visible() {
        let hint = Line::from(Span::styled(
            "  Submit a resume to see how it matches the job description.",
            Style::default().fg(theme.muted),
        ));
        CardWidget::new(" Results ").line(hint).render(area, f, &theme);
        return;
    }

    // Borders and the two-column indent.
    let inner_width = area.width.saturating_sub(4);

    let mut lines = vec![
        Line::from(""),
        gauge::gauge_line(&theme, results.fill_percent, &results.score_text, inner_width),
        Line::from(""),
        Line::from(Span::styled(
            format!("Matching skills ({})", results.matching_skills.len()),
            Style::default().fg(theme.strong).add_modifier(Modifier::BOLD),
        )),
    ];
    lines.extend(tags::tag_lines(
        &results.matching_skills,
        theme.strong,
        &theme,
        inner_width,
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Missing skills ({})", results.missing_skills.len()),
        Style::default().fg(theme.weak).add_modifier(Modifier::BOLD),
    )));
    lines.extend(tags::tag_lines(
        &results.missing_skills,
        theme.weak,
        &theme,
        inner_width,
    ));

    CardWidget::new(" Results ")
        .lines(lines)
        .focused(app.focus == Focus::Results)
        .scroll(app.results_scroll)
        .render(area, f, &theme);
}
