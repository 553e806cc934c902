//! Upload form: resume path, job description and the submit control.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::page::SubmitControl;
use crate::tui::animation::spinner_frame;
use crate::tui::state::{App, Focus};
use crate::tui::theme::Theme;
use crate::tui::widgets::card::CardWidget;

pub(crate) fn draw_form(
    area: Rect,
    f: &mut ratatui::Frame,
    app: &App,
    submit: &SubmitControl,
    theme: Theme,
) {
    let rows = [
        (Focus::ResumePath, "Resume file", app.resume_input.as_str()),
        (Focus::JobDescription, "Job description", app.job_input.as_str()),
    ];

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (focus, label, value) in rows {
        let selected = app.focus == focus;
        let selector_style = Style::default().fg(if selected { theme.focus } else { theme.muted });
        let label_style = if selected {
            Style::default().fg(theme.focus).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };

        let mut spans = vec![
            Span::styled(if selected { " › " } else { "   " }, selector_style),
            Span::styled(format!("{label:<18}"), label_style),
        ];
        if value.is_empty() && !selected {
            spans.push(Span::styled("—", Style::default().fg(theme.muted)));
        } else {
            spans.push(Span::styled(
                value.to_string(),
                Style::default().fg(theme.text).add_modifier(if selected {
                    Modifier::UNDERLINED
                } else {
                    Modifier::empty()
                }),
            ));
        }
        if selected {
            spans.push(Span::styled("▏", Style::default().fg(theme.focus)));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(submit_line(app, submit, theme));

    CardWidget::new(" Upload ")
        .lines(lines)
        .focused(matches!(
            app.focus,
            Focus::ResumePath | Focus::JobDescription | Focus::Submit
        ))
        .render(area, f, &theme);
}

fn submit_line<'a>(app: &App, submit: &'a SubmitControl, theme: Theme) -> Line<'a> {
    let selected = app.focus == Focus::Submit;
    if submit.disabled {
        let spinner = spinner_frame(app.started.elapsed());
        return Line::from(vec![
            Span::styled(format!("   {spinner} "), Style::default().fg(theme.accent)),
            Span::styled(submit.label.as_str(), Style::default().fg(theme.muted)),
        ]);
    }

    let style = if selected {
        Style::default()
            .fg(theme.focus)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    };
    Line::from(vec![
        Span::raw("   "),
        Span::styled(format!("[ {} ]", submit.label), style),
    ])
}
