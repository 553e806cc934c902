//! TUI color theme.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub accent: Color,
    pub strong: Color,
    pub fair: Color,
    pub weak: Color,

    pub border: Color,
    pub focus: Color,
    pub muted: Color,
    pub text: Color,
    pub text_dim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(0, 212, 255),
            strong: Color::Rgb(163, 230, 53),
            fair: Color::Rgb(251, 191, 36),
            weak: Color::Rgb(255, 68, 85),
            border: Color::Gray,
            focus: Color::Rgb(0, 212, 255),
            muted: Color::DarkGray,
            text: Color::White,
            text_dim: Color::Gray,
        }
    }
}

impl Theme {
    pub fn score_color(&self, score: f64) -> Color {
        if score >= 75.0 {
            self.strong
        } else if score >= 50.0 {
            self.accent
        } else if score >= 25.0 {
            self.fair
        } else {
            self.weak
        }
    }

    pub fn score_label(score: f64) -> &'static str {
        if score >= 75.0 {
            "Strong fit"
        } else if score >= 50.0 {
            "Good fit"
        } else if score >= 25.0 {
            "Partial fit"
        } else {
            "Weak fit"
        }
    }
}
