//! Page view-model
//!
//! An explicit stand-in for the document the submission handler works on:
//! the form, its submit control, the results region and a blocking alert.
//! Surfaces (CLI report, TUI) only ever read from it.

mod render;

use std::borrow::Cow;
use std::sync::{Arc, Mutex, PoisonError};

use crate::matching::{MatchForm, MatchResult};

pub use render::render_results;

/// Label of the idle submit control.
pub const SUBMIT_LABEL: &str = "Analyze Match";
/// Label shown while a submission is in flight.
pub const BUSY_LABEL: &str = "Analyzing...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub disabled: bool,
    pub label: String,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            disabled: false,
            label: SUBMIT_LABEL.to_string(),
        }
    }
}

/// One visible skill tag. The text is kept verbatim and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillTag {
    text: String,
}

impl SkillTag {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text safe to write to a terminal: control characters are escaped so a
    /// skill name cannot smuggle in escape sequences.
    pub fn display_text(&self) -> Cow<'_, str> {
        if !self.text.chars().any(char::is_control) {
            return Cow::Borrowed(&self.text);
        }

        let mut escaped = String::with_capacity(self.text.len() + 8);
        for c in self.text.chars() {
            if c.is_control() {
                escaped.extend(c.escape_default());
            } else {
                escaped.push(c);
            }
        }
        Cow::Owned(escaped)
    }
}

/// Ordered list of tags; `.skills-list` in the original page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillList {
    tags: Vec<SkillTag>,
}

impl SkillList {
    /// Replace every tag, keeping order and duplicates.
    pub fn replace_with<I, S>(&mut self, skills: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = skills.into_iter().map(SkillTag::new).collect();
    }

    pub fn tags(&self) -> &[SkillTag] {
        &self.tags
    }

    pub fn texts(&self) -> Vec<&str> {
        self.tags.iter().map(SkillTag::text).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsRegion {
    pub hidden: bool,
    /// Progress fill, in percent. Passed through unclamped.
    pub fill_percent: f64,
    pub score_text: String,
    pub matching_skills: SkillList,
    pub missing_skills: SkillList,
    scroll_requested: bool,
}

impl Default for ResultsRegion {
    fn default() -> Self {
        Self {
            hidden: true,
            fill_percent: 0.0,
            score_text: String::new(),
            matching_skills: SkillList::default(),
            missing_skills: SkillList::default(),
            scroll_requested: false,
        }
    }
}

impl ResultsRegion {
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    pub fn request_scroll(&mut self) {
        self.scroll_requested = true;
    }

    /// Consume a pending scroll-into-view request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    /// The result currently on display, if any.
    pub fn displayed_result(&self) -> Option<MatchResult> {
        if self.hidden {
            return None;
        }
        Some(MatchResult {
            match_score: self.fill_percent,
            matching_skills: self
                .matching_skills
                .texts()
                .into_iter()
                .map(str::to_string)
                .collect(),
            missing_skills: self
                .missing_skills
                .texts()
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
    }
}

/// Everything a surface draws.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub form: MatchForm,
    pub submit: SubmitControl,
    pub results: ResultsRegion,
    alert: Option<String>,
}

impl PageView {
    pub fn new(form: MatchForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    /// Raise a blocking alert. A newer alert replaces an undismissed one.
    pub fn alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn alert_message(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) -> Option<String> {
        self.alert.take()
    }
}

/// Shared handle to a [`PageView`].
///
/// The handler task and the draw loop both hold one; every access locks
/// briefly and no lock is held across an await.
#[derive(Debug, Clone, Default)]
pub struct Page {
    view: Arc<Mutex<PageView>>,
}

impl Page {
    pub fn new(view: PageView) -> Self {
        Self {
            view: Arc::new(Mutex::new(view)),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut PageView) -> R) -> R {
        let mut view = self.view.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut view)
    }

    pub fn snapshot(&self) -> PageView {
        self.with(|view| view.clone())
    }
}
