//! TUI application state types.

use std::path::PathBuf;
use std::time::Instant;

use tokio::task::JoinHandle;

use crate::matching::{JOB_DESCRIPTION_FIELD, RESUME_FIELD};
use crate::page::Page;
use crate::submit::SubmitOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    ResumePath,
    JobDescription,
    Submit,
    Results,
}

impl Focus {
    const ORDER: [Focus; 4] = [
        Focus::ResumePath,
        Focus::JobDescription,
        Focus::Submit,
        Focus::Results,
    ];

    fn cycle(self, results_visible: bool, step: isize) -> Self {
        let len = if results_visible {
            Self::ORDER.len()
        } else {
            Self::ORDER.len() - 1
        } as isize;
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0) as isize;
        let next = (idx + step).rem_euclid(len);
        Self::ORDER[next as usize]
    }

    pub fn next(self, results_visible: bool) -> Self {
        self.cycle(results_visible, 1)
    }

    pub fn prev(self, results_visible: bool) -> Self {
        self.cycle(results_visible, -1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Submit,
}

pub(crate) struct App {
    pub focus: Focus,
    pub resume_input: String,
    pub job_input: String,
    pub results_scroll: u16,
    pub pending: Option<JoinHandle<SubmitOutcome>>,
    pub pending_action: Option<Action>,
    pub exit: bool,
    pub started: Instant,
}

impl App {
    /// Start from whatever the page's form already holds.
    pub fn new(page: &Page) -> Self {
        let (resume_input, job_input) = page.with(|view| {
            (
                view.form
                    .file_path(RESUME_FIELD)
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
                view.form
                    .text_value(JOB_DESCRIPTION_FIELD)
                    .unwrap_or_default()
                    .to_string(),
            )
        });

        Self {
            focus: Focus::ResumePath,
            resume_input,
            job_input,
            results_scroll: 0,
            pending: None,
            pending_action: None,
            exit: false,
            started: Instant::now(),
        }
    }

    pub fn active_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::ResumePath => Some(&mut self.resume_input),
            Focus::JobDescription => Some(&mut self.job_input),
            Focus::Submit | Focus::Results => None,
        }
    }

    /// Copy the inputs into the page's form, the way typing updates a live form.
    pub fn sync_form(&self, page: &Page) {
        let resume = resume_path(&self.resume_input);
        let job = self.job_input.clone();
        page.with(|view| {
            view.form.set_file(RESUME_FIELD, resume);
            view.form.set_text(JOB_DESCRIPTION_FIELD, job);
        });
    }
}

/// Resume path as typed; `~/` expands to the home directory.
pub(crate) fn resume_path(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(dirs) = directories::UserDirs::new() {
            return Some(dirs.home_dir().join(rest));
        }
    }
    Some(PathBuf::from(trimmed))
}
