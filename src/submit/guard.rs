//! Scope guards held for the duration of one submission.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::page::{Page, BUSY_LABEL};

/// Disables the submit control while alive and restores it on drop.
///
/// Drop runs on every exit path, including panics and a cancelled future.
pub(crate) struct SubmitGuard<'a> {
    page: &'a Page,
    original_label: String,
}

impl<'a> SubmitGuard<'a> {
    pub(crate) fn engage(page: &'a Page) -> Self {
        let original_label = page.with(|view| {
            view.submit.disabled = true;
            std::mem::replace(&mut view.submit.label, BUSY_LABEL.to_string())
        });
        Self {
            page,
            original_label,
        }
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        let label = std::mem::take(&mut self.original_label);
        self.page.with(|view| {
            view.submit.disabled = false;
            view.submit.label = label;
        });
    }
}

/// Claim on a handler's in-flight flag; released on drop.
pub(crate) struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    /// `None` when another submission already holds the flag.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
