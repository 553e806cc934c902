//! TUI screen drawing functions.

pub(crate) mod alert;
pub(crate) mod form;
pub(crate) mod results;
