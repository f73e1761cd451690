//! Contract for the desktop shell's dialog and prompt widgets.

use std::path::PathBuf;

/// Visual weight of a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One dialog request: a title, a message, and an ordered list of button
/// labels where index 0 is the primary action.
#[derive(Debug, Clone)]
pub struct Dialog {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub buttons: Vec<String>,
}

impl Dialog {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Info,
            buttons: vec!["OK".to_string()],
        }
    }

    pub fn warning(
        title: impl Into<String>,
        message: impl Into<String>,
        buttons: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Warning,
            buttons,
        }
    }
}

/// External collaborator rendering dialogs and prompts.
pub trait Dialogs {
    /// Present a dialog; returns the index of the chosen button, or `None`
    /// when the dialog was dismissed without a choice.
    fn show(&self, dialog: &Dialog) -> Option<usize>;

    /// Directory-selection prompt; `None` when the user dismissed it.
    fn select_directory(&self) -> Option<PathBuf>;

    /// The recoverable-error dialog: presents an error with enough detail
    /// to diagnose, without crashing the application.
    fn report_error(&self, message: &str);
}
