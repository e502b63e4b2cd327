//! Enumerations for TUI state management.

/// Application state for the terminal user interface.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AppState {
    Welcome,
    Dashboard,
    EditNotes,
    Help,
    Confirm,
}

/// Kind of message shown in the status bar, which decides its colour.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Destructive actions that need a confirmation first.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ConfirmAction {
    FullReset,
}

impl ConfirmAction {
    /// Description shown in the confirmation dialog.
    pub fn describe(self) -> &'static str {
        match self {
            ConfirmAction::FullReset => "Full reset: forget your name and all tasks",
        }
    }
}
