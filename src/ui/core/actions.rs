use crate::ui::components::auth::{Credentials, Registration};
use crate::ui::components::date_range_picker::DateRange;
use crate::ui::components::export_button::ExportKind;

/// Messages emitted by components and consumed by their owner.
///
/// Components never call back into the caller; every outward notification
/// is one of these values, and `Action::None` means nothing happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Selection
    SelectionChanged {
        selector: String,
        value: String,
    },

    // Table paging
    PageRequested(usize),
    PageSizeRequested(usize),

    // Export
    StartExport(ExportKind),
    ExportSettled {
        kind: ExportKind,
        error: Option<String>,
    },

    // Forms and menus
    InputChanged {
        input: String,
        value: String,
    },
    DateRangeChanged(DateRange),
    MenuAction(String),
    Navigate(String),
    DeleteConfirmed(String),

    // Authentication
    LoginSubmitted(Credentials),
    RegisterSubmitted(Registration),

    // Dialogs
    ShowDialog(DialogType),
    HideDialog,

    // App control
    Quit,
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogType {
    DeleteConfirmation { target: String },
    Error(String),
    Info(String),
    Logs,
}
