//! Dialog components module

pub mod common;
mod delete_dialog;
mod message_dialog;

pub use delete_dialog::{DeleteDialog, DialogButton, IconSize};
pub use message_dialog::{LogsDialog, MessageDialog, MessageKind};
