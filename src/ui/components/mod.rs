//! Reusable UI components
//!
//! Every component is a self-contained state machine behind the
//! [`Component`](crate::ui::core::Component) trait. None of them depends on
//! another; the demo [`AppComponent`](crate::ui::app_component::AppComponent)
//! wires them together.

pub mod actions_dropdown;
pub mod auth;
pub mod data_table;
pub mod date_range_picker;
pub mod dialogs;
pub mod export_button;
pub mod input_with_label;
pub mod scrollbar_helper;
pub mod select_search;
pub mod sidebar_component;
pub mod textarea_with_label;
pub mod variants;

pub use actions_dropdown::{ActionItem, ActionVariant, ActionsDropdown};
pub use auth::{Credentials, LoginScreen, RegisterScreen, Registration};
pub use data_table::{Column, ColumnFilter, PaginatedFilterableTable, TablePage};
pub use date_range_picker::{DateRange, DateRangePicker, PeriodType};
pub use export_button::{ExportButton, ExportError, ExportHandler, ExportKind, InFlightExport};
pub use input_with_label::{InputWithLabel, SecurePassword};
pub use select_search::{MatchMode, SearchableSelector, SelectOption};
pub use sidebar_component::SidebarComponent;
pub use textarea_with_label::TextareaWithLabel;
pub use variants::{ButtonVariant, SizeVariant};
