#[path = "components/actions_dropdown.rs"]
mod actions_dropdown;


#[path = "components/date_range_picker.rs"]
mod date_range_picker;

#[path = "components/dialogs.rs"]
mod dialogs;

#[path = "components/export_button.rs"]
mod export_button;


#[path = "components/select_search.rs"]
mod select_search;

#[path = "components/sidebar.rs"]
mod sidebar;

#[path = "components/variants.rs"]
mod variants;
