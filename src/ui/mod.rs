//! UI module for Comptoir
//!
//! This module holds the widget kit, the shared component plumbing and the
//! demo application wiring them together.

pub mod app_component;
pub mod components;
pub mod core;
pub mod layout;
pub mod renderer;

pub use app_component::AppComponent;
pub use layout::LayoutManager;
pub use renderer::run_app;
