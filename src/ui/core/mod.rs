//! Core UI functionality shared by every widget.
//!
//! # Module Components
//!
//! - [`actions`] - Messages components emit towards their owner
//! - [`component`] - Base component trait
//! - [`event_handler`] - Terminal event polling
//! - [`pointer`] - Scoped document-level pointer listeners
//! - [`task_manager`] - Background work (exports) reporting back as actions
//!
//! # Architecture
//!
//! Components own their local state exclusively and expose it through the
//! [`Component`] trait. They never call into their owner: input events go
//! in, [`Action`]s come out, and the owner decides what to do with them.
//! Everything runs on the UI loop; only exports leave it, through the
//! [`TaskManager`].

pub mod actions;
pub mod component;
pub mod event_handler;
pub mod pointer;
pub mod task_manager;

pub use actions::{Action, DialogType};
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
pub use pointer::{PointerHub, PointerSubscription};
pub use task_manager::{TaskId, TaskManager};
