//! Comptoir - terminal widgets for accounting and reporting screens
//!
//! This library provides a kit of self-contained interactive components
//! (searchable selector, paginated filterable table, export button, date
//! range picker, form inputs, actions menu, delete confirmation, sidebar)
//! built with Ratatui, plus a demo application browsing a ledger.
//!
//! # Modules
//!
//! * [`config`] - Application configuration management
//! * [`ledger`] - Accounting entries shown by the demo
//! * [`ui`] - Components, shared plumbing and the demo screen

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Accounting entries, their filters and the XML export
pub mod ledger;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Terminal user interface components and rendering
pub mod ui;
