//! Dropdown and explicit-wait helpers for MyRent browser suites.
//!
//! Select controls in the MyRent UI are populated asynchronously after a
//! prior selection, so reads and selections must not run before the option
//! list has loaded. This crate provides the population wait, option reads,
//! and the select-by-value-or-first policy used by the page objects.

pub mod dropdown;
pub mod error;
pub mod model;
pub mod source;
pub mod wait;

pub use dropdown::Dropdown;
pub use error::{Result, UiError};
pub use model::{OptionEntry, Selection};
pub use source::OptionSource;
pub use wait::{DEFAULT_POLL_INTERVAL, DEFAULT_POPULATE_TIMEOUT, wait_until_populated};
