//! Application layer: state, filtering and event handling.
//!
//! ```text
//! Zellij input → Event → handle_event → AppState mutations → (render?, Actions)
//! ```
//!
//! - [`filter`]: search and category filter state
//! - [`state`]: the [`AppState`] container
//! - [`handler`]: event processing and click listener semantics
//! - [`modes`]: input mode state machine
//! - [`actions`]: side effects for the plugin host

pub mod actions;
pub mod filter;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use filter::{FilterController, FilterState};
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::{AppState, PageOptions};
