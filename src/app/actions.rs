//! Side effects requested by the event handler.
//!
//! The handler only mutates [`AppState`](crate::app::AppState); anything that
//! needs the plugin host is returned as an [`Action`] and carried out by the
//! plugin shim.

/// Commands executed by the plugin runtime after an event is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,
}
