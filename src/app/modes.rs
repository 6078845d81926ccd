//! Input mode state machine.
//!
//! The mode decides how keys are interpreted. In [`InputMode::Browse`] keys
//! move focus, activate links and scroll; in [`InputMode::Search`] printable
//! keys edit the search query and the list is re-filtered on every change.
//! Whether an overlay is open is tracked separately by the page, since it is
//! orthogonal to the input mode.
//!
//! # Example
//!
//! ```rust
//! use postboard::app::InputMode;
//!
//! assert_eq!(InputMode::default(), InputMode::Browse);
//! assert!(InputMode::Search.is_typing());
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Focus navigation, link activation and scrolling.
    #[default]
    Browse,

    /// Keystrokes go to the search input.
    ///
    /// Leaving search keeps the query; only editing it changes the list.
    Search,
}

impl InputMode {
    /// `true` while keystrokes edit the search query.
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Search)
    }
}
