//! Event handling and state transitions.
//!
//! The plugin shim turns raw Zellij input into [`Event`]s that are already
//! validated: keys become intents, mouse cells become [`ElementId`]s through
//! the hit map, post ids arrive as [`PostId`]. [`handle_event`] applies one
//! event to [`AppState`] and reports whether a re-render is needed along with
//! any [`Action`]s for the host.
//!
//! Clicks go through the page's listeners: [`ViewTree::dispatch_click`]
//! returns the listeners that fire and [`apply_listener`] gives each one its
//! meaning.
//!
//! [`ViewTree::dispatch_click`]: crate::ui::dom::ViewTree::dispatch_click
//!
//! # Example
//!
//! ```rust
//! use postboard::app::{handle_event, AppState, Event, PageOptions};
//! use postboard::store::PostStore;
//! use postboard::ui::Theme;
//!
//! let mut state = AppState::new(PostStore::builtin()?, Theme::default(), PageOptions::default());
//! let (render, actions) = handle_event(&mut state, &Event::SearchChanged("future".into()))?;
//! assert!(render && actions.is_empty());
//! # Ok::<(), postboard::PostboardError>(())
//! ```

use crate::app::modes::InputMode;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::PostId;
use crate::ui::dom::{ElementId, Fired, Listener, Tag};

/// Validated input events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The whole search input value changed.
    SearchChanged(String),
    /// A character typed into the search input.
    Char(char),
    /// Deletes the last character of the search input.
    Backspace,
    /// Starts typing into the search input.
    EnterSearch,
    /// Stops typing; the query is kept.
    ExitSearch,

    /// The category selector was set to a raw option value.
    CategoryChanged(String),
    NextCategory,
    PreviousCategory,

    FocusNext,
    FocusPrevious,
    /// Activates the focused element as if it was clicked.
    Activate,

    /// A click on an element of the page.
    Click(ElementId),
    /// A click at a 0-based pane cell, resolved through the last frame's
    /// hit map.
    ClickAt { row: usize, col: usize },

    /// Opens the overlay for a post.
    OpenPost(PostId),
    CloseOverlay,

    /// Scrolls the page (or the open overlay) by a number of rows.
    Scroll(isize),
    /// Animation frame timer fired.
    Tick,

    /// Closes the overlay if one is open; otherwise leaves search.
    Escape,
    /// Hides the plugin.
    CloseFocus,
}

/// Applies `event` to `state`.
///
/// Returns whether the pane needs repainting and the actions the host should
/// carry out.
///
/// # Errors
///
/// Currently every event is infallible; the `Result` keeps the shim's error
/// path in place for handlers that touch the host.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::SearchChanged(value) => {
            state.search_changed(value);
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            let mut value = state.page.search_value().to_string();
            value.push(*c);
            state.search_changed(&value);
            Ok((true, vec![]))
        }
        Event::Backspace => {
            let mut value = state.page.search_value().to_string();
            if value.pop().is_none() {
                return Ok((false, vec![]));
            }
            state.search_changed(&value);
            Ok((true, vec![]))
        }
        Event::EnterSearch => {
            if state.page.overlay().is_some() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search;
            if let Some(input) = state.page.search_input() {
                state.focus_element(input);
                state.scroll.reveal(input);
            }
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            let changed = state.input_mode != InputMode::Browse;
            state.input_mode = InputMode::Browse;
            Ok((changed, vec![]))
        }

        Event::CategoryChanged(value) => {
            state.category_changed(value);
            Ok((true, vec![]))
        }
        Event::NextCategory => Ok((cycle_category(state, 1), vec![])),
        Event::PreviousCategory => Ok((cycle_category(state, -1), vec![])),

        Event::FocusNext => {
            state.move_focus(1);
            Ok((true, vec![]))
        }
        Event::FocusPrevious => {
            state.move_focus(-1);
            Ok((true, vec![]))
        }
        Event::Activate => match state.focused_element() {
            Some(element) => Ok((click(state, element), vec![])),
            None => Ok((false, vec![])),
        },

        Event::Click(element) => Ok((click(state, *element), vec![])),
        Event::ClickAt { row, col } => match state.hits.hit(*row, *col) {
            Some(element) => Ok((click(state, element), vec![])),
            None => {
                tracing::trace!(row, col, "click on empty cell");
                Ok((false, vec![]))
            }
        },

        Event::OpenPost(id) => Ok((state.open_post(*id), vec![])),
        Event::CloseOverlay => Ok((state.close_overlay(), vec![])),

        Event::Scroll(delta) => {
            state.scroll_by(*delta);
            Ok((true, vec![]))
        }
        Event::Tick => Ok((state.scroll.is_animating(), vec![])),

        Event::Escape => {
            if state.close_overlay() {
                return Ok((true, vec![]));
            }
            let changed = state.input_mode != InputMode::Browse;
            state.input_mode = InputMode::Browse;
            Ok((changed, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
    }
}

fn cycle_category(state: &mut AppState, step: isize) -> bool {
    if state.page.overlay().is_some() {
        return false;
    }
    match state.page.cycle_category(step) {
        Some(value) => {
            state.category_changed(&value);
            true
        }
        None => false,
    }
}

/// Dispatches a click on `target` and applies every listener that fires.
///
/// While the overlay is open, clicks outside of it are dropped.
fn click(state: &mut AppState, target: ElementId) -> bool {
    if state.page.overlay().is_some() && !state.page.is_overlay_element(target) {
        tracing::debug!(?target, "click outside the overlay ignored");
        return false;
    }

    let fired = state.page.tree.dispatch_click(target);
    if fired.is_empty() {
        tracing::trace!(?target, "click fired no listeners");
    }

    let mut changed = false;
    for listener in &fired {
        changed |= apply_listener(state, listener);
    }
    changed
}

/// Gives a fired listener its effect. Returns `true` if the page changed.
pub fn apply_listener(state: &mut AppState, fired: &Fired) -> bool {
    match fired.listener {
        Listener::ReadMore => match state.page.read_more_target(fired.target) {
            Some(id) => state.open_post(id),
            None => false,
        },
        Listener::AnchorScroll => {
            state.focus_element(fired.current);
            state.scroll_to_anchor(fired.current)
        }
        Listener::FocusSearch => {
            state.input_mode = InputMode::Search;
            state.focus_element(fired.current);
            true
        }
        Listener::CycleCategory => {
            let is_select = state
                .page
                .tree
                .element(fired.current)
                .is_some_and(|el| el.tag == Tag::Select);
            if is_select {
                state.focus_element(fired.current);
            }
            cycle_category(state, 1)
        }
        Listener::CloseOverlay => state.close_overlay(),
        Listener::DismissBackdrop => state.close_overlay(),
    }
}
