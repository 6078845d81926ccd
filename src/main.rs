//! Zellij plugin wrapper and entry point.
//!
//! The thin integration layer between the Postboard library and the Zellij
//! plugin system. It validates input at the boundary: keys become typed
//! [`Event`]s according to the current input mode, and mouse clicks are
//! passed on as pane cells that the library hit-tests against the last
//! painted frame.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, build `AppState`
//! 2. **Subscribe**: `Key`, `Mouse` and `Timer` events
//! 3. **Update**: map the Zellij event, delegate to `handle_event`, run actions
//! 4. **Render**: lay out and paint; while a smooth scroll is running, a
//!    short timer requests the next frame
//!
//! # Keybindings
//!
//! Browse mode:
//! - `j`/`Down`, `k`/`Up`: move focus across links and inputs
//! - `Enter`: activate the focused element
//! - `/`: search
//! - `Tab`/`Shift+Tab`: next/previous category
//! - `PageDown`/`PageUp`: scroll
//! - `x`/`Esc`: close the open post
//! - `q`: hide the plugin
//!
//! Search mode:
//! - characters edit the query, `Backspace` deletes
//! - `Enter`/`Esc`: stop typing (the query is kept)

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(not(target_family = "wasm"), allow(dead_code, unused_imports))]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use postboard::{handle_event, Action, AppState, Config, Event, InputMode};

#[cfg(target_family = "wasm")]
register_plugin!(State);

/// Delay between smooth-scroll frames, in seconds.
const FRAME_INTERVAL: f64 = 0.016;

/// Plugin state wrapper.
#[derive(Default)]
struct State {
    /// `None` until `load` has run, or if the embedded catalog is invalid.
    app: Option<AppState>,
    /// Pane height from the last render, used to size page scrolls.
    rows: usize,
    /// A frame timer is already pending.
    frame_scheduled: bool,
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        postboard::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(title = %config.title, nav_links = config.nav_links.len(), "parsed configuration");

        match postboard::initialize(&config) {
            Ok(app) => self.app = Some(app),
            Err(e) => tracing::error!(error = %e, "failed to initialize postboard"),
        }

        subscribe(&[EventType::Key, EventType::Mouse, EventType::Timer]);
        tracing::debug!("plugin load complete");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let _guard = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => self.map_key_event(key),
            zellij_tile::prelude::Event::Mouse(mouse) => Self::map_mouse_event(mouse),
            zellij_tile::prelude::Event::Timer(_) => {
                self.frame_scheduled = false;
                Some(Event::Tick)
            }
            _ => None,
        };
        let Some(our_event) = our_event else {
            return false;
        };

        let Some(app) = self.app.as_mut() else {
            return false;
        };
        match handle_event(app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        let Some(app) = self.app.as_mut() else {
            print!("Postboard failed to load its posts; see the trace file for details.");
            return;
        };

        let frame = postboard::ui::render(app, rows, cols);
        print!("{}", frame.output);

        if frame.animating && !self.frame_scheduled {
            self.frame_scheduled = true;
            set_timeout(FRAME_INTERVAL);
        }
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(mouse) => format!("Mouse({mouse:?})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard input to application events for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");
        let app = self.app.as_ref()?;
        let page = self.page_rows();
        let overlay_open = app.page.overlay().is_some();

        if app.input_mode == InputMode::Search && !overlay_open {
            return match key.bare_key {
                BareKey::Enter | BareKey::Esc => Some(Event::ExitSearch),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Ctrl]) => Some(Event::Char(c)),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::FocusNext,
            BareKey::Up | BareKey::Char('k') => Event::FocusPrevious,
            BareKey::Enter => Event::Activate,
            BareKey::Esc => Event::Escape,
            BareKey::Char('x') if overlay_open => Event::CloseOverlay,
            BareKey::Char('/') => Event::EnterSearch,
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PreviousCategory,
            BareKey::Tab => Event::NextCategory,
            BareKey::PageDown => Event::Scroll(page),
            BareKey::PageUp => Event::Scroll(-page),
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Rows moved by a page scroll: the page body minus a little overlap.
    fn page_rows(&self) -> isize {
        let body = self.rows.saturating_sub(4).max(1);
        isize::try_from(body).unwrap_or(isize::MAX)
    }

    /// Left clicks become cell clicks; the wheel scrolls three rows.
    fn map_mouse_event(mouse: Mouse) -> Option<Event> {
        match mouse {
            Mouse::LeftClick(line, col) => {
                let row = usize::try_from(line).ok()?;
                Some(Event::ClickAt { row, col })
            }
            Mouse::ScrollDown(_) => Some(Event::Scroll(3)),
            Mouse::ScrollUp(_) => Some(Event::Scroll(-3)),
            _ => None,
        }
    }

    fn execute_action(action: Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("hiding plugin");
                hide_self();
            }
        }
    }
}

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("postboard is a Zellij plugin; build it for wasm32-wasip1 and load it from Zellij.");
}
