//! Application state.
//!
//! [`AppState`] is the single owner of everything that changes while the
//! plugin runs: the filter inputs, the page tree (list and overlay slot),
//! keyboard focus and the scroll position. Handlers receive it by mutable
//! reference; nothing lives in globals.
//!
//! # Example
//!
//! ```rust
//! use postboard::app::{AppState, PageOptions};
//! use postboard::store::PostStore;
//! use postboard::ui::Theme;
//!
//! let store = PostStore::builtin()?;
//! let mut state = AppState::new(store, Theme::default(), PageOptions::default());
//! state.search_changed("future");
//! assert_eq!(state.page.listed_post_ids().len(), 1);
//! # Ok::<(), postboard::PostboardError>(())
//! ```

use super::filter::FilterController;
use super::modes::InputMode;
use crate::domain::PostId;
use crate::store::PostStore;
use crate::ui::dom::ElementId;
use crate::ui::page::{NavLink, Page};
use crate::ui::scroll::{Scroll, ScrollBehavior};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, HitMap};

/// Static page content chosen at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub title: String,
    pub about: String,
    pub nav_links: Vec<NavLink>,
    pub scroll_behavior: ScrollBehavior,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "Postboard".to_string(),
            about: "A small blog rendered in your terminal.".to_string(),
            nav_links: vec![
                NavLink::new("Home", "#home"),
                NavLink::new("Posts", "#posts"),
                NavLink::new("About", "#about"),
            ],
            scroll_behavior: ScrollBehavior::Smooth,
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: PostStore,
    pub filter: FilterController,
    pub page: Page,
    pub input_mode: InputMode,

    /// Index into [`Page::focusables`].
    pub focus_index: Option<usize>,
    /// Focus to restore when the overlay closes.
    saved_focus: Option<usize>,

    pub scroll: Scroll,
    /// First visible line of the overlay content.
    pub overlay_scroll: usize,
    pub scroll_behavior: ScrollBehavior,

    pub theme: Theme,

    /// Hit boxes of the last painted frame.
    pub hits: HitMap,
}

impl AppState {
    /// Builds the page and renders the full post list.
    ///
    /// The page gets its navigation, search input and category selector
    /// before the first list render. Filters start empty, focus is unset and
    /// the page is scrolled to the top.
    ///
    /// # Parameters
    ///
    /// * `store` - Validated post catalog
    /// * `theme` - Colour scheme for painting
    /// * `options` - Title, footer text, nav links and scroll behaviour
    ///
    /// # Returns
    ///
    /// A state listing every post in definition order with no overlay open.
    #[must_use]
    pub fn new(store: PostStore, theme: Theme, options: PageOptions) -> Self {
        let _span = tracing::debug_span!("initialize_page", posts = store.all().len()).entered();

        let mut page = Page::new(&options.title, &options.about);
        page.setup_nav(&options.nav_links);
        page.setup_search_bar();
        page.setup_category_filter(store.categories());

        let mut state = Self {
            store,
            filter: FilterController::new(),
            page,
            input_mode: InputMode::Browse,
            focus_index: None,
            saved_focus: None,
            scroll: Scroll::default(),
            overlay_scroll: 0,
            scroll_behavior: options.scroll_behavior,
            theme,
            hits: HitMap::default(),
        };
        state.refresh_list();
        state
    }

    /// Handles a change of the search input: stores the term and re-renders
    /// the list. The category selection is kept.
    pub fn search_changed(&mut self, raw: &str) {
        self.page.set_search_value(raw);
        self.filter.on_search_changed(raw);
        self.refresh_list();
    }

    /// Handles a change of the category selector. The search term is kept.
    ///
    /// A value that is not one of the selector's options is still applied
    /// to the filter, which then matches nothing.
    pub fn category_changed(&mut self, raw: &str) {
        if !self.page.select_category(raw) {
            tracing::debug!(category = raw, "category not offered by the selector");
        }
        self.filter.on_category_changed(raw);
        self.refresh_list();
    }

    /// Recomputes the visible posts and re-renders the list.
    pub fn refresh_list(&mut self) {
        let focused = self.focused_element();
        let visible = self.filter.visible(&self.store);
        self.page.render_list(&visible);

        // Keep focus on the same element when it survived the re-render.
        let focusables = self.page.focusables();
        self.focus_index = match focused.and_then(|id| focusables.iter().position(|f| *f == id)) {
            Some(index) => Some(index),
            None => self.focus_index.map(|i| i.min(focusables.len().saturating_sub(1))),
        };
    }

    /// Opens the overlay for `id`. Unknown ids are ignored.
    ///
    /// Returns `true` if an overlay is now showing that post.
    pub fn open_post(&mut self, id: PostId) -> bool {
        let Some(post) = self.store.by_id(id) else {
            tracing::debug!(post_id = %id, "no post with this id, overlay not opened");
            return false;
        };

        if self.page.overlay().is_none() {
            self.saved_focus = self.focus_index;
        }
        self.page.render_overlay(post);
        self.overlay_scroll = 0;
        self.focus_index = Some(0);
        tracing::debug!(post_id = %id, "overlay opened");
        true
    }

    /// Closes the overlay and restores the focus held before it opened.
    pub fn close_overlay(&mut self) -> bool {
        if !self.page.close_overlay() {
            return false;
        }
        self.focus_index = self.saved_focus.take();
        self.overlay_scroll = 0;
        tracing::debug!("overlay closed");
        true
    }

    /// The element holding keyboard focus.
    #[must_use]
    pub fn focused_element(&self) -> Option<ElementId> {
        self.focus_index
            .and_then(|index| self.page.focusables().get(index).copied())
    }

    /// Moves focus `step` positions through the focusable elements, wrapping
    /// at both ends, and scrolls the newly focused element into view.
    pub fn move_focus(&mut self, step: isize) {
        let count = self.page.focusables().len();
        if count == 0 {
            self.focus_index = None;
            return;
        }

        let next = match self.focus_index {
            Some(current) => (current as isize + step).rem_euclid(count as isize) as usize,
            None if step >= 0 => 0,
            None => count - 1,
        };
        self.focus_index = Some(next);

        if self.page.overlay().is_none() {
            if let Some(element) = self.focused_element() {
                self.scroll.reveal(element);
            }
        }
    }

    /// Gives focus to `element` if it is focusable.
    pub fn focus_element(&mut self, element: ElementId) {
        if let Some(index) = self.page.focusables().iter().position(|f| *f == element) {
            self.focus_index = Some(index);
        }
    }

    /// Requests a scroll to the element named by a nav anchor's fragment.
    ///
    /// Returns `false` when the fragment does not resolve.
    pub fn scroll_to_anchor(&mut self, anchor: ElementId) -> bool {
        match self.page.anchor_target(anchor) {
            Some(target) => {
                self.scroll.scroll_into_view(target, self.scroll_behavior);
                true
            }
            None => {
                tracing::debug!(href = ?self.page.tree.attr(anchor, "href"), "anchor target not found");
                false
            }
        }
    }

    /// Scrolls the overlay when it is open, the page otherwise.
    pub fn scroll_by(&mut self, delta: isize) {
        if self.page.overlay().is_some() {
            self.overlay_scroll = self.overlay_scroll.saturating_add_signed(delta);
        } else {
            self.scroll.scroll_by(delta);
        }
    }

    /// Key hints for the current mode.
    #[must_use]
    pub fn footer_info(&self) -> FooterInfo {
        let keybindings = if self.page.overlay().is_some() {
            "x/esc: close | PgUp/PgDn: scroll"
        } else if self.input_mode.is_typing() {
            "type to search | backspace: delete | enter/esc: done"
        } else {
            "j/k: move | enter: open | /: search | tab: category | q: hide"
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}
