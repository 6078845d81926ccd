//! Postboard: a small blog rendered inside a Zellij pane.
//!
//! Postboard lists a fixed set of posts, filters them by a live substring
//! search and by category, and opens a full post in an overlay on demand. In
//! the page, anchor links scroll smoothly to their targets.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, mouse, timer
//! └─────────────────────────────────────────────────────┘
//!                        │ Event
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - AppState (filters, overlay slot, focus, scroll)  │
//! │  - Event handling and click listener semantics      │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────────┐   ┌─────────────────────────┐
//! │ Store (store/)        │   │ UI Layer (ui/)          │
//! │ - Embedded catalog    │   │ - Element tree + page   │
//! │ - Pure queries        │   │ - Layout and painting   │
//! └───────────────────────┘   └─────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/), Infrastructure, Observability    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/postboard.wasm" {
//!         title "Field Notes"
//!         theme "catppuccin-latte"
//!         nav_links "Home=#home,Posts=#posts,About=#about"
//!         scroll "smooth"
//!         about "Written on the train."
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use postboard::{handle_event, initialize, Config, Event, PostId};
//!
//! let mut state = initialize(&Config::default())?;
//! handle_event(&mut state, &Event::SearchChanged("future".into()))?;
//! assert_eq!(state.page.listed_post_ids(), [PostId::new(2)]);
//!
//! handle_event(&mut state, &Event::OpenPost(PostId::new(2)))?;
//! assert!(state.page.overlay().is_some());
//! # Ok::<(), postboard::PostboardError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod store;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, PageOptions};
pub use domain::{Post, PostId, PostboardError, Result};
pub use store::PostStore;
pub use ui::Theme;

use std::collections::BTreeMap;
use ui::{NavLink, ScrollBehavior};

const DEFAULT_NAV_LINKS: &str = "Home=#home,Posts=#posts,About=#about";

/// Plugin configuration parsed from Zellij's configuration block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Page heading. Default: `"Postboard"`.
    pub title: String,

    /// Built-in theme name: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored when `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a TOML theme file; `~` maps to the sandbox `/host`. See
    /// [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: String,

    /// Navigation links, in display order.
    pub nav_links: Vec<NavLink>,

    /// How anchor links scroll.
    pub scroll: ScrollBehavior,

    /// Footer text.
    pub about: String,
}

impl Default for Config {
    fn default() -> Self {
        let page = PageOptions::default();
        Self {
            title: page.title,
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
            nav_links: page.nav_links,
            scroll: page.scroll_behavior,
            about: page.about,
        }
    }
}

impl Config {
    /// Parses the plugin's configuration map. Missing, blank or malformed
    /// values fall back to their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use postboard::Config;
    /// use postboard::ui::ScrollBehavior;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("nav_links".to_string(), "Top=#home, Bottom=#about".to_string());
    /// map.insert("scroll".to_string(), "instant".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.nav_links.len(), 2);
    /// assert_eq!(config.nav_links[1].href, "#about");
    /// assert_eq!(config.scroll, ScrollBehavior::Instant);
    /// assert_eq!(config.title, "Postboard");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        let nav_links = get("nav_links")
            .map(parse_nav_links)
            .filter(|links| !links.is_empty())
            .unwrap_or(defaults.nav_links);

        let scroll = get("scroll").map_or(defaults.scroll, |raw| {
            ScrollBehavior::parse(raw).unwrap_or_else(|| {
                tracing::debug!(scroll = raw, "unknown scroll behaviour, using default");
                defaults.scroll
            })
        });

        Self {
            title: get("title").map_or(defaults.title, String::from),
            theme_name: get("theme").map(String::from),
            theme_file: get("theme_file").map(String::from),
            trace_level: get("trace_level").map_or(defaults.trace_level, String::from),
            nav_links,
            scroll,
            about: get("about").map_or(defaults.about, String::from),
        }
    }

    /// Page content derived from this configuration.
    #[must_use]
    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            title: self.title.clone(),
            about: self.about.clone(),
            nav_links: self.nav_links.clone(),
            scroll_behavior: self.scroll,
        }
    }
}

/// Parses `Label=#fragment` pairs separated by commas. Entries without a
/// label or a fragment are skipped; a missing `#` is added.
fn parse_nav_links(raw: &str) -> Vec<NavLink> {
    raw.split(',')
        .filter_map(|entry| {
            let (label, target) = entry.split_once('=')?;
            let (label, target) = (label.trim(), target.trim().trim_start_matches('#'));
            if label.is_empty() || target.is_empty() {
                tracing::debug!(entry, "skipping malformed nav link");
                return None;
            }
            Some(NavLink::new(label, &format!("#{target}")))
        })
        .collect()
}

/// Loads the theme: `theme_file` first, then `theme_name`, then the default.
/// Failures are logged and fall through to the next option.
fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        match Theme::from_file(&path) {
            Ok(theme) => return theme,
            Err(e) => tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default"),
        }
    }

    config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
        Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        })
    })
}

/// Builds the application state: loads the built-in catalog, builds the
/// page skeleton, the navigation, the search bar and the category selector,
/// and renders the full post list.
///
/// # Errors
///
/// Returns an error if the embedded catalog fails to parse or validate.
pub fn initialize(config: &Config) -> Result<AppState> {
    tracing::debug!("initializing postboard");

    let store = PostStore::builtin()?;
    let theme = load_theme(config);
    tracing::debug!(posts = store.all().len(), theme = %theme.name, "catalog and theme loaded");

    Ok(AppState::new(store, theme, config.page_options()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_configuration_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("scroll", "bouncy"),
            ("nav_links", "nonsense,=#x,Empty="),
            ("title", "   "),
        ]));
        assert_eq!(config.scroll, ScrollBehavior::Smooth);
        assert_eq!(config.nav_links, Config::default().nav_links);
        assert_eq!(config.title, "Postboard");
    }

    #[test]
    fn nav_links_get_a_leading_hash() {
        let links = parse_nav_links("Posts=posts, About = #about");
        assert_eq!(links, vec![NavLink::new("Posts", "#posts"), NavLink::new("About", "#about")]);
    }

    #[test]
    fn theme_falls_back_through_file_then_name() {
        let config = Config {
            theme_file: Some("/definitely/not/here.toml".to_string()),
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(load_theme(&config).name, "catppuccin-latte");

        let unknown = Config {
            theme_name: Some("solarized".to_string()),
            ..Config::default()
        };
        assert_eq!(load_theme(&unknown).name, "catppuccin-mocha");
    }

    #[test]
    fn initialize_builds_the_page_from_configuration() {
        let config = Config::from_zellij(&map(&[("title", "Field Notes"), ("nav_links", "Top=#home")]));
        let state = initialize(&config).unwrap();

        let heading = state.page.tree.get_element_by_id("home").unwrap();
        let h1 = state.page.tree.children(heading)[0];
        assert_eq!(state.page.tree.element(h1).unwrap().text, "Field Notes");
        assert_eq!(state.page.focusables().len(), 1 + 2 + 2);
        assert_eq!(state.page.listed_post_ids().len(), 2);
    }
}
