//! User interface: the element tree, its layout and painting.
//!
//! ```text
//! Page (ViewTree) → layout → Lines + hit boxes → components → ANSI frame
//! ```
//!
//! - [`dom`]: the in-memory element tree and click listeners
//! - [`page`]: builds the document, the post list and the overlay
//! - [`layout`]: flows the tree into styled lines
//! - [`scroll`]: viewport position and smooth scrolling
//! - [`renderer`]: frame coordinator
//! - [`components`]: painters for the page body, overlay and footer
//! - [`helpers`]: shared painting utilities
//! - [`viewmodel`]: plain data passed from layout to painting
//! - [`theme`]: colour schemes and ANSI sequences

pub mod components;
pub mod dom;
pub mod helpers;
pub mod layout;
pub mod page;
pub mod renderer;
pub mod scroll;
pub mod theme;
pub mod viewmodel;

pub use dom::{ElementId, ViewTree};
pub use page::{NavLink, Overlay, Page};
pub use renderer::{render, Frame};
pub use scroll::ScrollBehavior;
pub use theme::Theme;
pub use viewmodel::{EmptyState, FooterInfo, HitMap};
