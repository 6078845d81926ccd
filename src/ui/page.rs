//! Page construction: the document skeleton, the post list and the overlay.
//!
//! [`Page`] owns the [`ViewTree`] and knows where the well-known regions live
//! (`nav`, `main`, `footer`). Everything it builds is plain data; the painter
//! turns it into terminal output and the application layer reacts to the
//! listeners it registers.
//!
//! # Document structure
//!
//! ```text
//! body
//! ├── header#home > h1
//! ├── nav > a*, input.search-input, select.category-filter > option*
//! ├── main#posts > article.blog-post*
//! ├── footer#about
//! └── div.modal > div.modal-content          (only while a post is open)
//! ```

use crate::domain::{Post, PostId};
use crate::ui::dom::{ElementId, Listener, Propagation, Tag, ViewTree};

const READ_MORE_CLASS: &str = "read-more";
const MODAL_CLASS: &str = "modal";

/// Label shown for the "no category" selector option.
pub const ALL_CATEGORIES: &str = "All Categories";

/// An in-page navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    /// Target in `#fragment` form.
    pub href: String,
}

impl NavLink {
    /// A link labelled `label` pointing at `href` (`#fragment`).
    #[must_use]
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// Handles to the elements of the open overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub post: PostId,
    /// The full-pane `div.modal`; clicks on it dismiss the overlay.
    pub backdrop: ElementId,
    /// The `div.modal-content` box.
    pub content: ElementId,
    /// The `span.close` affordance.
    pub close: ElementId,
}

/// The rendered document.
#[derive(Debug, Clone)]
pub struct Page {
    pub tree: ViewTree,
    nav: ElementId,
    main: ElementId,
    footer: ElementId,
    search_input: Option<ElementId>,
    category_select: Option<ElementId>,
    overlay: Option<Overlay>,
}

impl Page {
    /// Builds the empty skeleton with a heading and footer text.
    #[must_use]
    pub fn new(title: &str, about: &str) -> Self {
        let mut tree = ViewTree::new();
        let body = tree.root();

        let header = tree.create_in(body, Tag::Header, "");
        tree.set_attr(header, "id", "home");
        tree.create_in(header, Tag::H1, title);

        let nav = tree.create_in(body, Tag::Nav, "");

        let main = tree.create_in(body, Tag::Main, "");
        tree.set_attr(main, "id", "posts");
        tree.on_click(main, Listener::ReadMore, Propagation::Bubble);

        let footer = tree.create_in(body, Tag::Footer, about);
        tree.set_attr(footer, "id", "about");

        Self {
            tree,
            nav,
            main,
            footer,
            search_input: None,
            category_select: None,
            overlay: None,
        }
    }

    /// The `nav` region holding the links, the search input and the
    /// category selector.
    #[must_use]
    pub const fn nav(&self) -> ElementId {
        self.nav
    }

    /// The `main#posts` region the post list is rendered into.
    #[must_use]
    pub const fn main(&self) -> ElementId {
        self.main
    }

    /// The `footer#about` region.
    #[must_use]
    pub const fn footer(&self) -> ElementId {
        self.footer
    }

    /// The search input, once [`Page::setup_search_bar`] has run.
    #[must_use]
    pub const fn search_input(&self) -> Option<ElementId> {
        self.search_input
    }

    /// The category selector, once [`Page::setup_category_filter`] has run.
    #[must_use]
    pub const fn category_select(&self) -> Option<ElementId> {
        self.category_select
    }

    /// Handles to the open overlay, or `None` when no post is shown.
    #[must_use]
    pub const fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// Adds one anchor per link to the navigation region.
    pub fn setup_nav(&mut self, links: &[NavLink]) {
        for link in links {
            let anchor = self.tree.create_in(self.nav, Tag::Anchor, &link.label);
            self.tree.set_attr(anchor, "href", &link.href);
            self.tree.on_click(anchor, Listener::AnchorScroll, Propagation::Bubble);
        }
    }

    /// Adds the search input to the navigation region.
    pub fn setup_search_bar(&mut self) {
        let input = self.tree.create_in(self.nav, Tag::Input, "");
        self.tree.set_attr(input, "type", "text");
        self.tree.set_attr(input, "placeholder", "Search posts...");
        self.tree.set_attr(input, "value", "");
        self.tree.add_class(input, "search-input");
        self.tree.on_click(input, Listener::FocusSearch, Propagation::Bubble);
        self.search_input = Some(input);
    }

    /// Adds the category selector: "All Categories" (empty value) followed
    /// by one option per category, in the order given.
    pub fn setup_category_filter(&mut self, categories: &[String]) {
        let select = self.tree.create_in(self.nav, Tag::Select, "");
        self.tree.add_class(select, "category-filter");
        self.tree.set_attr(select, "value", "");

        let all = self.tree.create_in(select, Tag::Option, ALL_CATEGORIES);
        self.tree.set_attr(all, "value", "");
        for category in categories {
            let option = self.tree.create_in(select, Tag::Option, category);
            self.tree.set_attr(option, "value", category);
        }

        self.tree.on_click(select, Listener::CycleCategory, Propagation::Bubble);
        self.category_select = Some(select);
    }

    /// Current text of the search input.
    #[must_use]
    pub fn search_value(&self) -> &str {
        self.search_input
            .and_then(|input| self.tree.attr(input, "value"))
            .unwrap_or_default()
    }

    /// Mirrors the current query into the search input's `value` attribute.
    pub fn set_search_value(&mut self, value: &str) {
        if let Some(input) = self.search_input {
            self.tree.set_attr(input, "value", value);
        }
    }

    /// Value of the selected category option (`""` for all categories).
    #[must_use]
    pub fn category_value(&self) -> &str {
        self.category_select
            .and_then(|select| self.tree.attr(select, "value"))
            .unwrap_or_default()
    }

    /// Values of all selector options in order.
    #[must_use]
    pub fn category_options(&self) -> Vec<String> {
        self.category_select.map_or_else(Vec::new, |select| {
            self.tree
                .children(select)
                .iter()
                .filter_map(|option| self.tree.attr(*option, "value"))
                .map(String::from)
                .collect()
        })
    }

    /// Selects the option with `value`. Returns `false` if no such option
    /// exists, leaving the selection unchanged.
    pub fn select_category(&mut self, value: &str) -> bool {
        let Some(select) = self.category_select else {
            return false;
        };
        if !self.category_options().iter().any(|option| option == value) {
            return false;
        }
        self.tree.set_attr(select, "value", value);
        true
    }

    /// Moves the selection `step` options forward (negative: backward),
    /// wrapping around, and returns the new value.
    pub fn cycle_category(&mut self, step: isize) -> Option<String> {
        let options = self.category_options();
        if options.is_empty() {
            return None;
        }
        let current = options
            .iter()
            .position(|option| option == self.category_value())
            .unwrap_or(0);
        let len = options.len() as isize;
        let next = (current as isize + step).rem_euclid(len) as usize;
        let value = options[next].clone();
        self.select_category(&value);
        Some(value)
    }

    /// Replaces the contents of `main` with one article per post.
    ///
    /// Each article holds the title, the meta line, the full content and a
    /// "Read More →" link carrying the post id. Clicks on the links are
    /// handled by the single delegated listener on `main`, so re-rendering
    /// never adds listeners.
    ///
    /// # Parameters
    ///
    /// * `posts` - Posts to list, in display order; empty shows nothing
    pub fn render_list(&mut self, posts: &[&Post]) {
        let _span = tracing::debug_span!("render_list", post_count = posts.len()).entered();

        self.tree.clear_children(self.main);
        for post in posts {
            let article = self.tree.create_in(self.main, Tag::Article, "");
            self.tree.add_class(article, "blog-post");
            self.append_post_body(article, post);

            let link = self.tree.create_in(article, Tag::Anchor, "Read More →");
            self.tree.add_class(link, READ_MORE_CLASS);
            self.tree.set_attr(link, "href", "#");
            self.tree.set_attr(link, "data-post-id", &post.id.to_string());
        }
    }

    fn append_post_body(&mut self, parent: ElementId, post: &Post) {
        self.tree.create_in(parent, Tag::H2, &post.title);

        let meta = self.tree.create_in(parent, Tag::Div, "");
        self.tree.add_class(meta, "meta");
        for label in post.meta_labels() {
            self.tree.create_in(meta, Tag::Span, &label);
        }

        let content = self.tree.create_in(parent, Tag::Div, "");
        self.tree.add_class(content, "content");
        self.tree.create_in(content, Tag::Paragraph, &post.content);
    }

    /// Ids of the posts currently listed, in display order.
    #[must_use]
    pub fn listed_post_ids(&self) -> Vec<PostId> {
        self.read_more_links()
            .into_iter()
            .filter_map(|link| self.read_more_target(link))
            .collect()
    }

    /// All "read more" links in document order.
    #[must_use]
    pub fn read_more_links(&self) -> Vec<ElementId> {
        self.tree
            .descendants(self.main)
            .into_iter()
            .filter(|id| {
                self.tree
                    .element(*id)
                    .is_some_and(|el| el.has_class(READ_MORE_CLASS))
            })
            .collect()
    }

    /// The post a clicked element refers to, if it is a "read more" link
    /// carrying a well-formed id.
    #[must_use]
    pub fn read_more_target(&self, target: ElementId) -> Option<PostId> {
        let element = self.tree.element(target)?;
        if !element.has_class(READ_MORE_CLASS) {
            return None;
        }
        element.attr("data-post-id").and_then(PostId::parse)
    }

    /// Opens the overlay for `post`, replacing any overlay already open.
    pub fn render_overlay(&mut self, post: &Post) -> Overlay {
        if self.close_overlay() {
            tracing::debug!(post_id = %post.id, "replacing open overlay");
        }

        let body = self.tree.root();
        let backdrop = self.tree.create_in(body, Tag::Div, "");
        self.tree.add_class(backdrop, MODAL_CLASS);

        let content = self.tree.create_in(backdrop, Tag::Div, "");
        self.tree.add_class(content, "modal-content");

        let close = self.tree.create_in(content, Tag::Span, "×");
        self.tree.add_class(close, "close");
        self.append_post_body(content, post);

        self.tree.on_click(close, Listener::CloseOverlay, Propagation::Bubble);
        self.tree.on_click(backdrop, Listener::DismissBackdrop, Propagation::TargetOnly);

        let overlay = Overlay {
            post: post.id,
            backdrop,
            content,
            close,
        };
        self.overlay = Some(overlay);
        overlay
    }

    /// Removes the overlay and its listeners. Returns `false` if none was
    /// open.
    pub fn close_overlay(&mut self) -> bool {
        match self.overlay.take() {
            Some(overlay) => self.tree.remove(overlay.backdrop),
            None => false,
        }
    }

    /// Returns `true` for elements that belong to an overlay.
    #[must_use]
    pub fn is_overlay_element(&self, id: ElementId) -> bool {
        self.overlay
            .is_some_and(|overlay| self.tree.is_within(id, overlay.backdrop))
    }

    /// Resolves a nav anchor's `href="#fragment"` to the element with that
    /// id attribute.
    #[must_use]
    pub fn anchor_target(&self, anchor: ElementId) -> Option<ElementId> {
        let href = self.tree.attr(anchor, "href")?;
        let fragment = href.strip_prefix('#').unwrap_or(href);
        if fragment.is_empty() {
            return None;
        }
        self.tree.get_element_by_id(fragment)
    }

    /// Keyboard-focusable elements in document order.
    ///
    /// While an overlay is open only its close affordance is focusable.
    #[must_use]
    pub fn focusables(&self) -> Vec<ElementId> {
        if let Some(overlay) = self.overlay {
            return vec![overlay.close];
        }
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .filter(|id| {
                self.tree
                    .element(*id)
                    .is_some_and(|el| matches!(el.tag, Tag::Anchor | Tag::Input | Tag::Select))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PostStore;

    fn page_with_posts() -> (Page, PostStore) {
        let store = PostStore::builtin().unwrap();
        let mut page = Page::new("Postboard", "About this blog");
        page.setup_nav(&[NavLink::new("Home", "#home"), NavLink::new("About", "#about")]);
        page.setup_search_bar();
        page.setup_category_filter(store.categories());
        let posts: Vec<&Post> = store.all().iter().collect();
        page.render_list(&posts);
        (page, store)
    }

    #[test]
    fn selector_lists_all_then_each_category() {
        let (page, _) = page_with_posts();
        assert_eq!(page.category_options(), ["", "Web Development", "Technology"]);
        let select = page.category_select().unwrap();
        let first = page.tree.children(select)[0];
        assert_eq!(page.tree.element(first).unwrap().text, ALL_CATEGORIES);
    }

    #[test]
    fn list_entries_carry_title_meta_content_and_link() {
        let (page, store) = page_with_posts();
        let articles = page.tree.children(page.main()).to_vec();
        assert_eq!(articles.len(), 2);

        let first = store.by_id(PostId::new(1)).unwrap();
        let texts: Vec<String> = page
            .tree
            .descendants(articles[0])
            .iter()
            .filter_map(|id| page.tree.element(*id))
            .map(|el| el.text.clone())
            .filter(|t| !t.is_empty())
            .collect();
        assert_eq!(
            texts,
            [
                first.title.clone(),
                "Posted on: March 15, 2024".to_string(),
                "Author: John Doe".to_string(),
                "Category: Web Development".to_string(),
                first.content.clone(),
                "Read More →".to_string(),
            ]
        );
        assert_eq!(page.listed_post_ids(), [PostId::new(1), PostId::new(2)]);
    }

    #[test]
    fn rendering_twice_does_not_duplicate_entries() {
        let (mut page, store) = page_with_posts();
        let posts: Vec<&Post> = store.all().iter().collect();
        let before = page.tree.len();
        page.render_list(&posts);
        page.render_list(&posts);
        assert_eq!(page.tree.len(), before);
        assert_eq!(page.listed_post_ids(), [PostId::new(1), PostId::new(2)]);
    }

    #[test]
    fn empty_list_clears_main() {
        let (mut page, _) = page_with_posts();
        page.render_list(&[]);
        assert!(page.tree.children(page.main()).is_empty());
        assert!(page.read_more_links().is_empty());
    }

    #[test]
    fn overlay_replaces_previous_one() {
        let (mut page, store) = page_with_posts();
        let first = page.render_overlay(store.by_id(PostId::new(1)).unwrap());
        let second = page.render_overlay(store.by_id(PostId::new(2)).unwrap());
        assert!(!page.tree.contains(first.backdrop));
        assert_eq!(page.overlay().map(|o| o.post), Some(PostId::new(2)));
        let modals = page
            .tree
            .children(page.tree.root())
            .iter()
            .filter(|id| page.tree.element(**id).is_some_and(|el| el.has_class("modal")))
            .count();
        assert_eq!(modals, 1);
        assert!(page.is_overlay_element(second.close));
    }

    #[test]
    fn repeated_open_close_does_not_accumulate_listeners() {
        let (mut page, store) = page_with_posts();
        let baseline = page.tree.listener_count();
        let post = store.by_id(PostId::new(1)).unwrap();
        for _ in 0..5 {
            page.render_overlay(post);
            assert_eq!(page.tree.listener_count(), baseline + 2);
            assert!(page.close_overlay());
        }
        assert_eq!(page.tree.listener_count(), baseline);
        assert!(!page.close_overlay());
    }

    #[test]
    fn anchors_resolve_to_fragment_targets() {
        let (mut page, _) = page_with_posts();
        let anchors: Vec<ElementId> = page
            .tree
            .children(page.nav())
            .iter()
            .copied()
            .filter(|id| page.tree.element(*id).is_some_and(|el| el.tag == Tag::Anchor))
            .collect();
        assert_eq!(page.anchor_target(anchors[1]), Some(page.footer()));

        let broken = page.tree.create_in(page.nav(), Tag::Anchor, "Contact");
        page.tree.set_attr(broken, "href", "#contact");
        assert_eq!(page.anchor_target(broken), None);
    }

    #[test]
    fn category_cycles_and_wraps() {
        let (mut page, _) = page_with_posts();
        assert_eq!(page.cycle_category(1).as_deref(), Some("Web Development"));
        assert_eq!(page.cycle_category(1).as_deref(), Some("Technology"));
        assert_eq!(page.cycle_category(1).as_deref(), Some(""));
        assert_eq!(page.cycle_category(-1).as_deref(), Some("Technology"));
        assert!(!page.select_category("Gardening"));
        assert_eq!(page.category_value(), "Technology");
    }

    #[test]
    fn focus_is_trapped_in_open_overlay() {
        let (mut page, store) = page_with_posts();
        assert_eq!(page.focusables().len(), 2 + 2 + 2);
        let overlay = page.render_overlay(store.by_id(PostId::new(2)).unwrap());
        assert_eq!(page.focusables(), vec![overlay.close]);
    }

    #[test]
    fn read_more_target_requires_link_class_and_valid_id() {
        let (mut page, _) = page_with_posts();
        let links = page.read_more_links();
        assert_eq!(page.read_more_target(links[0]), Some(PostId::new(1)));
        assert_eq!(page.read_more_target(page.main()), None);
        page.tree.set_attr(links[1], "data-post-id", "nope");
        assert_eq!(page.read_more_target(links[1]), None);
    }
}
