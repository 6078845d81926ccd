//! Search and category filter state.
//!
//! [`FilterController`] owns the only mutable application data that affects
//! which posts are listed. Both inputs are independent: changing one never
//! resets the other, and the visible set is always the intersection of the
//! two store queries.

use crate::domain::{Post, PostId};
use crate::store::PostStore;
use std::collections::HashSet;

/// Current search term and category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Lower-cased search text; empty means no constraint.
    pub search_term: String,
    /// Selected category; `None` means all categories.
    pub selected_category: Option<String>,
}

/// Applies filter changes and computes the visible posts.
#[derive(Debug, Clone, Default)]
pub struct FilterController {
    state: FilterState,
}

impl FilterController {
    /// No search term and no category: every post is visible.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current search term and category selection.
    #[must_use]
    pub const fn state(&self) -> &FilterState {
        &self.state
    }

    /// Stores the lower-cased search text. The category is left untouched.
    pub fn on_search_changed(&mut self, raw: &str) {
        self.state.search_term = raw.to_lowercase();
        tracing::trace!(term = %self.state.search_term, "search term updated");
    }

    /// Stores the selector value. An empty value clears the category filter;
    /// the search term is left untouched.
    pub fn on_category_changed(&mut self, raw: &str) {
        self.state.selected_category = if raw.is_empty() {
            None
        } else {
            Some(raw.to_string())
        };
        tracing::trace!(category = ?self.state.selected_category, "category updated");
    }

    /// Posts matching both the search term and the category, in definition
    /// order.
    #[must_use]
    pub fn visible<'a>(&self, store: &'a PostStore) -> Vec<&'a Post> {
        let _span = tracing::debug_span!(
            "filter_posts",
            total_posts = store.all().len(),
            term_len = self.state.search_term.len(),
            category = ?self.state.selected_category
        )
        .entered();

        let in_category: HashSet<PostId> = store
            .matching_category(self.state.selected_category.as_deref())
            .into_iter()
            .map(|post| post.id)
            .collect();

        let visible: Vec<&Post> = store
            .matching_text(&self.state.search_term)
            .into_iter()
            .filter(|post| in_category.contains(&post.id))
            .collect();

        tracing::debug!(visible_count = visible.len(), "filters applied");
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(posts: &[&Post]) -> Vec<u32> {
        posts.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn defaults_show_everything() {
        let store = PostStore::builtin().unwrap();
        let filter = FilterController::new();
        assert_eq!(filter.state(), &FilterState::default());
        assert_eq!(ids(&filter.visible(&store)), [1, 2]);
    }

    #[test]
    fn search_is_lower_cased_before_matching() {
        let store = PostStore::builtin().unwrap();
        let mut filter = FilterController::new();
        filter.on_search_changed("FUTURE");
        assert_eq!(filter.state().search_term, "future");
        assert_eq!(ids(&filter.visible(&store)), [2]);
    }

    #[test]
    fn category_change_keeps_search_and_vice_versa() {
        let store = PostStore::builtin().unwrap();
        let mut filter = FilterController::new();
        filter.on_search_changed("lorem");
        filter.on_category_changed("Technology");
        assert_eq!(filter.state().search_term, "lorem");
        assert!(filter.visible(&store).is_empty());

        filter.on_category_changed("");
        assert_eq!(filter.state().selected_category, None);
        assert_eq!(ids(&filter.visible(&store)), [1]);

        filter.on_search_changed("");
        filter.on_category_changed("Web Development");
        assert_eq!(filter.state().selected_category.as_deref(), Some("Web Development"));
        assert_eq!(ids(&filter.visible(&store)), [1]);
    }

    #[test]
    fn visible_is_the_intersection_of_both_queries() {
        let store = PostStore::builtin().unwrap();
        let terms = ["", "future", "lorem", "dolor", "xyz-no-match", "e"];
        let categories = ["", "Technology", "Web Development", "Unknown"];
        let mut filter = FilterController::new();

        for term in terms {
            for category in categories {
                filter.on_search_changed(term);
                filter.on_category_changed(category);

                let by_text: HashSet<PostId> =
                    store.matching_text(term).iter().map(|p| p.id).collect();
                let by_category: HashSet<PostId> = store
                    .matching_category(Some(category))
                    .iter()
                    .map(|p| p.id)
                    .collect();
                let expected: HashSet<PostId> = by_text.intersection(&by_category).copied().collect();
                let actual: HashSet<PostId> = filter.visible(&store).iter().map(|p| p.id).collect();

                assert_eq!(actual, expected, "term {term:?}, category {category:?}");
            }
        }
    }
}
