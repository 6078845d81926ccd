//! The post catalog and its query operations.

use crate::domain::error::{PostboardError, Result};
use crate::domain::{Post, PostId};
use serde::Deserialize;
use std::collections::HashSet;

const BUILTIN_CATALOG: &str = include_str!("../../posts/posts.toml");

/// On-disk shape of a catalog document.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    posts: Vec<Post>,
}

/// Ordered, immutable collection of posts.
///
/// Every query returns posts in definition order. The distinct categories are
/// derived once on construction, in first-occurrence order.
#[derive(Debug, Clone)]
pub struct PostStore {
    posts: Vec<Post>,
    categories: Vec<String>,
}

impl PostStore {
    /// Builds a store from posts, validating the catalog invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::Catalog`] if an id is zero or repeated, or if
    /// a title, author or category is blank.
    pub fn new(posts: Vec<Post>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(posts.len());
        for post in &posts {
            if post.id.get() == 0 {
                return Err(PostboardError::Catalog(format!(
                    "post \"{}\" has id 0; ids must be positive",
                    post.title
                )));
            }
            if !seen.insert(post.id) {
                return Err(PostboardError::Catalog(format!("duplicate post id {}", post.id)));
            }
            for (field, value) in [
                ("title", &post.title),
                ("author", &post.author),
                ("category", &post.category),
            ] {
                if value.trim().is_empty() {
                    return Err(PostboardError::Catalog(format!(
                        "post {} has an empty {field}",
                        post.id
                    )));
                }
            }
        }

        let mut categories: Vec<String> = Vec::new();
        for post in &posts {
            if !categories.contains(&post.category) {
                categories.push(post.category.clone());
            }
        }

        tracing::debug!(
            post_count = posts.len(),
            category_count = categories.len(),
            "post catalog loaded"
        );

        Ok(Self { posts, categories })
    }

    /// Parses and validates a TOML catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::Toml`] for malformed documents and
    /// [`PostboardError::Catalog`] for invariant violations.
    pub fn from_toml(document: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(document)?;
        Self::new(file.posts)
    }

    /// The catalog compiled into the plugin.
    ///
    /// # Errors
    ///
    /// Fails only if the embedded `posts/posts.toml` is itself invalid.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_CATALOG)
    }

    /// All posts in definition order.
    #[must_use]
    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    /// Posts whose title or content contains `term`.
    ///
    /// `term` must already be lower-cased; the post fields are lower-cased
    /// here. An empty term matches every post.
    #[must_use]
    pub fn matching_text(&self, term: &str) -> Vec<&Post> {
        self.posts.iter().filter(|post| post.contains_term(term)).collect()
    }

    /// Posts whose category equals `category` exactly.
    ///
    /// `None` and `Some("")` mean "no category selected" and match every post.
    #[must_use]
    pub fn matching_category(&self, category: Option<&str>) -> Vec<&Post> {
        match category {
            None | Some("") => self.posts.iter().collect(),
            Some(wanted) => self.posts.iter().filter(|post| post.category == wanted).collect(),
        }
    }

    /// Looks a post up by id.
    #[must_use]
    pub fn by_id(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// Distinct categories in first-occurrence order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u32, title: &str, category: &str, content: &str) -> Post {
        Post::new(PostId::new(id), title, "Someone", "May 1, 2024", category, content)
    }

    fn three_posts() -> PostStore {
        PostStore::new(vec![
            post(1, "Rust Lifetimes", "Programming", "Borrowing explained."),
            post(2, "Sourdough Basics", "Cooking", "Flour, water, patience."),
            post(3, "Async Rust", "Programming", "Futures and executors."),
        ])
        .unwrap()
    }

    #[test]
    fn builtin_catalog_has_the_two_launch_posts() {
        let store = PostStore::builtin().unwrap();
        let titles: Vec<&str> = store.all().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Getting Started with Web Development", "The Future of Artificial Intelligence"]
        );
        assert_eq!(store.categories(), ["Web Development", "Technology"]);
    }

    #[test]
    fn categories_keep_first_occurrence_order() {
        let store = three_posts();
        assert_eq!(store.categories(), ["Programming", "Cooking"]);
    }

    #[test]
    fn every_substring_of_title_or_content_finds_its_post() {
        let store = three_posts();
        for p in store.all() {
            for text in [&p.title, &p.content] {
                let lower = text.to_lowercase();
                let chars: Vec<char> = lower.chars().collect();
                for start in 0..chars.len() {
                    let end = (start + 4).min(chars.len());
                    let needle: String = chars[start..end].iter().collect();
                    assert!(
                        store.matching_text(&needle).iter().any(|m| m.id == p.id),
                        "{needle:?} should match post {}",
                        p.id
                    );
                }
            }
        }
    }

    #[test]
    fn text_match_is_case_insensitive_on_fields() {
        let store = three_posts();
        let ids: Vec<u32> = store.matching_text("rust").iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, [1, 3]);
        assert_eq!(store.matching_text("").len(), 3);
        assert!(store.matching_text("xyz-no-match").is_empty());
    }

    #[test]
    fn category_match_is_exact() {
        let store = three_posts();
        assert_eq!(store.matching_category(Some("Cooking")).len(), 1);
        assert!(store.matching_category(Some("cooking")).is_empty());
        assert_eq!(store.matching_category(Some("")).len(), 3);
        assert_eq!(store.matching_category(None).len(), 3);
        for p in store.all() {
            assert!(store.matching_category(Some(&p.category)).iter().any(|m| m.id == p.id));
        }
    }

    #[test]
    fn by_id_resolves_known_and_rejects_unknown() {
        let store = three_posts();
        assert_eq!(store.by_id(PostId::new(2)).map(|p| p.title.as_str()), Some("Sourdough Basics"));
        assert!(store.by_id(PostId::new(999)).is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = PostStore::new(vec![post(1, "A", "X", ""), post(1, "B", "X", "")]).unwrap_err();
        assert!(matches!(err, PostboardError::Catalog(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn rejects_zero_id_and_blank_fields() {
        assert!(PostStore::new(vec![post(0, "A", "X", "")]).is_err());
        assert!(PostStore::new(vec![post(1, "  ", "X", "")]).is_err());
        assert!(PostStore::new(vec![post(1, "A", "", "")]).is_err());
    }

    #[test]
    fn malformed_toml_is_a_toml_error() {
        let err = PostStore::from_toml("[[posts]]\nid = \"one\"").unwrap_err();
        assert!(matches!(err, PostboardError::Toml(_)));
    }

    #[test]
    fn empty_document_is_an_empty_store() {
        let store = PostStore::from_toml("").unwrap();
        assert!(store.all().is_empty());
        assert!(store.categories().is_empty());
    }
}
