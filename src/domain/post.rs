//! Blog post domain model.
//!
//! A [`Post`] is an immutable record identified by a [`PostId`]. Posts are
//! created once when the catalog is loaded and never modified afterwards.

use serde::Deserialize;
use std::fmt;

/// Stable identifier of a post.
///
/// Ids are positive and unique within a catalog. They are carried through the
/// page as the `data-post-id` attribute of "read more" links and parsed back
/// with [`PostId::parse`] when a link is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct PostId(u32);

impl PostId {
    /// Wraps a raw id. Catalog validation rejects `0`; [`PostId::parse`]
    /// never produces it.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw numeric id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Parses an id from an attribute value.
    ///
    /// Returns `None` for anything that is not a positive decimal integer, so
    /// a tampered or stale attribute degrades to "no such post".
    ///
    /// # Examples
    ///
    /// ```
    /// use postboard::domain::PostId;
    ///
    /// assert_eq!(PostId::parse("12"), Some(PostId::new(12)));
    /// assert_eq!(PostId::parse(" 3 "), Some(PostId::new(3)));
    /// assert_eq!(PostId::parse("0"), None);
    /// assert_eq!(PostId::parse("abc"), None);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u32>().ok().filter(|id| *id > 0).map(Self)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable blog entry.
///
/// `date` is a display string and is never parsed. `content` may be long;
/// it is shown in full both in the list and in the overlay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub date: String,
    pub author: String,
    pub category: String,
    pub content: String,
}

impl Post {
    /// Creates a post from borrowed field values.
    #[must_use]
    pub fn new(
        id: PostId,
        title: &str,
        author: &str,
        date: &str,
        category: &str,
        content: &str,
    ) -> Self {
        Self {
            id,
            title: title.to_string(),
            date: date.to_string(),
            author: author.to_string(),
            category: category.to_string(),
            content: content.to_string(),
        }
    }

    /// Returns `true` if the lower-cased `term` occurs in the title or the
    /// content, compared case-insensitively. An empty term always matches.
    #[must_use]
    pub fn contains_term(&self, term: &str) -> bool {
        term.is_empty()
            || self.title.to_lowercase().contains(term)
            || self.content.to_lowercase().contains(term)
    }

    /// The three meta fields as they appear under the title.
    #[must_use]
    pub fn meta_labels(&self) -> [String; 3] {
        [
            format!("Posted on: {}", self.date),
            format!("Author: {}", self.author),
            format!("Category: {}", self.category),
        ]
    }
}
