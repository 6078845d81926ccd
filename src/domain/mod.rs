//! Domain layer for the Postboard plugin.
//!
//! Core types with no dependency on Zellij or on the rendering layer.
//!
//! - [`error`]: Error type and result alias
//! - [`post`]: The immutable blog post record
//!
//! # Examples
//!
//! ```
//! use postboard::domain::{Post, PostId};
//!
//! let post = Post::new(PostId::new(7), "Hello", "Ada", "June 1, 2024", "Notes", "Body");
//! assert_eq!(post.id.get(), 7);
//! ```

pub mod error;
pub mod post;

pub use error::{PostboardError, Result};
pub use post::{Post, PostId};
