//! Read-only post storage.
//!
//! The catalog is a static TOML document compiled into the plugin. It is
//! parsed and validated once at startup; after that [`PostStore`] only offers
//! pure queries.
//!
//! # Catalog format
//!
//! ```toml
//! [[posts]]
//! id = 1
//! title = "Getting Started with Web Development"
//! date = "March 15, 2024"
//! author = "John Doe"
//! category = "Web Development"
//! content = "Lorem ipsum..."
//! ```

pub mod catalog;

pub use catalog::PostStore;
