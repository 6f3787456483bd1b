//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the post model, the Post Store, the admin editor and the content formatter.

pub mod domain;
pub mod editor;
pub mod error;
pub mod format;
pub mod ports;
pub mod store;

pub use error::{DomainError, RepoError};
pub use store::{PostListing, PostStore};
