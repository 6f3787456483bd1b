//! Domain entities - the core business objects.

mod post;
mod session;

pub use post::{NewPost, Post, PostChanges, UNCATEGORIZED, newest_first};
pub use session::AdminSession;
