//! Post repositories that need no database server.

mod key_value;
mod memory;

pub use key_value::{COLLECTION_KEY, KeyValuePostRepository};
pub use memory::InMemoryPostRepository;
