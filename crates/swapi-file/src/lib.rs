//! swapi-file - Filesystem-backed response cache.

mod store;

pub use store::{ENTRIES_DIR, FileCache};
