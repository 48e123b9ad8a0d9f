//! Core traits for the cache and transport seams.

mod cache;
mod transport;

pub use cache::Cache;
pub use transport::Transport;
