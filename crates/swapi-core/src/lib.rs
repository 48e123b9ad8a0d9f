//! swapi-core - Core types and traits for the Star Wars API client.

pub mod cache;
pub mod error;
pub mod record;
pub mod traits;
pub mod types;

pub use cache::MemoryCache;
pub use error::Error;
pub use record::{Film, Kind, Link, Links, Page, Person, Planet, Specie, Starship, Vehicle};
pub use traits::{Cache, Transport};
pub use types::{ApiRoot, Cardinality, RefPath, Reference, ResourceKind};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
