//! swapi - cached, relation-resolving client for the Star Wars API
//!
//! Every request goes through a [`Fetcher`] that memoizes responses in a
//! [`Cache`], so a URL is fetched from the network at most once. Records are
//! wrapped in a [`Resource`] that can replace URL references with the records
//! they point to, following dotted paths such as `characters.homeworld`.
//!
//! # Example
//!
//! ```no_run
//! use swapi::Catalog;
//!
//! # async fn example() -> Result<(), swapi::Error> {
//! let catalog = Catalog::builder().build()?;
//!
//! let mut films = catalog.films().find_by_search(["Hope"]).await?;
//! films.populate_all("characters.homeworld").await?;
//!
//! for film in &films {
//!     let record = film.record()?;
//!     println!("{} ({} characters)", record.title, record.characters.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod collection;
pub mod fetcher;
pub mod registry;
pub mod resource;

// Re-export primary types at crate root for convenience
pub use browser::{FilmBrowser, SortKey};
pub use collection::{Collection, Endpoint};
pub use fetcher::Fetcher;
pub use registry::{Catalog, CatalogBuilder};
pub use resource::Resource;

pub use swapi_core::{
    ApiRoot, Cache, Cardinality, Error, MemoryCache, RefPath, Reference, ResourceKind, Result,
    Transport, error, record, types,
};
pub use swapi_file::FileCache;
pub use swapi_http::{HttpConfig, HttpTransport};
