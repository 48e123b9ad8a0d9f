//! Records and pages returned by the API.
//!
//! Records travel as raw `serde_json::Value`s through the cache and the
//! population machinery; the typed structs in this module are a view that
//! can be decoded from a raw record at any point, populated or not.

mod kinds;
mod link;
mod page;

pub use kinds::{
    Film, Films, Kind, People, Person, Planet, Planets, Specie, Species, Starship, Starships,
    Vehicle, Vehicles,
};
pub use link::{Link, Links};
pub use page::Page;
