//! Core swapi types.
//!
//! These types enforce their invariants at construction time: an
//! [`ApiRoot`] is always an absolute secure URL, a [`RefPath`] only names
//! reference fields that exist on the kinds it walks through.

mod api_root;
mod ref_path;
mod resource_kind;

pub use api_root::{ApiRoot, DEFAULT_API_ROOT, secure_url};
pub use ref_path::RefPath;
pub use resource_kind::{Cardinality, Reference, ResourceKind};
