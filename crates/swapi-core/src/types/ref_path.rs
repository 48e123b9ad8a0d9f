//! Validated reference paths.

use std::fmt;

use crate::error::{Error, InvalidInputError};
use crate::types::{Reference, ResourceKind};

/// A dotted path of reference fields, validated against the reference
/// tables starting from one kind.
///
/// `"characters.homeworld"` from [`ResourceKind::Films`] resolves to two
/// steps: `characters` (many people) then `homeworld` (one planet).
///
/// # Example
///
/// ```
/// use swapi_core::{RefPath, ResourceKind};
///
/// let path = RefPath::parse(ResourceKind::Films, "characters.homeworld").unwrap();
/// assert_eq!(path.steps().len(), 2);
/// assert_eq!(path.target(), ResourceKind::Planets);
///
/// assert!(RefPath::parse(ResourceKind::Films, "director").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefPath {
    raw: String,
    root: ResourceKind,
    steps: Vec<Reference>,
}

impl RefPath {
    /// Parse and validate a dotted path starting from `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty, has an empty segment, or names
    /// a field that is not a reference field of the kind reached so far.
    pub fn parse(root: ResourceKind, path: &str) -> Result<Self, Error> {
        let invalid = |reason: String| InvalidInputError::Path {
            value: path.to_string(),
            reason,
        };

        if path.trim().is_empty() {
            return Err(invalid("cannot be empty".to_string()).into());
        }

        let mut kind = root;
        let mut steps = Vec::new();
        for segment in path.split('.') {
            if segment.is_empty() {
                return Err(invalid("contains an empty segment".to_string()).into());
            }
            let reference = kind
                .reference(segment)
                .ok_or_else(|| invalid(format!("'{segment}' is not a reference field of {kind}")))?;
            kind = reference.target;
            steps.push(reference);
        }

        Ok(Self {
            raw: path.to_string(),
            root,
            steps,
        })
    }

    /// Returns the kind the path starts from.
    pub fn root(&self) -> ResourceKind {
        self.root
    }

    /// Returns the kind the last step resolves to.
    pub fn target(&self) -> ResourceKind {
        self.steps.last().map(|s| s.target).unwrap_or(self.root)
    }

    /// Returns the validated steps in order.
    pub fn steps(&self) -> &[Reference] {
        &self.steps
    }

    /// Returns the path as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for RefPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
