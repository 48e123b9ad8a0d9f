//! API root URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};
use crate::types::ResourceKind;

/// The public SWAPI instance.
pub const DEFAULT_API_ROOT: &str = "https://swapi.dev/api/";

/// A validated API root URL.
///
/// Every resource kind lives directly below the root
/// (`<root>/films/`, `<root>/people/`, ...).
///
/// The root must use HTTPS; plain HTTP is accepted only for loopback hosts
/// so that local test servers can stand in for the real API.
///
/// # Example
///
/// ```
/// use swapi_core::{ApiRoot, ResourceKind};
///
/// let root = ApiRoot::new("https://swapi.dev/api").unwrap();
/// assert_eq!(root.collection_url(ResourceKind::Films).as_str(),
///            "https://swapi.dev/api/films/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiRoot(Url);

impl ApiRoot {
    /// Create a new API root from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let mut url = Url::parse(s).map_err(|e| InvalidInputError::ApiRoot {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: exactly one trailing slash so that joins stay below the root
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self(url))
    }

    /// Returns the endpoint root for a resource kind, e.g. `<root>/films/`.
    pub fn collection_url(&self, kind: ResourceKind) -> Url {
        let mut url = self.0.clone();
        let path = format!("{}{}/", url.path(), kind.as_str());
        url.set_path(&path);
        url
    }

    /// Returns the URL of a single record, e.g. `<root>/films/1/`.
    pub fn resource_url(&self, kind: ResourceKind, id: u32) -> Url {
        let mut url = self.collection_url(kind);
        let path = format!("{}{}/", url.path(), id);
        url.set_path(&path);
        url
    }

    /// Returns the root URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Parse a reference URL found in a record served from this root.
    ///
    /// Like [`secure_url`], except that references on this root's own origin
    /// keep plain `http` when the root itself is plain `http`, which is only
    /// accepted for loopback hosts.
    pub fn reference_url(&self, raw: &str) -> Option<Url> {
        let url = Url::parse(raw).ok()?;
        if url.scheme() == "http" && self.0.scheme() == "http" && url.origin() == self.0.origin() {
            return Some(url);
        }
        secure_url(raw)
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiRoot {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        if scheme != "https" && !(scheme == "http" && is_loopback(url)) {
            return Err(InvalidInputError::ApiRoot {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiRoot {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl Default for ApiRoot {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_API_ROOT).expect("default API root is a valid URL"))
    }
}

/// Parse a reference URL found in a record, upgrading `http` to `https`.
///
/// Returns `None` if the string is not an absolute HTTP(S) URL.
pub fn secure_url(raw: &str) -> Option<Url> {
    let mut url = Url::parse(raw).ok()?;
    match url.scheme() {
        "https" => Some(url),
        "http" => {
            url.set_scheme("https").ok()?;
            Some(url)
        }
        _ => None,
    }
}

fn is_loopback(url: &Url) -> bool {
    url.host_str()
        .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]" || h == "::1")
}

impl fmt::Display for ApiRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiRoot {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiRoot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiRoot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiRoot::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiRoot {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
