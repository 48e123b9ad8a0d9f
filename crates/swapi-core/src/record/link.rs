//! Reference fields that may or may not have been populated.

use serde::{Deserialize, Serialize};

/// A single reference field: a URL before population, the record after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Link<T> {
    Url(String),
    Resolved(Box<T>),
}

impl<T> Link<T> {
    /// Returns true once the URL has been replaced by the record.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Link::Resolved(_))
    }

    /// Returns the URL if the field has not been populated.
    pub fn url(&self) -> Option<&str> {
        match self {
            Link::Url(url) => Some(url),
            Link::Resolved(_) => None,
        }
    }

    /// Returns the record if the field has been populated.
    pub fn resolved(&self) -> Option<&T> {
        match self {
            Link::Url(_) => None,
            Link::Resolved(record) => Some(record),
        }
    }
}

/// A list reference field: URLs before population, records after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Links<T> {
    Urls(Vec<String>),
    Resolved(Vec<T>),
}

impl<T> Links<T> {
    /// Returns true once the URLs have been replaced by records.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Links::Resolved(_))
    }

    /// Number of referenced records.
    pub fn len(&self) -> usize {
        match self {
            Links::Urls(urls) => urls.len(),
            Links::Resolved(records) => records.len(),
        }
    }

    /// Returns true if the field references nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the URLs if the field has not been populated.
    pub fn urls(&self) -> Option<&[String]> {
        match self {
            Links::Urls(urls) => Some(urls),
            Links::Resolved(_) => None,
        }
    }

    /// Returns the records if the field has been populated.
    pub fn resolved(&self) -> Option<&[T]> {
        match self {
            Links::Urls(_) => None,
            Links::Resolved(records) => Some(records),
        }
    }
}

impl<T> Default for Links<T> {
    fn default() -> Self {
        Links::Urls(Vec::new())
    }
}
