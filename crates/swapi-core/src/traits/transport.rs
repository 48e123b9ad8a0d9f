//! HTTP transport trait.

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::Result;

/// Issues `GET` requests and parses the body as JSON.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url` with `Accept: application/json` and parse the body.
    ///
    /// Fails with [`FetchError`](crate::error::FetchError) on network
    /// errors, non-success statuses, and bodies that are not JSON.
    async fn get_json(&self, url: &Url) -> Result<Value>;
}
