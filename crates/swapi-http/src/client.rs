//! HTTP transport implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::Value;
use tracing::{debug, instrument, trace};
use url::Url;

use swapi_core::error::{Error, FetchError, InvalidInputError};
use swapi_core::{Result, Transport};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Per-request timeout; `None` waits forever.
    pub timeout: Option<Duration>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: concat!("swapi/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    /// Override the per-request timeout.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client issuing JSON `GET` requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&HttpConfig::default()).expect("failed to build HTTP client")
    }

    /// Create a transport from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| InvalidInputError::Other {
            message: format!("cannot build HTTP client: {e}"),
        })?;

        Ok(Self { client })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self), fields(%url))]
    async fn get_json(&self, url: &Url) -> Result<Value> {
        debug!("HTTP GET");

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| map_reqwest(url, e))?;

        let status = response.status();
        trace!(status = %status, "HTTP response");

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.bytes().await.map_err(|e| map_reqwest(url, e))?;
        trace!(bytes = body.len(), "response body");

        serde_json::from_slice(&body).map_err(|e| {
            Error::Fetch(FetchError::InvalidJson {
                url: url.to_string(),
                message: e.to_string(),
            })
        })
    }
}

fn map_reqwest(url: &Url, err: reqwest::Error) -> Error {
    let url = url.to_string();
    let err = if err.is_timeout() {
        FetchError::Timeout { url }
    } else if err.is_connect() {
        FetchError::Connection {
            url,
            message: err.to_string(),
        }
    } else {
        FetchError::Http {
            url,
            message: err.to_string(),
        }
    };
    Error::Fetch(err)
}
