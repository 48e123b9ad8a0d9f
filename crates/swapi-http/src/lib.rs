//! swapi-http - reqwest-backed transport for the Star Wars API client.

mod client;

pub use client::{HttpConfig, HttpTransport};
