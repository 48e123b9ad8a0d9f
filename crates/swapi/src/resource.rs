//! Resource wrapper and reference population.

use std::fmt;
use std::marker::PhantomData;

use futures_util::future::{BoxFuture, try_join_all};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use swapi_core::error::{Error, InvalidInputError, ReferenceError};
use swapi_core::record::Kind;
use swapi_core::{Cardinality, RefPath, Reference, Result};

use crate::fetcher::Fetcher;

/// One record of kind `K`, able to resolve its own reference fields.
///
/// Population replaces URL references with the records they point to, in
/// place. It is all-or-nothing: the new value is built on a copy and only
/// committed once every fetch along the path has succeeded, so a failed
/// `populate` leaves the wrapper exactly as it was.
pub struct Resource<K: Kind> {
    value: Value,
    fetcher: Fetcher,
    _kind: PhantomData<K>,
}

impl<K: Kind> Resource<K> {
    /// Wrap a raw record.
    pub fn new(value: Value, fetcher: Fetcher) -> Self {
        Self {
            value,
            fetcher,
            _kind: PhantomData,
        }
    }

    /// Returns the raw record.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consume the wrapper and return the raw record.
    pub fn into_value(self) -> Value {
        self.value
    }

    pub(crate) fn replace_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Returns the canonical URL of this record, if present.
    pub fn url(&self) -> Option<&str> {
        self.value.get("url").and_then(Value::as_str)
    }

    /// Returns the display label (`title` for films, `name` otherwise).
    pub fn label(&self) -> Option<&str> {
        self.value.get(K::KIND.label_field()).and_then(Value::as_str)
    }

    /// Decode the raw record into its typed form.
    pub fn record(&self) -> Result<K::Record> {
        serde_json::from_value(self.value.clone()).map_err(|e| Error::Decode {
            kind: K::KIND.to_string(),
            message: e.to_string(),
        })
    }

    /// Resolve the reference path and commit the result.
    ///
    /// Returns the wrapper again so calls can be chained.
    ///
    /// # Errors
    ///
    /// Fails if the path is not a valid reference path for this kind, if a
    /// field along the way is malformed or not yet populated, or if any fetch
    /// fails. The wrapper is unchanged on failure.
    pub async fn populate(&mut self, path: &str) -> Result<&mut Self> {
        let plan = RefPath::parse(K::KIND, path)?;
        self.populate_path(&plan).await
    }

    /// Like [`populate`](Self::populate) with an already validated path.
    pub async fn populate_path(&mut self, plan: &RefPath) -> Result<&mut Self> {
        self.value = self.populated_path(plan).await?;
        Ok(self)
    }

    /// Resolve the reference path on a copy and return it without committing.
    pub async fn populated(&self, path: &str) -> Result<Value> {
        let plan = RefPath::parse(K::KIND, path)?;
        self.populated_path(&plan).await
    }

    /// Like [`populated`](Self::populated) with an already validated path.
    #[instrument(skip(self), fields(kind = %K::KIND, path = %plan))]
    pub async fn populated_path(&self, plan: &RefPath) -> Result<Value> {
        if plan.root() != K::KIND {
            return Err(InvalidInputError::Path {
                value: plan.to_string(),
                reason: format!("path starts at {} but the record is {}", plan.root(), K::KIND),
            }
            .into());
        }

        let mut value = self.value.clone();
        resolve(&self.fetcher, plan.steps(), &mut value).await?;
        debug!("populated");
        Ok(value)
    }
}

impl<K: Kind> Clone for Resource<K> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone(), self.fetcher.clone())
    }
}

impl<K: Kind> fmt::Debug for Resource<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("kind", &K::KIND)
            .field("value", &self.value)
            .finish()
    }
}

/// Walk `steps` from `value`, replacing the last step's URLs with records.
///
/// Arrays fan out: every element receives the remaining steps concurrently,
/// and results land back in their original positions.
pub(crate) fn resolve<'a>(
    fetcher: &'a Fetcher,
    steps: &'a [Reference],
    value: &'a mut Value,
) -> BoxFuture<'a, Result<()>> {
    Box::pin(async move {
        let Some((head, tail)) = steps.split_first() else {
            return Ok(());
        };

        if let Value::Array(items) = value {
            try_join_all(items.iter_mut().map(|item| resolve(fetcher, steps, item))).await?;
            return Ok(());
        }

        let object = match value {
            Value::Object(object) => object,
            other => return Err(malformed(head.field, other)),
        };

        let Some(slot) = object.get_mut(head.field) else {
            return Err(ReferenceError::Malformed {
                field: head.field.to_string(),
                found: "nothing".to_string(),
            }
            .into());
        };

        if tail.is_empty() {
            return resolve_field(fetcher, head, slot).await;
        }

        if holds_urls(slot) {
            return Err(ReferenceError::Unresolved {
                field: head.field.to_string(),
            }
            .into());
        }
        if slot.is_null() {
            return Ok(());
        }

        resolve(fetcher, tail, slot).await
    })
}

/// Replace one reference field with the record(s) it points to.
async fn resolve_field(fetcher: &Fetcher, reference: &Reference, slot: &mut Value) -> Result<()> {
    let field = reference.field;

    let resolved = match (&*slot, reference.cardinality) {
        // Species without a homeworld.
        (Value::Null, Cardinality::One) => return Ok(()),
        (Value::Object(_), Cardinality::One) => return Ok(()),
        (Value::String(raw), Cardinality::One) => {
            let url = reference_url(fetcher, field, raw)?;
            fetcher.request(&url).await?
        }
        (Value::Array(items), Cardinality::Many) => {
            if items.iter().all(Value::is_object) {
                return Ok(());
            }
            let urls = items
                .iter()
                .map(|item| match item {
                    Value::String(raw) => reference_url(fetcher, field, raw),
                    other => Err(malformed(field, other)),
                })
                .collect::<Result<Vec<_>>>()?;
            let records = try_join_all(urls.iter().map(|url| fetcher.request(url))).await?;
            Value::Array(records)
        }
        (other, _) => return Err(malformed(field, other)),
    };

    *slot = resolved;
    Ok(())
}

fn reference_url(fetcher: &Fetcher, field: &str, raw: &str) -> Result<Url> {
    fetcher.reference_url(raw).ok_or_else(|| {
        ReferenceError::Malformed {
            field: field.to_string(),
            found: format!("'{raw}'"),
        }
        .into()
    })
}

fn holds_urls(value: &Value) -> bool {
    match value {
        Value::String(_) => true,
        Value::Array(items) => items.iter().any(Value::is_string),
        _ => false,
    }
}

fn malformed(field: &str, found: &Value) -> Error {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    ReferenceError::Malformed {
        field: field.to_string(),
        found: found.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;
    use swapi_core::error::FetchError;
    use swapi_core::record::{Films, People};
    use swapi_core::{ApiRoot, MemoryCache, Transport};

    /// Serves canned bodies by URL; anything else is a 404.
    #[derive(Default)]
    struct CannedTransport {
        bodies: HashMap<String, Value>,
        calls: AtomicUsize,
    }

    impl CannedTransport {
        fn with(mut self, url: &str, body: Value) -> Self {
            self.bodies.insert(url.to_string(), body);
            self
        }
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn get_json(&self, url: &Url) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.bodies.get(url.as_str()).cloned().ok_or_else(|| {
                FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                }
                .into()
            })
        }
    }

    fn fetcher(transport: CannedTransport) -> (Fetcher, Arc<CannedTransport>) {
        let transport = Arc::new(transport);
        (
            Fetcher::new(Arc::new(MemoryCache::new()), transport.clone()),
            transport,
        )
    }

    fn transport() -> CannedTransport {
        CannedTransport::default()
            .with(
                "https://swapi.dev/api/people/1/",
                json!({"name": "Luke Skywalker", "homeworld": "https://swapi.dev/api/planets/1/"}),
            )
            .with(
                "https://swapi.dev/api/people/2/",
                json!({"name": "C-3PO", "homeworld": "https://swapi.dev/api/planets/1/"}),
            )
            .with("https://swapi.dev/api/planets/1/", json!({"name": "Tatooine"}))
    }

    #[tokio::test]
    async fn populates_single_reference() {
        let (fetcher, _) = fetcher(transport());
        let mut luke = Resource::<People>::new(
            json!({"name": "Luke Skywalker", "homeworld": "https://swapi.dev/api/planets/1/"}),
            fetcher,
        );

        luke.populate("homeworld").await.unwrap();

        assert_eq!(luke.value()["homeworld"], json!({"name": "Tatooine"}));
    }

    #[tokio::test]
    async fn upgrades_insecure_references() {
        let (fetcher, _) = fetcher(transport());
        let mut luke = Resource::<People>::new(
            json!({"homeworld": "http://swapi.dev/api/planets/1/"}),
            fetcher,
        );

        luke.populate("homeworld").await.unwrap();

        assert_eq!(luke.value()["homeworld"]["name"], "Tatooine");
    }

    #[tokio::test]
    async fn upgrades_loopback_references_off_the_api_root() {
        let canned = CannedTransport::default()
            .with("https://127.0.0.1:4000/api/planets/1/", json!({"name": "Tatooine"}))
            .with("http://127.0.0.1:4000/api/planets/2/", json!({"name": "Alderaan"}));
        let (fetcher, _) = fetcher(canned);

        let mut luke = Resource::<People>::new(
            json!({"homeworld": "http://127.0.0.1:4000/api/planets/1/"}),
            fetcher.clone(),
        );
        luke.populate("homeworld").await.unwrap();
        assert_eq!(luke.value()["homeworld"]["name"], "Tatooine");

        let bound = fetcher.with_api_root(ApiRoot::new("http://127.0.0.1:4000/api/").unwrap());
        let mut leia = Resource::<People>::new(
            json!({"homeworld": "http://127.0.0.1:4000/api/planets/2/"}),
            bound,
        );
        leia.populate("homeworld").await.unwrap();
        assert_eq!(leia.value()["homeworld"]["name"], "Alderaan");
    }

    #[tokio::test]
    async fn nested_path_through_populated_array() {
        let (fetcher, transport) = fetcher(transport());
        let mut film = Resource::<Films>::new(
            json!({
                "title": "A New Hope",
                "characters": [
                    "https://swapi.dev/api/people/1/",
                    "https://swapi.dev/api/people/2/"
                ]
            }),
            fetcher,
        );

        film.populate("characters")
            .await
            .unwrap()
            .populate("characters.homeworld")
            .await
            .unwrap();

        let characters = film.value()["characters"].as_array().unwrap();
        assert_eq!(characters[0]["name"], "Luke Skywalker");
        assert_eq!(characters[1]["homeworld"]["name"], "Tatooine");
        // Both characters share a homeworld; concurrent misses may fetch it twice.
        let calls = transport.calls.load(Ordering::SeqCst);
        assert!((3..=4).contains(&calls));
    }

    #[tokio::test]
    async fn traversing_unpopulated_field_fails() {
        let (fetcher, _) = fetcher(transport());
        let mut film = Resource::<Films>::new(
            json!({"characters": ["https://swapi.dev/api/people/1/"]}),
            fetcher,
        );

        let err = film.populate("characters.homeworld").await.unwrap_err();

        assert!(matches!(
            err,
            Error::Reference(ReferenceError::Unresolved { ref field }) if field == "characters"
        ));
    }

    #[tokio::test]
    async fn malformed_reference_is_rejected() {
        let (fetcher, _) = fetcher(transport());
        let mut luke = Resource::<People>::new(json!({"homeworld": 42}), fetcher);

        let err = luke.populate("homeworld").await.unwrap_err();

        assert!(matches!(err, Error::Reference(ReferenceError::Malformed { .. })));
    }

    #[tokio::test]
    async fn non_url_string_is_rejected() {
        let (fetcher, _) = fetcher(transport());
        let mut luke = Resource::<People>::new(json!({"homeworld": "Tatooine"}), fetcher);

        let err = luke.populate("homeworld").await.unwrap_err();

        assert!(err.to_string().contains("'Tatooine'"));
    }

    #[tokio::test]
    async fn unknown_field_fails_before_fetching() {
        let (fetcher, transport) = fetcher(transport());
        let mut film = Resource::<Films>::new(json!({"director": "George Lucas"}), fetcher);

        let err = film.populate("director").await.unwrap_err();

        assert!(matches!(err, Error::InvalidInput(InvalidInputError::Path { .. })));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_record_unchanged() {
        let (fetcher, _) = fetcher(transport());
        let original = json!({
            "characters": [
                "https://swapi.dev/api/people/1/",
                "https://swapi.dev/api/people/404/",
                "https://swapi.dev/api/people/2/"
            ]
        });
        let mut film = Resource::<Films>::new(original.clone(), fetcher);

        let err = film.populate("characters").await.unwrap_err();

        assert!(matches!(err, Error::Fetch(FetchError::Status { status: 404, .. })));
        assert_eq!(film.value(), &original);
    }

    #[tokio::test]
    async fn repopulating_is_a_no_op() {
        let (fetcher, transport) = fetcher(transport());
        let mut luke = Resource::<People>::new(
            json!({"homeworld": "https://swapi.dev/api/planets/1/"}),
            fetcher,
        );

        luke.populate("homeworld").await.unwrap();
        luke.populate("homeworld").await.unwrap();

        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn null_homeworld_stays_null() {
        let (fetcher, _) = fetcher(transport());
        let mut droid = Resource::<swapi_core::record::Species>::new(
            json!({"name": "Droid", "homeworld": null}),
            fetcher,
        );

        droid.populate("homeworld").await.unwrap();

        assert!(droid.value()["homeworld"].is_null());
    }

    #[tokio::test]
    async fn populated_does_not_commit() {
        let (fetcher, _) = fetcher(transport());
        let luke = Resource::<People>::new(
            json!({"homeworld": "https://swapi.dev/api/planets/1/"}),
            fetcher,
        );

        let value = luke.populated("homeworld").await.unwrap();

        assert_eq!(value["homeworld"]["name"], "Tatooine");
        assert_eq!(luke.value()["homeworld"], "https://swapi.dev/api/planets/1/");
    }

    #[tokio::test]
    async fn path_for_another_kind_is_rejected() {
        let (fetcher, _) = fetcher(transport());
        let luke = Resource::<People>::new(json!({}), fetcher);
        let plan = RefPath::parse(swapi_core::ResourceKind::Films, "characters").unwrap();

        assert!(luke.populated_path(&plan).await.is_err());
    }
}
