//! Searchable, sortable film listing.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use swapi_core::error::InvalidInputError;
use swapi_core::record::Films;
use swapi_core::{Error, Result};

use crate::collection::Endpoint;

/// Message reported when a failed load carries no text of its own.
pub const FETCH_FAILED: &str = "Failed to fetch films";

/// Field the film list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Title,
    ReleaseDate,
}

impl SortKey {
    /// Returns the record field this key orders by.
    pub fn field(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::ReleaseDate => "release_date",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "title" | "name" => Ok(SortKey::Title),
            "release_date" | "year" | "date" => Ok(SortKey::ReleaseDate),
            _ => Err(InvalidInputError::Other {
                message: format!("unknown sort key '{}' (expected title or year)", s),
            }
            .into()),
        }
    }
}

/// Prefix a film's title with its episode number: `Episode 4 - A New Hope`.
pub fn episode_title(film: &mut Value) {
    let Some(object) = film.as_object_mut() else {
        return;
    };

    let episode = match object.get("episode_id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    let title = object
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let rewritten = format!("Episode {} - {}", episode, title);
    object.insert("title".to_string(), Value::String(rewritten));
}

/// State behind a film list with a search box, sort buttons and a
/// selection.
///
/// Changing the search text reloads page 1 of the films endpoint. A failed
/// load keeps whatever films were shown before and records the message in
/// [`error`](Self::error).
#[derive(Debug)]
pub struct FilmBrowser {
    endpoint: Endpoint<Films>,
    films: Option<Vec<Value>>,
    loading: bool,
    error: Option<String>,
    search_text: String,
    sort: Option<SortKey>,
    selected: Option<Value>,
}

impl FilmBrowser {
    pub fn new(endpoint: Endpoint<Films>) -> Self {
        Self {
            endpoint,
            films: None,
            loading: true,
            error: None,
            search_text: String::new(),
            sort: None,
            selected: None,
        }
    }

    /// Films currently shown; `None` until the first successful load.
    pub fn films(&self) -> Option<&[Value]> {
        self.films.as_deref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    pub fn selected(&self) -> Option<&Value> {
        self.selected.as_ref()
    }

    /// Replace the shown films.
    pub fn set_films(&mut self, films: Vec<Value>) {
        self.films = Some(films);
    }

    /// Store new search text and reload.
    ///
    /// The selection and sort order are cleared first.
    pub async fn set_search_text(&mut self, text: impl Into<String>) {
        self.selected = None;
        self.sort = None;
        self.search_text = text.into();
        self.load().await;
    }

    /// Load page 1 for the current search text.
    ///
    /// With no search text the results are shown as returned. Otherwise each
    /// title is prefixed with its episode number.
    #[instrument(skip(self), fields(search = %self.search_text))]
    pub async fn load(&mut self) {
        self.loading = true;

        let result = if self.search_text.is_empty() {
            self.endpoint.get_page(1, None).await.map(|page| page.results)
        } else {
            self.endpoint
                .get_page(1, Some(&self.search_text))
                .await
                .map(|page| {
                    let mut results = page.results;
                    results.iter_mut().for_each(episode_title);
                    results
                })
        };

        match result {
            Ok(films) => {
                debug!(films = films.len(), "films loaded");
                self.films = Some(films);
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "film load failed");
                let message = e.to_string();
                self.error = Some(if message.is_empty() {
                    FETCH_FAILED.to_string()
                } else {
                    message
                });
            }
        }

        self.loading = false;
    }

    /// Order the shown films by `key`.
    ///
    /// The sort is stable and records missing the field go last.
    pub fn sort_by(&mut self, key: SortKey) {
        self.sort = Some(key);
        if let Some(films) = self.films.as_mut() {
            let field = key.field();
            films.sort_by(|a, b| compare_field(a.get(field), b.get(field)));
        }
    }

    /// Select the shown film with the given episode id.
    ///
    /// Returns the selection, or `None` (clearing it) if no film matches.
    pub fn select(&mut self, episode_id: i64) -> Option<&Value> {
        self.selected = self
            .films
            .iter()
            .flatten()
            .find(|film| episode_of(film) == Some(episode_id))
            .cloned();
        self.selected.as_ref()
    }
}

/// Episode number of a raw film record, given as a number or a numeric string.
pub fn episode_of(film: &Value) -> Option<i64> {
    match film.get("episode_id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(a), Some(b)) => a.to_string().cmp(&b.to_string()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;
    use swapi_core::MemoryCache;
    use swapi_http::HttpTransport;
    use url::Url;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::fetcher::Fetcher;

    fn browser(server: &MockServer) -> FilmBrowser {
        let fetcher = Fetcher::new(
            Arc::new(MemoryCache::new()),
            Arc::new(HttpTransport::new()),
        );
        let root = Url::parse(&format!("{}/api/films/", server.uri())).unwrap();
        FilmBrowser::new(Endpoint::new(root, fetcher))
    }

    fn offline() -> FilmBrowser {
        let fetcher = Fetcher::new(
            Arc::new(MemoryCache::new()),
            Arc::new(HttpTransport::new()),
        );
        FilmBrowser::new(Endpoint::new(
            Url::parse("https://swapi.dev/api/films/").unwrap(),
            fetcher,
        ))
    }

    fn page(results: Value) -> Value {
        let count = results.as_array().map(Vec::len).unwrap_or(0);
        json!({ "count": count, "next": null, "previous": null, "results": results })
    }

    #[test]
    fn episode_title_rewrite() {
        let mut film = json!({ "episode_id": 1, "title": "The Phantom Menace" });
        episode_title(&mut film);
        assert_eq!(film["title"], "Episode 1 - The Phantom Menace");

        let mut film = json!({ "episode_id": "2", "title": "Attack of the Clones" });
        episode_title(&mut film);
        assert_eq!(film["title"], "Episode 2 - Attack of the Clones");
    }

    #[test]
    fn sort_keys_parse() {
        assert_eq!("title".parse::<SortKey>().unwrap(), SortKey::Title);
        assert_eq!("Name".parse::<SortKey>().unwrap(), SortKey::Title);
        assert_eq!("year".parse::<SortKey>().unwrap(), SortKey::ReleaseDate);
        assert_eq!(
            "release_date".parse::<SortKey>().unwrap(),
            SortKey::ReleaseDate
        );
        assert!("length".parse::<SortKey>().is_err());
    }

    #[tokio::test]
    async fn empty_search_loads_first_page_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/films/"))
            .and(query_param("page", "1"))
            .and(query_param_is_missing("search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
                { "episode_id": 4, "title": "A New Hope" },
                { "episode_id": 5, "title": "The Empire Strikes Back" }
            ]))))
            .expect(1)
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        assert!(browser.loading());
        assert!(browser.films().is_none());

        browser.set_search_text("").await;

        let films = browser.films().unwrap();
        assert_eq!(films.len(), 2);
        assert_eq!(films[0]["title"], "A New Hope");
        assert!(!browser.loading());
        assert!(browser.error().is_none());
    }

    #[tokio::test]
    async fn search_rewrites_titles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/films/"))
            .and(query_param("page", "1"))
            .and(query_param("search", "Phantom"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
                { "episode_id": "1", "title": "The Phantom Menace" },
                { "episode_id": "2", "title": "Attack of the Clones" }
            ]))))
            .expect(1)
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.set_search_text("Phantom").await;

        let titles: Vec<_> = browser
            .films()
            .unwrap()
            .iter()
            .map(|f| f["title"].as_str().unwrap())
            .collect();
        assert_eq!(
            titles,
            ["Episode 1 - The Phantom Menace", "Episode 2 - Attack of the Clones"]
        );
        assert!(!browser.loading());
        assert!(browser.error().is_none());
    }

    #[tokio::test]
    async fn failed_load_keeps_films_and_records_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/films/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.set_search_text("Phantom").await;

        assert!(browser.films().is_none());
        assert!(!browser.loading());
        let error = browser.error().unwrap();
        assert!(!error.is_empty());
        assert!(error.contains("500"), "unexpected error: {}", error);
    }

    #[tokio::test]
    async fn new_search_clears_selection_and_sort() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/films/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
                { "episode_id": 6, "title": "Return of the Jedi", "release_date": "1983-05-25" },
                { "episode_id": 4, "title": "A New Hope", "release_date": "1977-05-25" }
            ]))))
            .mount(&server)
            .await;

        let mut browser = browser(&server);
        browser.load().await;
        browser.sort_by(SortKey::Title);
        assert!(browser.select(4).is_some());

        browser.set_search_text("Jedi").await;

        assert!(browser.selected().is_none());
        assert!(browser.sort().is_none());
    }

    #[test]
    fn sort_is_stable_and_puts_missing_last() {
        let mut browser = offline();
        browser.set_films(vec![
            json!({ "episode_id": 1, "title": "B", "release_date": "1999-05-19" }),
            json!({ "episode_id": 2, "title": "A" }),
            json!({ "episode_id": 3, "title": "B", "release_date": "1977-05-25" }),
        ]);

        browser.sort_by(SortKey::Title);
        let ids: Vec<_> = browser
            .films()
            .unwrap()
            .iter()
            .map(|f| f["episode_id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, [2, 1, 3]);

        browser.sort_by(SortKey::ReleaseDate);
        let ids: Vec<_> = browser
            .films()
            .unwrap()
            .iter()
            .map(|f| f["episode_id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, [3, 1, 2]);
        assert_eq!(browser.sort(), Some(SortKey::ReleaseDate));
    }

    #[test]
    fn select_by_episode() {
        let mut browser = offline();
        assert!(browser.select(4).is_none());

        browser.set_films(vec![
            json!({ "episode_id": 4, "title": "A New Hope" }),
            json!({ "episode_id": "5", "title": "The Empire Strikes Back" }),
        ]);

        assert_eq!(browser.select(5).unwrap()["title"], "The Empire Strikes Back");
        assert_eq!(browser.selected().unwrap()["episode_id"], "5");
        assert!(browser.select(9).is_none());
        assert!(browser.selected().is_none());
    }

    #[test]
    fn episode_numbers_from_either_form() {
        assert_eq!(episode_of(&json!({ "episode_id": 4 })), Some(4));
        assert_eq!(episode_of(&json!({ "episode_id": "6" })), Some(6));
        assert_eq!(episode_of(&json!({ "episode_id": "IV" })), None);
        assert_eq!(episode_of(&json!({ "title": "A New Hope" })), None);
    }
}
