//! Collections of same-kind records and the endpoints that produce them.

use std::fmt;
use std::marker::PhantomData;

use futures_util::future::try_join_all;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use swapi_core::error::{Error, InvalidInputError};
use swapi_core::record::{Kind, Page};
use swapi_core::{RefPath, ResourceKind, Result};

use crate::fetcher::Fetcher;
use crate::resource::Resource;

/// The listing endpoint of one resource kind, e.g. `<root>/films/`.
///
/// Everything here goes through the [`Fetcher`], so repeated queries are
/// answered from the cache.
pub struct Endpoint<K: Kind> {
    root: Url,
    fetcher: Fetcher,
    _kind: PhantomData<K>,
}

impl<K: Kind> Endpoint<K> {
    /// Bind an endpoint root to a fetcher.
    pub fn new(root: Url, fetcher: Fetcher) -> Self {
        Self {
            root,
            fetcher,
            _kind: PhantomData,
        }
    }

    /// Returns the endpoint root.
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Returns the kind served by this endpoint.
    pub fn kind(&self) -> ResourceKind {
        K::KIND
    }

    /// Build the URL of one listing page: `<root>?page=<n>[&search=<term>]`.
    ///
    /// An empty search term is the same as no search.
    pub fn page_url(&self, page: u32, search: Option<&str>) -> Result<Url> {
        if page == 0 {
            return Err(InvalidInputError::Page { page }.into());
        }

        let mut url = self.root.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &page.to_string());
            if let Some(term) = search.filter(|s| !s.is_empty()) {
                query.append_pair("search", term);
            }
        }
        Ok(url)
    }

    /// Fetch one raw listing page.
    #[instrument(skip(self), fields(kind = %K::KIND))]
    pub async fn get_page(&self, page: u32, search: Option<&str>) -> Result<Page> {
        let url = self.page_url(page, search)?;
        let body = self.fetcher.request(&url).await?;
        serde_json::from_value(body).map_err(|e| Error::Decode {
            kind: format!("{} page", K::KIND),
            message: e.to_string(),
        })
    }

    /// Fetch a single record by its numeric id.
    #[instrument(skip(self), fields(kind = %K::KIND))]
    pub async fn get(&self, id: u32) -> Result<Resource<K>> {
        let mut url = self.root.clone();
        let path = format!("{}{}/", url.path(), id);
        url.set_path(&path);

        let body = self.fetcher.request(&url).await?;
        Ok(Resource::new(body, self.fetcher.clone()))
    }

    /// Fetch every record of this kind.
    pub async fn find(&self) -> Result<Collection<K>> {
        self.find_where(|_| true).await
    }

    /// Fetch every record of this kind and keep those matching `predicate`.
    ///
    /// Page 1 gives the total count and the page size; the remaining pages
    /// are fetched concurrently and concatenated in page order.
    #[instrument(skip(self, predicate), fields(kind = %K::KIND))]
    pub async fn find_where<P>(&self, predicate: P) -> Result<Collection<K>>
    where
        P: Fn(&Value) -> bool,
    {
        let first = self.get_page(1, None).await?;
        let pages = first.page_count();
        debug!(count = first.count, pages, "aggregating pages");

        let rest = try_join_all((2..=pages).map(|page| self.get_page(page, None))).await?;

        let results = std::iter::once(first)
            .chain(rest)
            .flat_map(|page| page.results)
            .filter(|record| predicate(record))
            .collect();

        Ok(Collection::new(results, self.fetcher.clone()))
    }

    /// Fetch the first page of results for every query, concurrently, and
    /// concatenate them in query order.
    ///
    /// Only page 1 of each query is included; further matching pages are
    /// not followed.
    #[instrument(skip(self, queries), fields(kind = %K::KIND))]
    pub async fn find_by_search<I, S>(&self, queries: I) -> Result<Collection<K>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let queries: Vec<S> = queries.into_iter().collect();
        let pages =
            try_join_all(queries.iter().map(|q| self.get_page(1, Some(q.as_ref())))).await?;

        let results = pages.into_iter().flat_map(|page| page.results).collect();
        Ok(Collection::new(results, self.fetcher.clone()))
    }
}

impl<K: Kind> Clone for Endpoint<K> {
    fn clone(&self) -> Self {
        Self::new(self.root.clone(), self.fetcher.clone())
    }
}

impl<K: Kind> fmt::Debug for Endpoint<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("kind", &K::KIND)
            .field("root", &self.root.as_str())
            .finish()
    }
}

/// An ordered set of records of kind `K`.
pub struct Collection<K: Kind> {
    resources: Vec<Resource<K>>,
}

impl<K: Kind> Collection<K> {
    /// Wrap raw records, keeping their order.
    pub fn new(values: Vec<Value>, fetcher: Fetcher) -> Self {
        let resources = values
            .into_iter()
            .map(|value| Resource::new(value, fetcher.clone()))
            .collect();
        Self { resources }
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Iterate over the wrapped records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Resource<K>> {
        self.resources.iter()
    }

    /// Returns the wrapped records.
    pub fn resources(&self) -> &[Resource<K>] {
        &self.resources
    }

    /// Consume the collection and return the wrapped records.
    pub fn into_resources(self) -> Vec<Resource<K>> {
        self.resources
    }

    /// Consume the collection and return the raw records.
    pub fn into_values(self) -> Vec<Value> {
        self.resources.into_iter().map(Resource::into_value).collect()
    }

    /// Decode every record into its typed form.
    pub fn records(&self) -> Result<Vec<K::Record>> {
        self.resources.iter().map(Resource::record).collect()
    }

    /// Resolve the reference path on every record concurrently.
    ///
    /// Either every record is updated or, if any fetch fails, none is.
    #[instrument(skip(self), fields(kind = %K::KIND, len = self.resources.len()))]
    pub async fn populate_all(&mut self, path: &str) -> Result<&mut Self> {
        let plan = RefPath::parse(K::KIND, path)?;

        let populated =
            try_join_all(self.resources.iter().map(|r| r.populated_path(&plan))).await?;

        for (resource, value) in self.resources.iter_mut().zip(populated) {
            resource.replace_value(value);
        }

        Ok(self)
    }
}

impl<K: Kind> Clone for Collection<K> {
    fn clone(&self) -> Self {
        Self {
            resources: self.resources.clone(),
        }
    }
}

impl<K: Kind> fmt::Debug for Collection<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("kind", &K::KIND)
            .field("len", &self.resources.len())
            .finish()
    }
}

impl<K: Kind> IntoIterator for Collection<K> {
    type Item = Resource<K>;
    type IntoIter = std::vec::IntoIter<Resource<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.into_iter()
    }
}

impl<'a, K: Kind> IntoIterator for &'a Collection<K> {
    type Item = &'a Resource<K>;
    type IntoIter = std::slice::Iter<'a, Resource<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}
