//! A single fetched page and its continuation

use super::types::{PageFetcher, PageRequest, RecordBuilder};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use std::sync::Arc;
use tracing::debug;

/// Top-level keys that describe paging rather than hold records
const PAGING_KEYS: &[&str] = &[
    "end",
    "first_page_uri",
    "last_page_uri",
    "meta",
    "next_page_uri",
    "num_pages",
    "page",
    "page_size",
    "previous_page_uri",
    "start",
    "total",
    "uri",
];

/// Paging metadata carried alongside the records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    /// Key the records were read from
    pub key: String,
    /// Zero-based page number, when reported
    pub page: Option<u64>,
    /// Page size the server applied, when reported
    pub page_size: Option<u64>,
    /// URL of this page
    pub url: Option<String>,
    /// URL of the first page
    pub first_page_url: Option<String>,
    /// URL of the previous page
    pub previous_page_url: Option<String>,
    /// Resolved URL of the next page
    pub next_page_url: Option<String>,
}

/// Fetches the page that follows the one it came from.
///
/// Consumed by [`Continuation::fetch`], so a page can trigger at most one
/// fetch of its successor.
pub struct Continuation<T> {
    fetcher: Arc<dyn PageFetcher>,
    request: PageRequest,
    builder: RecordBuilder<T>,
}

impl<T: Send + 'static> Continuation<T> {
    /// URL the next page will be fetched from
    pub fn url(&self) -> &str {
        &self.request.uri
    }

    /// Fetch and decode the next page
    pub async fn fetch(self) -> Result<Page<T>> {
        let body = self.fetcher.fetch_page(&self.request).await?;
        Page::from_response(body, self.fetcher, self.builder)
    }
}

impl<T> std::fmt::Debug for Continuation<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Continuation")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

/// One batch of records plus the means to fetch the next batch
pub struct Page<T> {
    records: Vec<T>,
    meta: PageMeta,
    next: Option<Continuation<T>>,
}

impl<T: Send + 'static> Page<T> {
    /// Build a page from a raw response body. Performs no I/O.
    ///
    /// Records come from `meta.key` when present, otherwise from the one
    /// top-level key that is not paging metadata. The next page comes from
    /// `meta.next_page_url`, falling back to `next_page_uri` resolved
    /// through the fetcher.
    pub fn from_response(
        body: JsonValue,
        fetcher: Arc<dyn PageFetcher>,
        builder: RecordBuilder<T>,
    ) -> Result<Self> {
        let JsonValue::Object(mut body) = body else {
            return Err(Error::page_decode("response body is not a JSON object"));
        };

        let meta = read_meta(&body, fetcher.as_ref())?;

        let raw = match body.remove(&meta.key) {
            Some(JsonValue::Array(items)) => items,
            Some(JsonValue::Null) => Vec::new(),
            _ => {
                return Err(Error::page_decode(format!(
                    "\"{}\" is not a list of records",
                    meta.key
                )))
            }
        };

        let records = raw
            .into_iter()
            .map(|record| builder(record))
            .collect::<Result<Vec<T>>>()?;

        let next = meta.next_page_url.clone().map(|url| Continuation {
            fetcher,
            request: PageRequest::next(url),
            builder,
        });

        debug!(
            "Decoded page {:?} of \"{}\": {} records, has next: {}",
            meta.page,
            meta.key,
            records.len(),
            next.is_some()
        );

        Ok(Self {
            records,
            meta,
            next,
        })
    }

    /// Fetch the next page, if there is one.
    ///
    /// Takes the continuation, so a second call returns `Ok(None)`.
    pub async fn next_page(&mut self) -> Result<Option<Page<T>>> {
        match self.continuation() {
            Some(next) => next.fetch().await.map(Some),
            None => Ok(None),
        }
    }
}

impl<T> Page<T> {
    /// Records in server order
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Take the records
    pub fn into_records(self) -> Vec<T> {
        self.records
    }

    /// Paging metadata
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check if another page follows and has not been taken yet
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Take the continuation. Returns `None` once exhausted or taken.
    pub fn continuation(&mut self) -> Option<Continuation<T>> {
        self.next.take()
    }

    /// Split into records and continuation
    pub fn into_parts(self) -> (Vec<T>, Option<Continuation<T>>) {
        (self.records, self.next)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Page<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("records", &self.records)
            .field("meta", &self.meta)
            .field("has_next", &self.next.is_some())
            .finish()
    }
}

fn read_meta(body: &JsonObject, fetcher: &dyn PageFetcher) -> Result<PageMeta> {
    let meta = body.get("meta").and_then(JsonValue::as_object);

    let key = meta
        .and_then(|m| str_field(m, "key"))
        .or_else(|| record_key(body))
        .ok_or_else(|| Error::page_decode("Page Records cannot be deserialized"))?;

    let next_page_url = match meta.and_then(|m| str_field(m, "next_page_url")) {
        Some(url) => Some(url),
        None => str_field(body, "next_page_uri").map(|uri| fetcher.resolve_next_url(&uri)),
    };

    Ok(PageMeta {
        key,
        page: meta
            .and_then(|m| m.get("page"))
            .or_else(|| body.get("page"))
            .and_then(JsonValue::as_u64),
        page_size: meta
            .and_then(|m| m.get("page_size"))
            .or_else(|| body.get("page_size"))
            .and_then(JsonValue::as_u64),
        url: meta
            .and_then(|m| str_field(m, "url"))
            .or_else(|| str_field(body, "uri")),
        first_page_url: meta
            .and_then(|m| str_field(m, "first_page_url"))
            .or_else(|| str_field(body, "first_page_uri")),
        previous_page_url: meta
            .and_then(|m| str_field(m, "previous_page_url"))
            .or_else(|| str_field(body, "previous_page_uri")),
        next_page_url,
    })
}

/// The one top-level key that is not a paging key, if there is exactly one
fn record_key(body: &JsonObject) -> Option<String> {
    let mut keys = body.keys().filter(|k| !PAGING_KEYS.contains(&k.as_str()));
    match (keys.next(), keys.next()) {
        (Some(key), None) => Some(key.clone()),
        _ => None,
    }
}

/// Non-empty string field
fn str_field(object: &JsonObject, name: &str) -> Option<String> {
    object
        .get(name)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
