//! Pagination types and traits
//!
//! Defines the fetcher seam, the limit arithmetic and the option structs
//! shared by `page`, `stream`, `each` and `list`.

use crate::error::{Error, Result};
use crate::types::{JsonValue, Params};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Page size used when neither a limit nor a page size is given
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page size the API accepts
pub const MAX_PAGE_SIZE: u32 = 1000;

// ============================================================================
// Page Fetcher
// ============================================================================

/// One GET against a list endpoint.
///
/// `uri` is either relative to the fetcher (first page) or an absolute URL
/// taken from the previous page (continuations). Continuations carry their
/// query string inside the URL, so `params` is empty for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Target URI or absolute URL
    pub uri: String,
    /// Query parameters
    pub params: Params,
}

impl PageRequest {
    /// Create a request with query parameters
    pub fn new(uri: impl Into<String>, params: Params) -> Self {
        Self {
            uri: uri.into(),
            params,
        }
    }

    /// Create a request for a fully-formed next page URL
    pub fn next(url: impl Into<String>) -> Self {
        Self::new(url, Params::new())
    }
}

/// Performs a single page fetch and returns the raw response body.
///
/// Retries, timeouts and authentication all live behind this trait; the
/// pagination layer only sees success or failure.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page
    async fn fetch_page(&self, request: &PageRequest) -> Result<JsonValue>;

    /// Turn a server-provided next page URI into something `fetch_page` accepts
    fn resolve_next_url(&self, uri: &str) -> String {
        uri.to_string()
    }

    /// Effective limits for a read through this fetcher
    fn read_limits(&self, limit: Option<u64>, page_size: Option<u32>) -> ReadLimits {
        ReadLimits::new(limit, page_size)
    }
}

/// Turns one raw record into a typed record
pub type RecordBuilder<T> = Arc<dyn Fn(JsonValue) -> Result<T> + Send + Sync>;

/// Record builder that deserializes straight into `T`
pub fn json_builder<T: DeserializeOwned + 'static>() -> RecordBuilder<T> {
    Arc::new(|value: JsonValue| serde_json::from_value::<T>(value).map_err(Error::from))
}

// ============================================================================
// Limits
// ============================================================================

/// Effective limits for one read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLimits {
    /// Maximum number of records to deliver
    pub limit: Option<u64>,
    /// Page size requested from the server
    pub page_size: u32,
    /// Maximum number of pages to fetch
    pub page_limit: Option<u64>,
}

impl ReadLimits {
    /// Derive limits from the caller's `limit` and `page_size`.
    ///
    /// A zero limit means no limit. The page size is the caller's value if
    /// given, else the limit, else [`DEFAULT_PAGE_SIZE`], and always lies in
    /// `1..=MAX_PAGE_SIZE`.
    pub fn new(limit: Option<u64>, page_size: Option<u32>) -> Self {
        let limit = limit.filter(|l| *l > 0);

        let page_size = match (page_size, limit) {
            (Some(size), _) => size,
            (None, Some(limit)) => limit.min(u64::from(MAX_PAGE_SIZE)) as u32,
            (None, None) => DEFAULT_PAGE_SIZE,
        }
        .clamp(1, MAX_PAGE_SIZE);

        let page_limit = limit.map(|l| l.div_ceil(u64::from(page_size)));

        Self {
            limit,
            page_size,
            page_limit,
        }
    }

    /// Check whether `delivered` records exhaust the limit
    pub fn limit_reached(&self, delivered: u64) -> bool {
        self.limit.is_some_and(|limit| delivered >= limit)
    }

    /// Check whether `pages` fetched pages exhaust the page limit
    pub fn page_limit_reached(&self, pages: u64) -> bool {
        self.page_limit.is_some_and(|limit| pages >= limit)
    }
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self::new(None, None)
    }
}

// ============================================================================
// Flow Control
// ============================================================================

/// Returned by the per-record callback of `each`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Control {
    /// Keep delivering records
    #[default]
    Continue,
    /// Stop now: no more records, no more fetches
    Stop,
}

/// Lifecycle of a record stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamState {
    /// Still delivering records
    #[default]
    Running,
    /// Stopped by the consumer
    Stopped,
    /// Ran out of records or hit a limit
    Completed,
    /// A fetch or decode failed
    Failed,
}

impl StreamState {
    /// Check if the stream will yield nothing more
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

// ============================================================================
// Options
// ============================================================================

/// Maps resource-specific filters onto wire parameters
pub trait QueryFilter {
    /// Wire parameters for this filter, with unset fields omitted
    fn params(&self) -> Params;
}

/// Options for `stream` and `list`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Upper bound on records delivered
    pub limit: Option<u64>,
    /// Records requested per page
    pub page_size: Option<u32>,
    /// Resource filters, already in wire form
    pub filters: Params,
}

impl ReadOptions {
    /// Create empty options: every record, default page size
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record limit
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the page size
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Merge in a resource filter
    #[must_use]
    pub fn filter(mut self, filter: &impl QueryFilter) -> Self {
        self.filters.extend(filter.params());
        self
    }

    /// Effective limits for these options
    pub fn limits(&self) -> ReadLimits {
        ReadLimits::new(self.limit, self.page_size)
    }
}

/// Options for a single page fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    /// Records requested per page
    pub page_size: Option<u32>,
    /// Zero-based page number
    pub page_number: Option<u32>,
    /// Opaque token from a previous page
    pub page_token: Option<String>,
    /// Resource filters, already in wire form
    pub filters: Params,
}

impl PageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    #[must_use]
    pub fn page_number(mut self, page_number: u32) -> Self {
        self.page_number = Some(page_number);
        self
    }

    #[must_use]
    pub fn page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: &impl QueryFilter) -> Self {
        self.filters.extend(filter.params());
        self
    }

    /// Wire parameters for the request: filters, then paging fields
    pub fn to_params(&self) -> Params {
        let mut params = self.filters.clone();
        params.extend(
            Params::new()
                .set_opt("PageToken", self.page_token.as_deref())
                .set_opt("Page", self.page_number)
                .set_opt("PageSize", self.page_size),
        );
        params
    }
}

type RecordCallback<'a, T> = Box<dyn FnMut(T) -> Control + Send + 'a>;
type DoneCallback<'a> = Box<dyn FnOnce(Option<&Error>) + Send + 'a>;

/// Options for `each`.
///
/// The callbacks may borrow caller state for `'a`, which is how `list`
/// collects into a local vector.
pub struct EachOptions<'a, T> {
    /// Limit, page size and filters
    pub read: ReadOptions,
    pub(crate) callback: Option<RecordCallback<'a, T>>,
    pub(crate) on_done: Option<DoneCallback<'a>>,
}

impl<'a, T> EachOptions<'a, T> {
    /// Create options with no callback yet
    pub fn new() -> Self {
        Self::from_read(ReadOptions::default())
    }

    /// Create options from existing read options
    pub fn from_read(read: ReadOptions) -> Self {
        Self {
            read,
            callback: None,
            on_done: None,
        }
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.read.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.read.page_size = Some(page_size);
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: &impl QueryFilter) -> Self {
        self.read.filters.extend(filter.params());
        self
    }

    /// Set the per-record callback
    #[must_use]
    pub fn callback(mut self, callback: impl FnMut(T) -> Control + Send + 'a) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Set the completion callback, invoked exactly once
    #[must_use]
    pub fn on_done(mut self, on_done: impl FnOnce(Option<&Error>) + Send + 'a) -> Self {
        self.on_done = Some(Box::new(on_done));
        self
    }

    /// Check if a per-record callback is set
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }
}

impl<T> Default for EachOptions<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<ReadOptions> for EachOptions<'_, T> {
    fn from(read: ReadOptions) -> Self {
        Self::from_read(read)
    }
}

impl<T> std::fmt::Debug for EachOptions<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EachOptions")
            .field("read", &self.read)
            .field("has_callback", &self.callback.is_some())
            .field("has_on_done", &self.on_done.is_some())
            .finish()
    }
}
