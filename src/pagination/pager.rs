//! Generic list reader: `page`, `stream`, `each` and `list`

use super::page::Page;
use super::stream::RecordStream;
use super::types::{
    Control, EachOptions, PageFetcher, PageOptions, PageRequest, ReadOptions, RecordBuilder,
};
use crate::error::{Error, Result};
use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::{FutureExt, StreamExt};
use std::sync::Arc;
use tracing::debug;

/// Reads one list endpoint page by page.
///
/// Holds no per-read state, so concurrent reads through one `Pager` each
/// keep their own page counter and accumulator.
pub struct Pager<T> {
    fetcher: Arc<dyn PageFetcher>,
    uri: String,
    builder: RecordBuilder<T>,
}

impl<T> Clone for Pager<T> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            uri: self.uri.clone(),
            builder: Arc::clone(&self.builder),
        }
    }
}

impl<T> std::fmt::Debug for Pager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("uri", &self.uri)
            .finish_non_exhaustive()
    }
}

impl<T: Send + 'static> Pager<T> {
    /// Create a pager for `uri`, resolved by `fetcher`
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        uri: impl Into<String>,
        builder: RecordBuilder<T>,
    ) -> Self {
        Self {
            fetcher,
            uri: uri.into(),
            builder,
        }
    }

    /// List endpoint this pager reads
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Fetch exactly one page
    pub async fn page(&self, options: PageOptions) -> Result<Page<T>> {
        let request = PageRequest::new(self.uri.clone(), options.to_params());
        fetch_first(Arc::clone(&self.fetcher), request, Arc::clone(&self.builder)).await
    }

    /// Stream records across pages.
    ///
    /// Nothing is fetched until the stream is first polled.
    pub fn stream(&self, options: ReadOptions) -> RecordStream<T> {
        let limits = self.fetcher.read_limits(options.limit, options.page_size);
        let page = PageOptions {
            page_size: Some(limits.page_size),
            filters: options.filters,
            ..PageOptions::default()
        };
        let request = PageRequest::new(self.uri.clone(), page.to_params());

        debug!(
            "Reading {} (limit: {:?}, page size: {}, page limit: {:?})",
            self.uri, limits.limit, limits.page_size, limits.page_limit
        );

        let first = fetch_first(Arc::clone(&self.fetcher), request, Arc::clone(&self.builder));
        RecordStream::new(first.boxed(), limits)
    }

    /// Deliver each record to a callback.
    ///
    /// Fails with `Error::Usage` before any I/O when no callback is set.
    /// Otherwise returns a future that delivers records until the stream
    /// ends or the callback returns [`Control::Stop`], then calls `on_done`
    /// exactly once with the fetch error, if any, and resolves to the same
    /// outcome.
    pub fn each<'a>(&self, options: EachOptions<'a, T>) -> Result<BoxFuture<'a, Result<()>>> {
        let EachOptions {
            read,
            callback,
            on_done,
        } = options;
        let mut callback =
            callback.ok_or_else(|| Error::usage("Callback function must be provided"))?;
        let mut stream = self.stream(read);

        Ok(async move {
            let mut outcome = Ok(());
            while let Some(item) = stream.next().await {
                match item {
                    Ok(record) => {
                        if callback(record) == Control::Stop {
                            stream.stop();
                            break;
                        }
                    }
                    Err(err) => {
                        outcome = Err(err);
                        break;
                    }
                }
            }

            if let Some(on_done) = on_done {
                on_done(outcome.as_ref().err());
            }
            outcome
        }
        .boxed())
    }

    /// Collect records across pages into one vector.
    ///
    /// Never returns more than `limit` records. A fetch error discards
    /// whatever was collected before it.
    pub async fn list(&self, options: ReadOptions) -> Result<Vec<T>> {
        let limit = self.fetcher.read_limits(options.limit, options.page_size).limit;
        let mut records = Vec::new();

        let collect = {
            let records = &mut records;
            self.each(EachOptions::from_read(options).callback(move |record| {
                records.push(record);
                if limit.is_some_and(|limit| records.len() as u64 >= limit) {
                    Control::Stop
                } else {
                    Control::Continue
                }
            }))?
        };
        collect.await?;

        Ok(records)
    }
}

async fn fetch_first<T: Send + 'static>(
    fetcher: Arc<dyn PageFetcher>,
    request: PageRequest,
    builder: RecordBuilder<T>,
) -> Result<Page<T>> {
    let body = fetcher.fetch_page(&request).await?;
    Page::from_response(body, fetcher, builder)
}

// ============================================================================
// Resource Lists
// ============================================================================

/// A list endpoint of one resource type.
///
/// Implementors provide the [`Pager`]; reading behaviour is shared.
#[async_trait]
pub trait ResourceList: Send + Sync {
    /// Record type yielded by this list
    type Record: Send + 'static;

    /// Pager for this list's endpoint
    fn pager(&self) -> Pager<Self::Record>;

    /// Fetch one page
    async fn page(&self, options: PageOptions) -> Result<Page<Self::Record>> {
        self.pager().page(options).await
    }

    /// Stream records across pages
    fn stream(&self, options: ReadOptions) -> RecordStream<Self::Record> {
        self.pager().stream(options)
    }

    /// Deliver each record to a callback
    fn each<'a>(
        &self,
        options: EachOptions<'a, Self::Record>,
    ) -> Result<BoxFuture<'a, Result<()>>> {
        self.pager().each(options)
    }

    /// Collect records into one vector
    async fn list(&self, options: ReadOptions) -> Result<Vec<Self::Record>> {
        self.pager().list(options).await
    }
}
