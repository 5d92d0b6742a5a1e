//! Lazy record stream over sequential page fetches

use super::page::{Continuation, Page};
use super::types::{ReadLimits, StreamState};
use crate::error::Result;
use futures::future::BoxFuture;
use futures::{FutureExt, Stream};
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::debug;

/// Records of every page, in server order.
///
/// Pages are fetched one at a time and only once the previous page's
/// records have all been yielded. The stream ends after `limit` records,
/// after `page_limit` pages, when the server reports no next page, when
/// [`RecordStream::stop`] is called, or after yielding a fetch error.
pub struct RecordStream<T> {
    buffered: std::vec::IntoIter<T>,
    next: Option<Continuation<T>>,
    pending: Option<BoxFuture<'static, Result<Page<T>>>>,
    pages_fetched: u64,
    delivered: u64,
    limits: ReadLimits,
    state: StreamState,
}

// Nothing is pinned structurally; the pending future is already boxed.
impl<T> Unpin for RecordStream<T> {}

impl<T> RecordStream<T> {
    /// Stream whose first page comes from `first`. Nothing runs until polled.
    pub(crate) fn new(first: BoxFuture<'static, Result<Page<T>>>, limits: ReadLimits) -> Self {
        Self {
            buffered: Vec::new().into_iter(),
            next: None,
            pending: Some(first),
            pages_fetched: 0,
            delivered: 0,
            limits,
            state: StreamState::Running,
        }
    }

    /// Stream starting from a page the caller already holds.
    ///
    /// The page counts towards `page_limit`.
    pub fn from_page(page: Page<T>, limits: ReadLimits) -> Self {
        let mut stream = Self {
            buffered: Vec::new().into_iter(),
            next: None,
            pending: None,
            pages_fetched: 0,
            delivered: 0,
            limits,
            state: StreamState::Running,
        };
        stream.accept(page);
        stream
    }

    /// Stop the stream. Buffered records are dropped and nothing more is fetched.
    pub fn stop(&mut self) {
        if self.state == StreamState::Running {
            self.finish(StreamState::Stopped, "stopped by consumer");
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Number of pages fetched so far
    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched
    }

    /// Number of records yielded so far
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Limits this stream enforces
    pub fn limits(&self) -> &ReadLimits {
        &self.limits
    }

    fn accept(&mut self, page: Page<T>) {
        self.pages_fetched += 1;
        let (records, next) = page.into_parts();
        debug!(
            "Page {} received: {} records, has next: {}",
            self.pages_fetched,
            records.len(),
            next.is_some()
        );
        self.buffered = records.into_iter();
        self.next = next;
    }

    fn finish(&mut self, state: StreamState, cause: &str) {
        debug!(
            "Record stream finished ({}): {} records from {} pages",
            cause, self.delivered, self.pages_fetched
        );
        self.state = state;
        self.buffered = Vec::new().into_iter();
        self.next = None;
        self.pending = None;
    }
}

impl<T: Send + 'static> Stream for RecordStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if this.state.is_terminal() {
                return Poll::Ready(None);
            }

            if this.limits.limit_reached(this.delivered) {
                this.finish(StreamState::Completed, "limit reached");
                continue;
            }

            if let Some(record) = this.buffered.next() {
                this.delivered += 1;
                return Poll::Ready(Some(Ok(record)));
            }

            if let Some(pending) = this.pending.as_mut() {
                let result = match pending.poll_unpin(cx) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(result) => result,
                };
                this.pending = None;
                match result {
                    Ok(page) => this.accept(page),
                    Err(err) => {
                        this.finish(StreamState::Failed, "fetch failed");
                        return Poll::Ready(Some(Err(err)));
                    }
                }
                continue;
            }

            // Current page fully delivered
            if this.limits.page_limit_reached(this.pages_fetched) {
                this.finish(StreamState::Completed, "page limit reached");
                continue;
            }

            match this.next.take() {
                Some(next) => this.pending = Some(next.fetch().boxed()),
                None => this.finish(StreamState::Completed, "no more pages"),
            }
        }
    }
}

impl<T> std::fmt::Debug for RecordStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStream")
            .field("state", &self.state)
            .field("pages_fetched", &self.pages_fetched)
            .field("delivered", &self.delivered)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}
