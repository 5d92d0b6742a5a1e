//! Pagination module
//!
//! One generic reader shared by every resource list.
//!
//! # Overview
//!
//! A [`Page`] is one decoded batch of records plus a [`Continuation`] that
//! fetches the next batch. [`Pager`] drives continuations for a list
//! endpoint and offers four ways to read it:
//!
//! - [`Pager::page`]: exactly one fetch
//! - [`Pager::stream`]: a lazy `Stream` of records across pages
//! - [`Pager::each`]: per-record callback with early stop and `on_done`
//! - [`Pager::list`]: every record collected into a `Vec`
//!
//! Fetches are strictly sequential and stop at the record `limit`, at the
//! derived `page_limit`, or when the server reports no next page. The
//! actual HTTP work sits behind the [`PageFetcher`] trait.

mod page;
mod pager;
mod stream;
mod types;

pub use page::{Continuation, Page, PageMeta};
pub use pager::{Pager, ResourceList};
pub use stream::RecordStream;
pub use types::{
    json_builder, Control, EachOptions, PageFetcher, PageOptions, PageRequest, QueryFilter,
    ReadLimits, ReadOptions, RecordBuilder, StreamState, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};

#[cfg(test)]
mod tests;
