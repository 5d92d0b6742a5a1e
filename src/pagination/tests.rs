//! Tests for pagination module

use super::*;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use anyhow::anyhow;
use async_trait::async_trait;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use test_case::test_case;

// ============================================================================
// Spy Fetcher
// ============================================================================

const SPY_HOST: &str = "https://spy.test";

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct Item {
    id: u64,
}

#[derive(Clone)]
enum Reply {
    Body(JsonValue),
    Fail(&'static str),
}

/// Serves canned pages by URI and records every request
struct SpyFetcher {
    routes: HashMap<String, Reply>,
    requests: Mutex<Vec<PageRequest>>,
}

impl SpyFetcher {
    /// `/Items` serves the first batch; each batch links to the next one
    fn paged(batches: Vec<Vec<u64>>) -> Self {
        let count = batches.len();
        let routes = batches
            .into_iter()
            .enumerate()
            .map(|(index, ids)| {
                let next = (index + 1 < count).then(|| format!("/Items?Page={}", index + 1));
                let body = json!({
                    "items": ids.iter().map(|id| json!({"id": id})).collect::<Vec<_>>(),
                    "page": index,
                    "next_page_uri": next,
                    "uri": format!("/Items?Page={index}"),
                });
                (page_url(index), Reply::Body(body))
            })
            .collect();

        Self {
            routes,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Make the fetch of batch `index` fail
    fn failing_at(mut self, index: usize, message: &'static str) -> Self {
        self.routes.insert(page_url(index), Reply::Fail(message));
        self
    }

    fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

fn page_url(index: usize) -> String {
    if index == 0 {
        "/Items".to_string()
    } else {
        format!("{SPY_HOST}/Items?Page={index}")
    }
}

#[async_trait]
impl PageFetcher for SpyFetcher {
    async fn fetch_page(&self, request: &PageRequest) -> Result<JsonValue> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.routes.get(&request.uri).cloned();
        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Fail(message)) => Err(Error::from(anyhow!(message))),
            None => Err(Error::http_status(404, request.uri.clone())),
        }
    }

    fn resolve_next_url(&self, uri: &str) -> String {
        format!("{SPY_HOST}{uri}")
    }
}

fn pager(spy: &Arc<SpyFetcher>) -> Pager<Item> {
    Pager::new(spy.clone(), "/Items", json_builder())
}

fn ids(items: &[Item]) -> Vec<u64> {
    items.iter().map(|item| item.id).collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// ReadLimits Tests
// ============================================================================

#[test_case(None, None, 50, None ; "defaults")]
#[test_case(Some(10), None, 10, Some(1) ; "small limit sets page size")]
#[test_case(Some(2000), None, 1000, Some(2) ; "large limit is capped")]
#[test_case(Some(120), Some(50), 50, Some(3) ; "page limit rounds up")]
#[test_case(Some(0), None, 50, None ; "zero limit means unlimited")]
#[test_case(None, Some(5000), 1000, None ; "page size is capped")]
#[test_case(None, Some(0), 1, None ; "page size is at least one")]
fn test_read_limits(
    limit: Option<u64>,
    page_size: Option<u32>,
    expected_page_size: u32,
    expected_page_limit: Option<u64>,
) {
    let limits = ReadLimits::new(limit, page_size);
    assert_eq!(limits.page_size, expected_page_size);
    assert_eq!(limits.page_limit, expected_page_limit);
    assert!(limits.page_size <= MAX_PAGE_SIZE);
}

#[test]
fn test_read_limits_checks() {
    let limits = ReadLimits::new(Some(5), Some(2));
    assert_eq!(limits.page_limit, Some(3));
    assert!(!limits.limit_reached(4));
    assert!(limits.limit_reached(5));
    assert!(!limits.page_limit_reached(2));
    assert!(limits.page_limit_reached(3));

    let unlimited = ReadLimits::default();
    assert!(!unlimited.limit_reached(u64::MAX));
    assert!(!unlimited.page_limit_reached(u64::MAX));
}

#[test]
fn test_page_options_wire_params() {
    let params = PageOptions::new()
        .page_size(20)
        .page_number(2)
        .page_token("PTabc")
        .to_params();

    assert_eq!(params.get("PageSize"), Some("20"));
    assert_eq!(params.get("Page"), Some("2"));
    assert_eq!(params.get("PageToken"), Some("PTabc"));
    assert!(PageOptions::new().to_params().is_empty());
}

// ============================================================================
// Page Tests
// ============================================================================

#[test]
fn test_page_from_legacy_body() {
    let spy = Arc::new(SpyFetcher::paged(vec![]));
    let body = json!({
        "short_codes": [{"id": 1}, {"id": 2}],
        "page": 0,
        "page_size": 50,
        "first_page_uri": "/2010-04-01/Accounts/AC1/SMS/ShortCodes.json?Page=0",
        "next_page_uri": "/2010-04-01/Accounts/AC1/SMS/ShortCodes.json?Page=1&PageToken=PA1",
        "previous_page_uri": null,
        "uri": "/2010-04-01/Accounts/AC1/SMS/ShortCodes.json?Page=0",
        "start": 0,
        "end": 1
    });

    let page: Page<Item> = Page::from_response(body, spy, json_builder()).unwrap();

    assert_eq!(ids(page.records()), vec![1, 2]);
    assert_eq!(page.meta().key, "short_codes");
    assert_eq!(page.meta().page, Some(0));
    assert_eq!(page.meta().page_size, Some(50));
    assert_eq!(page.meta().previous_page_url, None);
    assert_eq!(
        page.meta().next_page_url.as_deref(),
        Some("https://spy.test/2010-04-01/Accounts/AC1/SMS/ShortCodes.json?Page=1&PageToken=PA1")
    );
    assert!(page.has_next());
}

#[test]
fn test_page_from_meta_body() {
    let spy = Arc::new(SpyFetcher::paged(vec![]));
    let body = json!({
        "workspaces": [{"id": 7}],
        "meta": {
            "key": "workspaces",
            "page": 1,
            "page_size": 1,
            "url": "https://taskrouter.twilio.com/v1/Workspaces?PageSize=1&Page=1",
            "first_page_url": "https://taskrouter.twilio.com/v1/Workspaces?PageSize=1&Page=0",
            "previous_page_url": "https://taskrouter.twilio.com/v1/Workspaces?PageSize=1&Page=0",
            "next_page_url": "https://taskrouter.twilio.com/v1/Workspaces?PageSize=1&Page=2"
        }
    });

    let mut page: Page<Item> = Page::from_response(body, spy, json_builder()).unwrap();

    assert_eq!(ids(page.records()), vec![7]);
    assert_eq!(page.meta().key, "workspaces");
    assert_eq!(page.meta().page, Some(1));
    // Absolute URLs from meta are used as-is
    let next = page.continuation().unwrap();
    assert_eq!(
        next.url(),
        "https://taskrouter.twilio.com/v1/Workspaces?PageSize=1&Page=2"
    );
}

#[test]
fn test_page_last_page_has_no_continuation() {
    let spy = Arc::new(SpyFetcher::paged(vec![]));
    let body = json!({
        "items": [],
        "meta": {"key": "items", "next_page_url": null}
    });

    let mut page: Page<Item> = Page::from_response(body, spy, json_builder()).unwrap();
    assert!(page.is_empty());
    assert!(!page.has_next());
    assert!(page.continuation().is_none());
}

#[test]
fn test_page_without_record_key_fails() {
    let spy = Arc::new(SpyFetcher::paged(vec![]));
    let body = json!({"page": 0, "page_size": 50, "uri": "/Items"});

    let err = Page::<Item>::from_response(body, spy, json_builder()).unwrap_err();
    assert!(matches!(err, Error::PageDecode { .. }));
}

#[test]
fn test_page_with_ambiguous_record_key_fails() {
    let spy = Arc::new(SpyFetcher::paged(vec![]));
    let body = json!({
        "aaa_extra": [],
        "items": [{"id": 1}, {"id": 2}],
        "next_page_uri": null
    });

    // Two candidate keys: neither is picked, so no records go missing silently
    let err = Page::<Item>::from_response(body, spy.clone(), json_builder()).unwrap_err();
    assert!(matches!(err, Error::PageDecode { .. }));

    let body = json!({"account_sid": "AC1", "items": [{"id": 1}]});
    let err = Page::<Item>::from_response(body, spy, json_builder()).unwrap_err();
    assert!(matches!(err, Error::PageDecode { .. }));
}

#[test]
fn test_page_non_object_body_fails() {
    let spy = Arc::new(SpyFetcher::paged(vec![]));

    let err = Page::<Item>::from_response(json!([1, 2]), spy.clone(), json_builder()).unwrap_err();
    assert!(matches!(err, Error::PageDecode { .. }));

    let err = Page::<Item>::from_response(json!({"items": "nope"}), spy, json_builder())
        .unwrap_err();
    assert!(matches!(err, Error::PageDecode { .. }));
}

#[test]
fn test_page_record_builder_error_propagates() {
    let spy = Arc::new(SpyFetcher::paged(vec![]));
    let body = json!({"items": [{"id": "not a number"}]});

    let err = Page::<Item>::from_response(body, spy, json_builder()).unwrap_err();
    assert!(matches!(err, Error::JsonParse(_)));
}

#[tokio::test]
async fn test_page_continuation_taken_once() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1], vec![2]]));
    let mut page = pager(&spy).page(PageOptions::new()).await.unwrap();

    let next = page.continuation();
    assert!(next.is_some());
    assert!(page.continuation().is_none());
    assert!(page.next_page().await.unwrap().is_none());

    let second = next.unwrap().fetch().await.unwrap();
    assert_eq!(ids(second.records()), vec![2]);
    assert_eq!(spy.calls(), 2);
}

#[tokio::test]
async fn test_page_next_page() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1, 2], vec![3]]));
    let mut first = pager(&spy).page(PageOptions::new()).await.unwrap();

    let mut second = first.next_page().await.unwrap().unwrap();
    assert_eq!(ids(second.records()), vec![3]);
    assert!(second.next_page().await.unwrap().is_none());
    assert_eq!(spy.calls(), 2);
}

#[tokio::test]
async fn test_page_called_twice_fetches_twice() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1, 2], vec![3]]));
    let pager = pager(&spy);

    let mut first = pager.page(PageOptions::new()).await.unwrap();
    let second = pager.page(PageOptions::new()).await.unwrap();

    assert_eq!(spy.calls(), 2);
    assert_eq!(ids(first.records()), ids(second.records()));

    // Taking one page's continuation leaves the other untouched
    assert!(first.continuation().is_some());
    assert!(second.has_next());
}

#[tokio::test]
async fn test_page_sends_options_as_params() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1]]));
    pager(&spy)
        .page(PageOptions::new().page_size(5).page_token("PT1"))
        .await
        .unwrap();

    let request = &spy.requests()[0];
    assert_eq!(request.uri, "/Items");
    assert_eq!(request.params.get("PageSize"), Some("5"));
    assert_eq!(request.params.get("PageToken"), Some("PT1"));
    assert_eq!(request.params.get("Page"), None);
}

#[tokio::test]
async fn test_page_fetch_failure_propagates() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1]]).failing_at(0, "connection reset"));
    let err = pager(&spy).page(PageOptions::new()).await.unwrap_err();
    assert_eq!(err.to_string(), "connection reset");
}

// ============================================================================
// each Tests
// ============================================================================

#[test_case(None, "50" ; "default page size")]
#[test_case(Some(10), "10" ; "limit below default")]
#[test_case(Some(2000), "1000" ; "limit above hard cap")]
#[tokio::test]
async fn test_each_first_request_page_size(limit: Option<u64>, expected: &str) {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1]]));
    let mut options = EachOptions::new().callback(|_: Item| Control::Continue);
    if let Some(limit) = limit {
        options = options.limit(limit);
    }

    pager(&spy).each(options).unwrap().await.unwrap();

    let requests = spy.requests();
    assert_eq!(requests[0].params.get("PageSize"), Some(expected));
}

/// Delegates to a spy but serves at most two records per page
struct CappedFetcher(Arc<SpyFetcher>);

#[async_trait]
impl PageFetcher for CappedFetcher {
    async fn fetch_page(&self, request: &PageRequest) -> Result<JsonValue> {
        self.0.fetch_page(request).await
    }

    fn resolve_next_url(&self, uri: &str) -> String {
        self.0.resolve_next_url(uri)
    }

    fn read_limits(&self, limit: Option<u64>, _page_size: Option<u32>) -> ReadLimits {
        ReadLimits::new(limit, Some(2))
    }
}

#[tokio::test]
async fn test_limits_come_from_the_fetcher() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1, 2], vec![3, 4], vec![5]]));
    let pager: Pager<Item> = Pager::new(
        Arc::new(CappedFetcher(spy.clone())),
        "/Items",
        json_builder(),
    );

    let items = pager
        .list(ReadOptions::new().limit(3).page_size(50))
        .await
        .unwrap();

    assert_eq!(ids(&items), vec![1, 2, 3]);
    assert_eq!(spy.requests()[0].params.get("PageSize"), Some("2"));
    assert_eq!(spy.calls(), 2);
}

#[test]
fn test_each_without_callback_is_usage_error() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1, 2]]));

    let Err(err) = pager(&spy).each(EachOptions::new().limit(5)) else {
        panic!("each without a callback must fail");
    };

    assert!(err.is_usage());
    assert_eq!(
        err.to_string(),
        "Usage error: Callback function must be provided"
    );
    assert_eq!(spy.calls(), 0);
}

#[tokio::test]
async fn test_each_delivers_all_records_in_order() {
    init_tracing();
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1, 2, 3], vec![4, 5], vec![6]]));
    let mut seen = Vec::new();
    let mut done_calls = 0;
    let mut done_error = None;

    pager(&spy)
        .each(
            EachOptions::new()
                .callback(|item: Item| {
                    seen.push(item.id);
                    Control::Continue
                })
                .on_done(|err| {
                    done_calls += 1;
                    done_error = err.map(ToString::to_string);
                }),
        )
        .unwrap()
        .await
        .unwrap();

    assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(done_calls, 1);
    assert_eq!(done_error, None);
    assert_eq!(spy.calls(), 3);
}

#[tokio::test]
async fn test_each_stop_mid_page_skips_next_fetch() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1, 2, 3], vec![4, 5]]));
    let mut seen = Vec::new();
    let mut done_calls = 0;
    let mut done_error = None;

    pager(&spy)
        .each(
            EachOptions::new()
                .callback(|item: Item| {
                    seen.push(item.id);
                    if item.id == 2 {
                        Control::Stop
                    } else {
                        Control::Continue
                    }
                })
                .on_done(|err| {
                    done_calls += 1;
                    done_error = err.map(ToString::to_string);
                }),
        )
        .unwrap()
        .await
        .unwrap();

    assert_eq!(seen, vec![1, 2]);
    assert_eq!(done_calls, 1);
    assert_eq!(done_error, None);
    assert_eq!(spy.calls(), 1);
}

#[tokio::test]
async fn test_each_second_fetch_failure_reaches_on_done() {
    let spy = Arc::new(
        SpyFetcher::paged(vec![vec![1, 2], vec![3, 4]]).failing_at(1, "connection reset"),
    );
    let seen = Mutex::new(Vec::new());
    let done = Mutex::new(Vec::new());

    let result = pager(&spy)
        .each(
            EachOptions::new()
                .callback(|item: Item| {
                    seen.lock().unwrap().push(item.id);
                    Control::Continue
                })
                .on_done(|err| {
                    // Record what had been delivered when completion fired
                    let delivered = seen.lock().unwrap().len();
                    done.lock()
                        .unwrap()
                        .push((delivered, err.map(ToString::to_string)));
                }),
        )
        .unwrap()
        .await;

    assert_eq!(result.unwrap_err().to_string(), "connection reset");
    assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    assert_eq!(
        *done.lock().unwrap(),
        vec![(2, Some("connection reset".to_string()))]
    );
    assert_eq!(spy.calls(), 2);
}

#[tokio::test]
async fn test_each_first_fetch_failure_reaches_on_done() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1]]).failing_at(0, "timed out"));
    let mut seen = 0;
    let mut done_error = None;

    let result = pager(&spy)
        .each(
            EachOptions::new()
                .callback(|_: Item| {
                    seen += 1;
                    Control::Continue
                })
                .on_done(|err| done_error = err.map(ToString::to_string)),
        )
        .unwrap()
        .await;

    assert!(result.is_err());
    assert_eq!(seen, 0);
    assert_eq!(done_error.as_deref(), Some("timed out"));
}

#[tokio::test]
async fn test_each_stops_at_page_limit() {
    // Server returns fewer records than requested; page limit still applies
    let spy = Arc::new(SpyFetcher::paged(vec![
        vec![1],
        vec![2],
        vec![3],
        vec![4],
        vec![5],
    ]));
    let mut seen = Vec::new();

    pager(&spy)
        .each(
            EachOptions::new()
                .limit(5)
                .page_size(2)
                .callback(|item: Item| {
                    seen.push(item.id);
                    Control::Continue
                }),
        )
        .unwrap()
        .await
        .unwrap();

    assert_eq!(seen, vec![1, 2, 3]);
    assert_eq!(spy.calls(), 3);
}

#[tokio::test]
async fn test_each_sends_filters() {
    struct NameFilter;
    impl QueryFilter for NameFilter {
        fn params(&self) -> crate::types::Params {
            crate::types::Params::new().set("FriendlyName", "Support")
        }
    }

    let spy = Arc::new(SpyFetcher::paged(vec![vec![1]]));
    pager(&spy)
        .each(
            EachOptions::new()
                .filter(&NameFilter)
                .callback(|_: Item| Control::Continue),
        )
        .unwrap()
        .await
        .unwrap();

    let request = &spy.requests()[0];
    assert_eq!(request.params.get("FriendlyName"), Some("Support"));
    assert_eq!(request.params.get("PageSize"), Some("50"));
}

// ============================================================================
// list Tests
// ============================================================================

#[tokio::test]
async fn test_list_collects_every_page() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1, 2, 3], vec![4, 5], vec![]]));

    let items = pager(&spy).list(ReadOptions::new()).await.unwrap();

    assert_eq!(ids(&items), vec![1, 2, 3, 4, 5]);
    assert_eq!(spy.calls(), 3);
}

#[tokio::test]
async fn test_list_limit_stops_fetching() {
    let spy = Arc::new(SpyFetcher::paged(vec![
        vec![1, 2, 3],
        vec![4, 5, 6],
        vec![7, 8, 9],
    ]));

    let items = pager(&spy)
        .list(ReadOptions::new().limit(4).page_size(3))
        .await
        .unwrap();

    assert_eq!(ids(&items), vec![1, 2, 3, 4]);
    // No fetch beyond the page holding the 4th record
    assert_eq!(spy.calls(), 2);
}

#[tokio::test]
async fn test_list_limit_on_page_boundary() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1, 2, 3], vec![4, 5, 6]]));

    let items = pager(&spy)
        .list(ReadOptions::new().limit(3).page_size(3))
        .await
        .unwrap();

    assert_eq!(ids(&items), vec![1, 2, 3]);
    assert_eq!(spy.calls(), 1);
}

#[tokio::test]
async fn test_list_drops_excess_records_in_last_page() {
    // Server ignores the requested page size
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1, 2, 3, 4, 5, 6]]));

    let items = pager(&spy)
        .list(ReadOptions::new().limit(2))
        .await
        .unwrap();

    assert_eq!(ids(&items), vec![1, 2]);
}

#[tokio::test]
async fn test_list_failure_discards_partial_results() {
    let spy = Arc::new(
        SpyFetcher::paged(vec![vec![1, 2], vec![3, 4]]).failing_at(1, "connection reset"),
    );

    let err = pager(&spy).list(ReadOptions::new()).await.unwrap_err();

    assert_eq!(err.to_string(), "connection reset");
    assert_eq!(spy.calls(), 2);
}

#[tokio::test]
async fn test_concurrent_lists_are_independent() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1, 2], vec![3]]));
    let pager = pager(&spy);

    let (left, right) = futures::join!(
        pager.list(ReadOptions::new()),
        pager.list(ReadOptions::new().limit(2).page_size(2))
    );

    assert_eq!(ids(&left.unwrap()), vec![1, 2, 3]);
    assert_eq!(ids(&right.unwrap()), vec![1, 2]);
    assert_eq!(spy.calls(), 3);
}

// ============================================================================
// Stream Tests
// ============================================================================

#[tokio::test]
async fn test_stream_is_lazy() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1]]));
    let stream = pager(&spy).stream(ReadOptions::new());

    assert_eq!(stream.state(), StreamState::Running);
    assert_eq!(spy.calls(), 0);
}

#[tokio::test]
async fn test_stream_yields_records_and_completes() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1, 2], vec![3]]));
    let mut stream = pager(&spy).stream(ReadOptions::new());

    let mut seen = Vec::new();
    while let Some(item) = stream.next().await {
        seen.push(item.unwrap().id);
    }

    assert_eq!(seen, vec![1, 2, 3]);
    assert_eq!(stream.state(), StreamState::Completed);
    assert_eq!(stream.pages_fetched(), 2);
    assert_eq!(stream.delivered(), 3);
}

#[tokio::test]
async fn test_stream_stop() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1, 2], vec![3]]));
    let mut stream = pager(&spy).stream(ReadOptions::new());

    assert_eq!(stream.next().await.unwrap().unwrap().id, 1);
    stream.stop();

    assert_eq!(stream.state(), StreamState::Stopped);
    assert!(stream.next().await.is_none());
    assert_eq!(spy.calls(), 1);
}

#[tokio::test]
async fn test_stream_ends_after_error() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1], vec![2]]).failing_at(1, "boom"));
    let results: Vec<Result<Item>> = pager(&spy).stream(ReadOptions::new()).collect().await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().id, 1);
    assert_eq!(results[1].as_ref().unwrap_err().to_string(), "boom");
}

#[tokio::test]
async fn test_stream_from_page() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1, 2], vec![3, 4]]));
    let page = pager(&spy).page(PageOptions::new()).await.unwrap();

    let items: Vec<Item> = RecordStream::from_page(page, ReadLimits::new(Some(3), Some(2)))
        .map(|item| item.unwrap())
        .collect()
        .await;

    assert_eq!(ids(&items), vec![1, 2, 3]);
    assert_eq!(spy.calls(), 2);
}

#[test]
fn test_list_blocking() {
    let spy = Arc::new(SpyFetcher::paged(vec![vec![1], vec![2]]));
    let items = tokio_test::block_on(pager(&spy).list(ReadOptions::new())).unwrap();
    assert_eq!(ids(&items), vec![1, 2]);
}
