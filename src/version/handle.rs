//! Versioned API path and the requests made through it

use super::domain::{is_absolute_url, Domain};
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{PageFetcher, PageRequest, ReadLimits};
use crate::types::{JsonValue, Method, Params};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// A versioned path under a domain, e.g. `https://api.twilio.com/2010-04-01`
#[derive(Debug, Clone)]
pub struct Version {
    domain: Domain,
    version: String,
    http: Arc<HttpClient>,
}

impl Version {
    /// Create a version handle sharing `http`
    pub fn new(domain: Domain, version: impl Into<String>, http: Arc<HttpClient>) -> Self {
        Self {
            domain,
            version: version.into().trim_matches('/').to_string(),
            http,
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Version path segment, e.g. `v1`
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Transport shared with every other version of the client
    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    /// Prefix a resource URI with the version path
    pub fn relative_uri(&self, uri: &str) -> String {
        format!("{}/{}", self.version, uri.trim_start_matches('/'))
    }

    /// Full URL of a resource URI under this version
    pub fn absolute_url(&self, uri: &str) -> String {
        if is_absolute_url(uri) {
            return uri.to_string();
        }
        self.domain.absolute_url(&self.relative_uri(uri))
    }

    /// Limits for a read with the given `limit` and `page_size`
    pub fn read_limits(&self, limit: Option<u64>, page_size: Option<u32>) -> ReadLimits {
        ReadLimits::new(limit, page_size)
    }

    /// GET one page of a list and return the raw body
    pub async fn page(&self, uri: &str, params: Params) -> Result<JsonValue> {
        let url = self.absolute_url(uri);
        self.http
            .get_json(&url, RequestConfig::new().params(params))
            .await
    }

    /// GET a single resource
    pub async fn fetch<T: DeserializeOwned>(&self, uri: &str) -> Result<T> {
        let url = self.absolute_url(uri);
        self.http
            .request_json(Method::GET.into(), &url, RequestConfig::new())
            .await
    }

    /// POST a form to create a resource
    pub async fn create<T: DeserializeOwned>(&self, uri: &str, form: Params) -> Result<T> {
        let url = self.absolute_url(uri);
        self.http
            .request_json(Method::POST.into(), &url, RequestConfig::new().form(form))
            .await
    }

    /// POST a form to update a resource
    pub async fn update<T: DeserializeOwned>(&self, uri: &str, form: Params) -> Result<T> {
        self.create(uri, form).await
    }

    /// DELETE a resource. Returns `true` when the server answered 204.
    pub async fn remove(&self, uri: &str) -> Result<bool> {
        let url = self.absolute_url(uri);
        let response = self.http.delete(&url).await?;
        Ok(response.status() == StatusCode::NO_CONTENT)
    }
}

#[async_trait]
impl PageFetcher for Version {
    async fn fetch_page(&self, request: &PageRequest) -> Result<JsonValue> {
        debug!("Fetching page {}", request.uri);
        self.page(&request.uri, request.params.clone()).await
    }

    fn resolve_next_url(&self, uri: &str) -> String {
        // Legacy next_page_uri values already include the version path
        self.domain.absolute_url(uri)
    }

    fn read_limits(&self, limit: Option<u64>, page_size: Option<u32>) -> ReadLimits {
        Version::read_limits(self, limit, page_size)
    }
}
