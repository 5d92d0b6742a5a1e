//! Top-level client
//!
//! Owns the shared HTTP client and hands out memoized version handles for
//! each domain.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::resources::{ShortCodeList, SyncMapItemList, WorkspaceList};
use crate::version::{Domain, Version};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

const API_VERSION: &str = "2010-04-01";
const PREVIEW_SYNC_VERSION: &str = "Sync";
const TASKROUTER_VERSION: &str = "v1";

/// Entry point for all REST calls.
///
/// Every domain shares one [`HttpClient`], so one rate limiter and one
/// connection pool cover all requests.
#[derive(Debug)]
pub struct Client {
    config: ClientConfig,
    http: Arc<HttpClient>,
    api: OnceCell<Arc<Version>>,
    preview: OnceCell<Arc<Version>>,
    taskrouter: OnceCell<Arc<Version>>,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_auth(config.http_client_config(), config.auth())?;
        debug!(
            "Created client for {} (edge: {:?}, region: {:?})",
            config.account_sid, config.edge, config.region
        );

        Ok(Self {
            config,
            http: Arc::new(http),
            api: OnceCell::new(),
            preview: OnceCell::new(),
            taskrouter: OnceCell::new(),
        })
    }

    /// Build from `TWILIO_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn account_sid(&self) -> &str {
        &self.config.account_sid
    }

    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    /// API v2010
    pub fn api(&self) -> Result<Arc<Version>> {
        self.version(&self.api, &self.config.base_urls.api, API_VERSION)
    }

    /// Preview Sync
    pub fn preview(&self) -> Result<Arc<Version>> {
        self.version(
            &self.preview,
            &self.config.base_urls.preview,
            PREVIEW_SYNC_VERSION,
        )
    }

    /// TaskRouter v1
    pub fn taskrouter(&self) -> Result<Arc<Version>> {
        self.version(
            &self.taskrouter,
            &self.config.base_urls.taskrouter,
            TASKROUTER_VERSION,
        )
    }

    /// Short codes of `account_sid`, or of the client's own account
    pub fn short_codes(&self, account_sid: Option<&str>) -> Result<ShortCodeList> {
        let account_sid = account_sid.unwrap_or(&self.config.account_sid);
        Ok(ShortCodeList::new(self.api()?, account_sid))
    }

    pub fn sync_map_items(
        &self,
        service_sid: impl Into<String>,
        map_sid: impl Into<String>,
    ) -> Result<SyncMapItemList> {
        Ok(SyncMapItemList::new(self.preview()?, service_sid, map_sid))
    }

    pub fn workspaces(&self) -> Result<WorkspaceList> {
        Ok(WorkspaceList::new(self.taskrouter()?))
    }

    fn version(
        &self,
        cell: &OnceCell<Arc<Version>>,
        base_url: &str,
        version: &str,
    ) -> Result<Arc<Version>> {
        cell.get_or_try_init(|| {
            let domain = Domain::new(base_url)
                .with_edge(self.config.edge.as_deref(), self.config.region.as_deref())?;
            debug!("Resolved {}/{}", domain.base_url(), version);
            Ok(Arc::new(Version::new(domain, version, Arc::clone(&self.http))))
        })
        .map(Arc::clone)
    }
}
