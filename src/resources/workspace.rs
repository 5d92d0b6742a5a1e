//! TaskRouter workspaces (v1)

use super::dates;
use crate::error::{Error, Result};
use crate::pagination::{Pager, QueryFilter, ResourceList};
use crate::types::{JsonValue, OptionStringExt, Params};
use crate::version::Version;
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const LIST_URI: &str = "/Workspaces";

/// Workspace payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub account_sid: Option<String>,
    #[serde(default, deserialize_with = "dates::iso8601")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "dates::iso8601")]
    pub date_updated: Option<DateTime<Utc>>,
    pub default_activity_name: Option<String>,
    pub default_activity_sid: Option<String>,
    pub event_callback_url: Option<String>,
    pub friendly_name: Option<String>,
    pub sid: Option<String>,
    pub timeout_activity_name: Option<String>,
    pub timeout_activity_sid: Option<String>,
}

/// List filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceFilter {
    pub friendly_name: Option<String>,
}

impl QueryFilter for WorkspaceFilter {
    fn params(&self) -> Params {
        Params::new().set_opt("FriendlyName", self.friendly_name.as_deref())
    }
}

/// Fields for creating a workspace. `friendly_name` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceCreateOptions {
    pub friendly_name: Option<String>,
    pub event_callback_url: Option<String>,
    /// Template to seed the workspace with, e.g. `FIFO`
    pub template: Option<String>,
}

impl WorkspaceCreateOptions {
    pub fn new(friendly_name: impl Into<String>) -> Self {
        Self {
            friendly_name: Some(friendly_name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn event_callback_url(mut self, url: impl Into<String>) -> Self {
        self.event_callback_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    fn to_form(&self) -> Result<Params> {
        let friendly_name = self
            .friendly_name
            .clone()
            .none_if_empty()
            .ok_or_else(|| Error::missing_param("friendly_name"))?;
        Ok(Params::new()
            .set("FriendlyName", friendly_name)
            .set_opt("EventCallbackUrl", self.event_callback_url.as_deref())
            .set_opt("Template", self.template.as_deref()))
    }
}

/// Fields accepted by update; unset fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceUpdateOptions {
    pub default_activity_sid: Option<String>,
    pub event_callback_url: Option<String>,
    pub friendly_name: Option<String>,
    pub timeout_activity_sid: Option<String>,
}

impl WorkspaceUpdateOptions {
    fn to_form(&self) -> Params {
        Params::new()
            .set_opt("DefaultActivitySid", self.default_activity_sid.as_deref())
            .set_opt("EventCallbackUrl", self.event_callback_url.as_deref())
            .set_opt("FriendlyName", self.friendly_name.as_deref())
            .set_opt("TimeoutActivitySid", self.timeout_activity_sid.as_deref())
    }
}

// ============================================================================
// List
// ============================================================================

/// All workspaces of the account
#[derive(Debug, Clone)]
pub struct WorkspaceList {
    version: Arc<Version>,
}

impl WorkspaceList {
    pub fn new(version: Arc<Version>) -> Self {
        Self { version }
    }

    pub fn uri(&self) -> &str {
        LIST_URI
    }

    /// Create a workspace. Fails before any request when `friendly_name` is missing.
    pub async fn create(&self, options: WorkspaceCreateOptions) -> Result<WorkspaceInstance> {
        let form = options.to_form()?;
        let data: Workspace = self.version.create(LIST_URI, form).await?;
        Ok(WorkspaceInstance::new(data, Arc::clone(&self.version), None))
    }

    /// Handle for one workspace
    pub fn get(&self, sid: impl Into<String>) -> WorkspaceContext {
        WorkspaceContext::new(Arc::clone(&self.version), sid)
    }
}

impl ResourceList for WorkspaceList {
    type Record = WorkspaceInstance;

    fn pager(&self) -> Pager<WorkspaceInstance> {
        let version = Arc::clone(&self.version);
        Pager::new(
            self.version.clone(),
            LIST_URI,
            Arc::new(move |raw: JsonValue| -> Result<WorkspaceInstance> {
                let data: Workspace = serde_json::from_value(raw)?;
                Ok(WorkspaceInstance::new(data, Arc::clone(&version), None))
            }),
        )
    }
}

// ============================================================================
// Instance
// ============================================================================

/// A fetched workspace
#[derive(Debug, Clone)]
pub struct WorkspaceInstance {
    data: Workspace,
    version: Arc<Version>,
    sid: String,
    context: OnceCell<WorkspaceContext>,
}

impl WorkspaceInstance {
    pub(crate) fn new(data: Workspace, version: Arc<Version>, sid: Option<String>) -> Self {
        let sid = sid.or_else(|| data.sid.clone()).unwrap_or_default();
        Self {
            data,
            version,
            sid,
            context: OnceCell::new(),
        }
    }

    pub fn data(&self) -> &Workspace {
        &self.data
    }

    pub fn into_data(self) -> Workspace {
        self.data
    }

    /// Context for this workspace, built on first use
    pub fn context(&self) -> &WorkspaceContext {
        self.context
            .get_or_init(|| WorkspaceContext::new(Arc::clone(&self.version), self.sid.clone()))
    }

    pub async fn fetch(&self) -> Result<WorkspaceInstance> {
        self.context().fetch().await
    }

    pub async fn update(&self, options: WorkspaceUpdateOptions) -> Result<WorkspaceInstance> {
        self.context().update(options).await
    }

    pub async fn remove(&self) -> Result<bool> {
        self.context().remove().await
    }
}

impl std::ops::Deref for WorkspaceInstance {
    type Target = Workspace;

    fn deref(&self) -> &Workspace {
        &self.data
    }
}

// ============================================================================
// Context
// ============================================================================

/// Operations on one workspace
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    version: Arc<Version>,
    sid: String,
    uri: String,
}

impl WorkspaceContext {
    pub fn new(version: Arc<Version>, sid: impl Into<String>) -> Self {
        let sid = sid.into();
        let uri = format!("{LIST_URI}/{sid}");
        Self { version, sid, uri }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub async fn fetch(&self) -> Result<WorkspaceInstance> {
        let data: Workspace = self.version.fetch(&self.uri).await?;
        Ok(self.instance(data))
    }

    pub async fn update(&self, options: WorkspaceUpdateOptions) -> Result<WorkspaceInstance> {
        let data: Workspace = self.version.update(&self.uri, options.to_form()).await?;
        Ok(self.instance(data))
    }

    pub async fn remove(&self) -> Result<bool> {
        self.version.remove(&self.uri).await
    }

    fn instance(&self, data: Workspace) -> WorkspaceInstance {
        WorkspaceInstance::new(data, Arc::clone(&self.version), Some(self.sid.clone()))
    }
}
