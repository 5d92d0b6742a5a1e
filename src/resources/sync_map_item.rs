//! Sync map items (Preview Sync)
//!
//! `/Services/{ServiceSid}/Maps/{MapSid}/Items`, keyed by item key.

use super::dates;
use crate::error::{Error, Result};
use crate::pagination::{Pager, QueryFilter, ResourceList};
use crate::types::{JsonValue, OptionStringExt, Params};
use crate::version::Version;
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Sync map item payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncMapItem {
    pub key: Option<String>,
    pub account_sid: Option<String>,
    pub service_sid: Option<String>,
    pub map_sid: Option<String>,
    pub url: Option<String>,
    pub revision: Option<String>,
    #[serde(default)]
    pub data: JsonValue,
    #[serde(default, deserialize_with = "dates::iso8601")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "dates::iso8601")]
    pub date_updated: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
}

/// Direction to read items in, relative to `From`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryDirection {
    Forward,
    Backward,
}

impl std::fmt::Display for QueryDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        })
    }
}

/// Result ordering by key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryResultOrder {
    Asc,
    Desc,
}

impl std::fmt::Display for QueryResultOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Whether `From` itself is part of the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryFromBoundType {
    Inclusive,
    Exclusive,
}

impl std::fmt::Display for QueryFromBoundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Inclusive => "inclusive",
            Self::Exclusive => "exclusive",
        })
    }
}

/// List filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncMapItemFilter {
    pub direction: Option<QueryDirection>,
    pub order: Option<QueryResultOrder>,
    /// Key to start from
    pub from: Option<String>,
    pub bounds: Option<QueryFromBoundType>,
    /// Leave `data` out of the listed items
    pub exclude_data: Option<bool>,
}

impl QueryFilter for SyncMapItemFilter {
    fn params(&self) -> Params {
        Params::new()
            .set_opt("Direction", self.direction)
            .set_opt("Order", self.order)
            .set_opt("From", self.from.as_deref())
            .set_opt("Bounds", self.bounds)
            .set_opt("ExcludeData", self.exclude_data)
    }
}

/// Fields for creating an item. Both are required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncMapItemCreateOptions {
    pub key: Option<String>,
    pub data: Option<JsonValue>,
}

impl SyncMapItemCreateOptions {
    pub fn new(key: impl Into<String>, data: JsonValue) -> Self {
        Self {
            key: Some(key.into()),
            data: Some(data),
        }
    }

    fn to_form(&self) -> Result<Params> {
        let key = self
            .key
            .clone()
            .none_if_empty()
            .ok_or_else(|| Error::missing_param("key"))?;
        let data = self.data.as_ref().ok_or_else(|| Error::missing_param("data"))?;
        Ok(Params::new()
            .set("Key", key)
            .set("Data", serde_json::to_string(data)?))
    }
}

/// Fields for updating an item. `data` is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncMapItemUpdateOptions {
    pub data: Option<JsonValue>,
}

impl SyncMapItemUpdateOptions {
    pub fn new(data: JsonValue) -> Self {
        Self { data: Some(data) }
    }

    fn to_form(&self) -> Result<Params> {
        let data = self.data.as_ref().ok_or_else(|| Error::missing_param("data"))?;
        Ok(Params::new().set("Data", serde_json::to_string(data)?))
    }
}

// ============================================================================
// List
// ============================================================================

/// Items of one sync map
#[derive(Debug, Clone)]
pub struct SyncMapItemList {
    version: Arc<Version>,
    service_sid: String,
    map_sid: String,
    uri: String,
}

impl SyncMapItemList {
    pub fn new(
        version: Arc<Version>,
        service_sid: impl Into<String>,
        map_sid: impl Into<String>,
    ) -> Self {
        let service_sid = service_sid.into();
        let map_sid = map_sid.into();
        let uri = format!("/Services/{service_sid}/Maps/{map_sid}/Items");
        Self {
            version,
            service_sid,
            map_sid,
            uri,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Create an item. Fails before any request when `key` or `data` is missing.
    pub async fn create(&self, options: SyncMapItemCreateOptions) -> Result<SyncMapItemInstance> {
        let form = options.to_form()?;
        let data: SyncMapItem = self.version.create(&self.uri, form).await?;
        Ok(SyncMapItemInstance::new(
            data,
            Arc::clone(&self.version),
            self.service_sid.clone(),
            self.map_sid.clone(),
            None,
        ))
    }

    /// Handle for one item
    pub fn get(&self, key: impl Into<String>) -> SyncMapItemContext {
        SyncMapItemContext::new(
            Arc::clone(&self.version),
            self.service_sid.clone(),
            self.map_sid.clone(),
            key,
        )
    }
}

impl ResourceList for SyncMapItemList {
    type Record = SyncMapItemInstance;

    fn pager(&self) -> Pager<SyncMapItemInstance> {
        let version = Arc::clone(&self.version);
        let service_sid = self.service_sid.clone();
        let map_sid = self.map_sid.clone();
        Pager::new(
            self.version.clone(),
            self.uri.clone(),
            Arc::new(move |raw: JsonValue| -> Result<SyncMapItemInstance> {
                let data: SyncMapItem = serde_json::from_value(raw)?;
                Ok(SyncMapItemInstance::new(
                    data,
                    Arc::clone(&version),
                    service_sid.clone(),
                    map_sid.clone(),
                    None,
                ))
            }),
        )
    }
}

// ============================================================================
// Instance
// ============================================================================

/// A fetched sync map item
#[derive(Debug, Clone)]
pub struct SyncMapItemInstance {
    data: SyncMapItem,
    version: Arc<Version>,
    service_sid: String,
    map_sid: String,
    key: String,
    context: OnceCell<SyncMapItemContext>,
}

impl SyncMapItemInstance {
    pub(crate) fn new(
        data: SyncMapItem,
        version: Arc<Version>,
        service_sid: String,
        map_sid: String,
        key: Option<String>,
    ) -> Self {
        let key = key.or_else(|| data.key.clone()).unwrap_or_default();
        Self {
            data,
            version,
            service_sid,
            map_sid,
            key,
            context: OnceCell::new(),
        }
    }

    pub fn data(&self) -> &SyncMapItem {
        &self.data
    }

    pub fn into_data(self) -> SyncMapItem {
        self.data
    }

    /// Context for this item, built on first use
    pub fn context(&self) -> &SyncMapItemContext {
        self.context.get_or_init(|| {
            SyncMapItemContext::new(
                Arc::clone(&self.version),
                self.service_sid.clone(),
                self.map_sid.clone(),
                self.key.clone(),
            )
        })
    }

    pub async fn fetch(&self) -> Result<SyncMapItemInstance> {
        self.context().fetch().await
    }

    pub async fn update(&self, options: SyncMapItemUpdateOptions) -> Result<SyncMapItemInstance> {
        self.context().update(options).await
    }

    pub async fn remove(&self) -> Result<bool> {
        self.context().remove().await
    }
}

impl std::ops::Deref for SyncMapItemInstance {
    type Target = SyncMapItem;

    fn deref(&self) -> &SyncMapItem {
        &self.data
    }
}

// ============================================================================
// Context
// ============================================================================

/// Operations on one sync map item
#[derive(Debug, Clone)]
pub struct SyncMapItemContext {
    version: Arc<Version>,
    service_sid: String,
    map_sid: String,
    key: String,
    uri: String,
}

impl SyncMapItemContext {
    pub fn new(
        version: Arc<Version>,
        service_sid: impl Into<String>,
        map_sid: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        let service_sid = service_sid.into();
        let map_sid = map_sid.into();
        let key = key.into();
        let uri = format!("/Services/{service_sid}/Maps/{map_sid}/Items/{key}");
        Self {
            version,
            service_sid,
            map_sid,
            key,
            uri,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub async fn fetch(&self) -> Result<SyncMapItemInstance> {
        let data: SyncMapItem = self.version.fetch(&self.uri).await?;
        Ok(self.instance(data))
    }

    /// Replace the item's data. Fails before any request when `data` is missing.
    pub async fn update(&self, options: SyncMapItemUpdateOptions) -> Result<SyncMapItemInstance> {
        let form = options.to_form()?;
        let data: SyncMapItem = self.version.update(&self.uri, form).await?;
        Ok(self.instance(data))
    }

    pub async fn remove(&self) -> Result<bool> {
        self.version.remove(&self.uri).await
    }

    fn instance(&self, data: SyncMapItem) -> SyncMapItemInstance {
        SyncMapItemInstance::new(
            data,
            Arc::clone(&self.version),
            self.service_sid.clone(),
            self.map_sid.clone(),
            Some(self.key.clone()),
        )
    }
}
