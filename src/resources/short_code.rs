//! SMS short codes (API v2010)
//!
//! `/Accounts/{AccountSid}/SMS/ShortCodes.json`

use super::dates;
use crate::error::Result;
use crate::pagination::{Pager, QueryFilter, ResourceList};
use crate::types::{JsonValue, Method, Params};
use crate::version::Version;
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Short code payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortCode {
    pub account_sid: Option<String>,
    pub api_version: Option<String>,
    #[serde(default, deserialize_with = "dates::rfc2822")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "dates::rfc2822")]
    pub date_updated: Option<DateTime<Utc>>,
    pub friendly_name: Option<String>,
    pub short_code: Option<String>,
    pub sid: Option<String>,
    pub sms_fallback_method: Option<String>,
    pub sms_fallback_url: Option<String>,
    pub sms_method: Option<String>,
    pub sms_url: Option<String>,
    pub uri: Option<String>,
}

/// List filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortCodeFilter {
    /// Exact friendly name
    pub friendly_name: Option<String>,
    /// Exact short code number
    pub short_code: Option<String>,
}

impl QueryFilter for ShortCodeFilter {
    fn params(&self) -> Params {
        Params::new()
            .set_opt("FriendlyName", self.friendly_name.as_deref())
            .set_opt("ShortCode", self.short_code.as_deref())
    }
}

/// Fields accepted by update; unset fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortCodeUpdateOptions {
    pub friendly_name: Option<String>,
    pub api_version: Option<String>,
    pub sms_url: Option<String>,
    pub sms_method: Option<Method>,
    pub sms_fallback_url: Option<String>,
    pub sms_fallback_method: Option<Method>,
}

impl ShortCodeUpdateOptions {
    fn to_form(&self) -> Params {
        Params::new()
            .set_opt("FriendlyName", self.friendly_name.as_deref())
            .set_opt("ApiVersion", self.api_version.as_deref())
            .set_opt("SmsUrl", self.sms_url.as_deref())
            .set_opt("SmsMethod", self.sms_method)
            .set_opt("SmsFallbackUrl", self.sms_fallback_url.as_deref())
            .set_opt("SmsFallbackMethod", self.sms_fallback_method)
    }
}

// ============================================================================
// List
// ============================================================================

/// Short codes of one account
#[derive(Debug, Clone)]
pub struct ShortCodeList {
    version: Arc<Version>,
    account_sid: String,
    uri: String,
}

impl ShortCodeList {
    pub fn new(version: Arc<Version>, account_sid: impl Into<String>) -> Self {
        let account_sid = account_sid.into();
        let uri = format!("/Accounts/{account_sid}/SMS/ShortCodes.json");
        Self {
            version,
            account_sid,
            uri,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Handle for one short code
    pub fn get(&self, sid: impl Into<String>) -> ShortCodeContext {
        ShortCodeContext::new(Arc::clone(&self.version), self.account_sid.clone(), sid)
    }
}

impl ResourceList for ShortCodeList {
    type Record = ShortCodeInstance;

    fn pager(&self) -> Pager<ShortCodeInstance> {
        let version = Arc::clone(&self.version);
        let account_sid = self.account_sid.clone();
        Pager::new(
            self.version.clone(),
            self.uri.clone(),
            Arc::new(move |raw: JsonValue| -> Result<ShortCodeInstance> {
                let data: ShortCode = serde_json::from_value(raw)?;
                Ok(ShortCodeInstance::new(
                    data,
                    Arc::clone(&version),
                    account_sid.clone(),
                    None,
                ))
            }),
        )
    }
}

// ============================================================================
// Instance
// ============================================================================

/// A fetched short code
#[derive(Debug, Clone)]
pub struct ShortCodeInstance {
    data: ShortCode,
    version: Arc<Version>,
    account_sid: String,
    sid: String,
    context: OnceCell<ShortCodeContext>,
}

impl ShortCodeInstance {
    pub(crate) fn new(
        data: ShortCode,
        version: Arc<Version>,
        account_sid: String,
        sid: Option<String>,
    ) -> Self {
        let sid = sid.or_else(|| data.sid.clone()).unwrap_or_default();
        Self {
            data,
            version,
            account_sid,
            sid,
            context: OnceCell::new(),
        }
    }

    /// Payload as returned by the server
    pub fn data(&self) -> &ShortCode {
        &self.data
    }

    pub fn into_data(self) -> ShortCode {
        self.data
    }

    /// Context for this short code, built on first use
    pub fn context(&self) -> &ShortCodeContext {
        self.context.get_or_init(|| {
            ShortCodeContext::new(
                Arc::clone(&self.version),
                self.account_sid.clone(),
                self.sid.clone(),
            )
        })
    }

    pub async fn fetch(&self) -> Result<ShortCodeInstance> {
        self.context().fetch().await
    }

    pub async fn update(&self, options: ShortCodeUpdateOptions) -> Result<ShortCodeInstance> {
        self.context().update(options).await
    }
}

impl std::ops::Deref for ShortCodeInstance {
    type Target = ShortCode;

    fn deref(&self) -> &ShortCode {
        &self.data
    }
}

// ============================================================================
// Context
// ============================================================================

/// Operations on one short code
#[derive(Debug, Clone)]
pub struct ShortCodeContext {
    version: Arc<Version>,
    account_sid: String,
    sid: String,
    uri: String,
}

impl ShortCodeContext {
    pub fn new(
        version: Arc<Version>,
        account_sid: impl Into<String>,
        sid: impl Into<String>,
    ) -> Self {
        let account_sid = account_sid.into();
        let sid = sid.into();
        let uri = format!("/Accounts/{account_sid}/SMS/ShortCodes/{sid}.json");
        Self {
            version,
            account_sid,
            sid,
            uri,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub async fn fetch(&self) -> Result<ShortCodeInstance> {
        let data: ShortCode = self.version.fetch(&self.uri).await?;
        Ok(self.instance(data))
    }

    pub async fn update(&self, options: ShortCodeUpdateOptions) -> Result<ShortCodeInstance> {
        let data: ShortCode = self.version.update(&self.uri, options.to_form()).await?;
        Ok(self.instance(data))
    }

    fn instance(&self, data: ShortCode) -> ShortCodeInstance {
        ShortCodeInstance::new(
            data,
            Arc::clone(&self.version),
            self.account_sid.clone(),
            Some(self.sid.clone()),
        )
    }
}
