//! API host handling

use crate::error::Result;
use url::Url;

/// Check if `uri` already carries a scheme
pub fn is_absolute_url(uri: &str) -> bool {
    uri.starts_with("https://") || uri.starts_with("http://")
}

/// One API host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    base_url: String,
}

impl Domain {
    /// Create a domain from its base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a domain-relative URI onto the base URL.
    ///
    /// Absolute URLs are returned unchanged.
    pub fn absolute_url(&self, uri: &str) -> String {
        if is_absolute_url(uri) {
            return uri.to_string();
        }
        format!("{}/{}", self.base_url, uri.trim_start_matches('/'))
    }

    /// Route the host through an edge location and region.
    ///
    /// `api.twilio.com` becomes `api.{edge}.{region}.twilio.com`. Region
    /// defaults to `us1` when only an edge is given. Hosts that are not
    /// `<product>[.<edge>][.<region>].<domain>.<tld>` are left alone.
    pub fn with_edge(self, edge: Option<&str>, region: Option<&str>) -> Result<Self> {
        if edge.is_none() && region.is_none() {
            return Ok(self);
        }

        let mut url = Url::parse(&self.base_url)?;
        let Some(host) = url.host_str() else {
            return Ok(self);
        };

        let pieces: Vec<&str> = host.split('.').collect();
        if pieces.len() < 3 {
            return Ok(self);
        }

        let product = pieces[0];
        let suffix = &pieces[pieces.len() - 2..];
        // Existing edge/region pieces sit between product and suffix
        let (current_edge, current_region) = match pieces.len() {
            5 => (Some(pieces[1]), Some(pieces[2])),
            4 => (None, Some(pieces[1])),
            _ => (None, None),
        };

        let edge = edge.or(current_edge);
        let region = region
            .or(current_region)
            .or_else(|| edge.map(|_| "us1"));

        let new_host = std::iter::once(product)
            .chain(edge)
            .chain(region)
            .chain(suffix.iter().copied())
            .collect::<Vec<_>>()
            .join(".");

        url.set_host(Some(&new_host))?;
        Ok(Self::new(url.as_str()))
    }
}
