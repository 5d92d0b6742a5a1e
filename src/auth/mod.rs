//! Authentication module
//!
//! Supports: HTTP Basic (account SID / auth token or API key / secret) and Bearer
//!
//! The `Authenticator` applies the configured credentials to every outgoing
//! request built by the HTTP client.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
