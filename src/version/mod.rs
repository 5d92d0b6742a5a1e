//! Domains and API versions
//!
//! A [`Domain`] is one API host (`https://api.twilio.com`,
//! `https://taskrouter.twilio.com`, ...). A [`Version`] is a versioned path
//! under a domain and is what resources talk to: it resolves URIs, derives
//! read limits, and performs the fetch/create/update/remove requests and the
//! page fetches behind [`crate::pagination::PageFetcher`].

mod domain;
mod handle;

pub use domain::{is_absolute_url, Domain};
pub use handle::Version;
