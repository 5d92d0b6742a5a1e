// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # twilio-rest
//!
//! An async REST client for Twilio resources, built around one generic
//! paginated reader shared by every list endpoint.
//!
//! ## Features
//!
//! - **Lazy paging**: records are fetched page by page, only as consumed
//! - **Limits**: `limit` caps records, page size and page count follow from it
//! - **Early stop**: `each` callbacks can stop the read mid-page
//! - **Retries and rate limiting**: shared by every request of a client
//! - **Edge/region routing**: hosts rewritten from configuration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use twilio_rest::{Client, ClientConfig, ReadOptions, ResourceList, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new(ClientConfig::from_env()?)?;
//!
//!     // First 20 short codes of the account, fetched in one page of 20
//!     let codes = client
//!         .short_codes(None)?
//!         .list(ReadOptions::new().limit(20))
//!         .await?;
//!
//!     for code in &codes {
//!         println!("{:?}", code.short_code);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                           Client                            │
//! │      api() / preview() / taskrouter() → Arc<Version>        │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌───────────────┬─────────────┴───────────┬───────────────────┐
//! │   Resources   │       Pagination        │      Version      │
//! ├───────────────┼─────────────────────────┼───────────────────┤
//! │ ShortCode     │ page / stream           │ Domain + path     │
//! │ SyncMapItem   │ each / list             │ PageFetcher impl  │
//! │ Workspace     │ Page + Continuation     │ fetch/create/...  │
//! └───────────────┴─────────────────────────┴───────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────┐
//! │           HTTP: auth, retries, backoff, rate limit          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Generic paginated reading
pub mod pagination;

/// Domains and versioned API paths
pub mod version;

/// REST resources
pub mod resources;

/// Client configuration
pub mod config;

/// Top-level client
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::Client;
pub use config::{BaseUrls, ClientConfig, HttpSettings};
pub use error::{Error, Result};
pub use pagination::{
    Control, EachOptions, Page, PageOptions, Pager, ReadOptions, RecordStream, ResourceList,
};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
