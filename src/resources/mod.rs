//! REST resources
//!
//! Every resource has the same shape:
//!
//! - a `*List` for its collection endpoint, reading through
//!   [`crate::pagination::ResourceList`] and creating where the API allows
//! - an `*Instance` wrapping one payload, with its context built lazily
//! - a `*Context` for fetch/update/remove on one resource
//!
//! Covered: API v2010 SMS short codes, Preview Sync map items and
//! TaskRouter v1 workspaces.

mod dates;
mod short_code;
mod sync_map_item;
mod workspace;

pub use short_code::{
    ShortCode, ShortCodeContext, ShortCodeFilter, ShortCodeInstance, ShortCodeList,
    ShortCodeUpdateOptions,
};
pub use sync_map_item::{
    QueryDirection, QueryFromBoundType, QueryResultOrder, SyncMapItem, SyncMapItemContext,
    SyncMapItemCreateOptions, SyncMapItemFilter, SyncMapItemInstance, SyncMapItemList,
    SyncMapItemUpdateOptions,
};
pub use workspace::{
    Workspace, WorkspaceContext, WorkspaceCreateOptions, WorkspaceFilter, WorkspaceInstance,
    WorkspaceList, WorkspaceUpdateOptions,
};
