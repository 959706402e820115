//! Client-side task list engine.
//!
//! Fetches task records from a remote HTTP store, keeps a local working
//! copy, applies composable search/status/date filters and sort orders over
//! it, and re-synchronizes after every mutation by refetching the whole
//! collection. Rendering is a consumer: it reads [`SyncController::get_view`]
//! and subscribes via [`SyncController::on_view_changed`].

pub mod client;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod query;
pub mod sync;

pub use client::StoreClient;
pub use error::SyncError;
pub use models::{
    DateFilter, FilterPatch, FilterState, SortOrder, StatusFilter, TaskId, TaskRecord,
};
pub use sync::{DeleteConfirmed, SyncController};
