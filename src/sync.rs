use log::{debug, warn};

use crate::client::StoreClient;
use crate::error::SyncError;
use crate::events::ViewListener;
use crate::models::{FilterPatch, FilterState, TaskId, TaskRecord};
use crate::query;

/// Proof that the user confirmed a delete. The rendering layer constructs
/// this after its own confirmation prompt; the controller refuses to delete
/// without it.
#[derive(Debug, Clone, Copy)]
pub struct DeleteConfirmed;

/// Owns the local working copy of the remote task store and keeps it
/// consistent under a refetch-after-mutation model: every successful
/// create/update/delete is followed by a wholesale re-fetch of the
/// collection, never by a local patch.
///
/// Single logical thread of execution: the `&mut self` receivers serialize
/// all cache replacement. Two mutations issued back to back may briefly
/// show stale data until the later refresh resolves; the last refresh to
/// complete wins.
pub struct SyncController {
    client: StoreClient,
    cache: Vec<TaskRecord>,
    filters: FilterState,
    editing_id: Option<TaskId>,
    listeners: Vec<ViewListener>,
}

impl SyncController {
    pub fn new(client: StoreClient) -> Self {
        Self {
            client,
            cache: Vec::new(),
            filters: FilterState::default(),
            editing_id: None,
            listeners: Vec::new(),
        }
    }

    /// The current filtered/sorted projection of the cache.
    pub fn get_view(&self) -> Vec<TaskRecord> {
        query::apply(&self.cache, &self.filters)
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Subscribes to view changes. Fired after every [`refresh`] and
    /// [`set_filter`], including refreshes triggered by mutations.
    ///
    /// [`refresh`]: Self::refresh
    /// [`set_filter`]: Self::set_filter
    pub fn on_view_changed(&mut self, listener: impl Fn(&[TaskRecord]) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Fetches the full collection and replaces the cache wholesale. On
    /// failure the cache keeps its last-known-good contents. The view is
    /// re-derived and listeners are notified either way.
    pub async fn refresh(&mut self) -> Result<(), SyncError> {
        match self.client.list_tasks().await {
            Ok(tasks) => {
                debug!("refresh replaced cache task_count={}", tasks.len());
                self.cache = tasks;
                self.emit_view();
                Ok(())
            }
            Err(err) => {
                warn!("refresh failed, keeping cached tasks: {err}");
                self.emit_view();
                Err(err)
            }
        }
    }

    /// Creates a task from trimmed inputs. An empty title is rejected
    /// before any network call.
    pub async fn create(&mut self, title: &str, description: &str) -> Result<(), SyncError> {
        let title = validated_title(title)?;
        self.client.create_task(title, description.trim()).await?;
        self.editing_id = None;
        self.refresh().await
    }

    /// Full-record replace. `status` must carry the task's intended status:
    /// the store derives `complete_time` from it, so omitting the current
    /// value would silently reopen a completed task.
    pub async fn update(
        &mut self,
        id: TaskId,
        title: &str,
        description: &str,
        status: bool,
    ) -> Result<(), SyncError> {
        let title = validated_title(title)?;
        self.client
            .update_task(id, title, description.trim(), status)
            .await?;
        self.editing_id = None;
        self.refresh().await
    }

    /// Re-reads the record from the store (not the cache, so the other
    /// fields are current at time of write) and replaces it with the new
    /// status, preserving title and description.
    pub async fn toggle_status(&mut self, id: TaskId, new_status: bool) -> Result<(), SyncError> {
        let current = self.client.get_task(id).await?;
        self.update(id, &current.title, &current.description, new_status)
            .await
    }

    /// Deletes a task. The confirmation token must come from the UI layer's
    /// own prompt.
    pub async fn delete(&mut self, id: TaskId, _confirmed: DeleteConfirmed) -> Result<(), SyncError> {
        self.client.delete_task(id).await?;
        self.refresh().await
    }

    /// Merges a partial filter change and recomputes the view immediately.
    /// Never touches the network.
    pub fn set_filter(&mut self, patch: FilterPatch) {
        patch.apply_to(&mut self.filters);
        self.emit_view();
    }

    /// The record currently being edited, or `None` when no edit form is
    /// open (creating new counts as `None`).
    pub fn editing_id(&self) -> Option<TaskId> {
        self.editing_id
    }

    pub fn begin_edit(&mut self, id: TaskId) {
        self.editing_id = Some(id);
    }

    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
    }

    fn emit_view(&self) {
        let view = self.get_view();
        for listener in &self.listeners {
            listener(&view);
        }
    }
}

fn validated_title(title: &str) -> Result<&str, SyncError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(SyncError::Validation(
            "task title must not be empty".to_string(),
        ));
    }
    Ok(title)
}
