/// Failure taxonomy for the sync layer. Every variant carries a message fit
/// for direct display; none of them leaves the cache in a partial state.
#[derive(Debug)]
pub enum SyncError {
    /// Rejected before any network call; the request was never sent.
    Validation(String),
    /// A list/get request failed; the cache keeps its last-known-good state.
    FetchFailed(String),
    /// A create/update/delete request failed; nothing changed locally and
    /// the operation is safe to retry.
    MutationFailed(String),
    /// The target record vanished between read and write.
    NotFound(String),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::Validation(msg) => write!(f, "validation error: {msg}"),
            SyncError::FetchFailed(msg) => write!(f, "fetch failed: {msg}"),
            SyncError::MutationFailed(msg) => write!(f, "mutation failed: {msg}"),
            SyncError::NotFound(msg) => write!(f, "not found: {msg}"),
        }
    }
}

impl std::error::Error for SyncError {}
