use crate::models::TaskRecord;

/// Callback invoked with the freshly derived view after every refresh or
/// filter change.
pub type ViewListener = Box<dyn Fn(&[TaskRecord]) + Send>;
