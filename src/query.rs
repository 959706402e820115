use std::cmp::Ordering;

use chrono::{DateTime, Days, Local, NaiveDate};

use crate::models::{DateFilter, FilterState, SortOrder, StatusFilter, TaskRecord};

/// Derives the view list for the current filters. Pure: the cache is never
/// mutated and identical inputs always produce identical output.
pub fn apply(tasks: &[TaskRecord], filters: &FilterState) -> Vec<TaskRecord> {
    apply_at(tasks, filters, Local::now())
}

/// Same as [`apply`] with an injected clock for the date filter, so the
/// "today" boundary can be pinned in tests.
pub fn apply_at(
    tasks: &[TaskRecord],
    filters: &FilterState,
    now: DateTime<Local>,
) -> Vec<TaskRecord> {
    let needle = filters.search.to_lowercase();
    let cutoff = date_cutoff(filters.date, now.date_naive());

    let mut view: Vec<TaskRecord> = tasks
        .iter()
        .filter(|task| matches_search(task, &needle))
        .filter(|task| matches_status(task, filters.status))
        .filter(|task| matches_date(task, cutoff))
        .cloned()
        .collect();

    // Stable sort: ties keep their cache order.
    view.sort_by(|a, b| compare(a, b, filters.sort));
    view
}

fn matches_search(task: &TaskRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    task.title.to_lowercase().contains(needle) || task.description.to_lowercase().contains(needle)
}

fn matches_status(task: &TaskRecord, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Open => !task.status,
        StatusFilter::Completed => task.status,
    }
}

/// The earliest local calendar date that still passes the filter. Comparing
/// local dates is equivalent to comparing against local midnight of the
/// cutoff day.
fn date_cutoff(filter: DateFilter, today: NaiveDate) -> Option<NaiveDate> {
    match filter {
        DateFilter::All => None,
        DateFilter::Today => Some(today),
        DateFilter::Week => today.checked_sub_days(Days::new(7)),
        DateFilter::Month => today.checked_sub_days(Days::new(30)),
    }
}

fn matches_date(task: &TaskRecord, cutoff: Option<NaiveDate>) -> bool {
    match cutoff {
        None => true,
        Some(cutoff) => task.create_time.with_timezone(&Local).date_naive() >= cutoff,
    }
}

fn compare(a: &TaskRecord, b: &TaskRecord, sort: SortOrder) -> Ordering {
    match sort {
        SortOrder::CreatedAsc => a.create_time.cmp(&b.create_time),
        SortOrder::CreatedDesc => b.create_time.cmp(&a.create_time),
        SortOrder::CompletedAsc => compare_completed(a, b, false),
        SortOrder::CompletedDesc => compare_completed(a, b, true),
    }
}

/// Tasks without a completion time sort last regardless of direction; two
/// such tasks compare equal and keep their relative order.
fn compare_completed(a: &TaskRecord, b: &TaskRecord, descending: bool) -> Ordering {
    match (a.complete_time, b.complete_time) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(at), Some(bt)) => {
            if descending {
                bt.cmp(&at)
            } else {
                at.cmp(&bt)
            }
        }
    }
}
