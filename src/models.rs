use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned task identity. Stable for the lifetime of the record.
pub type TaskId = i64;

/// One task as the remote store serves it. The local copy is a disposable
/// read cache: records are never patched in place, every change round-trips
/// through the store and the whole collection is replaced on refetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TaskRecord {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: bool,
    pub create_time: DateTime<Utc>,
    /// Present iff `status` is true; the store sets it on completion and
    /// clears it when a task is reopened.
    #[serde(default)]
    pub complete_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DateFilter {
    #[default]
    All,
    /// Created on or after local midnight of today.
    Today,
    /// Created within the last 7 days (local-midnight boundary).
    Week,
    /// Created within the last 30 days (local-midnight boundary).
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    CreatedAsc,
    #[default]
    CreatedDesc,
    CompletedAsc,
    CompletedDesc,
}

/// Current search/status/date/sort configuration. Created once with
/// defaults and mutated in place by filter-control changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct FilterState {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub date: DateFilter,
    #[serde(default)]
    pub sort: SortOrder,
}

/// Partial filter update; unset fields keep their current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct FilterPatch {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<StatusFilter>,
    #[serde(default)]
    pub date: Option<DateFilter>,
    #[serde(default)]
    pub sort: Option<SortOrder>,
}

impl FilterPatch {
    pub fn apply_to(self, filters: &mut FilterState) {
        if let Some(search) = self.search {
            filters.search = search;
        }
        if let Some(status) = self.status {
            filters.status = status;
        }
        if let Some(date) = self.date {
            filters.date = date;
        }
        if let Some(sort) = self.sort {
            filters.sort = sort;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn filter_state_default_values() {
        let filters = FilterState::default();
        assert_eq!(filters.search, "");
        assert_eq!(filters.status, StatusFilter::All);
        assert_eq!(filters.date, DateFilter::All);
        assert_eq!(filters.sort, SortOrder::CreatedDesc);
    }

    #[test]
    fn task_record_deserializes_store_payload() {
        let json = r#"
        {
          "id": 1,
          "title": "Buy Milk",
          "description": "2%",
          "status": false,
          "create_time": "2026-08-30T10:00:00Z",
          "complete_time": null
        }
        "#;

        let task: TaskRecord = serde_json::from_str(json).expect("task should deserialize");
        assert_eq!(task.id, 1);
        assert_eq!(task.title, "Buy Milk");
        assert_eq!(task.description, "2%");
        assert!(!task.status);
        assert_eq!(
            task.create_time,
            Utc.with_ymd_and_hms(2026, 8, 30, 10, 0, 0).unwrap()
        );
        assert_eq!(task.complete_time, None);
    }

    #[test]
    fn task_record_accepts_completed_record_with_offset_timestamp() {
        let json = r#"
        {
          "id": 2,
          "title": "Clean",
          "description": "",
          "status": true,
          "create_time": "2026-08-29T08:00:00+03:00",
          "complete_time": "2026-08-30T09:30:00+03:00"
        }
        "#;

        let task: TaskRecord = serde_json::from_str(json).expect("task should deserialize");
        assert!(task.status);
        assert!(task.complete_time.is_some());
        assert_eq!(
            task.create_time,
            Utc.with_ymd_and_hms(2026, 8, 29, 5, 0, 0).unwrap()
        );
    }

    #[test]
    fn filter_enums_serialize_as_snake_case_strings() {
        assert_eq!(
            serde_json::to_value(SortOrder::CreatedDesc).unwrap(),
            serde_json::json!("created_desc")
        );
        assert_eq!(
            serde_json::to_value(StatusFilter::Completed).unwrap(),
            serde_json::json!("completed")
        );
        assert_eq!(
            serde_json::to_value(DateFilter::Week).unwrap(),
            serde_json::json!("week")
        );
    }

    #[test]
    fn filter_patch_merges_only_set_fields() {
        let mut filters = FilterState::default();
        FilterPatch {
            search: Some("milk".to_string()),
            status: Some(StatusFilter::Open),
            ..FilterPatch::default()
        }
        .apply_to(&mut filters);

        assert_eq!(filters.search, "milk");
        assert_eq!(filters.status, StatusFilter::Open);
        // Untouched fields keep their previous values.
        assert_eq!(filters.date, DateFilter::All);
        assert_eq!(filters.sort, SortOrder::CreatedDesc);

        FilterPatch {
            sort: Some(SortOrder::CompletedAsc),
            ..FilterPatch::default()
        }
        .apply_to(&mut filters);
        assert_eq!(filters.search, "milk");
        assert_eq!(filters.sort, SortOrder::CompletedAsc);
    }
}
