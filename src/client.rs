use reqwest::StatusCode;

use crate::error::SyncError;
use crate::models::{TaskId, TaskRecord};

/// HTTP client for the remote task store. Thin wrapper over the store's
/// CRUD contract: every non-2xx response maps into the [`SyncError`]
/// taxonomy and no response is partially applied.
///
/// No request timeout is configured here; the transport's own behavior is
/// inherited unmodified.
#[derive(Debug, Clone)]
pub struct StoreClient {
    base_url: String,
    http: reqwest::Client,
}

impl StoreClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| SyncError::FetchFailed(format!("failed to build http client: {err}")))?;
        Ok(Self::with_http(base_url, http))
    }

    /// Wraps a preconfigured client, for consumers that manage their own
    /// transport settings.
    pub fn with_http(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: TaskId) -> String {
        format!("{}/tasks/{id}", self.base_url)
    }

    /// GET /tasks — the full collection.
    pub async fn list_tasks(&self) -> Result<Vec<TaskRecord>, SyncError> {
        let resp = self
            .http
            .get(self.tasks_url())
            .send()
            .await
            .map_err(|err| SyncError::FetchFailed(format!("task list request failed: {err}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::FetchFailed(format!(
                "task list request returned http {status}"
            )));
        }

        resp.json::<Vec<TaskRecord>>()
            .await
            .map_err(|err| SyncError::FetchFailed(format!("invalid task list payload: {err}")))
    }

    /// GET /tasks/{id} — one record, current at time of read.
    pub async fn get_task(&self, id: TaskId) -> Result<TaskRecord, SyncError> {
        let resp = self
            .http
            .get(self.task_url(id))
            .send()
            .await
            .map_err(|err| SyncError::FetchFailed(format!("task {id} request failed: {err}")))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SyncError::NotFound(format!("task {id} does not exist")));
        }
        if !status.is_success() {
            return Err(SyncError::FetchFailed(format!(
                "task {id} request returned http {status}"
            )));
        }

        resp.json::<TaskRecord>()
            .await
            .map_err(|err| SyncError::FetchFailed(format!("invalid task payload: {err}")))
    }

    /// POST /tasks — the store assigns id and create_time.
    pub async fn create_task(&self, title: &str, description: &str) -> Result<(), SyncError> {
        let payload = serde_json::json!({
            "title": title,
            "description": description,
        });

        let resp = self
            .http
            .post(self.tasks_url())
            .json(&payload)
            .send()
            .await
            .map_err(|err| SyncError::MutationFailed(format!("create request failed: {err}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::MutationFailed(format!(
                "create request returned http {status}"
            )));
        }
        Ok(())
    }

    /// PATCH /tasks/{id} — full-record replace. The store derives
    /// complete_time from `status`, so the caller must always carry the
    /// intended status or the record would silently reopen.
    pub async fn update_task(
        &self,
        id: TaskId,
        title: &str,
        description: &str,
        status: bool,
    ) -> Result<(), SyncError> {
        let payload = serde_json::json!({
            "title": title,
            "description": description,
            "status": status,
        });

        let resp = self
            .http
            .patch(self.task_url(id))
            .json(&payload)
            .send()
            .await
            .map_err(|err| SyncError::MutationFailed(format!("update request failed: {err}")))?;

        let http_status = resp.status();
        if !http_status.is_success() {
            return Err(SyncError::MutationFailed(format!(
                "update request returned http {http_status}"
            )));
        }
        Ok(())
    }

    /// DELETE /tasks/{id}.
    pub async fn delete_task(&self, id: TaskId) -> Result<(), SyncError> {
        let resp = self
            .http
            .delete(self.task_url(id))
            .send()
            .await
            .map_err(|err| SyncError::MutationFailed(format!("delete request failed: {err}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::MutationFailed(format!(
                "delete request returned http {status}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn list_tasks_parses_store_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": 1,
                    "title": "Buy milk",
                    "description": "2%",
                    "status": false,
                    "create_time": "2026-08-30T10:00:00Z",
                    "complete_time": null
                }
            ])))
            .mount(&server)
            .await;

        let client = StoreClient::new(server.uri()).unwrap();
        let tasks = client.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Buy milk");
        assert!(!tasks[0].status);
    }

    #[tokio::test]
    async fn list_tasks_maps_server_error_to_fetch_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = StoreClient::new(server.uri()).unwrap();
        let err = client.list_tasks().await.unwrap_err();
        assert!(matches!(err, SyncError::FetchFailed(_)));
    }

    #[tokio::test]
    async fn get_task_distinguishes_not_found_from_other_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tasks/7"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tasks/8"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = StoreClient::new(server.uri()).unwrap();
        assert!(matches!(
            client.get_task(7).await.unwrap_err(),
            SyncError::NotFound(_)
        ));
        assert!(matches!(
            client.get_task(8).await.unwrap_err(),
            SyncError::FetchFailed(_)
        ));
    }

    #[tokio::test]
    async fn update_task_sends_full_record_including_status() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/tasks/3"))
            .and(body_json(serde_json::json!({
                "title": "x",
                "description": "",
                "status": true
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = StoreClient::new(server.uri()).unwrap();
        client.update_task(3, "x", "", true).await.unwrap();
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_tolerated() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/tasks/1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = StoreClient::new(format!("{}/", server.uri())).unwrap();
        client.delete_task(1).await.unwrap();
    }
}
