//! REST client implementing the sync gateway port.

use super::{
    HttpGatewayConfig,
    models::{CommentRecord, StatusUpdateRecord, TaskDraftRecord, TaskRecord},
};
use crate::board::{
    domain::{ColumnId, Comment, ProjectId, Task, TaskDraft, TaskId},
    ports::{SyncGateway, SyncGatewayError, SyncGatewayResult},
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use tracing::{debug, warn};

/// Sync gateway backed by the task REST API.
///
/// Endpoints, relative to the configured base URL:
///
/// - `GET projects/{project}/tasks`
/// - `POST projects/{project}/tasks`
/// - `PATCH tasks/{task}` with `{"status": ...}`
/// - `DELETE tasks/{task}`
/// - `POST tasks/{task}/comments`
#[derive(Debug, Clone)]
pub struct HttpSyncGateway {
    client: Client,
    config: HttpGatewayConfig,
}

impl HttpSyncGateway {
    /// Creates a gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SyncGatewayError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(config: HttpGatewayConfig) -> SyncGatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(SyncGatewayError::transport)?;
        Ok(Self { client, config })
    }

    /// Returns the gateway configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpGatewayConfig {
        &self.config
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match self.config.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> SyncGatewayResult<Response> {
        let response = builder.send().await.map_err(|err| {
            if err.is_connect() || err.is_timeout() {
                SyncGatewayError::Unavailable(err.to_string())
            } else {
                SyncGatewayError::transport(err)
            }
        })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), %message, "backend rejected request");
        Err(rejection(status, message))
    }
}

/// Maps a non-success response onto a gateway error.
pub(crate) fn rejection(status: StatusCode, body: String) -> SyncGatewayError {
    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no reason given")
            .to_owned()
    } else {
        body
    };
    SyncGatewayError::Rejected {
        status: status.as_u16(),
        message,
    }
}

fn not_found_as(task_id: &TaskId, err: SyncGatewayError) -> SyncGatewayError {
    match err {
        SyncGatewayError::Rejected { status: 404, .. } => {
            SyncGatewayError::NotFound(task_id.clone())
        }
        other => other,
    }
}

#[async_trait]
impl SyncGateway for HttpSyncGateway {
    async fn fetch_tasks(&self, project_id: &ProjectId) -> SyncGatewayResult<Vec<Task>> {
        let url = self
            .config
            .endpoint(["projects", project_id.as_str(), "tasks"]);
        let response = self.send(self.request(Method::GET, url)).await?;
        let records: Vec<TaskRecord> = response
            .json()
            .await
            .map_err(|err| SyncGatewayError::Decode(err.to_string()))?;
        debug!(project_id = %project_id, tasks = records.len(), "fetched tasks");
        records
            .into_iter()
            .map(TaskRecord::into_task)
            .collect()
    }

    async fn update_task_status(
        &self,
        task_id: &TaskId,
        status: &ColumnId,
    ) -> SyncGatewayResult<()> {
        let url = self.config.endpoint(["tasks", task_id.as_str()]);
        let body = StatusUpdateRecord::from(status);
        self.send(self.request(Method::PATCH, url).json(&body))
            .await
            .map_err(|err| not_found_as(task_id, err))?;
        debug!(task_id = %task_id, status = %status, "task status persisted");
        Ok(())
    }

    async fn create_task(
        &self,
        project_id: &ProjectId,
        draft: &TaskDraft,
    ) -> SyncGatewayResult<Task> {
        let url = self
            .config
            .endpoint(["projects", project_id.as_str(), "tasks"]);
        let body = TaskDraftRecord::from(draft);
        let response = self
            .send(self.request(Method::POST, url).json(&body))
            .await?;
        let record: TaskRecord = response
            .json()
            .await
            .map_err(|err| SyncGatewayError::Decode(err.to_string()))?;
        record.into_task()
    }

    async fn delete_task(&self, task_id: &TaskId) -> SyncGatewayResult<()> {
        let url = self.config.endpoint(["tasks", task_id.as_str()]);
        match self.send(self.request(Method::DELETE, url)).await {
            Ok(_) | Err(SyncGatewayError::Rejected { status: 404, .. }) => Ok(()),
            Err(err) => Err(err),
        }
    }

    async fn add_comment(&self, task_id: &TaskId, comment: &Comment) -> SyncGatewayResult<()> {
        let url = self
            .config
            .endpoint(["tasks", task_id.as_str(), "comments"]);
        let body = CommentRecord::from(comment);
        self.send(self.request(Method::POST, url).json(&body))
            .await
            .map_err(|err| not_found_as(task_id, err))?;
        Ok(())
    }
}
