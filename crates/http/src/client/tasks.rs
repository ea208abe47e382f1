//! Task CRUD client methods

use super::{error::ClientError, typed::AuthenticatedApiClient};
use crate::types::{TaskCreate, TaskListResponse, TaskUpdate};
use reqwest::Method;
use tasklink_core::TaskRecord;

impl AuthenticatedApiClient {
    /// List the user's tasks, normalizing the response envelope
    pub async fn list_tasks(&self) -> Result<Vec<TaskRecord>, ClientError> {
        let req = self.request(Method::GET, "/api/tasks");
        let response: TaskListResponse = self.execute(req).await?;
        Ok(response.into_tasks())
    }

    /// Fetch a single task
    pub async fn get_task(&self, task_id: &str) -> Result<TaskRecord, ClientError> {
        let req = self.request(Method::GET, &format!("/api/tasks/{task_id}"));
        self.execute(req).await
    }

    /// Create a task
    pub async fn create_task(&self, task: TaskCreate) -> Result<TaskRecord, ClientError> {
        let req = self.request(Method::POST, "/api/tasks").json(&task);
        self.execute(req).await
    }

    /// Replace a task's fields
    pub async fn update_task(
        &self,
        task_id: &str,
        task: TaskUpdate,
    ) -> Result<TaskRecord, ClientError> {
        let req = self
            .request(Method::PUT, &format!("/api/tasks/{task_id}"))
            .json(&task);
        self.execute(req).await
    }

    /// Partially update a task
    pub async fn patch_task(
        &self,
        task_id: &str,
        task: TaskUpdate,
    ) -> Result<TaskRecord, ClientError> {
        let req = self
            .request(Method::PATCH, &format!("/api/tasks/{task_id}"))
            .json(&task);
        self.execute(req).await
    }

    /// Flip a task's completion state
    pub async fn toggle_task_completion(&self, task_id: &str) -> Result<TaskRecord, ClientError> {
        let req = self.request(Method::PATCH, &format!("/api/tasks/{task_id}/complete"));
        self.execute(req).await
    }

    /// Delete a task
    pub async fn delete_task(&self, task_id: &str) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, &format!("/api/tasks/{task_id}"));
        self.execute_unit(req).await
    }
}
