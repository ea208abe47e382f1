//! Task API service

use crate::gateway::ApiGateway;
use std::sync::Arc;
use tasklink_core::TaskRecord;
use tasklink_http::client::ClientError;
use tasklink_http::types::{TaskCreate, TaskUpdate};

/// Task CRUD service over the shared gateway
#[derive(Clone)]
pub struct TaskService {
    gateway: Arc<ApiGateway>,
}

impl TaskService {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// List the user's tasks. The response envelope is normalized, so the
    /// returned order is the server's regardless of the wrapping shape.
    pub async fn list(&self) -> Result<Vec<TaskRecord>, ClientError> {
        self.gateway
            .execute(|client| async move { client.list_tasks().await })
            .await
    }

    /// Fetch a single task
    pub async fn get(&self, task_id: &str) -> Result<TaskRecord, ClientError> {
        self.gateway
            .execute(|client| {
                let task_id = task_id.to_string();
                async move { client.get_task(&task_id).await }
            })
            .await
    }

    /// Create a task
    pub async fn create(&self, task: TaskCreate) -> Result<TaskRecord, ClientError> {
        self.gateway
            .execute(|client| {
                let task = task.clone();
                async move { client.create_task(task).await }
            })
            .await
    }

    /// Replace a task's fields
    pub async fn update(&self, task_id: &str, task: TaskUpdate) -> Result<TaskRecord, ClientError> {
        self.gateway
            .execute(|client| {
                let task_id = task_id.to_string();
                let task = task.clone();
                async move { client.update_task(&task_id, task).await }
            })
            .await
    }

    /// Partially update a task
    pub async fn patch(&self, task_id: &str, task: TaskUpdate) -> Result<TaskRecord, ClientError> {
        self.gateway
            .execute(|client| {
                let task_id = task_id.to_string();
                let task = task.clone();
                async move { client.patch_task(&task_id, task).await }
            })
            .await
    }

    /// Flip a task's completion state
    pub async fn toggle_completion(&self, task_id: &str) -> Result<TaskRecord, ClientError> {
        self.gateway
            .execute(|client| {
                let task_id = task_id.to_string();
                async move { client.toggle_task_completion(&task_id).await }
            })
            .await
    }

    /// Delete a task
    pub async fn delete(&self, task_id: &str) -> Result<(), ClientError> {
        self.gateway
            .execute(|client| {
                let task_id = task_id.to_string();
                async move { client.delete_task(&task_id).await }
            })
            .await
    }
}
