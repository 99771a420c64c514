//! Task endpoints.

use super::client::ApiClient;
use super::error::Result;
use super::types::{CommentInput, ListResponse, Task, TaskComment, TaskInput};

/// The `/tasks/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct TaskService<'a> {
    client: &'a ApiClient,
}

impl<'a> TaskService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Task>> {
        let list: ListResponse<Task> = self.client.get("/tasks/").await?;
        Ok(list.into_vec())
    }

    pub async fn get(&self, id: &str) -> Result<Task> {
        self.client.get(&task_path(id, "")).await
    }

    pub async fn create(&self, task: &TaskInput) -> Result<Task> {
        self.client.post("/tasks/", task).await
    }

    pub async fn update(&self, id: &str, task: &TaskInput) -> Result<Task> {
        self.client.patch(&task_path(id, ""), task).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&task_path(id, "")).await
    }

    /// Tasks assigned to the current user.
    pub async fn mine(&self) -> Result<Vec<Task>> {
        let list: ListResponse<Task> = self.client.get("/my-tasks/").await?;
        Ok(list.into_vec())
    }

    /// Comments on a task, oldest first as returned.
    pub async fn comments(&self, id: &str) -> Result<Vec<TaskComment>> {
        let list: ListResponse<TaskComment> = self.client.get(&task_path(id, "comments/")).await?;
        Ok(list.into_vec())
    }

    /// Post a comment on a task.
    pub async fn add_comment(&self, id: &str, content: &str) -> Result<TaskComment> {
        let body = CommentInput {
            content: content.to_string(),
        };
        self.client.post(&task_path(id, "add_comment/"), &body).await
    }
}

fn task_path(id: &str, action: &str) -> String {
    format!("/tasks/{}/{}", id, action)
}
