//! Project endpoints.

use tracing::instrument;

use super::client::ApiClient;
use super::error::Result;
use super::teams::DEFAULT_MEMBER_ROLE;
use super::types::{ListResponse, MemberAdd, MemberRemove, Project, ProjectInput, Task};

/// The `/projects/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ProjectService<'a> {
    client: &'a ApiClient,
}

impl<'a> ProjectService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Project>> {
        let list: ListResponse<Project> = self.client.get("/projects/").await?;
        Ok(list.into_vec())
    }

    pub async fn get(&self, id: &str) -> Result<Project> {
        self.client.get(&project_path(id, "")).await
    }

    #[instrument(skip(self, project))]
    pub async fn create(&self, project: &ProjectInput) -> Result<Project> {
        self.client.post("/projects/", project).await
    }

    pub async fn update(&self, id: &str, project: &ProjectInput) -> Result<Project> {
        self.client.patch(&project_path(id, ""), project).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&project_path(id, "")).await
    }

    /// Projects the current user manages or is assigned to.
    pub async fn mine(&self) -> Result<Vec<Project>> {
        let list: ListResponse<Project> = self.client.get("/my-projects/").await?;
        Ok(list.into_vec())
    }

    /// The tasks of one project.
    pub async fn tasks(&self, id: &str) -> Result<Vec<Task>> {
        let list: ListResponse<Task> = self.client.get(&project_path(id, "tasks/")).await?;
        Ok(list.into_vec())
    }

    /// Assign a user to a project. `role` defaults to `member`.
    pub async fn add_member(&self, id: &str, user_id: &str, role: Option<&str>) -> Result<()> {
        let body = MemberAdd {
            user_id: user_id.to_string(),
            role: role.unwrap_or(DEFAULT_MEMBER_ROLE).to_string(),
        };
        self.client
            .post_discarding(&project_path(id, "add_member/"), &body)
            .await
    }

    /// Unassign a user from a project.
    pub async fn remove_member(&self, id: &str, user_id: &str) -> Result<()> {
        let body = MemberRemove {
            user_id: user_id.to_string(),
        };
        self.client
            .delete_with_body(&project_path(id, "remove_member/"), &body)
            .await
    }
}

fn project_path(id: &str, action: &str) -> String {
    format!("/projects/{}/{}", id, action)
}
