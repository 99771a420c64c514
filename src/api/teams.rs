//! Team endpoints.

use super::client::ApiClient;
use super::error::Result;
use super::types::{ListResponse, MemberAdd, MemberRemove, Team, TeamInput, TeamMembership};

/// Team role assigned when adding a member without an explicit role.
pub const DEFAULT_MEMBER_ROLE: &str = "member";

/// The `/teams/` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct TeamService<'a> {
    client: &'a ApiClient,
}

impl<'a> TeamService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Team>> {
        let list: ListResponse<Team> = self.client.get("/teams/").await?;
        Ok(list.into_vec())
    }

    pub async fn get(&self, id: &str) -> Result<Team> {
        self.client.get(&team_path(id, "")).await
    }

    pub async fn create(&self, team: &TeamInput) -> Result<Team> {
        self.client.post("/teams/", team).await
    }

    pub async fn update(&self, id: &str, team: &TeamInput) -> Result<Team> {
        self.client.patch(&team_path(id, ""), team).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&team_path(id, "")).await
    }

    /// List a team's memberships.
    pub async fn members(&self, id: &str) -> Result<Vec<TeamMembership>> {
        let list: ListResponse<TeamMembership> =
            self.client.get(&team_path(id, "members/")).await?;
        Ok(list.into_vec())
    }

    /// Add a user to a team. `role` defaults to `member`.
    pub async fn add_member(
        &self,
        id: &str,
        user_id: &str,
        role: Option<&str>,
    ) -> Result<TeamMembership> {
        let body = MemberAdd {
            user_id: user_id.to_string(),
            role: role.unwrap_or(DEFAULT_MEMBER_ROLE).to_string(),
        };
        self.client.post(&team_path(id, "add_member/"), &body).await
    }

    /// Remove a user from a team.
    pub async fn remove_member(&self, id: &str, user_id: &str) -> Result<()> {
        let body = MemberRemove {
            user_id: user_id.to_string(),
        };
        self.client
            .delete_with_body(&team_path(id, "remove_member/"), &body)
            .await
    }

    /// The current user's team memberships.
    pub async fn mine(&self) -> Result<Vec<TeamMembership>> {
        let list: ListResponse<TeamMembership> = self.client.get("/my-teams/").await?;
        Ok(list.into_vec())
    }
}

fn team_path(id: &str, action: &str) -> String {
    format!("/teams/{}/{}", id, action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_paths() {
        assert_eq!(team_path("7", ""), "/teams/7/");
        assert_eq!(team_path("7", "members/"), "/teams/7/members/");
        assert_eq!(team_path("7", "remove_member/"), "/teams/7/remove_member/");
    }
}
