//! Async task management for non-blocking API operations.
//!
//! Views never await the network. They describe the call they need as an
//! `ApiRequest`; the main loop hands it to the `TaskSpawner`, which runs it
//! on the tokio runtime and posts exactly one `ApiMessage` back through an
//! unbounded channel. The main loop drains the channel with `try_recv()`
//! on every tick and feeds each message to `App::handle_api_message`.
//!
//! # Adding New Task Types
//!
//! 1. Add a variant to `ApiRequest` describing the call
//! 2. Add a variant to `ApiMessage` carrying its result
//! 3. Map one to the other in `execute`
//! 4. Handle the message in `App::handle_api_message`

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::types::{
    AuthResponse, Company, CompanyRegistration, CompanyUpdate, LoginCredentials, MessageResponse,
    PasswordChange, ProfileUpdate, Project, ProjectInput, Task, TaskComment, TaskInput, Team,
    TeamInput, TeamMembership, User, UserCreate, UserUpdate,
};
use crate::api::{ApiClient, Result};
use crate::reports::Workload;

/// A network call requested by a view.
#[derive(Debug, Clone)]
pub enum ApiRequest {
    Login(LoginCredentials),
    Register(CompanyRegistration),
    Logout,
    LoadCurrentUser,
    UpdateProfile(ProfileUpdate),
    ChangePassword(PasswordChange),

    LoadCompany,
    UpdateCompany(CompanyUpdate),

    LoadUsers,
    CreateUser(UserCreate),
    UpdateUser { id: String, update: UserUpdate },
    SetUserActive { id: String, active: bool },
    DeleteUser(String),

    LoadTeams,
    LoadMyTeams,
    CreateTeam(TeamInput),
    UpdateTeam { id: String, input: TeamInput },
    DeleteTeam(String),
    LoadTeamMembers(String),
    AddTeamMember { team_id: String, user_id: String },
    RemoveTeamMember { team_id: String, user_id: String },

    /// All projects, or only the user's own when `mine` is set.
    LoadProjects { mine: bool },
    CreateProject(ProjectInput),
    DeleteProject(String),
    LoadProjectTasks(String),

    /// All tasks, or only those assigned to the user when `mine` is set.
    LoadTasks { mine: bool },
    CreateTask(TaskInput),
    UpdateTask { id: String, input: TaskInput },
    DeleteTask(String),
    LoadComments(String),
    AddComment { task_id: String, content: String },

    /// Projects, tasks and teams for the reports and calendar views.
    LoadWorkload,
}

/// Messages sent from background tasks to the main event loop.
///
/// Each variant carries the result of one `ApiRequest`.
#[derive(Debug)]
pub enum ApiMessage {
    LoggedIn(Result<AuthResponse>),
    Registered(Result<AuthResponse>),
    /// Logout always completes. Carries the outcome of clearing the stored
    /// tokens; backend failures are already swallowed.
    LoggedOut(Result<()>),
    CurrentUserLoaded(Result<User>),
    ProfileUpdated(Result<User>),
    PasswordChanged(Result<MessageResponse>),

    CompanyLoaded(Result<Company>),
    CompanyUpdated(Result<Company>),

    UsersLoaded(Result<Vec<User>>),
    UserCreated(Result<User>),
    UserUpdated(Result<User>),
    UserStatusChanged { active: bool, result: Result<User> },
    UserDeleted(Result<()>),

    TeamsLoaded(Result<Vec<Team>>),
    MyTeamsLoaded(Result<Vec<TeamMembership>>),
    TeamCreated(Result<Team>),
    TeamUpdated(Result<Team>),
    TeamDeleted(Result<()>),
    TeamMembersLoaded {
        team_id: String,
        result: Result<Vec<TeamMembership>>,
    },
    TeamMemberAdded {
        team_id: String,
        result: Result<TeamMembership>,
    },
    TeamMemberRemoved {
        team_id: String,
        result: Result<()>,
    },

    ProjectsLoaded { mine: bool, result: Result<Vec<Project>> },
    ProjectCreated(Result<Project>),
    ProjectDeleted(Result<()>),
    ProjectTasksLoaded {
        project_id: String,
        result: Result<Vec<Task>>,
    },

    TasksLoaded { mine: bool, result: Result<Vec<Task>> },
    TaskCreated(Result<Task>),
    TaskUpdated(Result<Task>),
    TaskDeleted(Result<()>),
    CommentsLoaded {
        task_id: String,
        result: Result<Vec<TaskComment>>,
    },
    CommentAdded {
        task_id: String,
        result: Result<TaskComment>,
    },

    WorkloadLoaded(Result<Workload>),
}

/// Run one request against the API and wrap its result.
pub async fn execute(client: &ApiClient, request: ApiRequest) -> ApiMessage {
    debug!(request = request_name(&request), "Executing request");
    match request {
        ApiRequest::Login(credentials) => {
            ApiMessage::LoggedIn(client.auth().login(&credentials).await)
        }
        ApiRequest::Register(registration) => {
            ApiMessage::Registered(client.auth().register(&registration).await)
        }
        ApiRequest::Logout => ApiMessage::LoggedOut(client.auth().logout().await),
        ApiRequest::LoadCurrentUser => {
            ApiMessage::CurrentUserLoaded(client.auth().current_user().await)
        }
        ApiRequest::UpdateProfile(update) => {
            ApiMessage::ProfileUpdated(client.auth().update_profile(&update).await)
        }
        ApiRequest::ChangePassword(change) => {
            ApiMessage::PasswordChanged(client.auth().change_password(&change).await)
        }

        ApiRequest::LoadCompany => ApiMessage::CompanyLoaded(client.company().get().await),
        ApiRequest::UpdateCompany(update) => {
            ApiMessage::CompanyUpdated(client.company().update(&update).await)
        }

        ApiRequest::LoadUsers => ApiMessage::UsersLoaded(client.users().list().await),
        ApiRequest::CreateUser(user) => {
            ApiMessage::UserCreated(client.users().create(&user).await)
        }
        ApiRequest::UpdateUser { id, update } => {
            ApiMessage::UserUpdated(client.users().update(&id, &update).await)
        }
        ApiRequest::SetUserActive { id, active } => {
            let users = client.users();
            let result = if active {
                users.activate(&id).await
            } else {
                users.deactivate(&id).await
            };
            ApiMessage::UserStatusChanged { active, result }
        }
        ApiRequest::DeleteUser(id) => ApiMessage::UserDeleted(client.users().delete(&id).await),

        ApiRequest::LoadTeams => ApiMessage::TeamsLoaded(client.teams().list().await),
        ApiRequest::LoadMyTeams => ApiMessage::MyTeamsLoaded(client.teams().mine().await),
        ApiRequest::CreateTeam(input) => {
            ApiMessage::TeamCreated(client.teams().create(&input).await)
        }
        ApiRequest::UpdateTeam { id, input } => {
            ApiMessage::TeamUpdated(client.teams().update(&id, &input).await)
        }
        ApiRequest::DeleteTeam(id) => ApiMessage::TeamDeleted(client.teams().delete(&id).await),
        ApiRequest::LoadTeamMembers(team_id) => {
            let result = client.teams().members(&team_id).await;
            ApiMessage::TeamMembersLoaded { team_id, result }
        }
        ApiRequest::AddTeamMember { team_id, user_id } => {
            let result = client.teams().add_member(&team_id, &user_id, None).await;
            ApiMessage::TeamMemberAdded { team_id, result }
        }
        ApiRequest::RemoveTeamMember { team_id, user_id } => {
            let result = client.teams().remove_member(&team_id, &user_id).await;
            ApiMessage::TeamMemberRemoved { team_id, result }
        }

        ApiRequest::LoadProjects { mine } => {
            let projects = client.projects();
            let result = if mine {
                projects.mine().await
            } else {
                projects.list().await
            };
            ApiMessage::ProjectsLoaded { mine, result }
        }
        ApiRequest::CreateProject(input) => {
            ApiMessage::ProjectCreated(client.projects().create(&input).await)
        }
        ApiRequest::DeleteProject(id) => {
            ApiMessage::ProjectDeleted(client.projects().delete(&id).await)
        }
        ApiRequest::LoadProjectTasks(project_id) => {
            let result = client.projects().tasks(&project_id).await;
            ApiMessage::ProjectTasksLoaded { project_id, result }
        }

        ApiRequest::LoadTasks { mine } => {
            let tasks = client.tasks();
            let result = if mine { tasks.mine().await } else { tasks.list().await };
            ApiMessage::TasksLoaded { mine, result }
        }
        ApiRequest::CreateTask(input) => {
            ApiMessage::TaskCreated(client.tasks().create(&input).await)
        }
        ApiRequest::UpdateTask { id, input } => {
            ApiMessage::TaskUpdated(client.tasks().update(&id, &input).await)
        }
        ApiRequest::DeleteTask(id) => ApiMessage::TaskDeleted(client.tasks().delete(&id).await),
        ApiRequest::LoadComments(task_id) => {
            let result = client.tasks().comments(&task_id).await;
            ApiMessage::CommentsLoaded { task_id, result }
        }
        ApiRequest::AddComment { task_id, content } => {
            let result = client.tasks().add_comment(&task_id, &content).await;
            ApiMessage::CommentAdded { task_id, result }
        }

        ApiRequest::LoadWorkload => {
            let (projects, tasks, teams) = (client.projects(), client.tasks(), client.teams());
            let result = tokio::try_join!(projects.list(), tasks.list(), teams.list()).map(
                |(projects, tasks, teams)| Workload {
                    projects,
                    tasks,
                    teams,
                },
            );
            ApiMessage::WorkloadLoaded(result)
        }
    }
}

/// A short name for a request, safe to log (no credentials).
fn request_name(request: &ApiRequest) -> &'static str {
    match request {
        ApiRequest::Login(_) => "login",
        ApiRequest::Register(_) => "register",
        ApiRequest::Logout => "logout",
        ApiRequest::LoadCurrentUser => "current_user",
        ApiRequest::UpdateProfile(_) => "update_profile",
        ApiRequest::ChangePassword(_) => "change_password",
        ApiRequest::LoadCompany => "load_company",
        ApiRequest::UpdateCompany(_) => "update_company",
        ApiRequest::LoadUsers => "load_users",
        ApiRequest::CreateUser(_) => "create_user",
        ApiRequest::UpdateUser { .. } => "update_user",
        ApiRequest::SetUserActive { .. } => "set_user_active",
        ApiRequest::DeleteUser(_) => "delete_user",
        ApiRequest::LoadTeams => "load_teams",
        ApiRequest::LoadMyTeams => "load_my_teams",
        ApiRequest::CreateTeam(_) => "create_team",
        ApiRequest::UpdateTeam { .. } => "update_team",
        ApiRequest::DeleteTeam(_) => "delete_team",
        ApiRequest::LoadTeamMembers(_) => "load_team_members",
        ApiRequest::AddTeamMember { .. } => "add_team_member",
        ApiRequest::RemoveTeamMember { .. } => "remove_team_member",
        ApiRequest::LoadProjects { .. } => "load_projects",
        ApiRequest::CreateProject(_) => "create_project",
        ApiRequest::DeleteProject(_) => "delete_project",
        ApiRequest::LoadProjectTasks(_) => "load_project_tasks",
        ApiRequest::LoadTasks { .. } => "load_tasks",
        ApiRequest::CreateTask(_) => "create_task",
        ApiRequest::UpdateTask { .. } => "update_task",
        ApiRequest::DeleteTask(_) => "delete_task",
        ApiRequest::LoadComments(_) => "load_comments",
        ApiRequest::AddComment { .. } => "add_comment",
        ApiRequest::LoadWorkload => "load_workload",
    }
}

/// Spawns background tasks for API requests.
///
/// Each spawned task owns a clone of the client and sends its result
/// through the channel. In-flight tasks are never cancelled.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx }
    }

    /// Spawn a task that executes `request`.
    pub fn spawn(&self, client: &ApiClient, request: ApiRequest) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let message = execute(&client, request).await;
            if tx.send(message).is_err() {
                debug!("Result dropped: event loop has exited");
            }
        });
    }
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled
/// in the main event loop, and the spawner should be used to spawn tasks.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::{MemoryTokenStore, TokenStore};

    fn offline_client(tokens: Arc<MemoryTokenStore>) -> ApiClient {
        ApiClient::new("http://127.0.0.1:9/api", tokens, None).unwrap()
    }

    #[test]
    fn test_request_name_hides_credentials() {
        let request = ApiRequest::Login(LoginCredentials {
            username: "ada".to_string(),
            password: "hunter2".to_string(),
        });
        assert_eq!(request_name(&request), "login");
    }

    #[tokio::test]
    async fn test_spawned_logout_reports_and_clears_tokens() {
        let tokens = Arc::new(MemoryTokenStore::new());
        tokens.store_pair("a", "r").unwrap();
        let client = offline_client(tokens.clone());
        let (mut rx, spawner) = create_task_channel();

        spawner.spawn(&client, ApiRequest::Logout);

        let message = rx.recv().await.unwrap();
        assert!(matches!(message, ApiMessage::LoggedOut(Ok(()))));
        assert!(tokens.access_token().is_none());
    }

    #[tokio::test]
    async fn test_network_failure_is_returned_not_retried() {
        let client = offline_client(Arc::new(MemoryTokenStore::new()));
        let message = execute(&client, ApiRequest::LoadProjects { mine: false }).await;
        match message {
            ApiMessage::ProjectsLoaded { mine, result } => {
                assert!(!mine);
                assert!(matches!(result, Err(crate::api::ApiError::Network(_))));
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
