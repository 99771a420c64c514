//! Request and response types for the project-management REST API.
//!
//! These types mirror the backend's JSON records. The client owns no
//! invariants over them; they are replaced wholesale on every fetch.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

fn default_true() -> bool {
    true
}

/// Accept a decimal that the backend may render as a number or a string.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Number(f64),
        Text(String),
    }

    match Option::<Decimal>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Decimal::Number(n)) => Ok(Some(n)),
        Some(Decimal::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Decimal::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal '{}'", s))),
    }
}

/// A list endpoint response.
///
/// List endpoints return either a bare array or a paginated envelope with a
/// `results` field. Both shapes collapse into a plain `Vec`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    /// A bare JSON array.
    Plain(Vec<T>),
    /// A paginated envelope.
    Paginated {
        /// The page of results.
        results: Vec<T>,
    },
}

impl<T> ListResponse<T> {
    /// Take the records regardless of the envelope shape.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListResponse::Plain(items) => items,
            ListResponse::Paginated { results } => results,
        }
    }
}

// ============================================================================
// Enumerations
// ============================================================================

/// A user's role within their company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Member,
    Viewer,
}

impl Role {
    /// All roles in display order.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Manager, Role::Member, Role::Viewer];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Member => "Member",
            Role::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether an organization is a company or a single freelancer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyType {
    #[default]
    Company,
    Freelancer,
}

impl CompanyType {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            CompanyType::Company => "Company",
            CompanyType::Freelancer => "Freelancer",
        }
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    #[default]
    Active,
    OnHold,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planning",
            ProjectStatus::Active => "Active",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Task workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Review,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// All statuses in workflow order.
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Review => "Review",
            TaskStatus::Completed => "Completed",
            TaskStatus::Cancelled => "Cancelled",
        }
    }

    /// Whether the task is finished (completed or cancelled).
    pub fn is_closed(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Cancelled)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Priority shared by projects and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A member's role within a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    Lead,
    #[default]
    Member,
}

// ============================================================================
// Records
// ============================================================================

/// A user account.
///
/// Returned by `GET /auth/current-user/` and the `/auth/users/` endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user ID. Absent from the reply to a create.
    #[serde(default)]
    pub id: String,
    /// The login name.
    pub username: String,
    /// The user's email address.
    #[serde(default)]
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Full name as computed by the backend.
    #[serde(default)]
    pub full_name: String,
    /// The owning company ID.
    #[serde(default)]
    pub company: Option<String>,
    /// The owning company's name.
    #[serde(default)]
    pub company_name: Option<String>,
    /// The user's role.
    pub role: Role,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Job title.
    #[serde(default)]
    pub position: Option<String>,
    /// Department name.
    #[serde(default)]
    pub department: Option<String>,
    /// Whether this user owns the company account.
    #[serde(default)]
    pub is_company_owner: bool,
    /// Whether the account is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl User {
    /// The name to show in lists: full name, falling back to the username.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }

    /// Whether the user holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// An organization that owns users, teams and projects.
///
/// Returned by `GET /auth/company/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// The company ID.
    pub id: String,
    /// The company name.
    pub name: String,
    /// Company or freelancer.
    pub company_type: CompanyType,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Website URL.
    #[serde(default)]
    pub website: Option<String>,
    /// Number of users in the company.
    #[serde(default)]
    pub users_count: u32,
}

/// A named grouping of users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    /// The lead's user ID.
    #[serde(default)]
    pub lead: Option<String>,
    /// The lead's display name.
    #[serde(default)]
    pub lead_name: Option<String>,
    #[serde(default)]
    pub members_count: u32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// A user's membership in a team.
///
/// Returned by `GET /teams/{id}/members/` and `GET /my-teams/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMembership {
    pub id: String,
    pub user: User,
    pub role: TeamRole,
    #[serde(default)]
    pub joined_at: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// A project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// The project ID. Absent from the reply to a create.
    #[serde(default)]
    pub id: String,
    /// The project title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// The owning company ID.
    #[serde(default)]
    pub company: Option<String>,
    /// The owning company's name.
    #[serde(default)]
    pub company_name: Option<String>,
    /// The manager's user ID.
    #[serde(default)]
    pub manager: Option<String>,
    /// The manager's display name.
    #[serde(default)]
    pub manager_name: Option<String>,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Priority.
    pub priority: Priority,
    /// Start date (`YYYY-MM-DD`).
    #[serde(default)]
    pub start_date: Option<String>,
    /// Due date (`YYYY-MM-DD`).
    #[serde(default)]
    pub due_date: Option<String>,
    /// Budget amount.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub budget: Option<f64>,
    /// Manually tracked progress percentage.
    #[serde(default)]
    pub progress: u32,
    /// Number of tasks in the project.
    #[serde(default)]
    pub task_count: u32,
    /// Number of completed tasks.
    #[serde(default)]
    pub completed_tasks: u32,
    /// Completion percentage computed by the backend.
    #[serde(default)]
    pub completion_percentage: f64,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A unit of work inside a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// The task ID. Absent from the reply to a create.
    #[serde(default)]
    pub id: String,
    /// The task title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// The owning project's ID.
    pub project: String,
    /// The owning project's title.
    #[serde(default)]
    pub project_title: String,
    /// The assignee's user ID.
    #[serde(default)]
    pub assigned_to: Option<String>,
    /// The assignee's display name.
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    /// The creator's user ID.
    #[serde(default)]
    pub created_by: Option<String>,
    /// The creator's display name.
    #[serde(default)]
    pub created_by_name: Option<String>,
    /// Workflow status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: Priority,
    /// Estimated effort in hours.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub estimated_hours: Option<f64>,
    /// Actual effort in hours.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub actual_hours: Option<f64>,
    /// Start date (`YYYY-MM-DD`).
    #[serde(default)]
    pub start_date: Option<String>,
    /// Due date (`YYYY-MM-DD`).
    #[serde(default)]
    pub due_date: Option<String>,
    /// When the task was completed.
    #[serde(default)]
    pub completed_at: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Number of comments on the task.
    #[serde(default)]
    pub comments_count: u32,
}

impl Task {
    /// The assignee's name, or "Unassigned".
    pub fn assignee_name(&self) -> &str {
        self.assigned_to_name.as_deref().unwrap_or("Unassigned")
    }
}

/// A free-text note attached to a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskComment {
    pub id: String,
    pub task: String,
    pub user: User,
    #[serde(default)]
    pub user_name: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// ============================================================================
// Auth payloads
// ============================================================================

/// Credentials for `POST /auth/login/`.
#[derive(Clone, Serialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Payload for `POST /auth/register/`.
#[derive(Clone, Default, Serialize)]
pub struct CompanyRegistration {
    pub name: String,
    pub company_type: CompanyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub owner_username: String,
    pub owner_email: String,
    pub owner_password: String,
    pub owner_password_confirm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_last_name: Option<String>,
}

/// The token pair issued on login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

/// Response of login and registration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Backend status message.
    #[serde(default)]
    pub message: String,
    /// The authenticated user.
    pub user: User,
    /// The user's company, when returned.
    #[serde(default)]
    pub company: Option<Company>,
    /// The issued tokens.
    pub tokens: AuthTokens,
}

/// Body of `POST /auth/logout/`.
#[derive(Debug, Clone, Serialize)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

/// Partial update for `PATCH /auth/profile/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Body of `PATCH /auth/change-password/`.
#[derive(Clone, Serialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub new_password_confirm: String,
}

/// A bare `{ "message": ... }` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

// ============================================================================
// Resource payloads
// ============================================================================

/// Payload for `POST /auth/users/`.
#[derive(Clone, Default, Serialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
}

/// Partial update for `PATCH /auth/users/{id}/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Partial update for `PATCH /auth/company/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompanyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Payload for `POST /teams/` and `PATCH /teams/{id}/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub member_ids: Vec<String>,
}

/// Payload for `POST /projects/` and `PATCH /projects/{id}/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assigned_user_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assigned_team_ids: Vec<String>,
}

/// Payload for `POST /tasks/` and `PATCH /tasks/{id}/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Body of the `add_member` actions on teams and projects.
#[derive(Debug, Clone, Serialize)]
pub struct MemberAdd {
    pub user_id: String,
    pub role: String,
}

/// Body of the `remove_member` actions on teams and projects.
#[derive(Debug, Clone, Serialize)]
pub struct MemberRemove {
    pub user_id: String,
}

/// Body of `POST /tasks/{id}/add_comment/`.
#[derive(Debug, Clone, Serialize)]
pub struct CommentInput {
    pub content: String,
}

// Payloads carrying passwords keep them out of Debug output.

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for CompanyRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompanyRegistration")
            .field("name", &self.name)
            .field("company_type", &self.company_type)
            .field("owner_username", &self.owner_username)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChange").finish_non_exhaustive()
    }
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Records used across unit tests.

    use super::*;

    pub fn user(id: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            first_name: String::new(),
            last_name: String::new(),
            full_name: String::new(),
            company: Some("c1".to_string()),
            company_name: Some("Acme".to_string()),
            role,
            phone: None,
            avatar: None,
            position: None,
            department: None,
            is_company_owner: false,
            is_active: true,
        }
    }

    pub fn company() -> Company {
        Company {
            id: "c1".to_string(),
            name: "Acme".to_string(),
            company_type: CompanyType::Company,
            description: None,
            email: "hello@acme.test".to_string(),
            phone: None,
            address: None,
            website: None,
            users_count: 2,
        }
    }

    pub fn project(id: &str, title: &str) -> Project {
        Project {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            company: Some("c1".to_string()),
            company_name: Some("Acme".to_string()),
            manager: None,
            manager_name: None,
            status: ProjectStatus::Active,
            priority: Priority::Medium,
            start_date: None,
            due_date: None,
            budget: None,
            progress: 0,
            task_count: 0,
            completed_tasks: 0,
            completion_percentage: 0.0,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn task(id: &str, title: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            project: "p1".to_string(),
            project_title: "Website".to_string(),
            assigned_to: None,
            assigned_to_name: None,
            created_by: None,
            created_by_name: None,
            status,
            priority: Priority::Medium,
            estimated_hours: None,
            actual_hours: None,
            start_date: None,
            due_date: None,
            completed_at: None,
            created_at: None,
            updated_at: None,
            comments_count: 0,
        }
    }

    pub fn team(id: &str, name: &str, members: u32) -> Team {
        Team {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            company: Some("c1".to_string()),
            company_name: Some("Acme".to_string()),
            lead: None,
            lead_name: None,
            members_count: members,
            created_at: None,
            updated_at: None,
            is_active: true,
        }
    }
}
