//! HTTP-level tests for the API client against a mock backend.

use std::sync::Arc;

use serde_json::{json, Value};
use taskdeck::api::types::{
    LoginCredentials, Priority, ProjectInput, ProjectStatus, Role, TaskInput, TaskStatus,
    UserCreate,
};
use taskdeck::api::{ApiClient, ApiError, MemoryTokenStore, TokenStore};
use taskdeck::tasks::{execute, ApiMessage, ApiRequest};
use taskdeck::ui::views::DashboardView;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, tokens: Arc<MemoryTokenStore>) -> ApiClient {
    ApiClient::new(&format!("{}/api/", server.uri()), tokens, None).unwrap()
}

fn user_json(id: &str, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{}@acme.test", username),
        "first_name": "Ada",
        "last_name": "Lovelace",
        "full_name": "Ada Lovelace",
        "company": "c1",
        "company_name": "Acme",
        "role": "admin",
        "is_company_owner": true,
        "is_active": true
    })
}

fn project_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "Public launch",
        "company": "c1",
        "company_name": "Acme",
        "manager": "u1",
        "manager_name": "Ada Lovelace",
        "status": "on_hold",
        "priority": "high",
        "start_date": "2024-07-01",
        "due_date": "2024-08-15",
        "budget": "1500.50",
        "progress": 40,
        "task_count": 5,
        "completed_tasks": 2,
        "completion_percentage": 40.0,
        "created_at": "2024-07-01T09:00:00Z",
        "updated_at": "2024-07-02T09:00:00Z"
    })
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/current-user/"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u1", "ada")))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(MemoryTokenStore::with_access_token("abc123"));
    let user = client(&server, tokens).auth().current_user().await.unwrap();

    assert_eq!(user.username, "ada");
    assert_eq!(user.role, Role::Admin);
    assert!(user.is_company_owner);
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let projects = client(&server, Arc::new(MemoryTokenStore::new()))
        .projects()
        .list()
        .await
        .unwrap();
    assert!(projects.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_login_stores_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(body_json(json!({ "username": "ada", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "user": user_json("u1", "ada"),
            "company": {
                "id": "c1",
                "name": "Acme",
                "company_type": "company",
                "email": "info@acme.test",
                "users_count": 3
            },
            "tokens": { "access": "access-1", "refresh": "refresh-1" }
        })))
        .mount(&server)
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let api = client(&server, tokens.clone());
    let response = api
        .auth()
        .login(&LoginCredentials {
            username: "ada".to_string(),
            password: "s3cret".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.user.id, "u1");
    assert_eq!(response.company.map(|c| c.users_count), Some(3));
    assert_eq!(tokens.access_token().as_deref(), Some("access-1"));
    assert_eq!(tokens.refresh_token().as_deref(), Some("refresh-1"));
    assert!(api.auth().is_authenticated());
}

#[tokio::test]
async fn test_failed_login_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "non_field_errors": ["Invalid credentials"] })),
        )
        .mount(&server)
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let err = client(&server, tokens.clone())
        .auth()
        .login(&LoginCredentials {
            username: "ada".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.display_message("Login failed"), "Invalid credentials");
    assert!(tokens.access_token().is_none());
}

#[tokio::test]
async fn test_logout_clears_tokens_even_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout/"))
        .and(body_json(json!({ "refresh_token": "refresh-1" })))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    tokens.store_pair("access-1", "refresh-1").unwrap();
    let api = client(&server, tokens.clone());

    api.auth().logout().await.unwrap();

    assert!(tokens.access_token().is_none());
    assert!(tokens.refresh_token().is_none());
    assert!(!api.auth().is_authenticated());
}

#[tokio::test]
async fn test_paginated_list_is_flattened() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/teams/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [
                { "id": "t1", "name": "Core", "members_count": 4 },
                { "id": "t2", "name": "Design", "lead": "u2", "lead_name": "Grace" }
            ]
        })))
        .mount(&server)
        .await;

    let teams = client(&server, Arc::new(MemoryTokenStore::new()))
        .teams()
        .list()
        .await
        .unwrap();

    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].members_count, 4);
    assert_eq!(teams[1].lead_name.as_deref(), Some("Grace"));
    assert!(teams[1].is_active);
}

#[tokio::test]
async fn test_project_fields_pass_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/p1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json("p1", "Launch")))
        .mount(&server)
        .await;

    let project = client(&server, Arc::new(MemoryTokenStore::new()))
        .projects()
        .get("p1")
        .await
        .unwrap();

    assert_eq!(project.title, "Launch");
    assert_eq!(project.description.as_deref(), Some("Public launch"));
    assert_eq!(project.manager_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(project.status, ProjectStatus::OnHold);
    assert_eq!(project.priority, Priority::High);
    assert_eq!(project.due_date.as_deref(), Some("2024-08-15"));
    assert_eq!(project.budget, Some(1500.5));
    assert_eq!(project.task_count, 5);
    assert_eq!(project.completed_tasks, 2);
    assert_eq!(project.completion_percentage, 40.0);
}

#[tokio::test]
async fn test_create_project_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/projects/"))
        .and(body_json(json!({
            "title": "Launch",
            "status": "active",
            "priority": "medium",
            "due_date": "2024-08-15"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(project_json("p9", "Launch")))
        .expect(1)
        .mount(&server)
        .await;

    let input = ProjectInput {
        title: Some("Launch".to_string()),
        status: Some(ProjectStatus::Active),
        priority: Some(Priority::Medium),
        due_date: Some("2024-08-15".to_string()),
        ..Default::default()
    };
    let project = client(&server, Arc::new(MemoryTokenStore::new()))
        .projects()
        .create(&input)
        .await
        .unwrap();
    assert_eq!(project.id, "p9");
}

#[tokio::test]
async fn test_created_project_reply_without_id_is_prepended() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/projects/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "title": "Launch",
            "description": null,
            "manager": null,
            "status": "active",
            "priority": "medium",
            "start_date": null,
            "due_date": "2024-08-15",
            "budget": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(MemoryTokenStore::with_access_token("t")));
    let input = ProjectInput {
        title: Some("Launch".to_string()),
        status: Some(ProjectStatus::Active),
        priority: Some(Priority::Medium),
        due_date: Some("2024-08-15".to_string()),
        ..Default::default()
    };
    let result = match execute(&api, ApiRequest::CreateProject(input)).await {
        ApiMessage::ProjectCreated(result) => result,
        other => panic!("unexpected message: {:?}", other),
    };
    assert!(result.is_ok());

    let mut dashboard = DashboardView::new();
    dashboard.on_projects_loaded(false, Ok(Vec::new()));
    dashboard.on_project_created(result);
    let projects = dashboard.projects().get().unwrap();
    assert_eq!(projects[0].title, "Launch");
    assert_eq!(projects[0].due_date.as_deref(), Some("2024-08-15"));
}

#[tokio::test]
async fn test_create_replies_without_id_decode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "title": "Write copy",
            "description": "",
            "project": "p1",
            "assigned_to": null,
            "status": "todo",
            "priority": "high",
            "estimated_hours": "3.50",
            "start_date": null,
            "due_date": null
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/users/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "username": "grace",
            "email": "grace@acme.test",
            "first_name": "Grace",
            "last_name": "Hopper",
            "company": "c1",
            "role": "member",
            "phone": null,
            "position": null,
            "department": null,
            "hire_date": null,
            "is_company_owner": false
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/teams/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "name": "Core",
            "description": "",
            "lead": null
        })))
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(MemoryTokenStore::with_access_token("t")));
    let task = api
        .tasks()
        .create(&TaskInput {
            title: Some("Write copy".to_string()),
            project: Some("p1".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(task.estimated_hours, Some(3.5));
    assert!(task.id.is_empty());

    let user = api
        .users()
        .create(&UserCreate {
            username: "grace".to_string(),
            email: "grace@acme.test".to_string(),
            password: "s3cret-pass".to_string(),
            password_confirm: "s3cret-pass".to_string(),
            first_name: Some("Grace".to_string()),
            last_name: Some("Hopper".to_string()),
            role: Role::Member,
            phone: None,
            position: None,
            department: None,
            hire_date: None,
        })
        .await
        .unwrap();
    assert_eq!(user.username, "grace");
    assert!(user.is_active);

    let team = api.teams().create(&Default::default()).await.unwrap();
    assert_eq!(team.name, "Core");
}

#[tokio::test]
async fn test_add_member_defaults_role() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/teams/t1/add_member/"))
        .and(body_json(json!({ "user_id": "u2", "role": "member" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "m1",
            "user": user_json("u2", "grace"),
            "role": "member",
            "joined_at": "2024-07-01T09:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let membership = client(&server, Arc::new(MemoryTokenStore::new()))
        .teams()
        .add_member("t1", "u2", None)
        .await
        .unwrap();
    assert_eq!(membership.user.username, "grace");
}

#[tokio::test]
async fn test_remove_member_sends_delete_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/teams/t1/remove_member/"))
        .and(body_json(json!({ "user_id": "u2" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server, Arc::new(MemoryTokenStore::new()))
        .teams()
        .remove_member("t1", "u2")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_deactivate_patches_is_active() {
    let server = MockServer::start().await;
    let mut deactivated = user_json("u3", "linus");
    deactivated["is_active"] = json!(false);
    Mock::given(method("PATCH"))
        .and(path("/api/auth/users/u3/"))
        .and(body_json(json!({ "is_active": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(deactivated))
        .expect(1)
        .mount(&server)
        .await;

    let user = client(&server, Arc::new(MemoryTokenStore::new()))
        .users()
        .deactivate("u3")
        .await
        .unwrap();
    assert!(!user.is_active);
}

#[tokio::test]
async fn test_field_errors_are_joined() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "title": ["This field is required."],
            "project": ["Invalid pk."]
        })))
        .mount(&server)
        .await;

    let err = client(&server, Arc::new(MemoryTokenStore::new()))
        .tasks()
        .create(&Default::default())
        .await
        .unwrap_err();

    let message = err.display_message("Failed to create task");
    assert!(message.contains("This field is required."));
    assert!(message.contains("Invalid pk."));
    assert!(message.contains(", "));
}

#[tokio::test]
async fn test_forbidden_uses_detail() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/auth/users/u1/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "You do not have permission to perform this action."
        })))
        .mount(&server)
        .await;

    let err = client(&server, Arc::new(MemoryTokenStore::new()))
        .users()
        .delete("u1")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Forbidden(_)));
    assert_eq!(
        err.display_message("Failed to delete user"),
        "You do not have permission to perform this action."
    );
}

#[tokio::test]
async fn test_empty_error_body_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/company/"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = client(&server, Arc::new(MemoryTokenStore::new()))
        .company()
        .get()
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert_eq!(err.display_message("Failed to load company"), "Failed to load company");
}

#[tokio::test]
async fn test_execute_maps_my_tasks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/my-tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "k1",
            "title": "Write copy",
            "project": "p1",
            "project_title": "Launch",
            "status": "in_progress",
            "priority": "urgent",
            "due_date": "2024-08-10"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(MemoryTokenStore::with_access_token("t")));
    match execute(&api, ApiRequest::LoadTasks { mine: true }).await {
        ApiMessage::TasksLoaded { mine, result } => {
            assert!(mine);
            let tasks = result.unwrap();
            assert_eq!(tasks[0].status, TaskStatus::InProgress);
            assert_eq!(tasks[0].project_title, "Launch");
        }
        other => panic!("unexpected message: {:?}", other),
    }
}

#[tokio::test]
async fn test_execute_maps_member_removal() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/teams/t7/remove_member/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "User is not a member of this team"
        })))
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(MemoryTokenStore::new()));
    let request = ApiRequest::RemoveTeamMember {
        team_id: "t7".to_string(),
        user_id: "u9".to_string(),
    };
    match execute(&api, request).await {
        ApiMessage::TeamMemberRemoved { team_id, result } => {
            assert_eq!(team_id, "t7");
            let err = result.unwrap_err();
            assert_eq!(
                err.display_message("Failed to remove member"),
                "User is not a member of this team"
            );
        }
        other => panic!("unexpected message: {:?}", other),
    }
}

#[tokio::test]
async fn test_execute_loads_workload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([project_json("p1", "Launch")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{
                "id": "k1",
                "title": "Write copy",
                "project": "p1",
                "status": "completed",
                "priority": "low"
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/teams/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(MemoryTokenStore::with_access_token("t")));
    match execute(&api, ApiRequest::LoadWorkload).await {
        ApiMessage::WorkloadLoaded(result) => {
            let workload = result.unwrap();
            assert_eq!(workload.projects[0].title, "Launch");
            assert_eq!(workload.tasks[0].status, TaskStatus::Completed);
            assert!(workload.teams.is_empty());
        }
        other => panic!("unexpected message: {:?}", other),
    }
}
