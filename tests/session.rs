//! Session behavior across the token store and the backend.

use std::sync::Arc;

use serde_json::json;
use taskdeck::api::types::LoginCredentials;
use taskdeck::api::{ApiClient, MemoryTokenStore, TokenStore};
use taskdeck::session::Session;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A client pointed at a port nothing listens on.
fn offline_session(tokens: Arc<MemoryTokenStore>) -> Session {
    Session::new(ApiClient::new("http://127.0.0.1:9/api", tokens, None).unwrap())
}

#[test]
fn test_authenticated_iff_access_token_present() {
    let tokens = Arc::new(MemoryTokenStore::new());
    let session = offline_session(tokens.clone());
    assert!(!session.is_authenticated());

    // Validity is never checked, any string counts
    tokens.set("access_token", "not-even-a-jwt").unwrap();
    assert!(session.is_authenticated());
    assert!(session.is_resolving());

    tokens.remove("access_token").unwrap();
    assert!(!session.is_authenticated());
}

#[test]
fn test_logout_without_backend_clears_tokens() {
    let tokens = Arc::new(MemoryTokenStore::new());
    tokens.store_pair("a", "r").unwrap();
    let mut session = offline_session(tokens.clone());

    tokio_test::block_on(session.logout()).unwrap();

    assert!(tokens.access_token().is_none());
    assert!(tokens.refresh_token().is_none());
    assert!(session.user().is_none());
}

#[tokio::test]
async fn test_login_then_logout_round() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": "u1", "username": "ada", "role": "manager" },
            "tokens": { "access": "a1", "refresh": "r1" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout/"))
        .respond_with(ResponseTemplate::new(205))
        .mount(&server)
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let client = ApiClient::new(&format!("{}/api", server.uri()), tokens.clone(), None).unwrap();
    let mut session = Session::new(client);

    let user = session
        .login(&LoginCredentials {
            username: "ada".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(user.username, "ada");
    assert!(!session.is_admin());
    assert!(session.company().is_none());
    assert!(!session.is_resolving());

    session.logout().await.unwrap();
    assert!(!session.is_authenticated());
    assert!(session.user().is_none());
}
