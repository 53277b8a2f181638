mod common;

use common::MockServer;
use common::Reply;
use computerdb_lib::ComputerDbClient;
use computerdb_lib::api::PageRequest;
use computerdb_lib::auth::PasswordFlow;
use computerdb_lib::auth::StaticTokenProvider;
use computerdb_lib::error::AuthError;
use computerdb_lib::error::Error;

fn backend(req: &common::Recorded) -> Reply {
    match (req.method.as_str(), req.path.as_str()) {
        ("POST", "/oauth/authorize") => {
            let login: serde_json::Value = serde_json::from_str(&req.body).unwrap_or_default();
            if login["username"] == "qbisson" && login["password"] == "secret" {
                Reply::json(200, r#"{"token":"abc123"}"#)
            } else {
                Reply::json(401, "")
            }
        }
        ("GET", "/api/computers") => Reply::json(200, "[]"),
        _ => Reply::json(404, ""),
    }
}

#[tokio::test]
async fn test_login_then_bearer() {
    let server = MockServer::start(backend).await;

    let client = ComputerDbClient::builder()
        .endpoint(server.url("/api/computers"))
        .login(server.url("/oauth/authorize"), "qbisson", "secret")
        .build()
        .unwrap();

    client.list_computers(PageRequest::default()).await.unwrap();
    client.list_computers(PageRequest::default()).await.unwrap();

    let requests = server.requests();
    let logins = requests.iter().filter(|r| r.method == "POST").count();
    assert_eq!(logins, 1);

    let listings: Vec<_> = requests.iter().filter(|r| r.method == "GET").collect();
    assert_eq!(listings.len(), 2);
    for listing in listings {
        assert_eq!(listing.authorization.as_deref(), Some("Bearer abc123"));
    }
}

#[tokio::test]
async fn test_rejected_login() {
    let server = MockServer::start(backend).await;

    let client = ComputerDbClient::builder()
        .endpoint(server.url("/api/computers"))
        .login(server.url("/oauth/authorize"), "qbisson", "wrong")
        .build()
        .unwrap();

    let err = client.list_computers(PageRequest::default()).await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::InvalidCredentials)));

    // The listing is never attempted without a token.
    assert!(server.requests().iter().all(|r| r.method == "POST"));
}

#[tokio::test]
async fn test_password_flow_direct() {
    let server = MockServer::start(backend).await;

    let token = PasswordFlow::new(server.url("/oauth/authorize"), "qbisson", "secret")
        .authenticate()
        .await
        .unwrap();
    assert_eq!(token.as_bearer(), "Bearer abc123");
}

#[tokio::test]
async fn test_static_token() {
    let server = MockServer::start(backend).await;

    let client = ComputerDbClient::builder()
        .endpoint(server.url("/api/computers"))
        .token_provider(StaticTokenProvider::new("fixed"))
        .build()
        .unwrap();

    client.list_computers(PageRequest::default()).await.unwrap();
    assert_eq!(
        server.requests()[0].authorization.as_deref(),
        Some("Bearer fixed")
    );
}

#[tokio::test]
async fn test_unreadable_login_error_body() {
    let base = common::start_truncated("500 Internal Server Error").await;

    let err = PasswordFlow::new(format!("{}/oauth/authorize", base), "qbisson", "secret")
        .authenticate()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AuthError::Http { status: 500, ref message } if message == "Internal Server Error"
    ));
}
