//! End-to-end API tests
//!
//! Each test builds a fresh router over an in-memory database and drives it
//! through the HTTP surface with `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use pinboard_api::config::Config;
use pinboard_api::create_router;
use pinboard_api::state::AppState;

async fn app() -> Router {
    let config = Config {
        port: 0,
        db_url: "sqlite::memory:".to_string(),
        secret_key: "integration-test-secret".to_string(),
    };
    let state = AppState::new(&config).await.unwrap();
    create_router(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn register(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            Method::POST,
            "/account",
            None,
            &json!({"username": username, "password": password}),
        ),
    )
    .await
}

async fn login(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    let basic = STANDARD.encode(format!("{username}:{password}"));
    let request = Request::builder()
        .method(Method::POST)
        .uri("/login")
        .header(header::AUTHORIZATION, format!("Basic {basic}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn login_token(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = login(app, username, password).await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_register_login_post_lifecycle() {
    let app = app().await;

    // Registration: 201, no token in the response, hash never serialized.
    let (status, account) = register(&app, "alice", "Passw0rd").await;
    assert_eq!(status, StatusCode::CREATED);
    let alice_id = account["id"].as_i64().unwrap();
    assert_eq!(account["username"], "alice");
    assert!(account.get("token").is_none());
    assert!(account.get("password").is_none());
    assert!(account.get("password_hash").is_none());

    // Login: 201 with a three-segment signed token.
    let token = login_token(&app, "alice", "Passw0rd").await;
    assert_eq!(token.split('.').count(), 3);

    // Create a post as alice; owner is fixed to the caller.
    let (status, post) = send(
        &app,
        json_request(
            Method::POST,
            "/post",
            Some(&token),
            &json!({"title": "hello", "body": "first post"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(post["account_id"].as_i64().unwrap(), alice_id);
    let post_id = post["id"].as_i64().unwrap();

    // A different identity cannot modify it: 403, not 401.
    register(&app, "bob", "Passw0rd").await;
    let bob_token = login_token(&app, "bob", "Passw0rd").await;
    let (status, body) = send(
        &app,
        json_request(
            Method::PATCH,
            &format!("/post/{post_id}"),
            Some(&bob_token),
            &json!({"title": "stolen"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().unwrap().contains("your own posts"));

    // No credential at all: 401, not 403.
    let (status, _) = send(
        &app,
        json_request(
            Method::PATCH,
            &format!("/post/{post_id}"),
            None,
            &json!({"title": "anonymous edit"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The owner can update and delete.
    let (status, updated) = send(
        &app,
        json_request(
            Method::PATCH,
            &format!("/post/{post_id}"),
            Some(&token),
            &json!({"body": "edited"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["body"], "edited");
    assert_eq!(updated["title"], "hello");

    let (status, _) = send(
        &app,
        json_request(
            Method::DELETE,
            &format!("/post/{post_id}"),
            Some(&token),
            &Value::Null,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get_request(&format!("/post/{post_id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let app = app().await;

    let (status, _) = register(&app, "alice", "Passw0rd").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = register(&app, "alice", "0therPass").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_weak_password_yields_problem_list() {
    let app = app().await;

    // No digit.
    let (status, body) = register(&app, "alice", "Password").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let problems = body["error"].as_array().unwrap();
    assert!(!problems.is_empty());
    assert_eq!(problems[0]["field"], "password");
}

#[tokio::test]
async fn test_anonymous_reads_are_public() {
    let app = app().await;
    register(&app, "alice", "Passw0rd").await;

    let (status, accounts) = send(&app, get_request("/account")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(accounts.as_array().unwrap().len(), 1);

    let (status, posts) = send(&app, get_request("/post")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(posts.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_garbage_bearer_is_401_not_anonymous() {
    let app = app().await;

    // Even on a public route, a present-but-invalid token is terminal.
    let request = Request::builder()
        .method(Method::GET)
        .uri("/post")
        .header(header::AUTHORIZATION, "Bearer not.a.token")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["error"],
        "the provided authorization token is invalid"
    );
}

#[tokio::test]
async fn test_login_failures_are_uniform_401() {
    let app = app().await;
    register(&app, "alice", "Passw0rd").await;

    // Unknown username and wrong password are indistinguishable.
    let (status, unknown) = login(&app, "nobody", "Passw0rd").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, wrong) = login(&app, "alice", "WrongPass1").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown["error"], wrong["error"]);

    // Missing Basic header entirely.
    let request = Request::builder()
        .method(Method::POST)
        .uri("/login")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_account_ownership_and_cascade() {
    let app = app().await;

    let (_, alice) = register(&app, "alice", "Passw0rd").await;
    let alice_id = alice["id"].as_i64().unwrap();
    let (_, bob) = register(&app, "bob", "Passw0rd").await;
    let bob_id = bob["id"].as_i64().unwrap();

    let alice_token = login_token(&app, "alice", "Passw0rd").await;

    // Alice cannot touch bob's account.
    let (status, _) = send(
        &app,
        json_request(
            Method::PATCH,
            &format!("/account/{bob_id}"),
            Some(&alice_token),
            &json!({"username": "hijacked"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Alice can rename herself.
    let (status, renamed) = send(
        &app,
        json_request(
            Method::PATCH,
            &format!("/account/{alice_id}"),
            Some(&alice_token),
            &json!({"username": "alice2"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["username"], "alice2");

    // Her posts disappear with her account.
    let (_, post) = send(
        &app,
        json_request(
            Method::POST,
            "/post",
            Some(&alice_token),
            &json!({"title": "doomed", "body": "going away"}),
        ),
    )
    .await;
    let post_id = post["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        json_request(
            Method::DELETE,
            &format!("/account/{alice_id}"),
            Some(&alice_token),
            &Value::Null,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get_request(&format!("/post/{post_id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // A still-valid token whose subject is gone no longer authenticates.
    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/post",
            Some(&alice_token),
            &json!({"title": "ghost", "body": "from beyond"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_post_title_conflicts() {
    let app = app().await;
    register(&app, "alice", "Passw0rd").await;
    let token = login_token(&app, "alice", "Passw0rd").await;

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/post",
            Some(&token),
            &json!({"title": "unique", "body": "one"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/post",
            Some(&token),
            &json!({"title": "unique", "body": "two"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_anonymous_create_post_is_401() {
    let app = app().await;

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/post",
            None,
            &json!({"title": "nope", "body": "anonymous"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
