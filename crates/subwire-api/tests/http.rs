//! HTTP contract tests: drive the router in-process against an in-memory
//! database.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use subwire_api::{AppStateInner, router};
use subwire_db::Database;
use subwire_gateway::{Registry, ReplacePolicy};

fn app() -> Router {
    let state = AppStateInner::new(
        Database::open_in_memory().unwrap(),
        Registry::new(),
        ReplacePolicy::default(),
    );
    router(state)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn create_users(app: &Router, names: &[&str]) {
    for name in names {
        let (status, _) = send(app, post(&format!("/users/?username={name}"))).await;
        assert_eq!(status, StatusCode::OK);
    }
}

fn subscribe_body(from: &str, to: &str) -> Value {
    json!({ "subscriber_username": from, "subscribe_to_username": to })
}

#[tokio::test]
async fn create_and_list_users() {
    let app = app();

    let (status, body) = send(&app, post("/users/?username=alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "username": "alice" }));

    create_users(&app, &["bob"]).await;

    let (status, body) = send(&app, get("/users/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "data": [
            { "id": 1, "username": "alice" },
            { "id": 2, "username": "bob" },
        ]})
    );
}

#[tokio::test]
async fn duplicate_username_is_bad_request() {
    let app = app();
    create_users(&app, &["alice"]).await;

    let (status, body) = send(&app, post("/users/?username=alice")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "detail": "Username already registered" }));
}

#[tokio::test]
async fn subscribe_unknown_user_is_not_found() {
    let app = app();
    create_users(&app, &["alice"]).await;

    let (status, body) = send(&app, post_json("/subscribe/", subscribe_body("alice", "bob"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "User not found" }));
}

#[tokio::test]
async fn duplicate_subscribe_is_bad_request() {
    let app = app();
    create_users(&app, &["alice", "bob"]).await;

    let (status, body) = send(&app, post_json("/subscribe/", subscribe_body("alice", "bob"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "Subscription request sent from alice to bob." })
    );

    let (status, body) = send(&app, post_json("/subscribe/", subscribe_body("alice", "bob"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "detail": "Already subscribed or pending confirmation" })
    );
}

#[tokio::test]
async fn confirm_lifecycle() {
    let app = app();
    create_users(&app, &["alice", "bob"]).await;

    let confirm = "/confirm_subscription/?subscriber_id=1&subscribed_to_id=2";

    let (status, body) = send(&app, post(confirm)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Subscription not found" }));

    send(&app, post_json("/subscribe/", subscribe_body("alice", "bob"))).await;

    let (status, body) = send(&app, post(confirm)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Subscription confirmed." }));

    let (status, body) = send(&app, post(confirm)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "detail": "Subscription already confirmed" }));
}

#[tokio::test]
async fn subscription_projection() {
    let app = app();
    create_users(&app, &["alice", "bob", "carol"]).await;
    send(&app, post_json("/subscribe/", subscribe_body("alice", "bob"))).await;
    send(&app, post_json("/subscribe/", subscribe_body("carol", "bob"))).await;
    send(&app, post("/confirm_subscription/?subscriber_id=1&subscribed_to_id=2")).await;

    let (status, body) = send(&app, get("/users/2/subscriptions")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "data": {
            "subscribed_to": [],
            "subscribers": [
                { "subscriber_id": 1, "subscribed_to_id": 2, "is_confirmed": true },
                { "subscriber_id": 3, "subscribed_to_id": 2, "is_confirmed": false },
            ],
        }})
    );

    let (status, _) = send(&app, get("/users/42/subscriptions")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn detail(body: &Value) -> &str {
    body["detail"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn malformed_inputs_are_rejected_with_detail() {
    let app = app();

    let (status, body) = send(&app, post("/users/")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(detail(&body).contains("username"), "body: {body}");

    let (status, body) = send(&app, post("/confirm_subscription/?subscriber_id=x&subscribed_to_id=2")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!detail(&body).is_empty(), "body: {body}");

    let (status, body) = send(
        &app,
        post_json("/subscribe/", json!({ "subscriber_username": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(detail(&body).contains("subscribe_to_username"), "body: {body}");

    let (status, body) = send(&app, get("/users/abc/subscriptions")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!detail(&body).is_empty(), "body: {body}");
}

#[tokio::test]
async fn subscribe_ignores_extra_body_fields() {
    let app = app();
    create_users(&app, &["alice", "bob"]).await;

    let mut body = subscribe_body("alice", "bob");
    body["note"] = json!("hi");
    let (status, body) = send(&app, post_json("/subscribe/", body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "Subscription request sent from alice to bob." })
    );
}

#[tokio::test]
async fn health_reports_online_count() {
    let app = app();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "online": 0 }));
}
