//! HTTP-level behaviour of the gate: status codes, error bodies and the
//! bearer challenge, exercised through the real router.
//!
//! Refused or undecodable requests never reach the database, so the pool is
//! connected lazily and no database is needed.

mod common;

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::get,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use wiremock::MockServer;

use choremonsta::api::v1::extractors::authorized::{Authorized, ListAllTasks};
use choremonsta::services::auth::Authorizer;
use common::*;

/// Router over a pool that never connects.
fn offline_app(server: &MockServer) -> Router {
    let db = PgPoolOptions::new()
        .connect_lazy("postgres://choremonsta@localhost/choremonsta")
        .unwrap();
    common::app(server, db)
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    auth: Option<&str>,
) -> (StatusCode, Value, Option<String>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = auth {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();

    let status = response.status();
    let challenge = response
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body, challenge)
}

#[tokio::test]
async fn health_is_open_and_hardened() {
    let server = jwks_server(&["k1"], 0).await;

    let response = offline_app(&server)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers().get("x-content-type-options").unwrap(), "nosniff");
}

#[tokio::test]
async fn missing_header_is_401_with_challenge() {
    let server = jwks_server(&["k1"], 0).await;

    let (status, body, challenge) = send(offline_app(&server), "GET", "/api/v1/tasks", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "authorization_header_missing");
    assert_eq!(challenge.as_deref(), Some(r#"Bearer realm="choremonsta""#));
}

#[tokio::test]
async fn wrong_scheme_is_401() {
    let server = jwks_server(&["k1"], 0).await;

    let (status, body, challenge) =
        send(offline_app(&server), "GET", "/api/v1/people", Some("Token abc")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "unsupported_auth_scheme");
    assert_eq!(
        challenge.as_deref(),
        Some(r#"Bearer realm="choremonsta", error="invalid_token""#)
    );
}

#[tokio::test]
async fn missing_permission_is_403_without_challenge() {
    let server = jwks_server(&["k1"], 1).await;
    let auth = format!("Bearer {}", token("k1", &["list_all_tasks"]));

    let (status, body, challenge) =
        send(offline_app(&server), "DELETE", "/api/v1/tasks/7/delete", Some(&auth)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "forbidden");
    assert_eq!(challenge, None);
}

#[tokio::test]
async fn permissions_claim_absent_is_400() {
    let server = jwks_server(&["k1"], 1).await;
    let mut claims = payload(&[]);
    claims.as_object_mut().unwrap().remove("permissions");
    let auth = format!("Bearer {}", sign_with(PRIMARY_PEM, "k1", &claims));

    let (status, body, _) = send(offline_app(&server), "GET", "/api/v1/people/3/tasks", Some(&auth)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "permissions_missing");
}

#[tokio::test]
async fn admitted_handler_sees_verified_claims() {
    let server = jwks_server(&["k1"], 1).await;
    let authorizer = Arc::new(Authorizer::new(&auth_config(&server)).unwrap());

    async fn whoami(auth: Authorized<ListAllTasks>) -> Json<Value> {
        Json(json!({ "sub": auth.claims.sub() }))
    }
    let app = Router::new()
        .route("/whoami", get(whoami))
        .with_state(authorizer);
    let auth = format!("Bearer {}", token("k1", &["list_all_tasks"]));

    let (status, body, _) = send(app, "GET", "/whoami", Some(&auth)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sub"], "auth0|parent");
}

#[tokio::test]
async fn undecodable_body_is_400_in_error_shape() {
    let server = jwks_server(&["k1"], 1).await;
    let auth = format!("Bearer {}", token("k1", &["add_task"]));

    let request = Request::post("/api/v1/tasks")
        .header(header::AUTHORIZATION, auth)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"descr": "dishes"}"#))
        .unwrap();
    let response = offline_app(&server).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn gate_runs_before_body_is_read() {
    let server = jwks_server(&["k1"], 0).await;

    let request = Request::post("/api/v1/tasks")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let response = offline_app(&server).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
