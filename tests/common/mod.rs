//! Shared fixtures: RSA signing keys, a mocked JWKS endpoint and token minting.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use sqlx::PgPool;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use choremonsta::app::build_router;
use choremonsta::config::{AppEnv, Config};
use choremonsta::services::auth::{AuthConfig, Authorizer};
use choremonsta::state::AppState;

pub const PRIMARY_PEM: &str = include_str!("../fixtures/primary.pem");
pub const PRIMARY_N: &str = include_str!("../fixtures/primary.n");
pub const ROGUE_PEM: &str = include_str!("../fixtures/rogue.pem");

pub const DOMAIN: &str = "tenant.example.com";
pub const AUDIENCE: &str = "choremonsta";
pub const JWKS_PATH: &str = "/.well-known/jwks.json";

pub const ALL_PERMISSIONS: &[&str] = &[
    "list_all_tasks",
    "add_task",
    "delete_task",
    "list_all_people",
    "add_person",
    "delete_person",
    "assign_task",
    "update_task_status",
    "list_user_tasks",
];

pub fn jwk(kid: &str) -> Value {
    json!({
        "kid": kid,
        "kty": "RSA",
        "use": "sig",
        "alg": "RS256",
        "n": PRIMARY_N.trim(),
        "e": "AQAB"
    })
}

pub fn jwks(kids: &[&str]) -> Value {
    json!({ "keys": kids.iter().map(|kid| jwk(kid)).collect::<Vec<_>>() })
}

/// JWKS endpoint serving the primary key under `kids`, expected `times` fetches.
pub async fn jwks_server(kids: &[&str], times: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(jwks(kids)))
        .expect(times)
        .mount(&server)
        .await;
    server
}

pub fn auth_config(server: &MockServer) -> AuthConfig {
    let url = Url::parse(&format!("{}{}", server.uri(), JWKS_PATH)).unwrap();
    AuthConfig::new(DOMAIN, AUDIENCE).unwrap().with_jwks_url(url)
}

pub fn payload(permissions: &[&str]) -> Value {
    let now = Utc::now().timestamp();
    json!({
        "iss": format!("https://{DOMAIN}/"),
        "sub": "auth0|parent",
        "aud": AUDIENCE,
        "iat": now - 60,
        "exp": now + 3600,
        "permissions": permissions
    })
}

pub fn sign_with(pem: &str, kid: &str, payload: &Value) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());
    let key = EncodingKey::from_rsa_pem(pem.as_bytes()).unwrap();
    jsonwebtoken::encode(&header, payload, &key).unwrap()
}

pub fn token(kid: &str, permissions: &[&str]) -> String {
    sign_with(PRIMARY_PEM, kid, &payload(permissions))
}

/// The full application router over `db`, trusting keys served by `server`.
pub fn app(server: &MockServer, db: PgPool) -> Router {
    let auth = auth_config(server);
    let config = Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        database_url: String::new(),
        app_env: AppEnv::Development,
        cors_allowed_origins: Vec::new(),
        auth: auth.clone(),
    };
    let state = AppState::new(db, Arc::new(Authorizer::new(&auth).unwrap()));
    build_router(state, &config)
}
