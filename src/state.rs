/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - db: PgPool, auth: Arc<Authorizer>
 * - Cheap to Clone (Arc/pool handles inside)
 */
use std::sync::Arc;

use axum::extract::FromRef;

use crate::services::auth::Authorizer;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub auth: Arc<Authorizer>,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, auth: Arc<Authorizer>) -> Self {
        Self { db, auth }
    }
}

// Lets the Authorized<P> extractor pull the gate out of AppState.
impl FromRef<AppState> for Arc<Authorizer> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.auth)
    }
}
