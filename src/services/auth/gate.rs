/*
 * Responsibility
 * - Compose header extraction → token verification → permission check
 * - Hand verified claims to the protected operation, or refuse with a typed AuthError
 * - Shared across requests as Arc<Authorizer>; the only shared state is the key set cache
 */
use axum::http::HeaderMap;
use std::future::Future;
use std::sync::Arc;
use tracing::instrument;

use super::bearer::extract_bearer_token;
use super::claims::Claims;
use super::config::AuthConfig;
use super::error::AuthError;
use super::jwks::{HttpKeySetSource, KeySetCache, KeySetSource};
use super::permissions::check_permission;
use super::verifier::TokenVerifier;

pub struct Authorizer {
    verifier: TokenVerifier,
}

impl std::fmt::Debug for Authorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorizer").finish_non_exhaustive()
    }
}

impl Authorizer {
    /// Gate backed by the provider's HTTPS key set endpoint.
    pub fn new(config: &AuthConfig) -> Result<Self, reqwest::Error> {
        let source = HttpKeySetSource::new(config.jwks_url().clone(), config.fetch_timeout())?;
        Ok(Self::with_source(config, Arc::new(source)))
    }

    pub fn with_source(config: &AuthConfig, source: Arc<dyn KeySetSource>) -> Self {
        let keys = Arc::new(KeySetCache::new(source, config.cache_ttl()));
        Self {
            verifier: TokenVerifier::new(keys, config),
        }
    }

    /// Run the full gate and return the verified claims.
    ///
    /// An empty `permission` admits any valid token that carries a
    /// `permissions` claim.
    #[instrument(skip_all, fields(permission = %permission))]
    pub async fn authorize(&self, headers: &HeaderMap, permission: &str) -> Result<Claims, AuthError> {
        let result = self.check(headers, permission).await;

        if let Err(err) = &result {
            tracing::warn!(
                target: "choremonsta.auth.gate",
                code = err.code(),
                status = err.status().as_u16(),
                "request refused"
            );
        }

        result
    }

    /// Invoke `operation` with verified claims, or refuse without invoking it.
    pub async fn guard<F, Fut, T>(
        &self,
        headers: &HeaderMap,
        permission: &str,
        operation: F,
    ) -> Result<T, AuthError>
    where
        F: FnOnce(Claims) -> Fut,
        Fut: Future<Output = T>,
    {
        let claims = self.authorize(headers, permission).await?;
        Ok(operation(claims).await)
    }

    async fn check(&self, headers: &HeaderMap, permission: &str) -> Result<Claims, AuthError> {
        let token = extract_bearer_token(headers)?;
        let claims = self.verifier.verify(token).await?;
        check_permission(permission, &claims)?;
        Ok(claims)
    }
}
