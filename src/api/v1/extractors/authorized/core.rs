/*
 * Responsibility
 *  - Run the authorization gate for a handler and hand it the verified claims
 *  - The required capability comes from the type parameter, so every protected
 *    route states its permission in its signature
 *  - Refusals become AppError::Auth (status/code from AuthError)
 * Keep out
 *  - Concrete permission names (see types.rs)
 *  - Token parsing / verification (services::auth)
 */
use std::marker::PhantomData;
use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::error::AppError;
use crate::services::auth::{Authorizer, Claims};

/// A capability string a route requires. `""` means any valid token.
pub trait Permission: Send + Sync + 'static {
    const NAME: &'static str;
}

/// Verified claims for a request that holds permission `P`.
///
/// A handler taking this extractor is only invoked after the gate has
/// accepted the request.
pub struct Authorized<P> {
    pub claims: Claims,
    _marker: PhantomData<P>,
}

impl<P> Authorized<P> {
    fn new(claims: Claims) -> Self {
        Self {
            claims,
            _marker: PhantomData,
        }
    }
}

impl<S, P> FromRequestParts<S> for Authorized<P>
where
    Arc<Authorizer>: FromRef<S>,
    S: Send + Sync,
    P: Permission,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let authorizer = Arc::<Authorizer>::from_ref(state);
        let claims = authorizer.authorize(&parts.headers, P::NAME).await?;
        Ok(Self::new(claims))
    }
}

impl<P: Permission> std::fmt::Debug for Authorized<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorized")
            .field("permission", &P::NAME)
            .field("claims", &self.claims)
            .finish()
    }
}
