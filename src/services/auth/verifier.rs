//! Access token verification against the provider's key set.
//!
//! Steps, each with its own failure:
//! 1. read `kid`/`alg` from the unverified header (`InvalidHeader`)
//! 2. resolve the key by `kid` (`UnknownSigningKey`)
//! 3. verify the signature (`BadSignature`)
//! 4. check `exp` (`TokenExpired`)
//! 5. check `aud` and `iss` (`InvalidClaims`)

use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;

use super::claims::Claims;
use super::config::AuthConfig;
use super::error::AuthError;
use super::jwks::{Jwk, KeySetCache};

pub struct TokenVerifier {
    keys: Arc<KeySetCache>,
    audience: String,
    issuer: String,
    algorithms: Vec<Algorithm>,
}

impl TokenVerifier {
    pub fn new(keys: Arc<KeySetCache>, config: &AuthConfig) -> Self {
        Self {
            keys,
            audience: config.audience().to_string(),
            issuer: config.issuer(),
            algorithms: config.algorithms().to_vec(),
        }
    }

    #[instrument(skip_all)]
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, chrono::Utc::now().timestamp()).await
    }

    /// Verify as of `now` (Unix seconds).
    pub(crate) async fn verify_at(&self, token: &str, now: i64) -> Result<Claims, AuthError> {
        let header = jsonwebtoken::decode_header(token).map_err(|e| {
            tracing::debug!(target: "choremonsta.auth.verifier", error = %e, "unparseable token header");
            AuthError::InvalidHeader
        })?;

        let kid = header
            .kid
            .filter(|kid| !kid.is_empty())
            .ok_or(AuthError::InvalidHeader)?;

        if !self.algorithms.contains(&header.alg) {
            tracing::debug!(target: "choremonsta.auth.verifier", alg = ?header.alg, "token algorithm not accepted");
            return Err(AuthError::InvalidHeader);
        }

        let jwk = self.keys.get_key(&kid).await?;
        let claims = verify_signature(token, &jwk, header.alg)?;
        validate_claims(&claims, now, &self.audience, &self.issuer)?;

        Ok(claims)
    }
}

/// Verify only the signature; registered claims are checked separately so
/// each failure keeps its own reason.
fn verify_signature(token: &str, jwk: &Jwk, alg: Algorithm) -> Result<Claims, AuthError> {
    let (Some(n), Some(e)) = (jwk.n.as_deref(), jwk.e.as_deref()) else {
        tracing::warn!(target: "choremonsta.auth.verifier", kid = ?jwk.kid, "jwk has no rsa components");
        return Err(AuthError::InvalidHeader);
    };
    if jwk.kty != "RSA" {
        tracing::warn!(target: "choremonsta.auth.verifier", kty = %jwk.kty, "unexpected jwk key type");
        return Err(AuthError::InvalidHeader);
    }

    let key = DecodingKey::from_rsa_components(n, e).map_err(|e| {
        tracing::warn!(target: "choremonsta.auth.verifier", error = %e, "invalid rsa key components");
        AuthError::InvalidHeader
    })?;

    let mut validation = Validation::new(alg);
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();

    let data = jsonwebtoken::decode::<Map<String, Value>>(token, &key, &validation).map_err(|e| {
        match e.kind() {
            ErrorKind::InvalidSignature => AuthError::BadSignature,
            _ => {
                tracing::debug!(target: "choremonsta.auth.verifier", error = %e, "token decode failed");
                AuthError::InvalidHeader
            }
        }
    })?;

    Ok(Claims::new(data.claims))
}

fn validate_claims(claims: &Claims, now: i64, audience: &str, issuer: &str) -> Result<(), AuthError> {
    let exp = claims.exp().ok_or(AuthError::InvalidClaims)?;
    if now >= exp {
        return Err(AuthError::TokenExpired);
    }

    if !claims.has_audience(audience) || claims.iss() != Some(issuer) {
        return Err(AuthError::InvalidClaims);
    }

    Ok(())
}
