//! `Authorization: Bearer <token>` header parsing.
//!
//! The header shape (exactly two whitespace-separated parts) is checked before
//! the scheme, so `"Bearer"` alone is malformed rather than an unknown scheme.

use axum::http::{HeaderMap, header};

use super::error::AuthError;

const BEARER: &str = "bearer";

/// Pull the raw bearer token out of the request headers.
///
/// The token is returned unmodified; no decoding happens here.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?;

    let value = value.to_str().map_err(|_| AuthError::MalformedHeader)?;

    let mut parts = value.split_whitespace();
    let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AuthError::MalformedHeader);
    };

    if !scheme.eq_ignore_ascii_case(BEARER) {
        return Err(AuthError::UnsupportedScheme);
    }

    Ok(token)
}
