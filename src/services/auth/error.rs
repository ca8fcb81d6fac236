/*
 * Responsibility
 * - Closed set of reasons the authorization gate can refuse a request
 * - Each reason carries a fixed machine-readable code, description and HTTP status
 * - HTTP conversion itself lives in crate::error (AppError)
 */
use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("authorization header is expected")]
    MissingHeader,
    #[error("authorization header must be of the form 'Bearer <token>'")]
    MalformedHeader,
    #[error("authorization header must use the Bearer scheme")]
    UnsupportedScheme,
    #[error("unable to parse authentication token")]
    InvalidHeader,
    #[error("unable to find the appropriate signing key")]
    UnknownSigningKey,
    #[error("token signature is invalid")]
    BadSignature,
    #[error("token is expired")]
    TokenExpired,
    #[error("incorrect claims, please check the audience and issuer")]
    InvalidClaims,
    #[error("permissions not included in token")]
    PermissionsClaimMissing,
    #[error("permission not granted")]
    PermissionDenied,
    #[error("signing key set is unavailable")]
    KeySetUnavailable,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingHeader => "authorization_header_missing",
            Self::MalformedHeader => "authorization_header_malformed",
            Self::UnsupportedScheme => "unsupported_auth_scheme",
            Self::InvalidHeader => "invalid_header",
            Self::UnknownSigningKey => "unknown_signing_key",
            Self::BadSignature => "invalid_signature",
            Self::TokenExpired => "token_expired",
            Self::InvalidClaims => "invalid_claims",
            Self::PermissionsClaimMissing => "permissions_missing",
            Self::PermissionDenied => "forbidden",
            Self::KeySetUnavailable => "key_set_unavailable",
        }
    }

    pub fn description(&self) -> String {
        self.to_string()
    }

    /// Default HTTP status for this failure.
    ///
    /// - claim-shape problems: 400
    /// - authentication failures: 401
    /// - missing capability: 403
    /// - identity provider unreachable: 503
    pub fn status(&self) -> StatusCode {
        match self {
            Self::PermissionsClaimMissing => StatusCode::BAD_REQUEST,
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::KeySetUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::MissingHeader
            | Self::MalformedHeader
            | Self::UnsupportedScheme
            | Self::InvalidHeader
            | Self::UnknownSigningKey
            | Self::BadSignature
            | Self::TokenExpired
            | Self::InvalidClaims => StatusCode::UNAUTHORIZED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [AuthError; 11] = [
        AuthError::MissingHeader,
        AuthError::MalformedHeader,
        AuthError::UnsupportedScheme,
        AuthError::InvalidHeader,
        AuthError::UnknownSigningKey,
        AuthError::BadSignature,
        AuthError::TokenExpired,
        AuthError::InvalidClaims,
        AuthError::PermissionsClaimMissing,
        AuthError::PermissionDenied,
        AuthError::KeySetUnavailable,
    ];

    #[test]
    fn codes_are_distinct() {
        let mut codes: Vec<_> = ALL.iter().map(AuthError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ALL.len());
    }

    #[test]
    fn claim_shape_problems_are_client_errors() {
        assert_eq!(
            AuthError::PermissionsClaimMissing.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn permission_denied_is_forbidden() {
        assert_eq!(AuthError::PermissionDenied.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn authentication_failures_are_unauthorized() {
        for err in [
            AuthError::MissingHeader,
            AuthError::MalformedHeader,
            AuthError::UnsupportedScheme,
            AuthError::InvalidHeader,
            AuthError::UnknownSigningKey,
            AuthError::BadSignature,
            AuthError::TokenExpired,
            AuthError::InvalidClaims,
        ] {
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED, "{err:?}");
        }
    }

    #[test]
    fn key_set_unavailable_is_server_side() {
        assert!(AuthError::KeySetUnavailable.status().is_server_error());
    }
}
