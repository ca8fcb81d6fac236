use super::{claims::Claims, error::AuthError};

/// Confirm `claims` grant the `required` capability.
///
/// The `permissions` claim must be present even when `required` is empty.
pub fn check_permission(required: &str, claims: &Claims) -> Result<(), AuthError> {
    let mut granted = claims
        .permissions()
        .ok_or(AuthError::PermissionsClaimMissing)?;

    if required.is_empty() || granted.any(|p| p == required) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied)
    }
}
