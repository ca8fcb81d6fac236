//! Factory: build the `Authorizer` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::Authorizer;

pub fn build_authorizer(config: &Config) -> Result<Arc<Authorizer>, reqwest::Error> {
    tracing::info!(
        jwks_url = %config.auth.jwks_url(),
        audience = %config.auth.audience(),
        "building authorizer"
    );
    Ok(Arc::new(Authorizer::new(&config.auth)?))
}
