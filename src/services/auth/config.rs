/*
 * Responsibility
 * - Identity-provider settings the gate is constructed with
 * - Derives issuer and JWKS URL from the provider domain
 * - Built once at startup (see crate::config) and injected; never read from env at call time
 */
use std::time::Duration;

use jsonwebtoken::Algorithm;
use url::Url;

const JWKS_PATH: &str = ".well-known/jwks.json";
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct AuthConfig {
    domain: String,
    audience: String,
    algorithms: Vec<Algorithm>,
    jwks_url: Url,
    cache_ttl: Duration,
    fetch_timeout: Duration,
}

impl AuthConfig {
    /// `domain` is the bare provider host, e.g. `tenant.us.auth0.com`.
    pub fn new(domain: impl Into<String>, audience: impl Into<String>) -> Result<Self, url::ParseError> {
        let domain = domain.into();
        let jwks_url = Url::parse(&format!("https://{domain}/"))?.join(JWKS_PATH)?;

        Ok(Self {
            domain,
            audience: audience.into(),
            algorithms: vec![Algorithm::RS256],
            jwks_url,
            cache_ttl: DEFAULT_CACHE_TTL,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        })
    }

    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = algorithms;
        self
    }

    /// Fetch keys from somewhere other than `https://<domain>/.well-known/jwks.json`.
    /// The expected issuer still follows the domain.
    pub fn with_jwks_url(mut self, jwks_url: Url) -> Self {
        self.jwks_url = jwks_url;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    pub fn algorithms(&self) -> &[Algorithm] {
        &self.algorithms
    }

    pub fn jwks_url(&self) -> &Url {
        &self.jwks_url
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_issuer_and_jwks_url_from_domain() {
        let config = AuthConfig::new("tenant.us.auth0.com", "choremonsta").unwrap();

        assert_eq!(config.issuer(), "https://tenant.us.auth0.com/");
        assert_eq!(
            config.jwks_url().as_str(),
            "https://tenant.us.auth0.com/.well-known/jwks.json"
        );
        assert_eq!(config.algorithms(), &[Algorithm::RS256]);
    }

    #[test]
    fn jwks_override_keeps_issuer() {
        let config = AuthConfig::new("tenant.us.auth0.com", "choremonsta")
            .unwrap()
            .with_jwks_url(Url::parse("http://127.0.0.1:9999/.well-known/jwks.json").unwrap());

        assert_eq!(config.issuer(), "https://tenant.us.auth0.com/");
        assert_eq!(config.jwks_url().port(), Some(9999));
    }

    #[test]
    fn rejects_unparseable_domain() {
        assert!(AuthConfig::new("bad domain", "choremonsta").is_err());
    }
}
