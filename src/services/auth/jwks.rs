//! Signing key set retrieval and caching.
//!
//! Keys are fetched from the identity provider's `/.well-known/jwks.json` and
//! held in a TTL cache. A token naming a key id the cache does not know
//! triggers one re-fetch (key rotation) before the key is reported unknown.
//! Refreshes are single-flight: concurrent misses share one fetch.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::instrument;
use url::Url;

use super::error::AuthError;

/// One entry of the provider's key set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Jwk {
    #[serde(default)]
    pub kid: Option<String>,

    /// Key type, "RSA" for the keys this service can use.
    pub kty: String,

    #[serde(default, rename = "use")]
    pub key_use: Option<String>,

    #[serde(default)]
    pub alg: Option<String>,

    /// RSA modulus (base64url).
    #[serde(default)]
    pub n: Option<String>,

    /// RSA exponent (base64url).
    #[serde(default)]
    pub e: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwksDocument {
    pub keys: Vec<Jwk>,
}

/// Key id → key. Replaced wholesale on refresh, never mutated.
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    keys: HashMap<String, Jwk>,
}

impl KeySet {
    pub fn get(&self, kid: &str) -> Option<&Jwk> {
        self.keys.get(kid)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl From<JwksDocument> for KeySet {
    fn from(doc: JwksDocument) -> Self {
        // Keys without an id can never be selected by a token header.
        let keys = doc
            .keys
            .into_iter()
            .filter_map(|key| key.kid.clone().map(|kid| (kid, key)))
            .collect();
        Self { keys }
    }
}

/// Where the key set comes from.
#[async_trait]
pub trait KeySetSource: Send + Sync + 'static {
    async fn fetch(&self) -> Result<KeySet, AuthError>;
}

/// Fetches the key set over HTTP(S).
pub struct HttpKeySetSource {
    url: Url,
    http_client: reqwest::Client,
}

impl HttpKeySetSource {
    /// Fails when the client cannot be built with `timeout`.
    pub fn new(url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { url, http_client })
    }
}

#[async_trait]
impl KeySetSource for HttpKeySetSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<KeySet, AuthError> {
        let response = self
            .http_client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(target: "choremonsta.auth.jwks", error = %e, "failed to fetch key set");
                AuthError::KeySetUnavailable
            })?;

        if !response.status().is_success() {
            tracing::error!(
                target: "choremonsta.auth.jwks",
                status = %response.status(),
                "key set endpoint returned error"
            );
            return Err(AuthError::KeySetUnavailable);
        }

        let doc: JwksDocument = response.json().await.map_err(|e| {
            tracing::error!(target: "choremonsta.auth.jwks", error = %e, "failed to parse key set");
            AuthError::KeySetUnavailable
        })?;

        Ok(KeySet::from(doc))
    }
}

struct CachedKeySet {
    keys: Arc<KeySet>,
    generation: u64,
    /// `None` when the TTL is too large to represent: never expires.
    expires_at: Option<Instant>,
}

impl CachedKeySet {
    fn is_fresh(&self) -> bool {
        self.expires_at.is_none_or(|at| at > Instant::now())
    }
}

/// Read-through key set cache with refresh-on-miss.
pub struct KeySetCache {
    source: Arc<dyn KeySetSource>,
    ttl: Duration,
    cache: RwLock<Option<CachedKeySet>>,
    refresh_lock: Mutex<()>,
}

impl KeySetCache {
    pub fn new(source: Arc<dyn KeySetSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            cache: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Resolve a key by id.
    ///
    /// # Errors
    ///
    /// - `KeySetUnavailable` if a needed fetch fails
    /// - `UnknownSigningKey` if the id is absent after one refresh
    #[instrument(skip(self), fields(kid = %kid))]
    pub async fn get_key(&self, kid: &str) -> Result<Jwk, AuthError> {
        let seen = {
            let cache = self.cache.read().await;
            match cache.as_ref() {
                Some(cached) if cached.is_fresh() => {
                    if let Some(key) = cached.keys.get(kid) {
                        tracing::debug!(target: "choremonsta.auth.jwks", "key set cache hit");
                        return Ok(key.clone());
                    }
                    tracing::debug!(target: "choremonsta.auth.jwks", "kid not in cached key set, refreshing");
                    Some(cached.generation)
                }
                Some(cached) => Some(cached.generation),
                None => None,
            }
        };

        let keys = self.refresh_after(seen).await?;

        keys.get(kid).cloned().ok_or_else(|| {
            tracing::warn!(target: "choremonsta.auth.jwks", kid = %kid, "kid not found after key set refresh");
            AuthError::UnknownSigningKey
        })
    }

    /// Drop the cached key set so the next lookup fetches.
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }

    /// Replace the cache unless another task already did so after `seen`.
    async fn refresh_after(&self, seen: Option<u64>) -> Result<Arc<KeySet>, AuthError> {
        let _flight = self.refresh_lock.lock().await;

        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref()
                && Some(cached.generation) != seen
                && cached.is_fresh()
            {
                return Ok(Arc::clone(&cached.keys));
            }
        }

        let keys = Arc::new(self.source.fetch().await?);

        let mut cache = self.cache.write().await;
        let generation = cache.as_ref().map_or(1, |c| c.generation + 1);
        *cache = Some(CachedKeySet {
            keys: Arc::clone(&keys),
            generation,
            expires_at: Instant::now().checked_add(self.ttl),
        });

        tracing::info!(
            target: "choremonsta.auth.jwks",
            key_count = keys.len(),
            generation,
            "key set refreshed"
        );

        Ok(keys)
    }
}
