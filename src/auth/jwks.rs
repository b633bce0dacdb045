use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::auth::jwt::Claims;

const JWKS_URL_TEMPLATE: &str = "https://{}.supabase.co/auth/v1/.well-known/jwks.json";

/// One key from the JWKS document. Supabase signs with EC keys (ES256 by
/// default), so only the EC components are modeled.
#[derive(Debug, Clone, Deserialize)]
struct Jwk {
    kid: String,
    x: String,
    y: String,
    alg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

impl Jwk {
    fn algorithm(&self) -> Algorithm {
        match self.alg.as_deref() {
            Some("ES384") => Algorithm::ES384,
            _ => Algorithm::ES256,
        }
    }
}

/// Fetches the project's JWKS document on demand and caches keys by `kid`,
/// so token validation only hits the network on key rotation.
#[derive(Clone)]
pub struct JwksCache {
    cache: Arc<Cache<String, Jwk>>,
    jwks_url: String,
    client: reqwest::Client,
    anon_key: String,
}

impl JwksCache {
    pub fn new(project_ref: &str, anon_key: &str) -> Self {
        let cache = Arc::new(
            Cache::builder()
                .time_to_live(std::time::Duration::from_secs(3600))
                .max_capacity(10)
                .build(),
        );

        Self {
            cache,
            jwks_url: JWKS_URL_TEMPLATE.replace("{}", project_ref),
            client: reqwest::Client::new(),
            anon_key: anon_key.to_string(),
        }
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, String> {
        debug!("Fetching JWKS from {}", self.jwks_url);

        let response = self
            .client
            .get(&self.jwks_url)
            .header("apikey", &self.anon_key)
            .send()
            .await
            .map_err(|e| format!("Failed to fetch JWKS: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Failed to fetch JWKS: HTTP {status}"));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| format!("Failed to parse JWKS JSON: {e}"))
    }

    async fn get_key(&self, kid: &str) -> Result<Jwk, String> {
        if let Some(cached) = self.cache.get(kid).await {
            return Ok(cached);
        }

        let jwks = self.fetch_jwks().await?;
        let key = jwks
            .keys
            .into_iter()
            .find(|k| k.kid == kid)
            .ok_or(format!("Key with kid={kid} not found in JWKS"))?;

        self.cache.insert(kid.to_string(), key.clone()).await;
        Ok(key)
    }

    /// Validate a bearer token against the project's signing keys and
    /// return the decoded claims.
    pub async fn validate_token(&self, token: &str) -> Result<Claims, String> {
        let header = decode_header(token).map_err(|e| format!("Failed to decode header: {e}"))?;
        let kid = header.kid.ok_or("No 'kid' in token header")?;

        let key = self.get_key(&kid).await?;

        let decoding_key = DecodingKey::from_ec_components(&key.x, &key.y)
            .map_err(|e| format!("Failed to create decoding key: {e}"))?;

        let mut validation = Validation::new(key.algorithm());
        validation.validate_aud = false;

        decode::<Claims>(token, &decoding_key, &validation)
            .map(|td| td.claims)
            .map_err(|e| format!("Token validation failed: {e}"))
    }
}
