//! Azure Authentication
//!
//! Credentials are discovered through `DefaultAzureCredential`, which walks
//! environment variables, managed identity and the Azure CLI login cache.

use anyhow::{Context, Result};
use azure_core::auth::TokenCredential;
use azure_identity::{DefaultAzureCredential, TokenCredentialOptions};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tokio::sync::RwLock;

/// Scope for Azure Resource Manager API access
pub const ARM_SCOPE: &str = "https://management.azure.com/.default";

/// Refresh tokens this much before they actually expire
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// The credential chain could not produce a token
#[derive(Debug, Error)]
#[error("Failed to get access token")]
pub struct TokenError(#[source] azure_core::Error);

/// Anything that can hand out a bearer token for ARM requests
pub trait TokenSource: Send + Sync {
    fn token(&self) -> impl Future<Output = Result<String>> + Send;
}

/// Azure credentials holder with token caching
#[derive(Clone)]
pub struct AzureCredentials {
    credential: Arc<dyn TokenCredential + Send + Sync>,
    token_cache: Arc<RwLock<Option<CachedToken>>>,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// Token expiry minus the refresh buffer
    expires_at: SystemTime,
}

impl CachedToken {
    fn new(token: String, expires_on_unix: i64) -> Self {
        let expires_on = UNIX_EPOCH + Duration::from_secs(expires_on_unix.max(0) as u64);
        Self {
            token,
            expires_at: expires_on
                .checked_sub(TOKEN_EXPIRY_BUFFER)
                .unwrap_or(UNIX_EPOCH),
        }
    }

    fn is_valid(&self) -> bool {
        SystemTime::now() < self.expires_at
    }
}

impl AzureCredentials {
    /// Create credentials from the ambient environment
    pub fn new() -> Result<Self> {
        let credential = DefaultAzureCredential::create(TokenCredentialOptions::default())
            .context("Failed to initialize Azure credentials")?;

        Ok(Self {
            credential: Arc::new(credential),
            token_cache: Arc::new(RwLock::new(None)),
        })
    }

    /// Get an access token, reusing the cached one while it is still valid
    pub async fn get_token(&self) -> Result<String> {
        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.token.clone());
                }
                tracing::debug!("Cached token expired, fetching new token");
            }
        }

        let access = self
            .credential
            .get_token(&[ARM_SCOPE])
            .await
            .map_err(TokenError)?;
        let token = access.token.secret().to_string();
        let expires_on = access.expires_on.unix_timestamp();

        {
            let mut cache = self.token_cache.write().await;
            *cache = Some(CachedToken::new(token.clone(), expires_on));
        }

        tracing::debug!("New token cached, expires at unix time {}", expires_on);

        Ok(token)
    }
}

impl TokenSource for AzureCredentials {
    async fn token(&self) -> Result<String> {
        self.get_token().await
    }
}

/// Fixed bearer token, for pre-fetched tokens and mocked endpoints
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenSource for StaticToken {
    async fn token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
