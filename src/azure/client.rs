//! Azure Resource Manager client
//!
//! Combines a token source with the HTTP wrapper and knows how to build
//! subscription-scoped ARM URLs.

use super::auth::TokenSource;
use super::http::ArmHttpClient;
use anyhow::{Context, Result};
use serde_json::Value;
use url::Url;

/// Public-cloud Resource Manager endpoint
pub const DEFAULT_ARM_ENDPOINT: &str = "https://management.azure.com";

/// API version used for provider listing
pub const PROVIDERS_API_VERSION: &str = "2021-04-01";

/// Main ARM client
#[derive(Clone)]
pub struct ArmClient<C> {
    pub credentials: C,
    pub http: ArmHttpClient,
    pub subscription_id: String,
    endpoint: String,
}

impl<C: TokenSource> ArmClient<C> {
    pub fn new(credentials: C, subscription_id: &str) -> Result<Self> {
        Self::with_endpoint(credentials, subscription_id, DEFAULT_ARM_ENDPOINT)
    }

    /// Create a client against a non-default endpoint (sovereign clouds, mocks)
    pub fn with_endpoint(credentials: C, subscription_id: &str, endpoint: &str) -> Result<Self> {
        Ok(Self {
            credentials,
            http: ArmHttpClient::new()?,
            subscription_id: subscription_id.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Make an authenticated GET request
    pub async fn get(&self, url: &str) -> Result<Value> {
        let token = self.credentials.token().await?;
        self.http.get(url, &token).await
    }

    /// Build a subscription-scoped ARM URL with the given api-version
    pub fn subscription_url(&self, path: &str, api_version: &str) -> Result<Url> {
        let base = format!(
            "{}/subscriptions/{}/{}",
            self.endpoint,
            self.subscription_id,
            path.trim_start_matches('/')
        );
        Url::parse_with_params(&base, &[("api-version", api_version)])
            .with_context(|| format!("Invalid ARM URL: {}", base))
    }

    /// URL of the first page of the provider listing
    pub fn providers_url(&self) -> Result<Url> {
        self.subscription_url("providers", PROVIDERS_API_VERSION)
    }
}
