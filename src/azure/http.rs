//! HTTP utilities for Azure Resource Manager REST calls

use super::auth::TokenError;
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Truncate a response body and strip control characters before logging it
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Non-success HTTP status returned by ARM
#[derive(Debug, Error)]
#[error("API request failed: {status}")]
pub struct ApiError {
    pub status: StatusCode,
}

/// HTTP client wrapper for ARM calls
#[derive(Clone)]
pub struct ArmHttpClient {
    client: Client,
}

impl ArmHttpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("azure-primary-types/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Make a GET request and parse the JSON body
    pub async fn get(&self, url: &str, token: &str) -> Result<Value> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            // Only the sanitized body is logged
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(ApiError { status }.into());
        }

        serde_json::from_str(&body).context("Failed to parse response JSON")
    }
}

/// Pick a user-facing hint from the typed errors in the chain
fn hint_for(error: &anyhow::Error) -> Option<&'static str> {
    for cause in error.chain() {
        if let Some(api) = cause.downcast_ref::<ApiError>() {
            return match api.status {
                StatusCode::UNAUTHORIZED => Some(
                    "Authentication failed. Run 'az login' or configure service principal credentials.",
                ),
                StatusCode::FORBIDDEN => {
                    Some("Permission denied. Check the role assignments for this subscription.")
                }
                StatusCode::NOT_FOUND => Some("Subscription or endpoint not found."),
                StatusCode::TOO_MANY_REQUESTS => {
                    Some("Rate limit exceeded. Please try again later.")
                }
                s if s.is_server_error() => {
                    Some("Azure Resource Manager temporarily unavailable. Please try again.")
                }
                _ => None,
            };
        }
        if cause.downcast_ref::<TokenError>().is_some() {
            return Some(
                "Could not acquire an access token. Run 'az login' or configure service principal credentials.",
            );
        }
        if let Some(req) = cause.downcast_ref::<reqwest::Error>() {
            if req.is_connect() || req.is_timeout() {
                return Some("Request failed. Check your network connection and try again.");
            }
        }
    }
    None
}

/// Format an ARM error for display: a hint when the failure is recognised,
/// followed by the full cause chain
pub fn format_azure_error(error: &anyhow::Error) -> String {
    match hint_for(error) {
        Some(hint) => format!("{hint} ({error:#})"),
        None => format!("{error:#}"),
    }
}
