//! Azure Resource Manager interaction module
//!
//! # Module Structure
//!
//! - [`auth`] - Token sources, including ambient `DefaultAzureCredential` discovery
//! - [`client`] - ARM client combining a token source with the HTTP wrapper
//! - [`http`] - HTTP utilities for REST calls and error formatting
//! - [`providers`] - Resource provider listing and resource type enumeration
//!
//! # Example
//!
//! ```ignore
//! use azure_primary_types::azure::{auth::AzureCredentials, client::ArmClient, providers};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = ArmClient::new(AzureCredentials::new()?, "my-subscription")?;
//!     let types = providers::enumerate_resource_types(&client).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
pub mod providers;
