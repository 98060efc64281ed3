//! Azure resource providers
//!
//! Lists registered resource providers and flattens them into
//! `"<Namespace>/<resourceType>"` names.

use super::auth::TokenSource;
use super::client::ArmClient;
use anyhow::Result;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde_json::Value;
use std::collections::HashSet;

/// A resource provider and the resource types it declares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRecord {
    pub namespace: String,
    pub resource_types: Vec<String>,
}

impl ProviderRecord {
    pub fn new(namespace: &str, resource_types: &[&str]) -> Self {
        Self {
            namespace: namespace.to_string(),
            resource_types: resource_types.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parse a provider object from an ARM listing.
    /// Returns `None` when the provider has no namespace.
    pub fn from_json(value: &Value) -> Option<Self> {
        let namespace = value.get("namespace").and_then(|v| v.as_str())?;

        let resource_types = value
            .get("resourceTypes")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|rt| rt.get("resourceType").and_then(|v| v.as_str()))
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            namespace: namespace.to_string(),
            resource_types,
        })
    }

    /// Full `"<namespace>/<type>"` names for every declared type
    pub fn qualified_types(&self) -> impl Iterator<Item = String> + '_ {
        self.resource_types
            .iter()
            .map(move |rt| format!("{}/{}", self.namespace, rt))
    }
}

/// One page of a provider listing
#[derive(Debug, Default)]
pub struct ProviderPage {
    pub providers: Vec<ProviderRecord>,
    pub next_link: Option<String>,
}

impl From<&Value> for ProviderPage {
    fn from(value: &Value) -> Self {
        let providers = value
            .get("value")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|p| {
                        let record = ProviderRecord::from_json(p);
                        if record.is_none() {
                            tracing::debug!("Skipping provider without namespace");
                        }
                        record
                    })
                    .collect()
            })
            .unwrap_or_default();

        let next_link = value
            .get("nextLink")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(String::from);

        Self {
            providers,
            next_link,
        }
    }
}

/// Source of provider records
pub trait ProviderSource {
    fn providers(&self) -> BoxStream<'_, Result<ProviderRecord>>;
}

impl<C: TokenSource> ArmClient<C> {
    /// Fetch one page of the provider listing
    pub async fn fetch_provider_page(&self, url: &str) -> Result<ProviderPage> {
        let response = self.get(url).await?;
        Ok(ProviderPage::from(&response))
    }
}

impl<C: TokenSource> ProviderSource for ArmClient<C> {
    /// Lazily walks `nextLink` pages; a page is only requested once the
    /// previous one has been consumed.
    fn providers(&self) -> BoxStream<'_, Result<ProviderRecord>> {
        let first = match self.providers_url() {
            Ok(url) => url.to_string(),
            Err(e) => return stream::once(async move { Err(e) }).boxed(),
        };

        stream::try_unfold(Some(first), move |next| async move {
            let Some(url) = next else {
                return Ok::<_, anyhow::Error>(None);
            };
            let page = self.fetch_provider_page(&url).await?;
            tracing::debug!(
                "Fetched {} providers (more pages: {})",
                page.providers.len(),
                page.next_link.is_some()
            );
            Ok(Some((page.providers, page.next_link)))
        })
        .map_ok(|providers| stream::iter(providers.into_iter().map(Ok)))
        .try_flatten()
        .boxed()
    }
}

/// In-memory provider list
impl ProviderSource for Vec<ProviderRecord> {
    fn providers(&self) -> BoxStream<'_, Result<ProviderRecord>> {
        stream::iter(self.iter().cloned().map(Ok)).boxed()
    }
}

/// Collect every `"<namespace>/<type>"` name exposed by the source.
/// The first error aborts enumeration.
pub async fn enumerate_resource_types<S: ProviderSource + ?Sized>(
    source: &S,
) -> Result<HashSet<String>> {
    let mut resource_types = HashSet::new();
    let mut providers = source.providers();

    while let Some(provider) = providers.try_next().await? {
        resource_types.extend(provider.qualified_types());
    }

    Ok(resource_types)
}
