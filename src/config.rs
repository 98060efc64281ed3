//! Configuration and subscription resolution
//!
//! The subscription used to scope the provider listing comes from, in order:
//! `config.json` in the working directory, the `AZURE_SUBSCRIPTION_ID`
//! environment variable, or the nil UUID placeholder.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "config.json";

/// Environment variable holding a subscription ID
pub const SUBSCRIPTION_ENV_VAR: &str = "AZURE_SUBSCRIPTION_ID";

/// Local configuration file contents
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Azure subscription to scope API calls to
    #[serde(default)]
    pub azure_subscription: Option<String>,
}

impl Config {
    /// Load configuration from `path`. Missing or malformed files yield `None`.
    pub fn load_from(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("Config {:?} not readable: {}", path, e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::debug!("Config {:?} is not valid: {}", path, e);
                None
            }
        }
    }
}

/// Where the subscription ID came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionSource {
    ConfigFile(PathBuf),
    Environment(String),
    Placeholder,
}

/// A resolved subscription ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: String,
    pub source: SubscriptionSource,
}

impl Subscription {
    /// The nil UUID; provider listing does not validate the subscription
    pub fn placeholder() -> Self {
        Self {
            id: Uuid::nil().to_string(),
            source: SubscriptionSource::Placeholder,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.source == SubscriptionSource::Placeholder
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            SubscriptionSource::ConfigFile(path) => {
                write!(f, "Using subscription from {}: {}", path.display(), self.id)
            }
            SubscriptionSource::Environment(var) => {
                write!(f, "Using subscription from environment ({}): {}", var, self.id)
            }
            SubscriptionSource::Placeholder => write!(
                f,
                "No subscription found in config or environment, using placeholder {} for provider listing",
                self.id
            ),
        }
    }
}

/// A single step of the resolution chain
pub type Resolver = Box<dyn Fn() -> Option<Subscription>>;

/// Resolver reading `azure_subscription` from a JSON config file
pub fn config_file_resolver(path: impl Into<PathBuf>) -> Resolver {
    let path = path.into();
    Box::new(move || {
        let id = Config::load_from(&path)?.azure_subscription?;
        Some(Subscription {
            id,
            source: SubscriptionSource::ConfigFile(path.clone()),
        })
    })
}

/// Resolver reading an environment variable through `lookup`
pub fn env_resolver<F>(var: &str, lookup: F) -> Resolver
where
    F: Fn(&str) -> Option<String> + 'static,
{
    let var = var.to_string();
    Box::new(move || {
        let id = lookup(&var)?;
        Some(Subscription {
            id,
            source: SubscriptionSource::Environment(var.clone()),
        })
    })
}

/// The standard chain: `config.json`, then `AZURE_SUBSCRIPTION_ID`
pub fn default_resolvers() -> Vec<Resolver> {
    vec![
        config_file_resolver(CONFIG_FILE),
        env_resolver(SUBSCRIPTION_ENV_VAR, |var| std::env::var(var).ok()),
    ]
}

/// First non-empty result wins; falls back to the placeholder
pub fn resolve_subscription(resolvers: &[Resolver]) -> Subscription {
    let subscription = resolvers
        .iter()
        .filter_map(|resolve| resolve())
        .find(|s| !s.id.is_empty())
        .unwrap_or_else(Subscription::placeholder);

    if !subscription.is_placeholder() && Uuid::parse_str(&subscription.id).is_err() {
        tracing::warn!("Subscription ID {:?} is not a well-formed UUID", subscription.id);
    }

    subscription
}
