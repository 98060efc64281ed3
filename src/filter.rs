//! Primary resource type filter
//!
//! Classifies `"<Namespace>/<type>"` names as primary infrastructure or not.
//! An exact allow-list always wins. Everything else goes through a heuristic
//! on the resource segment: any skip indicator excludes it, otherwise any
//! include pattern includes it.

use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};

/// Resource types that are always primary
const DEFAULT_ALLOW_LIST: &[&str] = &[
    // Compute
    "Microsoft.Compute/virtualMachines",
    "Microsoft.Compute/virtualMachineScaleSets",
    "Microsoft.Compute/disks",
    "Microsoft.Compute/availabilitySets",
    "Microsoft.Compute/snapshots",
    "Microsoft.Compute/images",
    "Microsoft.Compute/galleries",
    "Microsoft.Compute/proximityPlacementGroups",
    "Microsoft.Compute/hostGroups",
    "Microsoft.Compute/sshPublicKeys",
    // Web / App Service
    "Microsoft.Web/sites",
    "Microsoft.Web/serverFarms",
    "Microsoft.Web/staticSites",
    "Microsoft.Web/hostingEnvironments",
    "Microsoft.Web/certificates",
    "Microsoft.Web/customDomains",
    "Microsoft.Web/functions",
    // Storage
    "Microsoft.Storage/storageAccounts",
    // Databases
    "Microsoft.Sql/servers",
    "Microsoft.Sql/databases",
    "Microsoft.Sql/managedInstances",
    "Microsoft.Sql/elasticPools",
    "Microsoft.Sql/failoverGroups",
    "Microsoft.DBforPostgreSQL/servers",
    "Microsoft.DBforMySQL/servers",
    "Microsoft.DBforMariaDB/servers",
    "Microsoft.DocumentDB/databaseAccounts",
    // Containers
    "Microsoft.ContainerService/managedClusters",
    "Microsoft.ContainerInstance/containerGroups",
    "Microsoft.ContainerRegistry/registries",
    // Networking
    "Microsoft.Network/virtualNetworks",
    "Microsoft.Network/applicationGateways",
    "Microsoft.Network/loadBalancers",
    "Microsoft.Network/publicIPAddresses",
    "Microsoft.Network/networkSecurityGroups",
    "Microsoft.Network/routeTables",
    "Microsoft.Network/networkInterfaces",
    "Microsoft.Network/virtualNetworkGateways",
    "Microsoft.Network/localNetworkGateways",
    "Microsoft.Network/connections",
    "Microsoft.Network/expressRouteCircuits",
    "Microsoft.Network/trafficManagerProfiles",
    "Microsoft.Network/networkWatchers",
    "Microsoft.Network/bastionHosts",
    "Microsoft.Network/firewallPolicies",
    "Microsoft.Network/webApplicationFirewallPolicies",
    // Security
    "Microsoft.KeyVault/vaults",
    // Analytics
    "Microsoft.Synapse/workspaces",
    "Microsoft.DataFactory/factories",
    "Microsoft.StreamAnalytics/streamingjobs",
    "Microsoft.DataLakeStore/accounts",
    "Microsoft.DataLakeAnalytics/accounts",
    // IoT
    "Microsoft.Devices/IotHubs",
    "Microsoft.IoTHub/hubs",
    // Media, ML, search
    "Microsoft.Media/mediaservices",
    "Microsoft.MachineLearningServices/workspaces",
    "Microsoft.Search/searchServices",
    // Messaging
    "Microsoft.EventHub/namespaces",
    "Microsoft.ServiceBus/namespaces",
    "Microsoft.NotificationHubs/namespaces",
    "Microsoft.Relay/namespaces",
    // Integration
    "Microsoft.Logic/workflows",
    "Microsoft.ApiManagement/service",
    "Microsoft.AppConfiguration/configurationStores",
    "Microsoft.Cache/redis",
];

/// Segments containing any of these are auxiliary, never primary
const DEFAULT_SKIP_INDICATORS: &[&str] = &[
    "operations",
    "locations",
    "checknameavailability",
    "usages",
    "diagnostics",
    "metrics",
    "logs",
    "audits",
    "access",
    "permissions",
    "roles",
    "policies",
    "tags",
    "locks",
    "deployments",
    "templates",
    "scripts",
    "runcommands",
    "extensions",
    "patches",
    "assessments",
    "configurations",
    "settings",
    "properties",
    "metadata",
    "status",
    "state",
    "support",
    "cases",
    "tenants",
    "changes",
    "ownerships",
    "transfers",
    "moves",
    "validations",
    "checks",
    "availabilities",
    "quotas",
    "limits",
    "billings",
];

/// Segments containing any of these look like infrastructure
const DEFAULT_INCLUDE_PATTERNS: &[&str] = &[
    "virtualmachines",
    "storageaccounts",
    "databases",
    "servers",
    "networks",
    "securitygroups",
    "keyvaults",
    "loadbalancers",
    "applicationgateways",
    "containers",
    "kubernetes",
    "webapps",
    "functions",
    "redis",
    "cosmosdb",
    "search",
    "eventhubs",
    "servicebus",
    "logicapps",
    "apimanagement",
];

/// Filtering policy: an exact allow-list plus substring heuristics
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawPolicy")]
pub struct FilterPolicy {
    pub allow_list: HashSet<String>,
    pub skip_indicators: Vec<String>,
    pub include_patterns: Vec<String>,
}

/// Policy as written in JSON, before the patterns are lowercased
#[derive(Deserialize)]
struct RawPolicy {
    #[serde(default)]
    allow_list: HashSet<String>,
    #[serde(default)]
    skip_indicators: Vec<String>,
    #[serde(default)]
    include_patterns: Vec<String>,
}

impl From<RawPolicy> for FilterPolicy {
    fn from(raw: RawPolicy) -> Self {
        FilterPolicy {
            allow_list: raw.allow_list,
            skip_indicators: raw.skip_indicators,
            include_patterns: raw.include_patterns,
        }
        .normalized()
    }
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALLOW_LIST.iter().copied(),
            DEFAULT_SKIP_INDICATORS.iter().copied(),
            DEFAULT_INCLUDE_PATTERNS.iter().copied(),
        )
    }
}

/// Result of applying a policy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Sorted, deduplicated primary resource types
    pub types: Vec<String>,
    /// Inputs found verbatim in the allow-list
    pub exact_matches: usize,
    /// Inputs admitted by the include heuristic
    pub pattern_matches: usize,
}

/// Why a name was or wasn't classified as primary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Allowed,
    Skipped,
    Included,
    Unmatched,
}

impl Classification {
    pub fn is_primary(self) -> bool {
        matches!(self, Classification::Allowed | Classification::Included)
    }
}

/// The part after the first `/`, or the whole name if there is none
pub fn resource_segment(name: &str) -> &str {
    name.split_once('/').map_or(name, |(_, segment)| segment)
}

impl FilterPolicy {
    /// Build a policy; substring patterns are lowercased
    pub fn new<'a>(
        allow_list: impl IntoIterator<Item = &'a str>,
        skip_indicators: impl IntoIterator<Item = &'a str>,
        include_patterns: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            allow_list: allow_list.into_iter().map(String::from).collect(),
            skip_indicators: skip_indicators.into_iter().map(String::from).collect(),
            include_patterns: include_patterns.into_iter().map(String::from).collect(),
        }
        .normalized()
    }

    /// Lowercase the substring patterns
    fn normalized(mut self) -> Self {
        for pattern in self
            .skip_indicators
            .iter_mut()
            .chain(self.include_patterns.iter_mut())
        {
            *pattern = pattern.to_lowercase();
        }
        self
    }

    /// Classify a single resource type name
    pub fn classify(&self, name: &str) -> Classification {
        if self.allow_list.contains(name) {
            return Classification::Allowed;
        }

        let segment = resource_segment(name).to_lowercase();

        // Skip wins over include
        if self
            .skip_indicators
            .iter()
            .any(|skip| segment.contains(skip.as_str()))
        {
            return Classification::Skipped;
        }

        if self
            .include_patterns
            .iter()
            .any(|pattern| segment.contains(pattern.as_str()))
        {
            return Classification::Included;
        }

        Classification::Unmatched
    }

    pub fn is_primary(&self, name: &str) -> bool {
        self.classify(name).is_primary()
    }

    /// Filter enumerated names down to the sorted list of primary types
    pub fn apply<'a, I>(&self, names: I) -> FilterOutcome
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut primary = BTreeSet::new();
        let mut exact_matches = 0;
        let mut pattern_matches = 0;

        for name in names {
            let classification = self.classify(name);
            if !classification.is_primary() || !primary.insert(name.clone()) {
                continue;
            }
            match classification {
                Classification::Allowed => exact_matches += 1,
                Classification::Included => pattern_matches += 1,
                _ => {}
            }
        }

        FilterOutcome {
            types: primary.into_iter().collect(),
            exact_matches,
            pattern_matches,
        }
    }
}
