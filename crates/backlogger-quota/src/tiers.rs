//! Subscription tiers and the feature flags/limits derived from them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Subscription plan tier for an organisation.
///
/// The tier is the single source of truth for feature enablement and usage
/// limits: every derived field is recomputed from it on save and is never
/// independently settable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Starter,
    Pro,
    Business,
    Enterprise,
}

impl FromStr for SubscriptionTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "starter" => Ok(SubscriptionTier::Starter),
            "pro" => Ok(SubscriptionTier::Pro),
            "business" => Ok(SubscriptionTier::Business),
            "enterprise" => Ok(SubscriptionTier::Enterprise),
            _ => Err(format!("invalid subscription tier: {}", s)),
        }
    }
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Starter => "starter",
            SubscriptionTier::Pro => "pro",
            SubscriptionTier::Business => "business",
            SubscriptionTier::Enterprise => "enterprise",
        }
    }

    /// Derive the feature flags and storage limit for this tier.
    ///
    /// Pure lookup over a static table; calling it twice with the same tier
    /// always yields identical output.
    pub fn features(&self) -> FeatureFlags {
        match self {
            SubscriptionTier::Starter => FeatureFlags {
                objective_layer: false,
                platform_layer: false,
                scrum_hierarchy: false,
                waterfall: false,
                storage_limit_mb: 10_240, // 10 GB
            },
            SubscriptionTier::Pro => FeatureFlags {
                objective_layer: false,
                platform_layer: false,
                scrum_hierarchy: true,
                waterfall: false,
                storage_limit_mb: 51_200, // 50 GB
            },
            SubscriptionTier::Business => FeatureFlags {
                objective_layer: true,
                platform_layer: true,
                scrum_hierarchy: true,
                waterfall: false,
                storage_limit_mb: 102_400, // 100 GB
            },
            SubscriptionTier::Enterprise => FeatureFlags {
                objective_layer: true,
                platform_layer: true,
                scrum_hierarchy: true,
                waterfall: true,
                storage_limit_mb: 1_024_000, // 1 TB
            },
        }
    }

    /// Maximum active users for this tier (`None` = unbounded).
    pub fn max_users(&self) -> Option<i64> {
        match self {
            SubscriptionTier::Starter => Some(10),
            SubscriptionTier::Pro => Some(50),
            SubscriptionTier::Business => Some(250),
            SubscriptionTier::Enterprise => None,
        }
    }

    /// Maximum backlog items for this tier (`None` = unbounded).
    pub fn max_items(&self) -> Option<i64> {
        match self {
            SubscriptionTier::Starter => Some(1_000),
            SubscriptionTier::Pro => Some(10_000),
            SubscriptionTier::Business => Some(50_000),
            SubscriptionTier::Enterprise => None,
        }
    }
}

/// Feature toggles and storage quota derived from a tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Objective/Initiative hierarchy
    pub objective_layer: bool,
    /// Platform/Application hierarchy
    pub platform_layer: bool,
    /// Scrum-specific item types
    pub scrum_hierarchy: bool,
    /// Waterfall methodology
    pub waterfall: bool,
    /// Storage quota in MB
    pub storage_limit_mb: i64,
}
