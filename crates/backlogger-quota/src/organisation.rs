//! Organisation record and its validation rules.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{FeatureFlags, InvariantViolation, OrganisationId, SubscriptionTier, UserId};

/// Lifecycle status of an organisation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganisationStatus {
    Active,
    Suspended,
    Archived,
}

impl FromStr for OrganisationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(OrganisationStatus::Active),
            "suspended" => Ok(OrganisationStatus::Suspended),
            "archived" => Ok(OrganisationStatus::Archived),
            _ => Err(format!("invalid organisation status: {}", s)),
        }
    }
}

impl OrganisationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganisationStatus::Active => "active",
            OrganisationStatus::Suspended => "suspended",
            OrganisationStatus::Archived => "archived",
        }
    }
}

/// Payment standing of the organisation's billing account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Active,
    Overdue,
    Cancelled,
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PaymentStatus::Active),
            "overdue" => Ok(PaymentStatus::Overdue),
            "cancelled" => Ok(PaymentStatus::Cancelled),
            _ => Err(format!("invalid payment status: {}", s)),
        }
    }
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Active => "active",
            PaymentStatus::Overdue => "overdue",
            PaymentStatus::Cancelled => "cancelled",
        }
    }
}

/// Project management framework for new projects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectFramework {
    Kanban,
    Scrum,
    Waterfall,
}

impl FromStr for ProjectFramework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kanban" => Ok(ProjectFramework::Kanban),
            "scrum" => Ok(ProjectFramework::Scrum),
            "waterfall" => Ok(ProjectFramework::Waterfall),
            _ => Err(format!("invalid project framework: {}", s)),
        }
    }
}

impl ProjectFramework {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectFramework::Kanban => "kanban",
            ProjectFramework::Scrum => "scrum",
            ProjectFramework::Waterfall => "waterfall",
        }
    }
}

/// Organisation record (tenant and billing unit).
#[derive(Clone, Debug)]
pub struct Organisation {
    pub id: OrganisationId,
    pub name: String,
    pub status: OrganisationStatus,
    pub tier: SubscriptionTier,
    /// Admin owner of the organisation
    pub owner_user_id: UserId,
    pub owner_email: String,
    /// Allowed email domains (Enterprise tier only)
    pub allowed_domains: Vec<String>,
    pub default_framework: ProjectFramework,
    /// Derived from `tier`; recomputed on every save
    pub features: FeatureFlags,
    /// Billing contact email
    pub billing_contact: Option<String>,
    pub payment_status: PaymentStatus,
    /// Next subscription renewal date
    pub renewal_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organisation {
    /// Recompute `features` from the tier, overwriting any caller-supplied
    /// values.
    ///
    /// The persistence layer invokes this before validation on every save;
    /// the tier is the single source of truth for the derived fields.
    pub fn apply_tier_features(&mut self) {
        self.features = self.tier.features();
    }

    /// Check if the organisation has the Enterprise tier.
    pub fn is_enterprise(&self) -> bool {
        self.tier == SubscriptionTier::Enterprise
    }
}

/// Validate organisation invariants.
///
/// Every rule runs regardless of earlier failures; one entry per violated
/// rule, in declared order. An empty vector means the record is valid.
pub fn validate_organisation(org: &Organisation) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if !org.allowed_domains.is_empty() && org.tier != SubscriptionTier::Enterprise {
        violations.push(InvariantViolation::new(
            "allowed_domains",
            "Allowed domains are only available for Enterprise tier",
        ));
    }

    if org.default_framework == ProjectFramework::Scrum && !org.features.scrum_hierarchy {
        violations.push(InvariantViolation::new(
            "default_framework",
            "Cannot set Scrum as default when Scrum hierarchy is disabled",
        ));
    }

    if org.default_framework == ProjectFramework::Waterfall && !org.features.waterfall {
        violations.push(InvariantViolation::new(
            "default_framework",
            "Cannot set Waterfall as default when Waterfall is disabled",
        ));
    }

    violations
}
