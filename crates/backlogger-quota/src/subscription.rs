//! Subscription record, status helpers, and usage validation.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{InvariantViolation, Organisation, OrganisationId, SubscriptionId};

/// Subscription status.
///
/// Transitions (`Trialing → Active → {PastDue ⇄ Active} → Cancelled`,
/// with `Active|PastDue → Suspended → {Active, Cancelled}`) are driven by
/// the billing workflow; this crate only validates that counters and dates
/// are consistent with whatever status is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Trial period (no payment captured yet)
    Trialing,
    /// Active subscription
    Active,
    /// Payment failed, still in grace period
    PastDue,
    /// Cancelled by the customer or after failed payment
    Cancelled,
    /// Suspended by an operator
    Suspended,
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trialing" => Ok(SubscriptionStatus::Trialing),
            "active" => Ok(SubscriptionStatus::Active),
            "past_due" => Ok(SubscriptionStatus::PastDue),
            "cancelled" => Ok(SubscriptionStatus::Cancelled),
            "suspended" => Ok(SubscriptionStatus::Suspended),
            _ => Err(format!("invalid subscription status: {}", s)),
        }
    }
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Suspended => "suspended",
        }
    }
}

/// Billing cadence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingInterval {
    Monthly,
    Annual,
}

impl FromStr for BillingInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(BillingInterval::Monthly),
            "annual" => Ok(BillingInterval::Annual),
            _ => Err(format!("invalid billing interval: {}", s)),
        }
    }
}

impl BillingInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingInterval::Monthly => "monthly",
            BillingInterval::Annual => "annual",
        }
    }
}

/// Subscription record (1:1 with its organisation).
#[derive(Clone, Debug)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub organisation_id: OrganisationId,
    pub status: SubscriptionStatus,
    pub billing_interval: BillingInterval,
    /// When the subscription began
    pub start_date: DateTime<Utc>,
    /// Start of current billing period
    pub current_period_start: DateTime<Utc>,
    /// End of current billing period
    pub current_period_end: DateTime<Utc>,
    /// When the trial period ends
    pub trial_end: Option<DateTime<Utc>>,
    /// When the subscription was cancelled
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Current number of active users
    pub current_user_count: i64,
    /// Current storage used in MB
    pub current_storage_used_mb: i64,
    /// Current number of backlog items
    pub current_item_count: i64,
    /// Email for billing communications
    pub billing_email: String,
    /// Name on the billing account
    pub billing_name: String,
    /// VAT or tax reference number
    pub tax_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// Check if the subscription is in its trial period.
    pub fn is_trial(&self) -> bool {
        self.status == SubscriptionStatus::Trialing
    }

    /// Check if the subscription is active (trialing counts as active).
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            SubscriptionStatus::Active | SubscriptionStatus::Trialing
        )
    }

    /// Check if the subscription has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.status == SubscriptionStatus::Cancelled
    }
}

/// Validate subscription dates and usage counters against the owning
/// organisation's tier limits.
///
/// Every rule runs regardless of earlier failures; one entry per violated
/// rule, in declared order. An empty vector means the record is valid.
pub fn validate_subscription(sub: &Subscription, org: &Organisation) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if sub.current_period_end <= sub.current_period_start {
        violations.push(InvariantViolation::new(
            "current_period_end",
            "Period end must be after period start",
        ));
    }

    if let Some(trial_end) = sub.trial_end {
        if trial_end <= sub.start_date {
            violations.push(InvariantViolation::new(
                "trial_end",
                "Trial end must be after subscription start",
            ));
        }
    }

    if let Some(max_users) = org.tier.max_users() {
        if sub.current_user_count > max_users {
            violations.push(InvariantViolation::new(
                "current_user_count",
                "User count exceeds subscription limit",
            ));
        }
    }

    if sub.current_storage_used_mb > org.features.storage_limit_mb {
        violations.push(InvariantViolation::new(
            "current_storage_used_mb",
            "Storage usage exceeds subscription limit",
        ));
    }

    if let Some(max_items) = org.tier.max_items() {
        if sub.current_item_count > max_items {
            violations.push(InvariantViolation::new(
                "current_item_count",
                "Item count exceeds subscription limit",
            ));
        }
    }

    violations
}
