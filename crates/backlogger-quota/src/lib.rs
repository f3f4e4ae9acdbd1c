//! backlogger-quota - tier-driven feature derivation and usage validation
//!
//! This crate owns the subscription side of Backlogger's rule engine:
//! - Tier table: each tier derives a fixed set of feature flags and limits
//! - Organisation invariants (domain allow-list, framework enablement)
//! - Subscription invariants (billing period dates, usage counters)
//!
//! # Architecture
//!
//! Everything here is a pure function over its inputs plus static tables:
//! no I/O, no shared state, callable concurrently without coordination.
//! Violations are data, not exceptions. The persistence layer is expected
//! to call [`Organisation::apply_tier_features`] first (the tier is the
//! single source of truth for derived fields), then validate, and only
//! persist when the violation list is empty. The [`ensure_valid_organisation`]
//! and [`ensure_valid_subscription`] wrappers package that last step as a
//! `Result` for callers that want to bubble an error with `?`.

mod ids;
mod organisation;
mod subscription;
mod tiers;

pub use ids::{OrganisationId, SubscriptionId, UserId};
pub use organisation::{
    validate_organisation, Organisation, OrganisationStatus, PaymentStatus, ProjectFramework,
};
pub use subscription::{
    validate_subscription, BillingInterval, Subscription, SubscriptionStatus,
};
pub use tiers::{FeatureFlags, SubscriptionTier};

use serde::Serialize;
use thiserror::Error;

/// One violated invariant on an organisation or subscription record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InvariantViolation {
    /// Record field the rule is keyed on
    pub field: &'static str,
    pub message: String,
}

impl InvariantViolation {
    pub(crate) fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Error form of a non-empty violation list, for the validate-then-persist
/// boundary.
#[derive(Debug, Error)]
#[error("validation failed on {}", violated_fields(.violations))]
pub struct InvariantError {
    pub violations: Vec<InvariantViolation>,
}

fn violated_fields(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(|v| v.field)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate an organisation, converting violations into an error.
///
/// Persistence hooks call this immediately before a save attempt and must
/// not commit on `Err`.
pub fn ensure_valid_organisation(org: &Organisation) -> Result<(), InvariantError> {
    let violations = validate_organisation(org);
    if violations.is_empty() {
        return Ok(());
    }
    tracing::debug!(
        organisation_id = %org.id.0,
        fields = %violated_fields(&violations),
        "organisation validation failed"
    );
    Err(InvariantError { violations })
}

/// Validate a subscription against its organisation, converting violations
/// into an error.
pub fn ensure_valid_subscription(
    sub: &Subscription,
    org: &Organisation,
) -> Result<(), InvariantError> {
    let violations = validate_subscription(sub, org);
    if violations.is_empty() {
        return Ok(());
    }
    tracing::debug!(
        subscription_id = %sub.id.0,
        organisation_id = %org.id.0,
        fields = %violated_fields(&violations),
        "subscription validation failed"
    );
    Err(InvariantError { violations })
}
