//! Strongly-typed identifiers (avoid mixing strings/UUIDs arbitrarily).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Organisation identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganisationId(pub Uuid);

/// Subscription identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub Uuid);

/// User identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);
