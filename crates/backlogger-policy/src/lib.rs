//! backlogger-policy - password policy and registration validation
//!
//! This crate owns the account side of Backlogger's rule engine:
//! - Password checks (character classes, repeats, user-info leakage, length)
//! - The registration rule chain (email shape, domain allow-list, names,
//!   confirmation match) that couples to them
//! - Environment-driven policy configuration
//!
//! # Architecture
//!
//! Rules are data, not an inheritance hierarchy: a fixed, ordered table of
//! pure check functions evaluated over `(policy, password, user context)`.
//! Violations are returned, never raised, and nothing short-circuits —
//! callers get every problem in one pass so clients can render the full
//! list. The HTTP layer decides whether a non-empty result becomes a
//! structured 400 body or blocks user creation.

mod checks;
mod config;
mod registration;

pub use checks::{CheckKind, PasswordPolicy, PasswordViolation, UserContext};
pub use config::{ConfigError, PolicyConfig};
pub use registration::{
    FieldViolation, RegistrationPolicy, RegistrationRequest, DEFAULT_ALLOWED_DOMAINS,
};
