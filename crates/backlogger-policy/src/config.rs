//! Policy configuration from environment variables.
//!
//! Every variable is optional; unset variables fall back to the production
//! defaults:
//!
//! ```bash
//! BACKLOGGER_ALLOWED_DOMAINS=example.com,backlogger.io
//! BACKLOGGER_PASSWORD_MIN_SPECIAL=1
//! BACKLOGGER_PASSWORD_MIN_UPPERCASE=1
//! BACKLOGGER_PASSWORD_MIN_LOWERCASE=1
//! BACKLOGGER_PASSWORD_MIN_DIGITS=1
//! BACKLOGGER_PASSWORD_MAX_REPEATS=3
//! BACKLOGGER_PASSWORD_MAX_LENGTH=128
//! ```

use std::env;

use thiserror::Error;

use crate::{PasswordPolicy, RegistrationPolicy, DEFAULT_ALLOWED_DOMAINS};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: '{1}' is not a number")]
    InvalidNumber(&'static str, String),

    #[error("{0} is set but contains no domains")]
    EmptyDomainList(&'static str),
}

/// Validation policy loaded from the environment.
#[derive(Clone, Debug)]
pub struct PolicyConfig {
    pub password: PasswordPolicy,
    pub allowed_domains: Vec<String>,
}

impl PolicyConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = PasswordPolicy::default();
        let password = PasswordPolicy {
            min_special_chars: read_u32(
                "BACKLOGGER_PASSWORD_MIN_SPECIAL",
                defaults.min_special_chars,
            )?,
            min_uppercase: read_u32("BACKLOGGER_PASSWORD_MIN_UPPERCASE", defaults.min_uppercase)?,
            min_lowercase: read_u32("BACKLOGGER_PASSWORD_MIN_LOWERCASE", defaults.min_lowercase)?,
            min_digits: read_u32("BACKLOGGER_PASSWORD_MIN_DIGITS", defaults.min_digits)?,
            max_repeats: read_u32("BACKLOGGER_PASSWORD_MAX_REPEATS", defaults.max_repeats)?,
            max_length: read_u32("BACKLOGGER_PASSWORD_MAX_LENGTH", defaults.max_length)?,
        };

        let allowed_domains = match env::var("BACKLOGGER_ALLOWED_DOMAINS") {
            Ok(raw) => {
                let domains: Vec<String> = raw
                    .split(',')
                    .map(|d| d.trim().to_lowercase())
                    .filter(|d| !d.is_empty())
                    .collect();
                if domains.is_empty() {
                    return Err(ConfigError::EmptyDomainList("BACKLOGGER_ALLOWED_DOMAINS"));
                }
                domains
            }
            Err(_) => DEFAULT_ALLOWED_DOMAINS
                .iter()
                .map(|d| (*d).to_string())
                .collect(),
        };

        Ok(Self {
            password,
            allowed_domains,
        })
    }

    /// Build the registration rule chain from this configuration.
    pub fn registration_policy(&self) -> RegistrationPolicy {
        RegistrationPolicy {
            password: self.password,
            allowed_domains: self.allowed_domains.clone(),
        }
    }
}

fn read_u32(var: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(var, raw)),
        Err(_) => Ok(default),
    }
}
