//! Registration validation chain.
//!
//! Field-level rules for the registration endpoint: email shape and domain
//! allow-list, required names, password policy, and confirmation match.
//! Like the password rules, everything aggregates: the client gets the
//! complete picture in one response rather than one error per round trip.

use serde::Serialize;

use crate::{PasswordPolicy, UserContext};

/// Allow-list applied when no configuration overrides it.
pub const DEFAULT_ALLOWED_DOMAINS: &[&str] = &["example.com", "backlogger.io"];

/// One failed field-level rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Request field the rule is keyed on
    pub field: &'static str,
    pub message: String,
}

/// A registration submission to validate.
#[derive(Clone, Debug, Default)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
}

/// Registration rule chain: the password policy plus the email domain
/// allow-list.
#[derive(Clone, Debug)]
pub struct RegistrationPolicy {
    pub password: PasswordPolicy,
    /// Email domains permitted to register
    pub allowed_domains: Vec<String>,
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        Self {
            password: PasswordPolicy::default(),
            allowed_domains: DEFAULT_ALLOWED_DOMAINS
                .iter()
                .map(|d| (*d).to_string())
                .collect(),
        }
    }
}

impl RegistrationPolicy {
    /// Validate a registration submission.
    ///
    /// Every rule runs; the result carries one entry per violated rule.
    /// An empty vector means the submission is acceptable. Emails are
    /// compared lowercased; callers should persist the lowercased form.
    pub fn validate(&self, request: &RegistrationRequest) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        let email = request.email.trim().to_lowercase();
        match email_domain(&email) {
            None => violations.push(FieldViolation {
                field: "email",
                message: "Enter a valid email address.".to_string(),
            }),
            Some(domain) => {
                if !self.allowed_domains.iter().any(|allowed| allowed == domain) {
                    violations.push(FieldViolation {
                        field: "email",
                        message: format!(
                            "Email must be from one of these domains: {}",
                            self.allowed_domains.join(", ")
                        ),
                    });
                }
            }
        }

        if request.first_name.trim().is_empty() {
            violations.push(FieldViolation {
                field: "first_name",
                message: "This field is required.".to_string(),
            });
        }
        if request.last_name.trim().is_empty() {
            violations.push(FieldViolation {
                field: "last_name",
                message: "This field is required.".to_string(),
            });
        }

        let user = UserContext {
            email: Some(email),
            first_name: Some(request.first_name.clone()),
            last_name: Some(request.last_name.clone()),
        };
        for violation in self.password.evaluate(&request.password, Some(&user)) {
            violations.push(FieldViolation {
                field: "password",
                message: violation.message,
            });
        }

        if request.password != request.password_confirm {
            violations.push(FieldViolation {
                field: "password_confirm",
                message: "Passwords don't match.".to_string(),
            });
        }

        if !violations.is_empty() {
            tracing::debug!(
                violation_count = violations.len(),
                "registration submission rejected"
            );
        }

        violations
    }
}

/// Extract the domain of a structurally valid email address.
///
/// Deliberately modest: one `@`, non-empty local part, dotted domain. The
/// full RFC grammar is the HTTP layer's concern; this only has to be tight
/// enough that the allow-list compares against a real domain.
fn email_domain(email: &str) -> Option<&str> {
    let (local, domain) = email.split_once('@')?;
    if local.is_empty() || domain.is_empty() {
        return None;
    }
    if email.contains(char::is_whitespace) || domain.contains('@') {
        return None;
    }
    if !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || domain.contains("..")
    {
        return None;
    }
    Some(domain)
}
