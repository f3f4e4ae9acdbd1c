//! Password policy checks.
//!
//! Each rule is a pure function over the policy parameters, the candidate
//! password, and optional user context. Rules run in a fixed declared order
//! and never short-circuit: callers always receive every violation so a
//! client can show the complete list of problems at once.

use serde::{Deserialize, Serialize};

/// Characters counted by the special-character rule.
const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Identifies a password rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    SpecialCharacter,
    Uppercase,
    Lowercase,
    Number,
    RepeatedCharacter,
    UserInfo,
    MaxLength,
}

impl CheckKind {
    /// Stable wire code for this rule, as surfaced to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            CheckKind::SpecialCharacter => "password_no_special",
            CheckKind::Uppercase => "password_no_uppercase",
            CheckKind::Lowercase => "password_no_lowercase",
            CheckKind::Number => "password_no_numbers",
            CheckKind::RepeatedCharacter => "password_repeated_characters",
            CheckKind::UserInfo => "password_contains_user_info",
            CheckKind::MaxLength => "password_too_long",
        }
    }
}

/// One failed password rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordViolation {
    pub kind: CheckKind,
    /// User-facing message with the policy parameter embedded
    pub message: String,
    /// The numeric policy parameter, for client-side re-rendering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<u32>,
}

/// Attributes of the user that must not appear in the password.
#[derive(Clone, Debug, Default)]
pub struct UserContext {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Password policy parameters.
///
/// `Default` gives the production policy: at least one special character,
/// uppercase letter, lowercase letter, and digit; no more than three
/// identical characters in a row; at most 128 characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_special_chars: u32,
    pub min_uppercase: u32,
    pub min_lowercase: u32,
    pub min_digits: u32,
    pub max_repeats: u32,
    pub max_length: u32,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_special_chars: 1,
            min_uppercase: 1,
            min_lowercase: 1,
            min_digits: 1,
            max_repeats: 3,
            max_length: 128,
        }
    }
}

/// A single rule: returns the violation it found, if any.
type Check = fn(&PasswordPolicy, &str, Option<&UserContext>) -> Option<PasswordViolation>;

/// All rules in declared order, so violation ordering is deterministic.
const CHECKS: &[Check] = &[
    special_character,
    uppercase,
    lowercase,
    number,
    repeated_character,
    user_info,
    max_length,
];

impl PasswordPolicy {
    /// Evaluate `password` against every rule, in order.
    ///
    /// Returns all violations found; an empty vector means the password is
    /// accepted.
    pub fn evaluate(&self, password: &str, user: Option<&UserContext>) -> Vec<PasswordViolation> {
        CHECKS
            .iter()
            .filter_map(|check| check(self, password, user))
            .collect()
    }
}

fn special_character(
    policy: &PasswordPolicy,
    password: &str,
    _user: Option<&UserContext>,
) -> Option<PasswordViolation> {
    let count = password.chars().filter(|c| SPECIAL_CHARS.contains(*c)).count();
    if count < policy.min_special_chars as usize {
        return Some(PasswordViolation {
            kind: CheckKind::SpecialCharacter,
            message: format!(
                "Password must contain at least {} special character(s).",
                policy.min_special_chars
            ),
            param: Some(policy.min_special_chars),
        });
    }
    None
}

fn uppercase(
    policy: &PasswordPolicy,
    password: &str,
    _user: Option<&UserContext>,
) -> Option<PasswordViolation> {
    let count = password.chars().filter(char::is_ascii_uppercase).count();
    if count < policy.min_uppercase as usize {
        return Some(PasswordViolation {
            kind: CheckKind::Uppercase,
            message: format!(
                "Password must contain at least {} uppercase letter(s).",
                policy.min_uppercase
            ),
            param: Some(policy.min_uppercase),
        });
    }
    None
}

fn lowercase(
    policy: &PasswordPolicy,
    password: &str,
    _user: Option<&UserContext>,
) -> Option<PasswordViolation> {
    let count = password.chars().filter(char::is_ascii_lowercase).count();
    if count < policy.min_lowercase as usize {
        return Some(PasswordViolation {
            kind: CheckKind::Lowercase,
            message: format!(
                "Password must contain at least {} lowercase letter(s).",
                policy.min_lowercase
            ),
            param: Some(policy.min_lowercase),
        });
    }
    None
}

fn number(
    policy: &PasswordPolicy,
    password: &str,
    _user: Option<&UserContext>,
) -> Option<PasswordViolation> {
    let count = password.chars().filter(char::is_ascii_digit).count();
    if count < policy.min_digits as usize {
        return Some(PasswordViolation {
            kind: CheckKind::Number,
            message: format!(
                "Password must contain at least {} number(s).",
                policy.min_digits
            ),
            param: Some(policy.min_digits),
        });
    }
    None
}

fn repeated_character(
    policy: &PasswordPolicy,
    password: &str,
    _user: Option<&UserContext>,
) -> Option<PasswordViolation> {
    let mut run = 0usize;
    let mut prev: Option<char> = None;
    for c in password.chars() {
        if prev == Some(c) {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run > policy.max_repeats as usize {
            return Some(PasswordViolation {
                kind: CheckKind::RepeatedCharacter,
                message: format!(
                    "Password cannot contain more than {} repeated characters in a row.",
                    policy.max_repeats
                ),
                param: Some(policy.max_repeats),
            });
        }
    }
    None
}

fn user_info(
    _policy: &PasswordPolicy,
    password: &str,
    user: Option<&UserContext>,
) -> Option<PasswordViolation> {
    let user = user?;
    let password_lower = password.to_lowercase();

    let attrs = [&user.email, &user.first_name, &user.last_name];
    for value in attrs.into_iter().flatten() {
        // Windows are taken over characters, not bytes
        let chars: Vec<char> = value.to_lowercase().chars().collect();
        for window in chars.windows(3) {
            let fragment: String = window.iter().collect();
            if password_lower.contains(&fragment) {
                return Some(PasswordViolation {
                    kind: CheckKind::UserInfo,
                    message: "Password cannot contain parts of your personal information."
                        .to_string(),
                    param: None,
                });
            }
        }
    }
    None
}

fn max_length(
    policy: &PasswordPolicy,
    password: &str,
    _user: Option<&UserContext>,
) -> Option<PasswordViolation> {
    if password.chars().count() > policy.max_length as usize {
        return Some(PasswordViolation {
            kind: CheckKind::MaxLength,
            message: format!(
                "Password must be no more than {} characters.",
                policy.max_length
            ),
            param: Some(policy.max_length),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(violations: &[PasswordViolation]) -> Vec<CheckKind> {
        violations.iter().map(|v| v.kind).collect()
    }

    #[test]
    fn test_accepts_conforming_password() {
        let policy = PasswordPolicy::default();
        assert!(policy.evaluate("Test@123", None).is_empty());
    }

    #[test]
    fn test_missing_special_character_is_only_violation() {
        let policy = PasswordPolicy::default();
        let violations = policy.evaluate("TestPass123", None);
        assert_eq!(kinds(&violations), vec![CheckKind::SpecialCharacter]);
    }

    #[test]
    fn test_special_character_fires_without_special_chars() {
        let policy = PasswordPolicy::default();
        for password in ["TestPass123", "abcDEF456", "plain7Word"] {
            assert!(kinds(&policy.evaluate(password, None))
                .contains(&CheckKind::SpecialCharacter));
        }
    }

    #[test]
    fn test_uppercase_rule() {
        let policy = PasswordPolicy::default();
        let violations = policy.evaluate("test@123", None);
        assert_eq!(kinds(&violations), vec![CheckKind::Uppercase]);
    }

    #[test]
    fn test_lowercase_rule() {
        let policy = PasswordPolicy::default();
        let violations = policy.evaluate("TEST@123", None);
        assert_eq!(kinds(&violations), vec![CheckKind::Lowercase]);
    }

    #[test]
    fn test_number_rule() {
        let policy = PasswordPolicy::default();
        let violations = policy.evaluate("Test@abc", None);
        assert_eq!(kinds(&violations), vec![CheckKind::Number]);
    }

    #[test]
    fn test_repeated_character_rule() {
        let policy = PasswordPolicy::default();

        // Three in a row is allowed with max_repeats = 3
        assert!(policy.evaluate("Tesst@123", None).is_empty());
        assert!(policy.evaluate("Tessst@123", None).is_empty());

        // Four in a row is rejected
        let violations = policy.evaluate("Tesssst@123", None);
        assert_eq!(kinds(&violations), vec![CheckKind::RepeatedCharacter]);
    }

    #[test]
    fn test_repeated_character_custom_limit() {
        let policy = PasswordPolicy {
            max_repeats: 2,
            ..PasswordPolicy::default()
        };
        assert!(policy.evaluate("Test@123", None).is_empty());
        assert_eq!(
            kinds(&policy.evaluate("Tesst@123", None)),
            vec![CheckKind::RepeatedCharacter]
        );
    }

    #[test]
    fn test_max_length_rule() {
        let policy = PasswordPolicy::default();
        let long = format!("Aa1@{}", "x".repeat(125));
        let violations = policy.evaluate(&long, None);
        assert_eq!(kinds(&violations), vec![CheckKind::MaxLength]);
    }

    #[test]
    fn test_max_length_fires_regardless_of_content() {
        let policy = PasswordPolicy::default();
        let violations = policy.evaluate(&"a".repeat(200), None);
        assert!(kinds(&violations).contains(&CheckKind::MaxLength));
        // Full aggregation: the structural failures are reported too
        assert!(kinds(&violations).contains(&CheckKind::Uppercase));
    }

    #[test]
    fn test_max_length_counts_characters_not_bytes() {
        let policy = PasswordPolicy {
            max_length: 4,
            ..PasswordPolicy::default()
        };
        // Four multi-byte characters stay within a 4-character limit.
        let violations = policy.evaluate("éééé", None);
        assert!(!kinds(&violations).contains(&CheckKind::MaxLength));
    }

    #[test]
    fn test_empty_password_reports_all_structural_failures() {
        let policy = PasswordPolicy::default();
        let violations = policy.evaluate("", None);
        assert_eq!(
            kinds(&violations),
            vec![
                CheckKind::SpecialCharacter,
                CheckKind::Uppercase,
                CheckKind::Lowercase,
                CheckKind::Number,
            ]
        );
    }

    #[test]
    fn test_violations_in_declared_order() {
        let policy = PasswordPolicy::default();
        // Uppercase-only with a 4-run and no digits or specials
        let violations = policy.evaluate("XXXXYZ", None);
        assert_eq!(
            kinds(&violations),
            vec![
                CheckKind::SpecialCharacter,
                CheckKind::Lowercase,
                CheckKind::Number,
                CheckKind::RepeatedCharacter,
            ]
        );
    }

    #[test]
    fn test_user_info_matches_email_fragment() {
        let policy = PasswordPolicy::default();
        let user = UserContext {
            email: Some("alice@example.com".to_string()),
            first_name: None,
            last_name: None,
        };
        // "ali" (from the local part) appears in the password
        let violations = policy.evaluate("Brutali@9", Some(&user));
        assert_eq!(kinds(&violations), vec![CheckKind::UserInfo]);
    }

    #[test]
    fn test_user_info_case_insensitive() {
        let policy = PasswordPolicy::default();
        let user = UserContext {
            email: None,
            first_name: Some("Robert".to_string()),
            last_name: None,
        };
        let violations = policy.evaluate("ROBust@123", Some(&user));
        assert_eq!(kinds(&violations), vec![CheckKind::UserInfo]);
    }

    #[test]
    fn test_user_info_skips_short_attributes() {
        let policy = PasswordPolicy::default();
        let user = UserContext {
            email: None,
            first_name: Some("Al".to_string()),
            last_name: None,
        };
        // Two-character names have no 3-character window to match
        assert!(policy.evaluate("Always@123", Some(&user)).is_empty());
    }

    #[test]
    fn test_user_info_not_run_without_context() {
        let policy = PasswordPolicy::default();
        assert!(policy.evaluate("Alice@123", None).is_empty());
    }

    #[test]
    fn test_violation_carries_param() {
        let policy = PasswordPolicy {
            min_special_chars: 2,
            ..PasswordPolicy::default()
        };
        let violations = policy.evaluate("Test@123", None);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].param, Some(2));
        assert!(violations[0].message.contains("at least 2"));
    }

    #[test]
    fn test_check_kind_codes() {
        assert_eq!(CheckKind::SpecialCharacter.code(), "password_no_special");
        assert_eq!(CheckKind::Uppercase.code(), "password_no_uppercase");
        assert_eq!(CheckKind::Lowercase.code(), "password_no_lowercase");
        assert_eq!(CheckKind::Number.code(), "password_no_numbers");
        assert_eq!(
            CheckKind::RepeatedCharacter.code(),
            "password_repeated_characters"
        );
        assert_eq!(CheckKind::UserInfo.code(), "password_contains_user_info");
        assert_eq!(CheckKind::MaxLength.code(), "password_too_long");
    }

    #[test]
    fn test_violation_serializes_snake_case() {
        let policy = PasswordPolicy::default();
        let violations = policy.evaluate("TestPass123", None);
        let json = serde_json::to_value(&violations[0]).unwrap();
        assert_eq!(json["kind"], "special_character");
        assert_eq!(json["param"], 1);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let policy = PasswordPolicy::default();
        let first = policy.evaluate("Tesssst@123", None);
        let second = policy.evaluate("Tesssst@123", None);
        assert_eq!(first, second);
    }
}
