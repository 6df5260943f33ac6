//! Field validation and record normalization.
//!
//! Strict allowlist patterns only; an absent or empty value never passes a
//! field check. Bad data is reported through the outcome's error list, not
//! as an error value; the only hard failure is input that is not a mapping
//! at all.

use crate::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("User data must be a mapping")]
    NotAMapping,
}

/// Fixed-shape output of record validation. Every field is always present
/// and type-correct, whatever the source record contained.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub email_valid: bool,
    pub phone_valid: bool,
}

/// A normalized record plus the field-level errors found while building it.
/// `errors` is non-empty exactly when a validity flag is false.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub data: NormalizedRecord,
    pub errors: Vec<String>,
}

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

static SSN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3}-\d{2}-\d{4}$").unwrap());

/// Accept iff local-part "@" domain with at least one internal dot not at
/// the very end. Empty input always rejects.
pub fn validate_email(email: &str) -> bool {
    !email.is_empty() && EMAIL_RE.is_match(email)
}

/// Accept iff exactly 10 digits remain once formatting characters (spaces,
/// hyphens, parentheses, dots, a leading "+") are stripped.
pub fn validate_phone(phone: &str) -> bool {
    strip_phone_formatting(phone).len() == 10
}

/// Accept exactly `DDD-DD-DDDD`, nothing else.
pub fn validate_ssn(ssn: &str) -> bool {
    SSN_RE.is_match(ssn)
}

/// Accept iff, after stripping spaces and hyphens, exactly 16 digits remain
/// and nothing but digits.
pub fn validate_credit_card(cc: &str) -> bool {
    let cleaned: String = cc.chars().filter(|c| *c != ' ' && *c != '-').collect();
    cleaned.len() == 16 && cleaned.chars().all(|c| c.is_ascii_digit())
}

fn strip_phone_formatting(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Build a normalized record from an arbitrary canonical mapping.
///
/// Missing fields become empty strings, never a whole-record failure. The
/// individually checked fields (email before phone, fixed order) contribute
/// one human-readable error each when they fail their acceptance check.
pub fn validate_user_data(record: &Value) -> Result<ValidationOutcome, ValidationError> {
    let map = record.as_map().ok_or(ValidationError::NotAMapping)?;

    let field = |name: &str| map.get(name).map(Value::coerce_str).unwrap_or_default();

    let id = field("id");
    let name = field("name").trim().to_uppercase();

    let raw_email = field("email");
    let email_candidate = raw_email.trim().to_lowercase();
    let email_valid = validate_email(&email_candidate);
    let email = if email_valid { email_candidate } else { raw_email };

    let raw_phone = field("phone");
    let phone_digits = strip_phone_formatting(&raw_phone);
    let phone_valid = phone_digits.len() == 10;
    let phone = if phone_valid { phone_digits } else { raw_phone };

    let mut errors = Vec::new();
    if !email_valid {
        errors.push(format!("Invalid email: {}", email));
    }
    if !phone_valid {
        errors.push(format!("Invalid phone: {}", phone));
    }

    Ok(ValidationOutcome {
        data: NormalizedRecord {
            id,
            name,
            email,
            phone,
            email_valid,
            phone_valid,
        },
        errors,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Mapping;

    // -- Email ---------------------------------------------------------------

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("test@example.com"));
        assert!(validate_email("user.name@domain.co.uk"));
        assert!(validate_email("test+tag@example.org"));
        assert!(validate_email("123@domain.com"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!validate_email(""));
        assert!(!validate_email("invalid"));
        assert!(!validate_email("@domain.com"));
        assert!(!validate_email("user@"));
        assert!(!validate_email("user.domain.com"));
        assert!(!validate_email("user@domain"));
        assert!(!validate_email("user@domain."));
        assert!(!validate_email("user@@domain.com"));
    }

    // -- Phone ---------------------------------------------------------------

    #[test]
    fn test_valid_phones() {
        assert!(validate_phone("1234567890"));
        assert!(validate_phone("(123) 456-7890"));
        assert!(validate_phone("123-456-7890"));
        assert!(validate_phone("123.456.7890"));
        assert!(validate_phone("+123-456-7890"));
    }

    #[test]
    fn test_invalid_phones() {
        assert!(!validate_phone(""));
        assert!(!validate_phone("123"));
        assert!(!validate_phone("abc"));
        assert!(!validate_phone("123-456"));
        // Exactly 10 digits required; a country code pushes it over.
        assert!(!validate_phone("+1-123-456-7890"));
        assert!(!validate_phone("12345678901"));
    }

    // -- SSN -----------------------------------------------------------------

    #[test]
    fn test_valid_ssns() {
        assert!(validate_ssn("123-45-6789"));
        assert!(validate_ssn("987-65-4321"));
    }

    #[test]
    fn test_invalid_ssns() {
        assert!(!validate_ssn(""));
        assert!(!validate_ssn("123456789"));
        assert!(!validate_ssn("123-45-678"));
        assert!(!validate_ssn("12-345-6789"));
        assert!(!validate_ssn("abc-de-fghi"));
        assert!(!validate_ssn("123-45-6789 "));
    }

    // -- Credit card ---------------------------------------------------------

    #[test]
    fn test_valid_credit_cards() {
        assert!(validate_credit_card("1234567890123456"));
        assert!(validate_credit_card("4111-1111-1111-1111"));
        assert!(validate_credit_card("4111 1111 1111 1111"));
    }

    #[test]
    fn test_invalid_credit_cards() {
        assert!(!validate_credit_card(""));
        assert!(!validate_credit_card("123456789012345")); // 15 digits
        assert!(!validate_credit_card("12345678901234567")); // 17 digits
        assert!(!validate_credit_card("abcd123456789012")); // non-digit residue
        assert!(!validate_credit_card("1234.5678.9012.3456")); // dots not stripped
    }

    // -- Record validation ----------------------------------------------------

    fn record(fields: &[(&str, Value)]) -> Value {
        let mut m = Mapping::new();
        for (k, v) in fields {
            m.insert(*k, v.clone());
        }
        Value::Map(m)
    }

    #[test]
    fn test_validate_user_data_valid() {
        let input = record(&[
            ("id", Value::from(12345)),
            ("name", Value::from("john doe")),
            ("email", Value::from("John.Doe@Example.COM")),
            ("phone", Value::from("(123) 456-7890")),
        ]);

        let outcome = validate_user_data(&input).unwrap();
        assert_eq!(outcome.data.id, "12345");
        assert_eq!(outcome.data.name, "JOHN DOE");
        assert_eq!(outcome.data.email, "john.doe@example.com");
        assert_eq!(outcome.data.phone, "1234567890");
        assert!(outcome.data.email_valid);
        assert!(outcome.data.phone_valid);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_validate_user_data_invalid_email_and_phone() {
        let input = record(&[
            ("id", Value::from(12345)),
            ("name", Value::from("john doe")),
            ("email", Value::from("invalid-email")),
            ("phone", Value::from("123")),
        ]);

        let outcome = validate_user_data(&input).unwrap();
        assert!(!outcome.data.email_valid);
        assert!(!outcome.data.phone_valid);
        assert_eq!(outcome.errors.len(), 2);
        // Fixed field order: email first, then phone.
        assert!(outcome.errors[0].contains("Invalid email"));
        assert!(outcome.errors[1].contains("Invalid phone"));
        assert!(outcome.errors[0].contains("invalid-email"));
        assert!(outcome.errors[1].contains("123"));
    }

    #[test]
    fn test_validate_user_data_missing_fields() {
        let outcome = validate_user_data(&Value::Map(Mapping::new())).unwrap();
        assert_eq!(outcome.data.id, "");
        assert_eq!(outcome.data.name, "");
        assert_eq!(outcome.data.email, "");
        assert_eq!(outcome.data.phone, "");
        assert!(!outcome.data.email_valid);
        assert!(!outcome.data.phone_valid);
        assert_eq!(outcome.errors.len(), 2);
    }

    #[test]
    fn test_validate_user_data_non_mapping() {
        let err = validate_user_data(&Value::from("not a mapping")).unwrap_err();
        assert!(matches!(err, ValidationError::NotAMapping));
    }

    #[test]
    fn test_invalid_email_keeps_raw_value() {
        let input = record(&[("email", Value::from("  Not-An-Email  "))]);
        let outcome = validate_user_data(&input).unwrap();
        assert!(!outcome.data.email_valid);
        assert_eq!(outcome.data.email, "  Not-An-Email  ");
    }

    #[test]
    fn test_email_trimmed_before_validation() {
        let input = record(&[("email", Value::from("  John@Example.COM  "))]);
        let outcome = validate_user_data(&input).unwrap();
        assert!(outcome.data.email_valid);
        assert_eq!(outcome.data.email, "john@example.com");
    }
}
