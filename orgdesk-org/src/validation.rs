//! Form validation
//!
//! Pure, synchronous checks for the organization and add-member drafts.
//! Every field is checked independently and all failures are collected; within
//! a field the first failing rule wins. Nothing here touches the network or the
//! shared context.

use std::collections::BTreeMap;

use lazy_regex::{regex, Lazy, Regex};
use serde::{Deserialize, Serialize};

use crate::draft::{AddMemberDraft, OrganizationDraft};

/// Simple `local@domain.tld` shape.
static EMAIL_REGEX: &Lazy<Regex> = regex!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$");

/// Optional `+`, a first digit 1-9, then 7 to 15 digits, spaces, hyphens or parentheses.
static PHONE_REGEX: &Lazy<Regex> = regex!(r"^\+?[1-9][0-9\s\-()]{7,15}$");

/// Minimum length of a trimmed organization name.
pub const NAME_MIN_LENGTH: usize = 2;

/// Form field a validation error is attached to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Organization name
    Name,
    /// Email
    Email,
    /// Postal address
    Address,
    /// Phone number
    Phone,
}

impl Field {
    /// Field key as used by the form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Address => "address",
            Field::Phone => "phone",
        }
    }
}

/// Rule a field failed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRule {
    /// Field is empty
    Required,
    /// Field is shorter than allowed
    MinLength,
    /// Field does not have the expected shape
    Format,
}

/// A single field error with the message shown under the field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    /// Rule that failed
    pub rule: ValidationRule,
    /// User-facing message
    pub message: String,
}

impl FieldError {
    fn new(rule: ValidationRule, message: &str) -> Self {
        Self {
            rule,
            message: message.to_string(),
        }
    }
}

/// Field → error map produced by validation. Empty means the draft is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields that failed.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether `field` has an error.
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Error for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// Message for `field`, if any.
    pub fn message(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(|e| e.message.as_str())
    }

    /// Iterate over failing fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (&Field, &FieldError)> {
        self.0.iter()
    }

    fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, error)| format!("{}: {}", field.as_str(), error.message))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// Validate a create or edit organization draft.
///
/// # Rules
///
/// - name: required, then at least 2 characters once trimmed
/// - email: required, then `local@domain.tld`
/// - phone: optional; once whitespace is stripped it must match the phone pattern
///
/// # Examples
///
/// ```
/// use orgdesk_org::{validate_organization, Field, OrganizationDraft, ValidationRule};
///
/// let errors = validate_organization(&OrganizationDraft::new("", "x@y.com"));
/// assert_eq!(errors.get(Field::Name).unwrap().rule, ValidationRule::Required);
/// assert!(!errors.contains(Field::Email));
/// ```
pub fn validate_organization(draft: &OrganizationDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let name = draft.name.trim();
    if name.is_empty() {
        errors.insert(
            Field::Name,
            FieldError::new(
                ValidationRule::Required,
                "Le nom de l'organisation est obligatoire",
            ),
        );
    } else if name.chars().count() < NAME_MIN_LENGTH {
        errors.insert(
            Field::Name,
            FieldError::new(
                ValidationRule::MinLength,
                "Le nom doit contenir au moins 2 caractères",
            ),
        );
    }

    if let Some(error) = check_email(&draft.email) {
        errors.insert(Field::Email, error);
    }

    let phone: String = draft.phone.chars().filter(|c| !c.is_whitespace()).collect();
    if !phone.is_empty() && !PHONE_REGEX.is_match(&phone) {
        errors.insert(
            Field::Phone,
            FieldError::new(ValidationRule::Format, "Format de téléphone invalide"),
        );
    }

    errors
}

/// Validate an add-member draft. Only the email is checked.
pub fn validate_add_member(draft: &AddMemberDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(error) = check_email(&draft.email) {
        errors.insert(Field::Email, error);
    }
    errors
}

/// Check whether `email` has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

fn check_email(email: &str) -> Option<FieldError> {
    if email.trim().is_empty() {
        Some(FieldError::new(
            ValidationRule::Required,
            "L'email est obligatoire",
        ))
    } else if !is_valid_email(email) {
        Some(FieldError::new(
            ValidationRule::Format,
            "Format d'email invalide",
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, email: &str, phone: &str) -> OrganizationDraft {
        OrganizationDraft::new(name, email).with_phone(phone)
    }

    #[test]
    fn test_valid_draft() {
        let errors = validate_organization(&draft("Acme Inc", "a@b.com", ""));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_name_rules() {
        let errors = validate_organization(&draft("   ", "a@b.com", ""));
        assert_eq!(errors.get(Field::Name).unwrap().rule, ValidationRule::Required);

        let errors = validate_organization(&draft(" A ", "a@b.com", ""));
        assert_eq!(errors.get(Field::Name).unwrap().rule, ValidationRule::MinLength);

        let errors = validate_organization(&draft("Ab", "a@b.com", ""));
        assert!(!errors.contains(Field::Name));
    }

    #[test]
    fn test_email_rules() {
        let errors = validate_organization(&draft("Acme", "", ""));
        assert_eq!(errors.get(Field::Email).unwrap().rule, ValidationRule::Required);

        for bad in ["plainaddress", "a@b", "a b@c.com", "@b.com", "a@.com x", "a@@b.com"] {
            let errors = validate_organization(&draft("Acme", bad, ""));
            assert_eq!(
                errors.get(Field::Email).map(|e| e.rule),
                Some(ValidationRule::Format),
                "{bad} should be rejected"
            );
        }

        for good in ["a@b.com", "first.last@sub.example.org", "x+tag@y.co"] {
            let errors = validate_organization(&draft("Acme", good, ""));
            assert!(!errors.contains(Field::Email), "{good} should be accepted");
        }
    }

    #[test]
    fn test_phone_rules() {
        for good in ["+33 6 12 34 56 78", "612345678", "1234-5678", "+1 (555) 123-4567"] {
            let errors = validate_organization(&draft("Acme", "a@b.com", good));
            assert!(!errors.contains(Field::Phone), "{good} should be accepted");
        }

        for bad in ["0612345678", "1234567", "+1234567", "12345abc90", "+33 6 12 34 56 78 90 12 34 56"] {
            let errors = validate_organization(&draft("Acme", "a@b.com", bad));
            assert_eq!(
                errors.get(Field::Phone).map(|e| e.rule),
                Some(ValidationRule::Format),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_blank_phone_is_absent() {
        let errors = validate_organization(&draft("Acme", "a@b.com", "   "));
        assert!(!errors.contains(Field::Phone));
    }

    #[test]
    fn test_all_violations_collected() {
        let errors = validate_organization(&draft("", "nope", "12"));
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(Field::Name));
        assert!(errors.contains(Field::Email));
        assert!(errors.contains(Field::Phone));
    }

    #[test]
    fn test_add_member_validation() {
        assert!(validate_add_member(&AddMemberDraft::new("x@y.com")).is_empty());

        let errors = validate_add_member(&AddMemberDraft::new(" "));
        assert_eq!(errors.message(Field::Email), Some("L'email est obligatoire"));

        let errors = validate_add_member(&AddMemberDraft::new("x@y"));
        assert_eq!(errors.message(Field::Email), Some("Format d'email invalide"));
    }
}
