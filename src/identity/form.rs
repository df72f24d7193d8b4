//! Form payloads and their field-level validation.
//!
//! Field rules are declared with `validator`; [`check`] collects every
//! problem at once into the field to messages map the HTTP layer answers 422
//! with.

use crate::model::{AccountUpdate, ProfileUpdate};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use validator::{Validate, ValidationError};

pub const MIN_PASSWORD_LEN: usize = 8;
const MAX_USERNAME_LEN: usize = 150;

/// Field name to messages, in field order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Keeps the first failed rule of each field, so a blank field reports only
/// that it is required.
impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(source: validator::ValidationErrors) -> Self {
        let mut errors = Self::new();
        for (field, failures) in source.field_errors() {
            if let Some(failure) = failures.first() {
                let message = failure.message.as_deref().unwrap_or(&*failure.code);
                errors.add(&field, message);
            }
        }
        errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Runs the declared rules of `form`.
pub fn check(form: &impl Validate) -> ValidationErrors {
    match form.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors.into(),
    }
}

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn valid_username(username: &str) -> Result<(), ValidationError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(failure("required", "username is required"));
    }
    let allowed = username.chars().count() <= MAX_USERNAME_LEN
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || "@.+-_".contains(c));
    if !allowed {
        return Err(failure(
            "username",
            "150 characters or fewer; letters, digits and @/./+/-/_ only",
        ));
    }
    Ok(())
}

/// Uniqueness is checked by the identity service.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegistrationForm {
    #[validate(custom(function = "valid_username"))]
    pub username: String,
    #[validate(
        length(min = 1, message = "email is required"),
        email(message = "enter a valid email address")
    )]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters long"))]
    pub password: String,
    #[validate(
        length(min = 1, message = "password confirmation is required"),
        must_match(other = "password", message = "passwords do not match")
    )]
    pub password_confirm: String,
    pub phone: String,
    pub default_address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Partial profile edit. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(
        length(min = 1, message = "email is required"),
        email(message = "enter a valid email address")
    )]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub default_address: Option<String>,
}

impl ProfileForm {
    pub fn into_update(self) -> AccountUpdate {
        let profile = (self.phone.is_some() || self.default_address.is_some()).then(|| ProfileUpdate {
            phone: self.phone.map(|p| p.trim().to_string()),
            default_address: self.default_address.map(|a| a.trim().to_string()),
        });
        AccountUpdate {
            email: self.email.map(|e| e.trim().to_string()),
            first_name: self.first_name,
            last_name: self.last_name,
            profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegistrationForm {
        RegistrationForm {
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            password: "s3cret-pass".to_string(),
            password_confirm: "s3cret-pass".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(check(&form()).is_empty());
    }

    #[test]
    fn test_mismatched_passwords() {
        let errors = check(&RegistrationForm {
            password_confirm: "something-else".to_string(),
            ..form()
        });
        assert_eq!(errors.field("password_confirm"), ["passwords do not match"]);
    }

    #[test]
    fn test_all_problems_are_collected() {
        let errors = check(&RegistrationForm {
            username: " ".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            password_confirm: "short".to_string(),
            ..form()
        });

        assert_eq!(errors.field("username"), ["username is required"]);
        assert_eq!(errors.field("email"), ["enter a valid email address"]);
        assert_eq!(
            errors.field("password"),
            ["password must be at least 8 characters long"]
        );
        assert!(errors.field("password_confirm").is_empty());
    }

    #[test]
    fn test_username_charset() {
        let errors = check(&RegistrationForm {
            username: "ana ruiz!".to_string(),
            ..form()
        });
        assert_eq!(errors.field("username").len(), 1);
    }

    #[test]
    fn test_blank_email_reports_required_only() {
        let errors = check(&RegistrationForm {
            email: String::new(),
            password_confirm: String::new(),
            ..form()
        });
        assert_eq!(errors.field("email"), ["email is required"]);
        assert_eq!(
            errors.field("password_confirm"),
            ["password confirmation is required"]
        );
    }

    #[test]
    fn test_profile_form_checks_given_email_only() {
        assert!(check(&ProfileForm::default()).is_empty());

        let errors = check(&ProfileForm {
            email: Some("ana at example".to_string()),
            ..Default::default()
        });
        assert_eq!(errors.field("email"), ["enter a valid email address"]);
    }

    #[test]
    fn test_profile_form_only_touches_given_fields() {
        let update = ProfileForm {
            phone: Some(" 555-0101 ".to_string()),
            ..Default::default()
        }
        .into_update();

        assert!(update.email.is_none());
        let profile = update.profile.unwrap();
        assert_eq!(profile.phone.as_deref(), Some("555-0101"));
        assert!(profile.default_address.is_none());
    }
}
