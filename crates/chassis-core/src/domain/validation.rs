//! Form Validation
//!
//! Login and registration checks run before any request is sent. Errors are
//! keyed by field so the UI can show them next to the input.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid regex"));

pub const MIN_PASSWORD_LEN: usize = 6;

/// Field error shown when the backend reports a duplicate username
pub const USERNAME_EXISTS: &str = "Username already exists";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    Username,
    Password,
    FirstName,
    LastName,
    Email,
    ConfirmPassword,
    CompanyCode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: &str) {
        self.0.insert(field, message.to_string());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Drop one field's error, e.g. when the user edits it
    pub fn clear(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.username.trim().is_empty() {
            errors.insert(FormField::Username, "Please enter username");
        }
        if self.password.trim().is_empty() {
            errors.insert(FormField::Password, "Please enter password");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Title {
    #[default]
    Male,
    Female,
}

impl Title {
    pub fn as_str(&self) -> &'static str {
        match self {
            Title::Male => "Male",
            Title::Female => "Female",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub title: Title,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub company_code: String,
}

/// Body of `POST users/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub title: Title,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub role: String,
}

impl RegistrationForm {
    /// All failing fields are reported at once
    pub fn validate(&self, company_code: &str) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.first_name.trim().is_empty() {
            errors.insert(FormField::FirstName, "First name is required");
        }
        if self.last_name.trim().is_empty() {
            errors.insert(FormField::LastName, "Last name is required");
        }

        if self.email.trim().is_empty() {
            errors.insert(FormField::Email, "Email is required");
        } else if !EMAIL.is_match(&self.email) {
            errors.insert(FormField::Email, "Email is invalid");
        }

        if self.username.trim().is_empty() {
            errors.insert(FormField::Username, "Username is required");
        }

        if self.password.trim().is_empty() {
            errors.insert(FormField::Password, "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(FormField::Password, "Password must be at least 6 characters");
        }

        if self.confirm_password.trim().is_empty() {
            errors.insert(FormField::ConfirmPassword, "Please confirm your password");
        } else if self.confirm_password != self.password {
            errors.insert(FormField::ConfirmPassword, "Passwords do not match");
        }

        if self.company_code != company_code {
            errors.insert(FormField::CompanyCode, "Company code is incorrect");
        }

        errors.into_result()
    }

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            title: self.title,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            role: "User".to_string(),
        }
    }
}

/// Compatibility shim: the backend has no error code for a duplicate
/// username, only a message like `Username "bob" is already taken`.
pub fn is_username_taken(message: &str) -> bool {
    message.contains("Username") && message.contains("already taken")
}

/// Field errors implied by a registration rejection message
pub fn rejection_field_errors(message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if is_username_taken(message) {
        errors.insert(FormField::Username, USERNAME_EXISTS);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            title: Title::Female,
            first_name: "Mei".into(),
            last_name: "Lin".into(),
            email: "mei@hongseng.com.my".into(),
            username: "meilin".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            company_code: "hsgonline".into(),
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = LoginForm::new("  ", "").validate().unwrap_err();
        assert_eq!(errors.get(FormField::Username), Some("Please enter username"));
        assert_eq!(errors.get(FormField::Password), Some("Please enter password"));
        assert!(LoginForm::new("bob", "pw").validate().is_ok());
    }

    #[test]
    fn test_registration_valid() {
        assert!(valid_form().validate("hsgonline").is_ok());
    }

    #[test]
    fn test_registration_reports_every_field() {
        let form = RegistrationForm {
            email: "not-an-email".into(),
            password: "12345".into(),
            confirm_password: "12346".into(),
            company_code: "HSGONLINE".into(),
            ..Default::default()
        };
        let errors = form.validate("hsgonline").unwrap_err();
        assert_eq!(errors.get(FormField::FirstName), Some("First name is required"));
        assert_eq!(errors.get(FormField::LastName), Some("Last name is required"));
        assert_eq!(errors.get(FormField::Email), Some("Email is invalid"));
        assert_eq!(errors.get(FormField::Username), Some("Username is required"));
        assert_eq!(errors.get(FormField::Password), Some("Password must be at least 6 characters"));
        assert_eq!(errors.get(FormField::ConfirmPassword), Some("Passwords do not match"));
        assert_eq!(errors.get(FormField::CompanyCode), Some("Company code is incorrect"));
        assert_eq!(errors.len(), 7);
    }

    #[test]
    fn test_registration_missing_confirmation() {
        let form = RegistrationForm { confirm_password: String::new(), ..valid_form() };
        let errors = form.validate("hsgonline").unwrap_err();
        assert_eq!(errors.get(FormField::ConfirmPassword), Some("Please confirm your password"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_register_request_body() {
        let body = serde_json::to_value(valid_form().to_request()).unwrap();
        assert_eq!(
            body,
            json!({
                "title": "Female",
                "firstName": "Mei",
                "lastName": "Lin",
                "email": "mei@hongseng.com.my",
                "username": "meilin",
                "password": "secret1",
                "role": "User"
            })
        );
    }

    #[test]
    fn test_username_taken_shim() {
        assert!(is_username_taken("Username \"meilin\" is already taken"));
        assert!(!is_username_taken("username is already taken"));
        assert!(!is_username_taken("Email already registered"));

        let errors = rejection_field_errors("Username \"meilin\" is already taken");
        assert_eq!(errors.get(FormField::Username), Some(USERNAME_EXISTS));
        assert!(rejection_field_errors("Server error").is_empty());
    }

    #[test]
    fn test_clear_field_error() {
        let mut errors = LoginForm::new("", "").validate().unwrap_err();
        errors.clear(FormField::Username);
        assert_eq!(errors.get(FormField::Username), None);
        assert!(!errors.is_empty());
    }
}
