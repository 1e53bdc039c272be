//! # Form Values
//!
//! Typed representations of posted form bodies. Decoding is handled by
//! axum's `Form` extractor (malformed bodies are rejected with a client
//! error before the handler runs); the validation rules live here.
//!
//! Each form owns its `Validator` explicitly (the `#[serde(skip)]` field),
//! so validation state travels with the form value when a handler
//! re-renders the page on failure, and the user's typed input is never
//! lost.

use crate::validator::{self, Validator, EMAIL_REGEX};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SnippetCreateForm {
    pub title: String,
    pub content: String,
    pub expires: i64,
    #[serde(skip)]
    pub validator: Validator,
}

impl Default for SnippetCreateForm {
    fn default() -> Self {
        SnippetCreateForm {
            title: String::new(),
            content: String::new(),
            expires: 365,
            validator: Validator::default(),
        }
    }
}

impl SnippetCreateForm {
    /// Run all field checks, returning true if the form is valid.
    pub fn validate(&mut self) -> bool {
        self.validator.check_field(
            validator::not_blank(&self.title),
            "title",
            "This field cannot be blank",
        );
        self.validator.check_field(
            validator::max_chars(&self.title, 100),
            "title",
            "This field cannot be more than 100 characters long",
        );
        self.validator.check_field(
            validator::not_blank(&self.content),
            "content",
            "This field cannot be blank",
        );
        self.validator.check_field(
            validator::permitted_value(&self.expires, &[1, 7, 365]),
            "expires",
            "This field must equal 1, 7 or 365",
        );
        self.validator.is_valid()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UserSignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub validator: Validator,
}

impl UserSignupForm {
    pub fn validate(&mut self) -> bool {
        self.validator.check_field(
            validator::not_blank(&self.name),
            "name",
            "This field cannot be blank",
        );
        self.validator.check_field(
            validator::not_blank(&self.email),
            "email",
            "This field cannot be blank",
        );
        self.validator.check_field(
            validator::matches(&self.email, &EMAIL_REGEX),
            "email",
            "This field must be a valid email address",
        );
        self.validator.check_field(
            validator::not_blank(&self.password),
            "password",
            "This field cannot be blank",
        );
        self.validator.check_field(
            validator::min_chars(&self.password, 8),
            "password",
            "This field must be at least 8 characters long",
        );
        self.validator.is_valid()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UserLoginForm {
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub validator: Validator,
}

impl UserLoginForm {
    pub fn validate(&mut self) -> bool {
        self.validator.check_field(
            validator::not_blank(&self.email),
            "email",
            "This field cannot be blank",
        );
        self.validator.check_field(
            validator::matches(&self.email, &EMAIL_REGEX),
            "email",
            "This field must be a valid email address",
        );
        self.validator.check_field(
            validator::not_blank(&self.password),
            "password",
            "This field cannot be blank",
        );
        self.validator.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_form_rejects_overlong_title() {
        let mut form = SnippetCreateForm {
            title: "a".repeat(101),
            content: "some content".to_string(),
            expires: 7,
            validator: Validator::default(),
        };

        assert!(!form.validate());
        assert_eq!(
            form.validator.field_errors.get("title").map(String::as_str),
            Some("This field cannot be more than 100 characters long")
        );
        // Only the title is at fault.
        assert!(!form.validator.field_errors.contains_key("content"));
        assert!(!form.validator.field_errors.contains_key("expires"));
    }

    #[test]
    fn snippet_form_accepts_multibyte_title_at_limit() {
        let mut form = SnippetCreateForm {
            title: "ü".repeat(100),
            content: "some content".to_string(),
            expires: 365,
            validator: Validator::default(),
        };

        assert!(form.validate());
    }

    #[test]
    fn snippet_form_rejects_unknown_expiry() {
        let mut form = SnippetCreateForm {
            title: "a title".to_string(),
            content: "some content".to_string(),
            expires: 30,
            validator: Validator::default(),
        };

        assert!(!form.validate());
        assert!(form.validator.field_errors.contains_key("expires"));
    }

    #[test]
    fn signup_form_checks_email_and_password() {
        let mut form = UserSignupForm {
            name: "Alice".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            validator: Validator::default(),
        };

        assert!(!form.validate());
        assert_eq!(
            form.validator.field_errors.get("email").map(String::as_str),
            Some("This field must be a valid email address")
        );
        assert_eq!(
            form.validator
                .field_errors
                .get("password")
                .map(String::as_str),
            Some("This field must be at least 8 characters long")
        );
    }
}
