//! # Form Validation
//!
//! A pure accumulator of validation errors plus the predicates used as
//! check conditions. No I/O, no shared state: each form submission gets a
//! fresh `Validator` and the handler inspects it after running its checks.
//!
//! Field errors are keyed by input name and the first error recorded for a
//! key wins; later failures for the same field are ignored. Non-field
//! errors (e.g. "Email or Password is incorrect") apply to the form as a
//! whole.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Sanity check for email shape (the WHATWG HTML5 email pattern).
pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email regex is valid")
});

#[derive(Debug, Default, Clone)]
pub struct Validator {
    pub non_field_errors: Vec<String>,
    pub field_errors: HashMap<String, String>,
}

impl Validator {
    /// True iff no field errors and no non-field errors exist.
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty() && self.non_field_errors.is_empty()
    }

    /// Record `message` under `key`, unless that key already has a
    /// recorded message (first error wins).
    pub fn add_field_error(&mut self, key: &str, message: &str) {
        self.field_errors
            .entry(key.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Record an error that isn't attributable to a single input.
    pub fn add_non_field_error(&mut self, message: &str) {
        self.non_field_errors.push(message.to_string());
    }

    /// Record a field error only if the check did not hold.
    pub fn check_field(&mut self, ok: bool, key: &str, message: &str) {
        if !ok {
            self.add_field_error(key, message);
        }
    }
}

/// True if the value contains more than just whitespace.
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True if the value contains no more than `max` characters.
/// Counted in characters, not bytes, so multi-byte input is measured the
/// way a user would count it.
pub fn max_chars(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

/// True if the value contains at least `min` characters.
pub fn min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// True if the value is in the list of permitted values.
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}

/// True if the value matches the provided compiled regex.
pub fn matches(value: &str, rx: &Regex) -> bool {
    rx.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_field_error_wins() {
        let mut v = Validator::default();
        v.check_field(false, "title", "This field cannot be blank");
        v.check_field(false, "title", "This field cannot be more than 100 characters long");

        assert_eq!(v.field_errors.len(), 1);
        assert_eq!(
            v.field_errors.get("title").map(String::as_str),
            Some("This field cannot be blank")
        );
        assert!(!v.is_valid());
    }

    #[test]
    fn passing_checks_record_nothing() {
        let mut v = Validator::default();
        v.check_field(true, "title", "This field cannot be blank");

        assert!(v.is_valid());
        assert!(v.field_errors.is_empty());
    }

    #[test]
    fn non_field_errors_invalidate() {
        let mut v = Validator::default();
        v.add_non_field_error("Email or Password is incorrect");

        assert!(!v.is_valid());
        assert_eq!(v.non_field_errors.len(), 1);
    }

    #[test]
    fn length_checks_count_chars_not_bytes() {
        // 100 two-byte characters: 200 bytes, but 100 characters.
        let input = "ü".repeat(100);
        assert!(max_chars(&input, 100));
        assert!(!max_chars(&"ü".repeat(101), 100));

        assert!(min_chars("паролль8", 8));
        assert!(!min_chars("пароль", 8));
    }

    #[test]
    fn blank_means_whitespace_only() {
        assert!(!not_blank("   \t\n"));
        assert!(!not_blank(""));
        assert!(not_blank("  x  "));
    }

    #[test]
    fn permitted_value_membership() {
        assert!(permitted_value(&7, &[1, 7, 365]));
        assert!(!permitted_value(&30, &[1, 7, 365]));
        assert!(permitted_value(&"b", &["a", "b"]));
    }

    #[test]
    fn email_shape() {
        assert!(matches("alice@example.com", &EMAIL_REGEX));
        assert!(matches("a.b+c@sub.example.co.uk", &EMAIL_REGEX));
        assert!(!matches("alice@", &EMAIL_REGEX));
        assert!(!matches("@example.com", &EMAIL_REGEX));
        assert!(!matches("not-an-email", &EMAIL_REGEX));
    }
}
