//! Contact form validation.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Shortest accepted message, after trimming.
pub const MIN_MESSAGE_LEN: usize = 10;

/// Form field an error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    /// The email input
    Email,
    /// The message textarea
    Message,
}

/// A rejected submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Offending field
    pub field: FormField,
    /// User-facing message
    pub message: &'static str,
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

/// Checks a submission; the email is checked first and only the first
/// problem is reported.
pub fn validate_contact(email: &str, message: &str) -> Result<(), FieldError> {
    if !email_pattern().is_match(email) {
        return Err(FieldError {
            field: FormField::Email,
            message: "Please enter a valid email address",
        });
    }

    if message.trim().chars().count() < MIN_MESSAGE_LEN {
        return Err(FieldError {
            field: FormField::Message,
            message: "Message must be at least 10 characters long",
        });
    }

    Ok(())
}
