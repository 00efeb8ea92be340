//! Contact form validation.
//!
//! Checks run in a fixed order and stop at the first failure. A form that
//! passes comes back as the trimmed [`Inquiry`] ready for the store.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::models::{ContactForm, Inquiry};

pub const NAME_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 255;
pub const PHONE_MAX_CHARS: usize = 30;
pub const MESSAGE_MAX_CHARS: usize = 1000;

lazy_static! {
    static ref EMAIL_SHAPE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// First failing check. `Display` is the message returned to the caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    // Same text as any other rejected submission, the honeypot stays hidden
    #[error("Invalid submission")]
    Honeypot,

    #[error("Name is required")]
    NameRequired,

    #[error("Name must be between 1 and 100 characters")]
    NameLength,

    #[error("Email is required")]
    EmailRequired,

    #[error("Please enter a valid email address")]
    EmailInvalid,

    #[error("Phone number is too long")]
    PhoneTooLong,

    #[error("Message is required")]
    MessageRequired,

    #[error("Message must be between 1 and 1000 characters")]
    MessageLength,
}

// Browser-side lengths: UTF-16 code units, so astral characters count twice
fn char_len(value: &str) -> usize {
    value.encode_utf16().count()
}

// Missing and empty strings are both "required" failures
fn required(value: Option<&str>, missing: ValidationError) -> Result<&str, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(missing),
    }
}

fn bounded(value: &str, max: usize, err: ValidationError) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    let len = char_len(trimmed);
    if len == 0 || len > max {
        return Err(err);
    }
    Ok(trimmed)
}

pub fn validate(form: &ContactForm) -> Result<Inquiry, ValidationError> {
    if form.honeypot.as_deref().is_some_and(|h| !h.is_empty()) {
        return Err(ValidationError::Honeypot);
    }

    let name = required(form.name.as_deref(), ValidationError::NameRequired)?;
    let name = bounded(name, NAME_MAX_CHARS, ValidationError::NameLength)?;

    let email = required(form.email.as_deref(), ValidationError::EmailRequired)?.trim();
    if !EMAIL_SHAPE.is_match(email) || char_len(email) > EMAIL_MAX_CHARS {
        return Err(ValidationError::EmailInvalid);
    }

    // length is checked on the raw value, format is not enforced
    let phone = form
        .phone
        .as_deref()
        .filter(|p| !p.trim().is_empty());
    if let Some(raw) = phone {
        if char_len(raw) > PHONE_MAX_CHARS {
            return Err(ValidationError::PhoneTooLong);
        }
    }

    let message = required(form.message.as_deref(), ValidationError::MessageRequired)?;
    let message = bounded(message, MESSAGE_MAX_CHARS, ValidationError::MessageLength)?;

    Ok(Inquiry {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.map(|p| p.trim().to_string()),
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            phone: Some("+1234567890".to_string()),
            message: Some("Interested in bots".to_string()),
            honeypot: None,
        }
    }

    #[test]
    fn accepts_and_trims_valid_form() {
        let form = ContactForm {
            name: Some("  Jane Doe ".to_string()),
            email: Some(" jane@example.com\n".to_string()),
            phone: Some(" +1234567890 ".to_string()),
            message: Some("\tInterested in bots ".to_string()),
            honeypot: Some(String::new()),
        };

        let inquiry = validate(&form).unwrap();
        assert_eq!(
            inquiry,
            Inquiry {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone: Some("+1234567890".to_string()),
                message: "Interested in bots".to_string(),
            }
        );
    }

    #[test]
    fn honeypot_wins_over_everything() {
        let form = ContactForm {
            honeypot: Some("spam".to_string()),
            name: None,
            ..valid_form()
        };
        assert_eq!(validate(&form), Err(ValidationError::Honeypot));
        assert_eq!(ValidationError::Honeypot.to_string(), "Invalid submission");
    }

    #[test]
    fn name_bounds() {
        let with_name = |name: &str| ContactForm {
            name: Some(name.to_string()),
            ..valid_form()
        };

        assert_eq!(validate(&ContactForm { name: None, ..valid_form() }), Err(ValidationError::NameRequired));
        assert_eq!(validate(&with_name("")), Err(ValidationError::NameRequired));
        assert_eq!(validate(&with_name("   ")), Err(ValidationError::NameLength));
        assert_eq!(validate(&with_name(&"x".repeat(101))), Err(ValidationError::NameLength));
        assert!(validate(&with_name("x")).is_ok());
        assert!(validate(&with_name(&"x".repeat(100))).is_ok());
        assert!(validate(&with_name(&format!("  {}  ", "x".repeat(100)))).is_ok());
    }

    #[test]
    fn accented_characters_count_once() {
        let form = ContactForm {
            name: Some("é".repeat(100)),
            ..valid_form()
        };
        assert!(validate(&form).is_ok());
    }

    #[test]
    fn name_length_counts_utf16_units() {
        let with_name = |name: String| ContactForm {
            name: Some(name),
            ..valid_form()
        };

        assert!(validate(&with_name("😀".repeat(50))).is_ok());
        assert_eq!(validate(&with_name("😀".repeat(60))), Err(ValidationError::NameLength));
    }

    #[test]
    fn email_shape() {
        let with_email = |email: &str| ContactForm {
            email: Some(email.to_string()),
            ..valid_form()
        };

        assert!(validate(&with_email("a@b.co")).is_ok());
        assert!(validate(&with_email("  a@b.co  ")).is_ok());
        assert!(validate(&with_email("first.last@mail.example.org")).is_ok());
        assert_eq!(validate(&with_email("")), Err(ValidationError::EmailRequired));
        assert_eq!(validate(&with_email("not-an-email")), Err(ValidationError::EmailInvalid));
        assert_eq!(validate(&with_email("a@b")), Err(ValidationError::EmailInvalid));
        assert_eq!(validate(&with_email("a b@c.de")), Err(ValidationError::EmailInvalid));
        assert_eq!(validate(&with_email("a@@b.co")), Err(ValidationError::EmailInvalid));

        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(validate(&with_email(&long)), Err(ValidationError::EmailInvalid));
    }

    #[test]
    fn phone_is_optional_but_bounded() {
        let with_phone = |phone: Option<&str>| ContactForm {
            phone: phone.map(str::to_string),
            ..valid_form()
        };

        assert_eq!(validate(&with_phone(None)).unwrap().phone, None);
        assert_eq!(validate(&with_phone(Some(""))).unwrap().phone, None);
        assert_eq!(validate(&with_phone(Some("   "))).unwrap().phone, None);
        assert!(validate(&with_phone(Some(&"1".repeat(30)))).is_ok());
        assert_eq!(
            validate(&with_phone(Some(&"1".repeat(31)))),
            Err(ValidationError::PhoneTooLong)
        );
        // raw length, surrounding whitespace included
        let padded = format!("  {}  ", "1".repeat(28));
        assert_eq!(validate(&with_phone(Some(&padded))), Err(ValidationError::PhoneTooLong));
    }

    #[test]
    fn message_bounds() {
        let with_message = |message: &str| ContactForm {
            message: Some(message.to_string()),
            ..valid_form()
        };

        assert_eq!(validate(&with_message("")), Err(ValidationError::MessageRequired));
        assert_eq!(validate(&with_message(" \n ")), Err(ValidationError::MessageLength));
        assert_eq!(
            validate(&with_message(&"m".repeat(1001))),
            Err(ValidationError::MessageLength)
        );
        assert!(validate(&with_message("m")).is_ok());
        assert!(validate(&with_message(&"m".repeat(1000))).is_ok());
    }

    #[test]
    fn first_failure_is_reported() {
        let form = ContactForm {
            name: Some(String::new()),
            email: Some("bad".to_string()),
            message: None,
            ..valid_form()
        };
        assert_eq!(validate(&form), Err(ValidationError::NameRequired));
    }
}
