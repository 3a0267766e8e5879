use regex::Regex;
use std::sync::LazyLock;

use crate::{FormData, SubmitError};

pub const NAME_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 2000;

static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").unwrap());
static RE_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(https?://|www\.)").unwrap());

/// Field checks of a submit attempt, in the order they are reported.
pub fn validate(form: &FormData) -> Result<(), SubmitError> {
    if form.name.trim().chars().count() < NAME_MIN_CHARS {
        return Err(SubmitError::InvalidName);
    }

    if !is_valid_email(&form.email) {
        return Err(SubmitError::InvalidEmail);
    }

    if form.message.trim().chars().count() < MESSAGE_MIN_CHARS {
        return Err(SubmitError::MessageTooShort);
    }

    // raw length, surrounding whitespace included
    if form.message.chars().count() > MESSAGE_MAX_CHARS {
        return Err(SubmitError::MessageTooLong);
    }

    if !form.company.trim().is_empty() {
        tracing::debug!("honeypot field filled");
        return Err(SubmitError::SpamDetected);
    }

    if contains_link(&form.message) {
        return Err(SubmitError::LinksNotAllowed);
    }

    Ok(())
}

pub fn is_valid_email(value: &str) -> bool {
    RE_EMAIL.is_match(value)
}

pub fn contains_link(value: &str) -> bool {
    RE_LINK.is_match(value)
}
