use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use super::ValueError;

/// Longest accepted address, counted in bytes.
pub const MAX_EMAIL_BYTES: usize = 255;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Email address of a user, stored exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> Result<Self, ValueError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValueError::EmailRequired);
        }
        if value.len() > MAX_EMAIL_BYTES {
            return Err(ValueError::EmailTooLong);
        }
        if !EMAIL_PATTERN.is_match(&value) {
            return Err(ValueError::EmailInvalid);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
