//! Self-validating value types. A value that exists has passed its invariants.

mod email;
mod user_id;
mod user_name;

pub use email::{Email, MAX_EMAIL_BYTES};
pub use user_id::UserId;
pub use user_name::{MAX_NAME_CHARS, UserName};

use thiserror::Error;

use crate::error::FieldError;

/// Field error code for a missing value.
pub const CODE_REQUIRED: &str = "required";
/// Field error code for a value over its length limit.
pub const CODE_TOO_LONG: &str = "too_long";
/// Field error code for a value in the wrong shape.
pub const CODE_INVALID_FORMAT: &str = "invalid_format";

/// Why a raw value was rejected by a value-object constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("name is required")]
    NameRequired,

    #[error("name must be 100 characters or less")]
    NameTooLong,

    #[error("email is required")]
    EmailRequired,

    #[error("email must be 255 characters or less")]
    EmailTooLong,

    #[error("email format is invalid")]
    EmailInvalid,

    #[error("invalid user id")]
    InvalidId,
}

impl ValueError {
    /// Stable field error code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            ValueError::NameRequired | ValueError::EmailRequired => CODE_REQUIRED,
            ValueError::NameTooLong | ValueError::EmailTooLong => CODE_TOO_LONG,
            ValueError::EmailInvalid | ValueError::InvalidId => CODE_INVALID_FORMAT,
        }
    }

    /// Attach this failure to `field`.
    pub fn to_field_error(&self, field: &str) -> FieldError {
        FieldError::new(field, self.code(), self.to_string())
    }
}
