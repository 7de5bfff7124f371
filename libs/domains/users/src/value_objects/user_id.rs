use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use super::ValueError;

/// Identifier of a user. Always a well-formed UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(Uuid);

impl UserId {
    /// Fresh random (v4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier supplied from outside, e.g. a path segment.
    pub fn parse(s: &str) -> Result<Self, ValueError> {
        Uuid::parse_str(s).map(Self).map_err(|_| ValueError::InvalidId)
    }

    /// Wrap a UUID read back from storage.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for UserId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}
