use std::fmt;

use super::ValueError;

/// Longest accepted name, counted in Unicode scalar values.
pub const MAX_NAME_CHARS: usize = 100;

/// Display name of a user: non-empty, at most [`MAX_NAME_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    pub fn new(value: impl Into<String>) -> Result<Self, ValueError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValueError::NameRequired);
        }
        if value.chars().count() > MAX_NAME_CHARS {
            return Err(ValueError::NameTooLong);
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

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_names() {
        for name in ["a".to_string(), "田中太郎".to_string(), "a".repeat(100)] {
            let parsed = UserName::new(name.clone()).unwrap();
            assert_eq!(parsed.as_str(), name);
        }
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // 100 three-byte characters is 300 bytes but still within the limit.
        assert!(UserName::new("あ".repeat(100)).is_ok());
        assert_eq!(UserName::new("あ".repeat(101)), Err(ValueError::NameTooLong));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(UserName::new(""), Err(ValueError::NameRequired));
    }

    #[test]
    fn test_rejects_too_long() {
        assert_eq!(UserName::new("a".repeat(101)), Err(ValueError::NameTooLong));
    }

    #[test]
    fn test_equality_is_by_value() {
        assert_eq!(UserName::new("Alice").unwrap(), UserName::new("Alice").unwrap());
        assert_ne!(UserName::new("Alice").unwrap(), UserName::new("alice").unwrap());
    }
}
