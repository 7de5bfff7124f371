use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::value_objects::ValueError;

/// Boxed cause carried inside a [`DomainError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Classification of a failure, independent of its message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidInput,
    Unauthorized,
    Forbidden,
    Internal,
}

impl ErrorKind {
    /// Kinds in the order they are tested when classifying an error chain.
    const PRIORITY: [ErrorKind; 5] = [
        ErrorKind::NotFound,
        ErrorKind::Conflict,
        ErrorKind::InvalidInput,
        ErrorKind::Unauthorized,
        ErrorKind::Forbidden,
    ];

    /// Fallback message for an error of this kind.
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "resource not found",
            ErrorKind::Conflict => "resource conflict",
            ErrorKind::InvalidInput => "invalid input",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::Internal => "internal error",
        }
    }

    /// Classify `err` by walking its `source()` chain.
    ///
    /// When the chain holds several kinds, the first in NotFound, Conflict, InvalidInput,
    /// Unauthorized, Forbidden order wins. A chain with none of them is `Internal`.
    pub fn of(err: &(dyn StdError + 'static)) -> ErrorKind {
        Self::PRIORITY
            .into_iter()
            .find(|kind| is_kind(err, *kind))
            .unwrap_or(ErrorKind::Internal)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Whether any error in `err`'s source chain is of `kind`.
pub fn is_kind(err: &(dyn StdError + 'static), kind: ErrorKind) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if own_kind(e) == Some(kind) {
            return true;
        }
        current = e.source();
    }
    false
}

fn own_kind(err: &(dyn StdError + 'static)) -> Option<ErrorKind> {
    if let Some(domain) = err.downcast_ref::<DomainError>() {
        return Some(domain.kind);
    }
    if let Some(user) = err.downcast_ref::<UserError>() {
        return match user {
            UserError::Domain(domain) => Some(domain.kind),
            UserError::Validation(_) | UserError::Value(_) => Some(ErrorKind::InvalidInput),
            UserError::Database(_) => None,
        };
    }
    if err.is::<ValidationError>() || err.is::<ValueError>() {
        return Some(ErrorKind::InvalidInput);
    }
    None
}

/// A classified failure raised by a domain operation.
///
/// Display falls back from `message`, to the cause's message, to the kind's message.
#[derive(Debug)]
pub struct DomainError {
    pub kind: ErrorKind,
    pub entity: String,
    pub op: String,
    pub message: String,
    cause: Option<BoxError>,
}

impl DomainError {
    pub fn new(kind: ErrorKind, entity: impl Into<String>, op: impl Into<String>) -> Self {
        Self {
            kind,
            entity: entity.into(),
            op: op.into(),
            message: String::new(),
            cause: None,
        }
    }

    /// `"<entity> not found"`.
    pub fn not_found(entity: impl Into<String>, op: impl Into<String>) -> Self {
        let entity = entity.into();
        let message = format!("{entity} not found");
        Self::new(ErrorKind::NotFound, entity, op).with_message(message)
    }

    /// `"<entity> already exists"`, keeping the underlying failure as the cause.
    pub fn conflict(
        entity: impl Into<String>,
        op: impl Into<String>,
        cause: impl Into<BoxError>,
    ) -> Self {
        let entity = entity.into();
        let message = format!("{entity} already exists");
        Self::new(ErrorKind::Conflict, entity, op)
            .with_message(message)
            .with_cause(cause)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Wrap this error under another operation name. The kind and message carry over.
    pub fn context(self, op: impl Into<String>) -> Self {
        let kind = self.kind;
        let entity = self.entity.clone();
        Self::new(kind, entity, op).with_cause(self)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            f.write_str(&self.message)
        } else if let Some(cause) = &self.cause {
            write!(f, "{cause}")
        } else {
            f.write_str(self.kind.message())
        }
    }
}

impl StdError for DomainError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_deref().map(|e| e as &(dyn StdError + 'static))
    }
}

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Ordered collection of field failures for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, code: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, code, message));
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// `Err(self)` when anything was collected, `Ok(())` otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.first() {
            Some(first) => f.write_str(&first.message),
            None => f.write_str("validation error"),
        }
    }
}

impl StdError for ValidationError {}

/// Error returned by every users-domain operation.
#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl UserError {
    /// Classification used to pick the HTTP status.
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::Domain(e) => ErrorKind::of(e),
            UserError::Validation(_) | UserError::Value(_) => ErrorKind::InvalidInput,
            UserError::Database(_) => ErrorKind::Internal,
        }
    }

    /// Record the operation that propagated this error, preserving its kind.
    pub fn context(self, op: &str) -> Self {
        match self {
            UserError::Domain(e) => UserError::Domain(e.context(op)),
            other => other,
        }
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == kind
    }
}

pub type UserResult<T> = Result<T, UserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Wrapped(BoxError);

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "context: {}", self.0)
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(self.0.as_ref())
        }
    }

    #[test]
    fn test_not_found_message_and_kind() {
        let err = DomainError::not_found("user", "FindByID");
        assert_eq!(err.to_string(), "user not found");
        assert!(is_kind(&err, ErrorKind::NotFound));
        assert!(!is_kind(&err, ErrorKind::Conflict));
        assert_eq!(err.op, "FindByID");
    }

    #[test]
    fn test_conflict_keeps_cause() {
        let err = DomainError::conflict("user", "Save", "duplicate key");
        assert_eq!(err.to_string(), "user already exists");
        assert_eq!(err.source().unwrap().to_string(), "duplicate key");
        assert_eq!(ErrorKind::of(&err), ErrorKind::Conflict);
    }

    #[test]
    fn test_kind_survives_wrapping() {
        let wrapped = Wrapped(Box::new(DomainError::not_found("user", "FindByID")));
        assert_eq!(wrapped.to_string(), "context: user not found");
        assert!(is_kind(&wrapped, ErrorKind::NotFound));
        assert_eq!(ErrorKind::of(&wrapped), ErrorKind::NotFound);
    }

    #[test]
    fn test_context_preserves_kind_and_message() {
        let err = DomainError::not_found("user", "FindByID").context("DeleteUser");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.op, "DeleteUser");
        assert_eq!(err.to_string(), "user not found");
    }

    #[test]
    fn test_display_falls_back_to_kind_message() {
        let err = DomainError::new(ErrorKind::Forbidden, "user", "Delete");
        assert_eq!(err.to_string(), "forbidden");
    }

    #[test]
    fn test_classification_priority() {
        // An internal error wrapping a conflict is still a conflict.
        let inner = DomainError::conflict("user", "Save", "duplicate key");
        let outer = DomainError::new(ErrorKind::Internal, "user", "Update").with_cause(inner);
        assert_eq!(ErrorKind::of(&outer), ErrorKind::Conflict);

        // NotFound outranks InvalidInput when both appear in the chain.
        let outer = DomainError::new(ErrorKind::InvalidInput, "user", "Update")
            .with_cause(DomainError::not_found("user", "FindByID"));
        assert_eq!(ErrorKind::of(&outer), ErrorKind::NotFound);
    }

    #[test]
    fn test_unclassified_error_is_internal() {
        let err = std::io::Error::other("disk on fire");
        assert_eq!(ErrorKind::of(&err), ErrorKind::Internal);
    }

    #[test]
    fn test_value_errors_are_invalid_input() {
        let wrapped = Wrapped(Box::new(ValueError::NameTooLong));
        assert_eq!(ErrorKind::of(&wrapped), ErrorKind::InvalidInput);
        assert_eq!(UserError::from(ValueError::InvalidId).kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_validation_error_collects_in_order() {
        let mut v = ValidationError::new();
        assert!(!v.has_errors());
        assert_eq!(v.to_string(), "validation error");

        v.add("name", "required", "name is required");
        v.push(ValueError::EmailInvalid.to_field_error("email"));

        assert!(v.has_errors());
        assert_eq!(v.errors().len(), 2);
        assert_eq!(v.errors()[0].field, "name");
        assert_eq!(v.errors()[1].code, "invalid_format");
        assert_eq!(v.to_string(), "name is required");
        assert!(v.clone().into_result().is_err());
        assert!(ValidationError::new().into_result().is_ok());
    }

    #[test]
    fn test_user_error_kinds() {
        assert_eq!(
            UserError::from(DomainError::not_found("user", "FindByID")).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(UserError::from(ValidationError::new()).kind(), ErrorKind::InvalidInput);
        assert_eq!(
            UserError::from(sea_orm::DbErr::Custom("boom".to_string())).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_user_error_context_keeps_kind() {
        let err = UserError::from(DomainError::not_found("user", "FindByID")).context("GetUser");
        assert!(err.is(ErrorKind::NotFound));
        assert_eq!(err.to_string(), "user not found");
    }

    #[test]
    fn test_user_error_is_classified_inside_other_chains() {
        let wrapped = Wrapped(Box::new(UserError::from(DomainError::conflict(
            "user", "Save", "dup",
        ))));
        assert_eq!(ErrorKind::of(&wrapped), ErrorKind::Conflict);
    }
}
