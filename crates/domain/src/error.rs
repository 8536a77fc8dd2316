//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`BuildingsError`] via `From`.

use std::error::Error;

/// Top-level error returned by services and repository ports.
#[derive(Debug, thiserror::Error)]
pub enum BuildingsError {
    /// The input violates a domain invariant. Raised before any write.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested document does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The storage backend failed. Propagated unchanged, never retried.
    #[error("storage error")]
    Storage(#[source] Box<dyn Error + Send + Sync>),
}

/// A domain invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("id must not be empty")]
    EmptyId,

    #[error("name must not be empty")]
    EmptyName,

    #[error("company id must not be empty")]
    EmptyCompanyId,
}

/// A lookup matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of document that was looked up.
    pub entity: &'static str,
    /// Key (or query description) that matched nothing.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_top_level_error() {
        let err: BuildingsError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            BuildingsError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_describe_missing_document() {
        let err = NotFoundError {
            entity: "Building",
            id: "building::1".to_string(),
        };
        assert_eq!(err.to_string(), "Building building::1 not found");
    }

    #[test]
    fn should_expose_storage_source() {
        let io = std::io::Error::other("disk full");
        let err = BuildingsError::Storage(Box::new(io));
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("disk full"));
    }
}
