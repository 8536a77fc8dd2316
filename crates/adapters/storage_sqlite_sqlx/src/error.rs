//! Storage-specific error type wrapping sqlx errors.

use buildings_domain::error::BuildingsError;
use buildings_domain::id::BuildingId;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// A building could not be serialised before writing.
    #[error("failed to encode building {id}")]
    Encode {
        id: BuildingId,
        #[source]
        source: serde_json::Error,
    },

    /// A stored row no longer decodes into a building.
    #[error("failed to decode stored building {id}")]
    Decode {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for BuildingsError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn should_name_the_building_that_failed_to_decode() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = StorageError::Decode {
            id: "building::1".to_string(),
            source,
        };
        assert_eq!(err.to_string(), "failed to decode stored building building::1");
        assert!(err.source().is_some());
    }

    #[test]
    fn should_convert_into_storage_error() {
        let err: BuildingsError = StorageError::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, BuildingsError::Storage(_)));
    }
}
