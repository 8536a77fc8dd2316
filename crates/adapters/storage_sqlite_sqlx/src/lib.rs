//! # buildings-adapter-storage-sqlite-sqlx
//!
//! `SQLite` document store using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port trait defined in `buildings-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain documents and database rows (JSON text column)
//!
//! ## Dependency rule
//! Depends on `buildings-app` (for port traits) and `buildings-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod building_repo;
mod error;
mod pool;

pub use building_repo::SqliteBuildingRepository;
pub use error::StorageError;
pub use pool::{Config, DEFAULT_MAX_CONNECTIONS, Database};
