//! # buildings-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** that storage adapters must implement:
//!   - `BuildingRepository` — upsert, lookups and the named building queries
//! - Define the **driving/inbound** use-case facade:
//!   - `BuildingService` — validation before save, page-index translation
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `buildings-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
