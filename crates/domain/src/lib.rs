//! # buildings-domain
//!
//! Pure domain model for the buildings document store.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Buildings** (the stored document, owned by one company)
//! - Define **Areas** (hierarchical subdivisions nested inside a building)
//! - Define **LIKE patterns** used to search buildings by name
//! - Decode stored JSON documents whatever the depth of their area trees
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod area;
pub mod building;
pub mod color;
pub mod document;
pub mod pattern;
