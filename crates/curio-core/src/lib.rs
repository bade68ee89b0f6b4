//! # curio-core
//!
//! Core types, naming rules, and error types for Curio.
//!
//! This crate provides the foundational types shared across all Curio crates:
//! - Entity structs for every record kind (software, tags, platforms, licenses)
//! - The `EntityKind` enum and `EntityRef` handle used by diagnostics
//! - File naming rules (one record per file, named after the entity)
//! - Cross-cutting error types
//! - JSON Schema export of the on-disk record format

pub mod entities;
pub mod enums;
pub mod errors;
pub mod naming;
pub mod schema;

pub use entities::{Enrichment, License, Platform, Redirect, Release, Software, Tag};
pub use enums::{EntityKind, EntityRef};
pub use errors::CoreError;
