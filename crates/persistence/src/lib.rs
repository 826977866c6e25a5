//! Persistence layer for the catalog service.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - Fixture seeding

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
pub mod seed;
