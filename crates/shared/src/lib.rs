//! Shared utilities and common types for the catalog service.
//!
//! This crate provides functionality used across all other crates:
//! - Offset pagination arithmetic
//! - Lenient query parameter parsing and common validation logic

pub mod pagination;
pub mod validation;
