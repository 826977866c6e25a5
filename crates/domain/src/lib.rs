//! Domain layer for the catalog service.
//!
//! This crate contains:
//! - Domain models (Category, Product, PriceView, PageMeta)
//! - The discount-and-filter engine and its store contract
//! - Domain error types

pub mod models;
pub mod services;
