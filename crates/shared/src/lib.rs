//! Shared utilities and common types for the asset ledger backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Principal token validation (JWT)
//! - Common validation logic

pub mod jwt;
pub mod validation;
