//! Domain layer for the asset ledger backend.
//!
//! This crate contains:
//! - Domain models (Base, EquipmentType, Asset, movements, AssetBalance)
//! - Business rules for movements and base-scoped access
//! - Audit event construction

pub mod models;
pub mod services;
