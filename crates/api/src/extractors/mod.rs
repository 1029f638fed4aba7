//! Custom Axum extractors.
//!
//! `UserAuth` (defined with its middleware) is extracted here; `ClientIp`
//! feeds the audit trail.

pub mod client_ip;
mod user_auth;

pub use client_ip::ClientIp;
