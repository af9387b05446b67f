//! Hosted data-store access layer for Suivi.
//!
//! The external store exposes a PostgREST-style query surface over the
//! budget, sales, and reference tables. This crate provides:
//! - `StoreClient` - authenticated HTTP access with a per-request timeout
//! - typed wire rows mapped onto the core domain types
//! - `AnalysisSession` - fetch coordination with a stale-response guard
//! - `ReferenceCache` - session-scoped read-through reference lists

pub mod client;
pub mod error;
pub mod queries;
pub mod reference;
pub mod rows;
pub mod session;

pub use client::StoreClient;
pub use error::StoreError;
pub use reference::{ReferenceCache, ReferenceKind};
pub use session::{AnalysisInputs, AnalysisSession};
