//! Core aggregation and reporting logic for Suivi.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, classification rules, and calculations live here.
//!
//! # Modules
//!
//! - `normalize` - Free-text key normalization (lower-case, accent fold, trim)
//! - `plan` - Accounting plan-type classification (revenue / margin / quantity)
//! - `calendar` - Elapsed-months arithmetic for year-to-date sums
//! - `analysis` - Budget-vs-actuals aggregation and metrics
//! - `export` - CSV and print-ready presenters

pub mod analysis;
pub mod calendar;
pub mod export;
pub mod normalize;
pub mod plan;
