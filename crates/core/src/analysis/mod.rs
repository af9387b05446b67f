//! Budget-vs-actuals aggregation and metrics.
//!
//! The whole analysis is an explicit pure function over already-fetched
//! rows: [`AnalysisService::compute`] takes the budget rows, the actual
//! sales, the active filters, and a reference date, and returns a fresh
//! [`Analysis`]. Nothing is cached or mutated incrementally; callers
//! recompute whenever their inputs change.

pub mod aggregate;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::AnalysisService;
pub use types::{
    ActualSaleRow, Analysis, AnalysisFilters, AnalysisRow, BudgetRow, GroupTotal, MonthlySales,
    SalesKey, TopVariances,
};
