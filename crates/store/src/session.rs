//! Fetch coordination with a stale-response guard.
//!
//! Fetches cannot be cancelled once sent, so a slow response for a
//! viewer's old filter selection could resolve after a fast response for
//! their current one and overwrite fresher results. The session closes
//! that race with a per-viewer request-generation counter: a completed
//! load publishes only if no newer load for the same viewer has started
//! since. Loads from different viewers never supersede each other, and a
//! load without a viewer id is always published.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use moka::future::Cache;
use suivi_core::analysis::{ActualSaleRow, BudgetRow};
use suivi_shared::FilialeId;
use tracing::debug;

use crate::client::StoreClient;
use crate::error::StoreError;

/// Monotonic request-generation counter for one viewer.
#[derive(Debug, Default)]
pub(crate) struct Generation(AtomicU64);

impl Generation {
    /// Starts a new generation, superseding all earlier ones.
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `token` is still the latest generation.
    pub fn is_current(&self, token: u64) -> bool {
        self.0.load(Ordering::SeqCst) == token
    }
}

/// One generation counter per viewer id.
#[derive(Debug)]
pub(crate) struct ViewerGenerations {
    viewers: Cache<String, Arc<Generation>>,
}

impl ViewerGenerations {
    fn new() -> Self {
        Self {
            viewers: Cache::builder().max_capacity(1024).build(),
        }
    }

    /// Starts a new generation for `viewer` and returns its counter and
    /// token.
    pub async fn begin(&self, viewer: &str) -> (Arc<Generation>, u64) {
        let generation = self
            .viewers
            .get_with(viewer.to_string(), async { Arc::new(Generation::default()) })
            .await;
        let token = generation.begin();
        (generation, token)
    }
}

/// Raw inputs of one analysis pass.
#[derive(Debug, Clone)]
pub struct AnalysisInputs {
    /// Budget rows for the selected year.
    pub budgets: Vec<BudgetRow>,
    /// Actual sales within the year's boundaries.
    pub sales: Vec<ActualSaleRow>,
}

/// Coordinates budget and sales fetches for successive filter selections.
#[derive(Debug)]
pub struct AnalysisSession {
    client: Arc<StoreClient>,
    generations: ViewerGenerations,
}

impl AnalysisSession {
    /// Creates a session over a store client.
    #[must_use]
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self {
            client,
            generations: ViewerGenerations::new(),
        }
    }

    /// Loads the analysis inputs for a year and optional filiale.
    ///
    /// `viewer` identifies one open report view; returns `Ok(None)` when
    /// the same viewer started a newer load while this one was in flight,
    /// so the superseded result is discarded instead of overwriting
    /// fresher data. Loads without a viewer id are never discarded.
    pub async fn load(
        &self,
        viewer: Option<&str>,
        year: i32,
        filiale: Option<FilialeId>,
    ) -> Result<Option<AnalysisInputs>, StoreError> {
        let guard = match viewer {
            Some(viewer) => Some(self.generations.begin(viewer).await),
            None => None,
        };

        let budgets = self.client.fetch_budgets(year, filiale).await?;
        let sales = self.client.fetch_sales(year, filiale).await?;

        if let Some((generation, token)) = guard
            && !generation.is_current(token)
        {
            debug!(year, "discarding superseded load");
            return Ok(None);
        }

        Ok(Some(AnalysisInputs { budgets, sales }))
    }
}
