//! Session-scoped read-through cache for reference lists.
//!
//! Brand, model, territory, vendor, and filiale lists are shared across
//! views and change rarely; they are loaded from the store once per
//! session instead of re-fetched on every use.

use std::collections::HashMap;
use std::sync::Arc;

use moka::future::Cache;
use suivi_core::normalize::dedupe_labels;
use suivi_shared::FilialeId;
use tracing::debug;

use crate::client::StoreClient;
use crate::error::StoreError;

/// A cached reference list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// Sale brand labels.
    Marque,
    /// Vehicle model labels.
    Modele,
    /// Territory labels.
    Territoire,
    /// Vendor labels.
    Vendeur,
    /// Filiale display names.
    Filiale,
}

impl ReferenceKind {
    /// Store table backing this list.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Marque => "marques",
            Self::Modele => "modeles",
            Self::Territoire => "territoires",
            Self::Vendeur => "vendeurs",
            Self::Filiale => "filiales",
        }
    }

    /// Parses an API path segment into a kind.
    #[must_use]
    pub fn from_path(segment: &str) -> Option<Self> {
        match segment {
            "marques" => Some(Self::Marque),
            "modeles" => Some(Self::Modele),
            "territoires" => Some(Self::Territoire),
            "vendeurs" => Some(Self::Vendeur),
            "filiales" => Some(Self::Filiale),
            _ => None,
        }
    }
}

/// Read-through cache over the store's reference tables.
#[derive(Debug)]
pub struct ReferenceCache {
    client: Arc<StoreClient>,
    lists: Cache<ReferenceKind, Arc<Vec<String>>>,
    filiales: Cache<(), Arc<HashMap<FilialeId, String>>>,
}

impl ReferenceCache {
    /// Creates a cache over a store client.
    #[must_use]
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self {
            client,
            lists: Cache::builder().max_capacity(8).build(),
            filiales: Cache::builder().max_capacity(1).build(),
        }
    }

    /// Returns a reference list, loading it from the store on first use.
    ///
    /// Concurrent first uses share one load. Labels are de-duplicated on
    /// their normalized key, so variant spellings in the reference tables
    /// collapse to one option.
    pub async fn get(&self, kind: ReferenceKind) -> Result<Arc<Vec<String>>, StoreError> {
        self.lists
            .try_get_with(kind, async {
                debug!(table = kind.table(), "loading reference list");
                let raw = self.client.fetch_reference(kind).await?;
                Ok(Arc::new(dedupe_labels(
                    raw.iter().map(|label| Some(label.as_str())),
                )))
            })
            .await
            .map_err(StoreError::Shared)
    }

    /// Returns the filiale id-to-name mapping, loading it on first use.
    pub async fn filiale_labels(
        &self,
    ) -> Result<Arc<HashMap<FilialeId, String>>, StoreError> {
        self.filiales
            .try_get_with((), async {
                debug!("loading filiale labels");
                Ok(Arc::new(self.client.fetch_filiales().await?))
            })
            .await
            .map_err(StoreError::Shared)
    }
}
