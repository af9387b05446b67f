//! Query methods over the data-store tables.

use std::collections::HashMap;

use suivi_core::analysis::{ActualSaleRow, BudgetRow};
use suivi_shared::FilialeId;

use crate::client::StoreClient;
use crate::error::StoreError;
use crate::reference::ReferenceKind;
use crate::rows::{BudgetRecord, FilialeRecord, ReferenceRecord, SaleRecord};

impl StoreClient {
    /// Fetches budget rows for a year, optionally restricted to one
    /// filiale.
    pub async fn fetch_budgets(
        &self,
        year: i32,
        filiale: Option<FilialeId>,
    ) -> Result<Vec<BudgetRow>, StoreError> {
        let mut query = vec![
            ("select", "*".to_string()),
            ("annee", format!("eq.{year}")),
        ];
        if let Some(filiale) = filiale {
            query.push(("filiale_id", format!("eq.{filiale}")));
        }

        let records: Vec<BudgetRecord> = self.fetch_rows("budgets", &query).await?;
        Ok(records.into_iter().map(BudgetRow::from).collect())
    }

    /// Fetches actual sales within the year's date boundaries, optionally
    /// restricted to one filiale.
    pub async fn fetch_sales(
        &self,
        year: i32,
        filiale: Option<FilialeId>,
    ) -> Result<Vec<ActualSaleRow>, StoreError> {
        let next_year = year + 1;
        let mut query = vec![
            ("select", "*".to_string()),
            ("date_vente", format!("gte.{year}-01-01")),
            ("date_vente", format!("lt.{next_year}-01-01")),
        ];
        if let Some(filiale) = filiale {
            query.push(("filiale_id", format!("eq.{filiale}")));
        }

        let records: Vec<SaleRecord> = self.fetch_rows("ventes", &query).await?;
        Ok(records.into_iter().map(ActualSaleRow::from).collect())
    }

    /// Fetches the filiale id-to-name mapping.
    pub async fn fetch_filiales(&self) -> Result<HashMap<FilialeId, String>, StoreError> {
        let query = vec![("select", "*".to_string())];
        let records: Vec<FilialeRecord> = self.fetch_rows("filiales", &query).await?;
        Ok(records
            .into_iter()
            .map(|record| (record.id, record.nom))
            .collect())
    }

    /// Fetches one reference list (brand, model, territory, vendor, or
    /// filiale labels).
    pub async fn fetch_reference(&self, kind: ReferenceKind) -> Result<Vec<String>, StoreError> {
        let query = vec![("select", "nom".to_string()), ("order", "nom".to_string())];
        let records: Vec<ReferenceRecord> = self.fetch_rows(kind.table(), &query).await?;
        Ok(records.into_iter().map(|record| record.nom).collect())
    }
}
