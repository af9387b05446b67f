//! Wire row types for the data-store tables.
//!
//! Column names are the store's French schema; conversions map them onto
//! the core domain types. Deserialization stays lenient: free-text dates
//! and nullable numerics are carried as-is for the core to interpret.

use rust_decimal::Decimal;
use serde::Deserialize;
use suivi_core::analysis::{ActualSaleRow, BudgetRow};
use suivi_shared::FilialeId;

/// One row of the `budgets` table.
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetRecord {
    /// Owning filiale.
    pub filiale_id: FilialeId,
    /// Budgeted year.
    pub annee: i32,
    /// Territory label.
    pub territoire: Option<String>,
    /// Product label.
    pub produit: Option<String>,
    /// Accounting-plan label.
    pub plan_compte: Option<String>,
    /// Manufacturer label.
    pub constructeur: Option<String>,
    /// January amount.
    pub janvier: Option<Decimal>,
    /// February amount.
    pub fevrier: Option<Decimal>,
    /// March amount.
    pub mars: Option<Decimal>,
    /// April amount.
    pub avril: Option<Decimal>,
    /// May amount.
    pub mai: Option<Decimal>,
    /// June amount.
    pub juin: Option<Decimal>,
    /// July amount.
    pub juillet: Option<Decimal>,
    /// August amount.
    pub aout: Option<Decimal>,
    /// September amount.
    pub septembre: Option<Decimal>,
    /// October amount.
    pub octobre: Option<Decimal>,
    /// November amount.
    pub novembre: Option<Decimal>,
    /// December amount.
    pub decembre: Option<Decimal>,
    /// Stored year-end cumulative total.
    pub cumul: Option<Decimal>,
}

impl From<BudgetRecord> for BudgetRow {
    fn from(record: BudgetRecord) -> Self {
        Self {
            filiale_id: record.filiale_id,
            year: record.annee,
            territory: record.territoire,
            product: record.produit,
            plan_label: record.plan_compte,
            manufacturer: record.constructeur,
            months: [
                record.janvier,
                record.fevrier,
                record.mars,
                record.avril,
                record.mai,
                record.juin,
                record.juillet,
                record.aout,
                record.septembre,
                record.octobre,
                record.novembre,
                record.decembre,
            ],
            total: record.cumul,
        }
    }
}

/// One row of the `ventes` table.
#[derive(Debug, Clone, Deserialize)]
pub struct SaleRecord {
    /// Filiale the sale belongs to.
    pub filiale_id: FilialeId,
    /// Raw sale date.
    pub date_vente: String,
    /// Brand label.
    pub marque: Option<String>,
    /// Sale amount.
    pub montant: Option<Decimal>,
}

impl From<SaleRecord> for ActualSaleRow {
    fn from(record: SaleRecord) -> Self {
        Self {
            filiale_id: record.filiale_id,
            date: record.date_vente,
            brand: record.marque,
            amount: record.montant,
        }
    }
}

/// One row of the `filiales` table.
#[derive(Debug, Clone, Deserialize)]
pub struct FilialeRecord {
    /// Filiale identifier.
    pub id: FilialeId,
    /// Display name.
    pub nom: String,
}

/// One row of a reference-list table (marques, modeles, territoires,
/// vendeurs).
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceRecord {
    /// Display label.
    pub nom: String,
}
