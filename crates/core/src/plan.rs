//! Accounting plan-type classification.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize_key;

/// Classification of a budget line target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    /// Revenue target (chiffre d'affaires).
    Revenue,
    /// Margin target.
    Margin,
    /// Quantity (unit count) target.
    Quantity,
}

impl PlanType {
    /// Classifies a free-text accounting-plan label.
    ///
    /// This is a string-contains heuristic over the normalized label, not an
    /// enum lookup: a label containing "quantite" is a quantity target,
    /// otherwise one containing "marge" is a margin target, and anything
    /// else silently defaults to revenue. The quantity check deliberately
    /// runs first so that mixed labels like "Marge sur quantite" classify
    /// as quantity, matching the established reporting behavior.
    #[must_use]
    pub fn classify(label: Option<&str>) -> Self {
        let key = normalize_key(label);

        if key.contains("quantite") {
            Self::Quantity
        } else if key.contains("marge") {
            Self::Margin
        } else {
            Self::Revenue
        }
    }

    /// Returns the lowercase string form used in API payloads and exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Margin => "margin",
            Self::Quantity => "quantity",
        }
    }

    /// Parses the lowercase string form back into a plan type.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "revenue" => Some(Self::Revenue),
            "margin" => Some(Self::Margin),
            "quantity" => Some(Self::Quantity),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
