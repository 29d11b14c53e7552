//! The fixed catalogue of particle categories tracked by every stage.

use serde::{Deserialize, Serialize};

/// Particle categories in their stable table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Species {
    /// Positive pion.
    PionPlus,
    /// Negative pion.
    PionMinus,
    /// Neutral pion.
    PionZero,
    /// Positive kaon.
    KaonPlus,
    /// Negative kaon.
    KaonMinus,
    /// Proton.
    Proton,
    /// Antiproton.
    AntiProton,
    /// Lambda or Sigma0, which are not separated.
    LambdaOrSigma0,
    /// Anti-Lambda or anti-Sigma0.
    AntiLambdaOrSigma0,
    /// Negative Xi.
    XiMinus,
    /// Anti-Xi (positive charge).
    AntiXiMinus,
    /// Omega, any charge state.
    Omega,
    /// Anti-Omega, any charge state.
    AntiOmega,
    /// Catch-all for every other hadron.
    AnyOther,
}

impl Species {
    /// Every species in table order.
    pub const ALL: [Species; 14] = [
        Species::PionPlus,
        Species::PionMinus,
        Species::PionZero,
        Species::KaonPlus,
        Species::KaonMinus,
        Species::Proton,
        Species::AntiProton,
        Species::LambdaOrSigma0,
        Species::AntiLambdaOrSigma0,
        Species::XiMinus,
        Species::AntiXiMinus,
        Species::Omega,
        Species::AntiOmega,
        Species::AnyOther,
    ];

    /// Number of categories, fallback included.
    pub const COUNT: usize = Self::ALL.len();

    /// Row index of the species in accumulators.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable identifier used in serialized tables.
    pub fn key(self) -> &'static str {
        match self {
            Species::PionPlus => "pion_plus",
            Species::PionMinus => "pion_minus",
            Species::PionZero => "pion_0",
            Species::KaonPlus => "kaon_plus",
            Species::KaonMinus => "kaon_minus",
            Species::Proton => "proton",
            Species::AntiProton => "anti-proton",
            Species::LambdaOrSigma0 => "lambda_or_sigma0",
            Species::AntiLambdaOrSigma0 => "anti_lambda_or_anti_sigma0",
            Species::XiMinus => "Xi_minus",
            Species::AntiXiMinus => "anti_Xi_minus",
            Species::Omega => "Omega",
            Species::AntiOmega => "anti_Omega",
            Species::AnyOther => "any_other",
        }
    }

    /// Column label used in text tables (PDG-like codes where they exist).
    pub fn label(self) -> &'static str {
        match self {
            Species::PionPlus => "211",
            Species::PionMinus => "-211",
            Species::PionZero => "111",
            Species::KaonPlus => "321",
            Species::KaonMinus => "-321",
            Species::Proton => "2212",
            Species::AntiProton => "-2212",
            Species::LambdaOrSigma0 => "L+S0",
            Species::AntiLambdaOrSigma0 => "a(L+S0)",
            Species::XiMinus => "Xi-",
            Species::AntiXiMinus => "aXi",
            Species::Omega => "Om",
            Species::AntiOmega => "aOm",
            Species::AnyOther => "any",
        }
    }

    /// Whether this is the catch-all category.
    pub fn is_fallback(self) -> bool {
        self == Species::AnyOther
    }
}

/// One row of a serialized species table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesEntry {
    /// Stable identifier (`pion_plus`, `anti-proton`, ...).
    pub key: String,
    /// Row index in the accumulator.
    pub index: usize,
    /// Display label for table headers.
    pub label: String,
}

/// Ordered species catalogue stored alongside every bundle.
///
/// Bundles are only combined when their tables compare equal, so the table
/// doubles as the contract between runs produced by different tool versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesTable {
    entries: Vec<SpeciesEntry>,
}

impl SpeciesTable {
    /// The canonical table built from [`Species::ALL`].
    pub fn standard() -> Self {
        let entries = Species::ALL
            .iter()
            .map(|species| SpeciesEntry {
                key: species.key().to_string(),
                index: species.index(),
                label: species.label().to_string(),
            })
            .collect();
        Self { entries }
    }

    /// Builds a table from explicit entries.
    pub fn from_entries(entries: Vec<SpeciesEntry>) -> Self {
        Self { entries }
    }

    /// Entries in row order.
    pub fn entries(&self) -> &[SpeciesEntry] {
        &self.entries
    }

    /// Number of rows, fallback included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Row index of the catch-all category (always the last row).
    pub fn fallback_index(&self) -> Option<usize> {
        self.entries.len().checked_sub(1)
    }

    /// Entries excluding the trailing catch-all row.
    pub fn named(&self) -> &[SpeciesEntry] {
        match self.fallback_index() {
            Some(last) => &self.entries[..last],
            None => &[],
        }
    }
}

impl Default for SpeciesTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_declaration_order() {
        for (idx, species) in Species::ALL.iter().enumerate() {
            assert_eq!(species.index(), idx);
        }
    }

    #[test]
    fn standard_table_ends_with_fallback() {
        let table = SpeciesTable::standard();
        assert_eq!(table.len(), 14);
        assert_eq!(table.fallback_index(), Some(13));
        assert_eq!(table.entries()[13].key, "any_other");
        assert_eq!(table.named().len(), 13);
        assert_eq!(table.entries()[11].key, Species::Omega.key());
    }
}
