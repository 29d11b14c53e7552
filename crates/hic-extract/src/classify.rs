//! Mapping from simulation (type code, charge) pairs to species.

use hic_core::Species;

/// Predicate on the particle type code.
#[derive(Debug, Clone, Copy)]
pub enum TypeMatch {
    /// Exactly this code.
    Code(i32),
    /// Any of these codes.
    AnyOf(&'static [i32]),
}

/// Predicate on the particle charge.
#[derive(Debug, Clone, Copy)]
pub enum ChargeMatch {
    /// Exactly this charge.
    Exactly(i32),
    /// Any charge.
    Any,
}

/// One classification rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Type-code predicate.
    pub type_code: TypeMatch,
    /// Charge predicate.
    pub charge: ChargeMatch,
    /// Species assigned when both predicates hold.
    pub species: Species,
}

impl Rule {
    const fn new(type_code: TypeMatch, charge: ChargeMatch, species: Species) -> Self {
        Self {
            type_code,
            charge,
            species,
        }
    }

    /// Whether the rule accepts the pair.
    pub fn matches(&self, type_code: i32, charge: i32) -> bool {
        let type_ok = match self.type_code {
            TypeMatch::Code(code) => code == type_code,
            TypeMatch::AnyOf(codes) => codes.contains(&type_code),
        };
        let charge_ok = match self.charge {
            ChargeMatch::Exactly(expected) => expected == charge,
            ChargeMatch::Any => true,
        };
        type_ok && charge_ok
    }
}

use ChargeMatch::{Any, Exactly};
use TypeMatch::{AnyOf, Code};

/// Rules in priority order; the first match wins and unmatched pairs fall
/// through to [`Species::AnyOther`].
pub const RULES: [Rule; 13] = [
    Rule::new(Code(101), Exactly(1), Species::PionPlus),
    Rule::new(Code(101), Exactly(-1), Species::PionMinus),
    Rule::new(Code(101), Exactly(0), Species::PionZero),
    Rule::new(Code(106), Exactly(1), Species::KaonPlus),
    Rule::new(Code(-106), Exactly(-1), Species::KaonMinus),
    Rule::new(Code(1), Exactly(1), Species::Proton),
    Rule::new(Code(-1), Exactly(-1), Species::AntiProton),
    Rule::new(AnyOf(&[27, 40]), Exactly(0), Species::LambdaOrSigma0),
    Rule::new(AnyOf(&[-27, -40]), Exactly(0), Species::AntiLambdaOrSigma0),
    Rule::new(Code(49), Exactly(-1), Species::XiMinus),
    Rule::new(Code(-49), Exactly(1), Species::AntiXiMinus),
    Rule::new(Code(55), Any, Species::Omega),
    Rule::new(Code(-55), Any, Species::AntiOmega),
];

/// Classifies a particle by its type code and charge.
pub fn classify(type_code: i32, charge: i32) -> Species {
    RULES
        .iter()
        .find(|rule| rule.matches(type_code, charge))
        .map(|rule| rule.species)
        .unwrap_or(Species::AnyOther)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_entries() {
        assert_eq!(classify(101, 1), Species::PionPlus);
        assert_eq!(classify(101, -1), Species::PionMinus);
        assert_eq!(classify(101, 0), Species::PionZero);
        assert_eq!(classify(106, 1), Species::KaonPlus);
        assert_eq!(classify(-106, -1), Species::KaonMinus);
        assert_eq!(classify(1, 1), Species::Proton);
        assert_eq!(classify(-1, -1), Species::AntiProton);
        assert_eq!(classify(27, 0), Species::LambdaOrSigma0);
        assert_eq!(classify(40, 0), Species::LambdaOrSigma0);
        assert_eq!(classify(-27, 0), Species::AntiLambdaOrSigma0);
        assert_eq!(classify(-40, 0), Species::AntiLambdaOrSigma0);
        assert_eq!(classify(49, -1), Species::XiMinus);
        assert_eq!(classify(-49, 1), Species::AntiXiMinus);
        assert_eq!(classify(55, 0), Species::Omega);
        assert_eq!(classify(55, -1), Species::Omega);
        assert_eq!(classify(-55, 1), Species::AntiOmega);
    }

    #[test]
    fn unmatched_pairs_fall_back() {
        assert_eq!(classify(106, 0), Species::AnyOther);
        assert_eq!(classify(1, 0), Species::AnyOther);
        assert_eq!(classify(40, 1), Species::AnyOther);
        assert_eq!(classify(-49, -1), Species::AnyOther);
        assert_eq!(classify(999, 1), Species::AnyOther);
    }

    #[test]
    fn every_named_species_has_a_rule() {
        for species in Species::ALL.iter().filter(|s| !s.is_fallback()) {
            assert!(RULES.iter().any(|rule| rule.species == *species));
        }
    }
}
