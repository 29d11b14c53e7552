use hic_core::{Mismatch, RunDescriptor};
use serde::{Deserialize, Serialize};

/// How a species-table mismatch is treated.
///
/// A differing provenance note is tolerated with a warning under both
/// policies; differences in energy, version or rapidity cut always skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// A species-table mismatch skips the candidate.
    #[default]
    SkipIncompatible,
    /// A species-table mismatch is tolerated.
    ForceMerge,
}

impl MergePolicy {
    /// Whether the policy lets the candidate through despite `mismatch`.
    pub fn tolerates(&self, mismatch: &Mismatch) -> bool {
        match self {
            MergePolicy::SkipIncompatible => mismatch.is_advisory(),
            MergePolicy::ForceMerge => mismatch.is_overridable(),
        }
    }
}

/// Decision on a single candidate descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Merge it; `overridden` lists mismatches the policy tolerated.
    Accept {
        /// Tolerated mismatches.
        overridden: Vec<Mismatch>,
    },
    /// Leave it out.
    Skip {
        /// Every mismatch found, tolerated or not.
        mismatches: Vec<Mismatch>,
    },
}

/// Compares `candidate` against `reference` under `policy`.
pub fn assess(
    reference: &RunDescriptor,
    candidate: &RunDescriptor,
    policy: MergePolicy,
) -> Verdict {
    let mismatches = reference.mismatches(candidate);
    if mismatches.iter().all(|mismatch| policy.tolerates(mismatch)) {
        Verdict::Accept {
            overridden: mismatches,
        }
    } else {
        Verdict::Skip { mismatches }
    }
}

#[cfg(test)]
mod tests {
    use hic_core::{SpeciesEntry, SpeciesTable, DEFAULT_NOTE};

    use super::*;

    fn descriptor() -> RunDescriptor {
        RunDescriptor {
            events: 5,
            simulation_version: "30400".into(),
            collision_energy: "7.7".into(),
            rapidity_cut: 0.5,
            species: SpeciesTable::standard(),
            note: DEFAULT_NOTE.into(),
        }
    }

    fn renamed_table() -> SpeciesTable {
        let mut entries: Vec<SpeciesEntry> = SpeciesTable::standard().entries().to_vec();
        entries[0].label = "pi+".into();
        SpeciesTable::from_entries(entries)
    }

    #[test]
    fn species_table_mismatch_depends_on_policy() {
        let reference = descriptor();
        let mut candidate = descriptor();
        candidate.species = renamed_table();
        assert_eq!(
            assess(&reference, &candidate, MergePolicy::SkipIncompatible),
            Verdict::Skip {
                mismatches: vec![Mismatch::SpeciesTable]
            }
        );
        assert_eq!(
            assess(&reference, &candidate, MergePolicy::ForceMerge),
            Verdict::Accept {
                overridden: vec![Mismatch::SpeciesTable]
            }
        );
    }

    #[test]
    fn note_mismatch_only_warns() {
        let reference = descriptor();
        let mut candidate = descriptor();
        candidate.note = "hand written".into();
        for policy in [MergePolicy::SkipIncompatible, MergePolicy::ForceMerge] {
            assert_eq!(
                assess(&reference, &candidate, policy),
                Verdict::Accept {
                    overridden: vec![Mismatch::Note]
                }
            );
        }
    }

    #[test]
    fn force_never_overrides_physics() {
        let reference = descriptor();
        let mut candidate = descriptor();
        candidate.note = "hand written".into();
        candidate.rapidity_cut = 1.0;
        match assess(&reference, &candidate, MergePolicy::ForceMerge) {
            Verdict::Skip { mismatches } => assert_eq!(mismatches.len(), 2),
            other => panic!("unexpected verdict {other:?}"),
        }
    }
}
