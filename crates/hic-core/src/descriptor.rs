//! Run descriptors and the compatibility rules between them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::species::SpeciesTable;

/// Provenance note written by the extractor.
pub const DEFAULT_NOTE: &str = "first index hadron type, second index: \
0 total multiplicity (no cuts), 1 sum(pT) (within the rapidity cut), \
2 dN (within the rapidity cut). <pT> at midrapidity is (1)/(2); \
<dN/dy> at midrapidity is (2) divided by the number of events and by (2*rapidity cut)";

/// Parameters that identify the run a bundle was produced from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunDescriptor {
    /// Number of events accumulated so far.
    pub events: u64,
    /// Simulation version token taken from the event-file header.
    pub simulation_version: String,
    /// Collision energy label, kept verbatim from the event-file header.
    pub collision_energy: String,
    /// Half-width of the symmetric midrapidity window.
    pub rapidity_cut: f64,
    /// Species catalogue the accumulator rows refer to.
    pub species: SpeciesTable,
    /// Free-text provenance note.
    pub note: String,
}

impl RunDescriptor {
    /// Lists every field in which `other` departs from `self`.
    ///
    /// The event count is never compared.
    pub fn mismatches(&self, other: &RunDescriptor) -> Vec<Mismatch> {
        let mut found = Vec::new();
        if self.note != other.note {
            found.push(Mismatch::Note);
        }
        if self.collision_energy != other.collision_energy {
            found.push(Mismatch::CollisionEnergy {
                reference: self.collision_energy.clone(),
                found: other.collision_energy.clone(),
            });
        }
        if self.simulation_version != other.simulation_version {
            found.push(Mismatch::Version {
                reference: self.simulation_version.clone(),
                found: other.simulation_version.clone(),
            });
        }
        if self.rapidity_cut != other.rapidity_cut {
            found.push(Mismatch::RapidityCut {
                reference: self.rapidity_cut,
                found: other.rapidity_cut,
            });
        }
        if self.species != other.species {
            found.push(Mismatch::SpeciesTable);
        }
        found
    }

    /// Events-per-unit-rapidity normalisation: `events * 2 * rapidity_cut`.
    pub fn midrapidity_norm(&self) -> f64 {
        self.events as f64 * 2.0 * self.rapidity_cut
    }
}

/// A field that differs between two run descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum Mismatch {
    /// Provenance notes differ.
    Note,
    /// Collision energies differ.
    CollisionEnergy {
        /// Reference value.
        reference: String,
        /// Value carried by the candidate.
        found: String,
    },
    /// Simulation versions differ.
    Version {
        /// Reference value.
        reference: String,
        /// Value carried by the candidate.
        found: String,
    },
    /// Rapidity windows differ.
    RapidityCut {
        /// Reference value.
        reference: f64,
        /// Value carried by the candidate.
        found: f64,
    },
    /// Species tables differ.
    SpeciesTable,
}

impl Mismatch {
    /// Whether the mismatch only warrants a warning under every policy.
    pub fn is_advisory(&self) -> bool {
        matches!(self, Mismatch::Note)
    }

    /// Whether a force-merge may ignore this mismatch. Differences in the
    /// physical conditions of the run never qualify.
    pub fn is_overridable(&self) -> bool {
        matches!(self, Mismatch::Note | Mismatch::SpeciesTable)
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Note => write!(f, "provenance note differs from the reference"),
            Mismatch::CollisionEnergy { reference, found } => write!(
                f,
                "collision energy {found} differs from the reference value {reference}"
            ),
            Mismatch::Version { reference, found } => write!(
                f,
                "simulation version {found} differs from the reference value {reference}"
            ),
            Mismatch::RapidityCut { reference, found } => write!(
                f,
                "rapidity cut |y| < {found} differs from the reference value {reference}"
            ),
            Mismatch::SpeciesTable => write!(f, "species table differs from the reference table"),
        }
    }
}
