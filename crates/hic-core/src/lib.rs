#![deny(missing_docs)]
#![doc = "Shared data model for the transport post-processing pipeline: the species \
table, per-species accumulators, run descriptors and the result bundles exchanged \
between the extract, combine and format stages."]

pub mod accumulator;
pub mod bundle;
pub mod descriptor;
pub mod errors;
pub mod hash;
pub mod numfmt;
pub mod provenance;
pub mod serde;
pub mod species;

pub use accumulator::{Accumulator, SpeciesCounters};
pub use bundle::ResultBundle;
pub use descriptor::{Mismatch, RunDescriptor, DEFAULT_NOTE};
pub use errors::{ErrorInfo, HicError};
pub use hash::{bundle_digest, species_fingerprint, stable_hash_string};
pub use numfmt::format_scientific;
pub use provenance::{SchemaVersion, BUNDLE_SCHEMA};
pub use species::{Species, SpeciesEntry, SpeciesTable};
