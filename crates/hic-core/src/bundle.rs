//! Result bundles: the serialized unit passed between pipeline stages.

use serde::{Deserialize, Serialize};

use crate::accumulator::Accumulator;
use crate::descriptor::RunDescriptor;
use crate::errors::{ErrorInfo, HicError};
use crate::hash::bundle_digest;
use crate::provenance::{SchemaVersion, BUNDLE_SCHEMA};

/// A run descriptor together with its accumulated counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBundle {
    /// Schema the bundle was written with.
    pub schema_version: SchemaVersion,
    /// Parameters of the run.
    pub descriptor: RunDescriptor,
    /// Counters, one row per entry of `descriptor.species`.
    pub accumulator: Accumulator,
    /// Raw files or bundles that contributed to the counters.
    #[serde(default)]
    pub sources: Vec<String>,
    /// SHA-256 over the canonical descriptor and accumulator.
    pub digest: String,
}

impl ResultBundle {
    /// Seals a descriptor and accumulator into a bundle.
    pub fn new(
        descriptor: RunDescriptor,
        accumulator: Accumulator,
        sources: Vec<String>,
    ) -> Result<Self, HicError> {
        check_shape(&descriptor, &accumulator)?;
        let digest = bundle_digest(&descriptor, &accumulator)?;
        Ok(Self {
            schema_version: BUNDLE_SCHEMA,
            descriptor,
            accumulator,
            sources,
            digest,
        })
    }

    /// Number of events behind the counters.
    pub fn events(&self) -> u64 {
        self.descriptor.events
    }

    /// Adds the events and counters of `other` and reseals the bundle.
    ///
    /// Descriptor fields other than the event count are left untouched;
    /// compatibility is the caller's decision.
    pub fn absorb(&mut self, other: &ResultBundle) -> Result<(), HicError> {
        self.accumulator.absorb(&other.accumulator)?;
        self.descriptor.events += other.descriptor.events;
        self.sources.extend(other.sources.iter().cloned());
        self.reseal()
    }

    /// Recomputes the digest after an in-place change.
    pub fn reseal(&mut self) -> Result<(), HicError> {
        self.digest = bundle_digest(&self.descriptor, &self.accumulator)?;
        Ok(())
    }

    /// Checks schema compatibility, row shape and the stored digest.
    pub fn verify(&self) -> Result<(), HicError> {
        if !BUNDLE_SCHEMA.reads(&self.schema_version) {
            return Err(HicError::Serde(
                ErrorInfo::new("bundle-schema", "unsupported bundle schema")
                    .with_context("found", self.schema_version.to_string())
                    .with_context("supported", BUNDLE_SCHEMA.to_string()),
            ));
        }
        check_shape(&self.descriptor, &self.accumulator)?;
        let expected = bundle_digest(&self.descriptor, &self.accumulator)?;
        if expected != self.digest {
            return Err(HicError::Serde(
                ErrorInfo::new("bundle-digest", "bundle content does not match its digest")
                    .with_context("stored", self.digest.clone())
                    .with_context("computed", expected)
                    .with_hint("the bundle was modified after it was written"),
            ));
        }
        Ok(())
    }
}

fn check_shape(descriptor: &RunDescriptor, accumulator: &Accumulator) -> Result<(), HicError> {
    if descriptor.species.len() != accumulator.len() {
        return Err(HicError::Compat(
            ErrorInfo::new(
                "bundle-shape",
                "accumulator rows do not match the species table",
            )
            .with_context("species", descriptor.species.len().to_string())
            .with_context("rows", accumulator.len().to_string()),
        ));
    }
    Ok(())
}
