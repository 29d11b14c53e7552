//! Stable digests over canonical JSON.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::accumulator::Accumulator;
use crate::descriptor::RunDescriptor;
use crate::errors::HicError;
use crate::serde::to_canonical_json_bytes;
use crate::species::SpeciesTable;

/// Computes a stable hexadecimal hash for the provided serializable payload.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, HicError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}

/// Digest sealing the descriptor and accumulator of a bundle.
pub fn bundle_digest(
    descriptor: &RunDescriptor,
    accumulator: &Accumulator,
) -> Result<String, HicError> {
    stable_hash_string(&(descriptor, accumulator))
}

/// Short fingerprint of a species table, used in diagnostics.
pub fn species_fingerprint(table: &SpeciesTable) -> Result<String, HicError> {
    let mut full = stable_hash_string(table)?;
    full.truncate(12);
    Ok(full)
}
