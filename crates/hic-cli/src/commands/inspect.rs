use std::path::PathBuf;

use clap::Args;
use hic_core::serde::{read_bundle, to_canonical_json_bytes};
use hic_core::{species_fingerprint, HicError, ResultBundle};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Bundle to summarise.
    pub bundle: PathBuf,
}

#[derive(Debug, Serialize)]
struct SpeciesRow<'a> {
    key: &'a str,
    label: &'a str,
    total: u64,
    midrapidity_pt_sum: f64,
    midrapidity_count: u64,
    mean_midrapidity_pt: f64,
}

#[derive(Debug, Serialize)]
struct BundleSummary<'a> {
    schema_version: String,
    digest: &'a str,
    events: u64,
    simulation_version: &'a str,
    collision_energy: &'a str,
    rapidity_cut: f64,
    note: &'a str,
    species_fingerprint: String,
    sources: &'a [String],
    species: Vec<SpeciesRow<'a>>,
}

fn summarise(bundle: &ResultBundle) -> Result<BundleSummary<'_>, HicError> {
    let descriptor = &bundle.descriptor;
    let species = descriptor
        .species
        .entries()
        .iter()
        .zip(bundle.accumulator.rows())
        .map(|(entry, row)| SpeciesRow {
            key: &entry.key,
            label: &entry.label,
            total: row.total,
            midrapidity_pt_sum: row.midrapidity_pt_sum,
            midrapidity_count: row.midrapidity_count,
            mean_midrapidity_pt: row.mean_midrapidity_pt(),
        })
        .collect();
    Ok(BundleSummary {
        schema_version: bundle.schema_version.to_string(),
        digest: &bundle.digest,
        events: descriptor.events,
        simulation_version: &descriptor.simulation_version,
        collision_energy: &descriptor.collision_energy,
        rapidity_cut: descriptor.rapidity_cut,
        note: &descriptor.note,
        species_fingerprint: species_fingerprint(&descriptor.species)?,
        sources: &bundle.sources,
        species,
    })
}

pub fn run(args: &InspectArgs) -> Result<(), HicError> {
    let bundle = read_bundle(&args.bundle)?;
    let bytes = to_canonical_json_bytes(&summarise(&bundle)?)?;
    println!("{}", String::from_utf8_lossy(&bytes));
    Ok(())
}
