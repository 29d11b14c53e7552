use std::path::PathBuf;

use clap::Args;
use hic_core::serde::{bundle_output_path, ensure_output_free, write_bundle};
use hic_core::HicError;
use hic_merge::{combine, MergePolicy};
use log::info;

#[derive(Args, Debug)]
pub struct CombineArgs {
    /// Bundle to write; `.json` is appended when missing.
    pub output: PathBuf,
    /// Bundles to merge; the first readable one is the reference.
    #[arg(required = true, num_args = 2..)]
    pub inputs: Vec<PathBuf>,
    /// Merge bundles whose note or species table differ from the reference.
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &CombineArgs) -> Result<(), HicError> {
    let output = bundle_output_path(&args.output);
    ensure_output_free(&output)?;
    let policy = if args.force {
        MergePolicy::ForceMerge
    } else {
        MergePolicy::SkipIncompatible
    };

    let report = combine(&args.inputs, policy)?;
    write_bundle(&output, &report.bundle)?;
    info!(
        "Merged {} of {} bundles ({} events) into {}",
        report.accepted.len(),
        args.inputs.len(),
        report.bundle.events(),
        output.display()
    );
    Ok(())
}
