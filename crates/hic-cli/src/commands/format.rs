use std::path::PathBuf;

use clap::Args;
use hic_core::HicError;
use hic_table::{write_tables, EnergyScan};
use log::info;

#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Label appended to the table file names (pp, AuAuPbPb, ...).
    pub label: String,
    /// One or more bundles, usually one per collision energy.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
    /// Directory receiving the tables.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

pub fn run(args: &FormatArgs) -> Result<(), HicError> {
    let scan = EnergyScan::load(&args.inputs)?;
    let written = write_tables(&args.label, &args.out_dir, &scan)?;
    info!(
        "{} energies, {} skipped inputs, {} tables written",
        scan.points.len(),
        scan.skipped.len(),
        written.len()
    );
    Ok(())
}
