use std::path::PathBuf;

use clap::Args;
use hic_core::serde::{bundle_output_path, ensure_output_free, write_bundle};
use hic_core::HicError;
use hic_extract::{summary_path, write_text_summary, ExtractConfig, Extractor};
use log::info;

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Bundle to write; `.json` is appended when missing.
    pub output: PathBuf,
    /// UrQMD f15 event files.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
    /// Half-width of the midrapidity window, overriding the config file.
    #[arg(long)]
    pub rapidity_cut: Option<f64>,
    /// YAML extraction config.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Provenance note stored in the bundle.
    #[arg(long)]
    pub note: Option<String>,
    /// Also write the raw counters as text next to the bundle.
    #[arg(long)]
    pub text_summary: bool,
}

pub fn run(args: &ExtractArgs) -> Result<(), HicError> {
    let output = bundle_output_path(&args.output);
    ensure_output_free(&output)?;
    let summary = args.text_summary.then(|| summary_path(&output));
    if let Some(path) = &summary {
        ensure_output_free(path)?;
    }

    let mut config = match &args.config {
        Some(path) => ExtractConfig::load(path)?,
        None => ExtractConfig::default(),
    };
    if let Some(cut) = args.rapidity_cut {
        config.rapidity_cut = cut;
    }
    if let Some(note) = &args.note {
        config.note = note.clone();
    }

    let report = Extractor::new(config).run(&args.inputs)?;
    write_bundle(&output, &report.bundle)?;
    info!(
        "Collected {} events from {} of {} files into {}",
        report.bundle.events(),
        report.accepted.len(),
        args.inputs.len(),
        output.display()
    );
    if let Some(path) = &summary {
        write_text_summary(path, &report.bundle)?;
        info!("Wrote {}", path.display());
    }
    Ok(())
}
