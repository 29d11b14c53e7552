use std::fs;
use std::path::{Path, PathBuf};

use hic_core::{format_scientific, HicError, RunDescriptor, SpeciesCounters};
use log::info;
use serde::{Deserialize, Serialize};

use crate::scan::EnergyScan;

/// Mantissa decimals of every tabulated value.
pub const TABLE_PRECISION: usize = 5;

const SEPARATOR: &str = "  ";

/// The three observables written by the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Mean transverse momentum at midrapidity.
    MeanPt,
    /// Midrapidity yield per unit rapidity per event.
    MidrapidityYield,
    /// Total multiplicity per event.
    TotalMultiplicity,
}

impl TableKind {
    /// Every table, in the order they are written.
    pub const ALL: [TableKind; 3] = [
        TableKind::MeanPt,
        TableKind::MidrapidityYield,
        TableKind::TotalMultiplicity,
    ];

    /// File-name prefix, completed by the caller's label.
    pub fn file_prefix(self) -> &'static str {
        match self {
            TableKind::MeanPt => "meanpt_midrapidity_",
            TableKind::MidrapidityYield => "midrapidity_yield_",
            TableKind::TotalMultiplicity => "total_multiplicity_",
        }
    }

    /// `<prefix><label>.txt`
    pub fn file_name(self, label: &str) -> String {
        format!("{}{label}.txt", self.file_prefix())
    }

    /// The observable for one species row. `descriptor.events` must be
    /// positive.
    pub fn value(self, counters: &SpeciesCounters, descriptor: &RunDescriptor) -> f64 {
        match self {
            TableKind::MeanPt => counters.mean_midrapidity_pt(),
            TableKind::MidrapidityYield => {
                counters.midrapidity_count as f64 / descriptor.midrapidity_norm()
            }
            TableKind::TotalMultiplicity => counters.total as f64 / descriptor.events as f64,
        }
    }
}

/// Renders one table: an `!ecm` header naming every species but the
/// catch-all, one row per scan point, and a trailing version comment.
pub fn render_table(kind: TableKind, scan: &EnergyScan) -> String {
    let named = scan.species.named();
    let mut out = String::from("!ecm");
    for entry in named {
        out.push_str(SEPARATOR);
        out.push_str(&entry.label);
    }
    out.push('\n');

    for point in &scan.points {
        out.push_str(&point.energy_label);
        let descriptor = &point.bundle.descriptor;
        for entry in named {
            let value = point
                .bundle
                .accumulator
                .row(entry.index)
                .map(|counters| kind.value(counters, descriptor))
                .unwrap_or(0.0);
            out.push_str(SEPARATOR);
            out.push_str(&format_scientific(value, TABLE_PRECISION));
        }
        out.push('\n');
    }

    out.push_str(&format!("# UrQMD version {}\n", scan.version));
    out
}

/// Path of the `kind` table for `label` inside `out_dir`.
pub fn table_path(out_dir: &Path, kind: TableKind, label: &str) -> PathBuf {
    out_dir.join(kind.file_name(label))
}

/// Writes all three tables into `out_dir`, replacing earlier tables with
/// the same label, and returns their paths.
pub fn write_tables(
    label: &str,
    out_dir: &Path,
    scan: &EnergyScan,
) -> Result<Vec<PathBuf>, HicError> {
    fs::create_dir_all(out_dir).map_err(|err| HicError::io("table-mkdir", out_dir, err))?;
    TableKind::ALL
        .iter()
        .map(|&kind| {
            let path = table_path(out_dir, kind, label);
            fs::write(&path, render_table(kind, scan))
                .map_err(|err| HicError::io("table-write", &path, err))?;
            info!("Wrote {}", path.display());
            Ok(path)
        })
        .collect()
}
