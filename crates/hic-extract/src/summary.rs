//! Plain-text dump of the raw counters of a bundle.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use hic_core::{format_scientific, ErrorInfo, HicError, ResultBundle};

const SEPARATOR: &str = "    ";
const PRECISION: usize = 12;

/// Renders the counters of `bundle` as a commented three-row table.
pub fn render_text_summary(bundle: &ResultBundle) -> String {
    let descriptor = &bundle.descriptor;
    let mut out = String::new();
    out.push_str(&format!(
        "# UrQMD version: {}\n",
        descriptor.simulation_version
    ));
    out.push_str(&format!("# events: {}\n", descriptor.events));
    out.push_str(&format!(
        "# collision energy: {}\n",
        descriptor.collision_energy
    ));
    out.push_str(&format!("# rapidity cut: {:5.2}\n", descriptor.rapidity_cut));
    out.push_str(&format!(
        "# rows: 1) total multiplicity (no cuts){SEPARATOR}\
         2) sum(pT) (within the rapidity cut){SEPARATOR}\
         3) dN (within the rapidity cut)\n"
    ));
    out.push_str("# to get <pT> at midrapidity one must divide (2) by (3)\n");
    out.push_str(
        "# to get <dN/dy> at midrapidity one must divide (3) by the number of events \
         and by (2*rapidity cut)\n",
    );
    out.push_str("# columns:");
    for entry in descriptor.species.entries() {
        out.push_str(SEPARATOR);
        out.push_str(&entry.label);
    }
    out.push('\n');

    let rows = bundle.accumulator.rows();
    let lines: [Vec<String>; 3] = [
        rows.iter()
            .map(|row| format_scientific(row.total as f64, PRECISION))
            .collect(),
        rows.iter()
            .map(|row| format_scientific(row.midrapidity_pt_sum, PRECISION))
            .collect(),
        rows.iter()
            .map(|row| format_scientific(row.midrapidity_count as f64, PRECISION))
            .collect(),
    ];
    for line in lines {
        out.push_str(&line.join(SEPARATOR));
        out.push('\n');
    }
    out
}

/// Location of the text summary that accompanies a bundle file.
pub fn summary_path(bundle_path: &Path) -> PathBuf {
    bundle_path.with_extension("txt")
}

/// Writes the text summary, refusing to replace an existing file.
pub fn write_text_summary(path: &Path, bundle: &ResultBundle) -> Result<(), HicError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|err| match err.kind() {
            ErrorKind::AlreadyExists => HicError::OutputExists(
                ErrorInfo::new("summary-exists", "text summary already exists").with_path(path),
            ),
            _ => HicError::io("summary-create", path, err),
        })?;
    file.write_all(render_text_summary(bundle).as_bytes())
        .map_err(|err| HicError::io("summary-write", path, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hic_core::{Accumulator, RunDescriptor, SpeciesCounters, SpeciesTable, DEFAULT_NOTE};

    fn sample() -> ResultBundle {
        let mut rows = vec![SpeciesCounters::default(); 14];
        rows[0] = SpeciesCounters {
            total: 2,
            midrapidity_pt_sum: 0.6,
            midrapidity_count: 2,
        };
        let descriptor = RunDescriptor {
            events: 2,
            simulation_version: "30400".into(),
            collision_energy: "17.3".into(),
            rapidity_cut: 0.5,
            species: SpeciesTable::standard(),
            note: DEFAULT_NOTE.into(),
        };
        ResultBundle::new(descriptor, Accumulator::from_rows(rows), vec!["run.f15".into()])
            .unwrap()
    }

    #[test]
    fn summary_lists_header_then_three_rows() {
        let text = render_text_summary(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "# UrQMD version: 30400");
        assert_eq!(lines[3], "# rapidity cut:  0.50");
        assert_eq!(
            lines[4],
            "# rows: 1) total multiplicity (no cuts)    2) sum(pT) (within the rapidity cut)    \
             3) dN (within the rapidity cut)"
        );
        assert!(lines[6].ends_with("by the number of events and by (2*rapidity cut)"));
        assert!(lines[7].starts_with("# columns:    211    -211"));
        assert!(lines[8].starts_with("2.000000000000e+00    0.000000000000e+00"));
        assert_eq!(lines[10].split(SEPARATOR).count(), 14);
    }

    #[test]
    fn summary_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = summary_path(&dir.path().join("run.json"));
        write_text_summary(&path, &sample()).unwrap();
        let err = write_text_summary(&path, &sample()).unwrap_err();
        assert!(matches!(err, HicError::OutputExists(_)));
    }
}
