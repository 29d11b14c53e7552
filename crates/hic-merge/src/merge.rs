use std::fmt;
use std::path::Path;

use hic_core::serde::read_bundle;
use hic_core::{ErrorInfo, HicError, Mismatch, ResultBundle};
use log::{info, warn};
use serde::Serialize;

use crate::policy::{assess, MergePolicy, Verdict};

/// Why a candidate bundle was left out of a merge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The bundle could not be loaded or failed verification.
    Unreadable {
        /// Underlying error.
        message: String,
    },
    /// The descriptor differs from the reference.
    Incompatible {
        /// All differing fields.
        mismatches: Vec<Mismatch>,
    },
    /// Tolerated species-table change with a different number of rows.
    Shape {
        /// Underlying error.
        message: String,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable { message } => write!(f, "unreadable: {message}"),
            SkipReason::Incompatible { mismatches } => {
                for (idx, mismatch) in mismatches.iter().enumerate() {
                    if idx > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{mismatch}")?;
                }
                Ok(())
            }
            SkipReason::Shape { message } => write!(f, "cannot be summed: {message}"),
        }
    }
}

/// A bundle that was not merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedInput {
    /// Label of the input (usually its path).
    pub source: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Outcome of a merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    /// The merged bundle.
    pub bundle: ResultBundle,
    /// Labels of merged inputs, reference first.
    pub accepted: Vec<String>,
    /// Inputs left out: unreadable ones first, then policy rejections.
    pub skipped: Vec<SkippedInput>,
}

/// Sums every compatible candidate into `reference`.
///
/// The reference descriptor is kept as is apart from its event count.
pub fn merge_bundles<I>(
    reference_label: impl Into<String>,
    reference: ResultBundle,
    candidates: I,
    policy: MergePolicy,
) -> Result<MergeReport, HicError>
where
    I: IntoIterator<Item = (String, ResultBundle)>,
{
    let mut merged = reference;
    let mut accepted = vec![reference_label.into()];
    let mut skipped = Vec::new();

    for (label, candidate) in candidates {
        let reason = match assess(&merged.descriptor, &candidate.descriptor, policy) {
            Verdict::Skip { mismatches } => Some(SkipReason::Incompatible { mismatches }),
            Verdict::Accept { overridden } => {
                for mismatch in &overridden {
                    warn!("{label}: {mismatch}; merging anyway");
                }
                match merged.absorb(&candidate) {
                    Ok(()) => None,
                    Err(HicError::Compat(info)) => Some(SkipReason::Shape {
                        message: info.to_string(),
                    }),
                    Err(other) => return Err(other),
                }
            }
        };
        match reason {
            Some(reason) => {
                warn!("Skipping {label}: {reason}");
                skipped.push(SkippedInput {
                    source: label,
                    reason,
                });
            }
            None => {
                info!("Merged {label} ({} events)", candidate.events());
                accepted.push(label);
            }
        }
    }

    Ok(MergeReport {
        bundle: merged,
        accepted,
        skipped,
    })
}

/// Loads bundles from `paths` and merges them into the first readable one.
pub fn combine<P: AsRef<Path>>(paths: &[P], policy: MergePolicy) -> Result<MergeReport, HicError> {
    if paths.len() < 2 {
        return Err(HicError::Usage(
            ErrorInfo::new("combine-inputs", "at least two bundles are required")
                .with_context("given", paths.len().to_string()),
        ));
    }

    let mut unreadable = Vec::new();
    let mut loaded = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let label = path.display().to_string();
        match read_bundle(path) {
            Ok(bundle) => loaded.push((label, bundle)),
            Err(err) => {
                warn!("Skipping {label}: {err}");
                unreadable.push(SkippedInput {
                    source: label,
                    reason: SkipReason::Unreadable {
                        message: err.to_string(),
                    },
                });
            }
        }
    }

    let mut loaded = loaded.into_iter();
    let Some((reference_label, reference)) = loaded.next() else {
        return Err(HicError::Io(
            ErrorInfo::new("no-readable-bundle", "none of the input bundles could be read")
                .with_context("given", paths.len().to_string()),
        ));
    };
    info!(
        "Reference {reference_label}: energy {}, version {}, |y| < {}",
        reference.descriptor.collision_energy,
        reference.descriptor.simulation_version,
        reference.descriptor.rapidity_cut
    );
    let mut report = merge_bundles(reference_label, reference, loaded, policy)?;
    unreadable.append(&mut report.skipped);
    report.skipped = unreadable;
    Ok(report)
}
