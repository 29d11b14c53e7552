use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use hic_core::serde::read_bundle;
use hic_core::{ErrorInfo, HicError, ResultBundle, SpeciesTable};
use hic_merge::{merge_bundles, MergePolicy, SkipReason};
use log::{debug, info, warn};
use serde::Serialize;

/// Why a bundle did not make it into the scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ScanSkipReason {
    /// The bundle could not be loaded or failed verification.
    Unreadable {
        /// Underlying error.
        message: String,
    },
    /// Simulation version differs from the first bundle.
    Version {
        /// Version of the first bundle.
        reference: String,
        /// Version of this bundle.
        found: String,
    },
    /// Species table differs from the first bundle.
    SpeciesTable,
    /// The bundle holds no events.
    NoEvents,
    /// The collision-energy label is not a finite number.
    EnergyLabel {
        /// The offending label.
        label: String,
    },
    /// A bundle at an already seen energy could not be summed into it.
    Merge {
        /// Reason reported by the merge.
        #[serde(rename = "merge_reason")]
        reason: SkipReason,
    },
}

impl fmt::Display for ScanSkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanSkipReason::Unreadable { message } => write!(f, "unreadable: {message}"),
            ScanSkipReason::Version { reference, found } => write!(
                f,
                "UrQMD version {found} is different from reference version {reference}"
            ),
            ScanSkipReason::SpeciesTable => {
                write!(f, "species table differs from the reference bundle")
            }
            ScanSkipReason::NoEvents => write!(f, "bundle holds 0 events"),
            ScanSkipReason::EnergyLabel { label } => {
                write!(f, "collision energy {label:?} is not a number")
            }
            ScanSkipReason::Merge { reason } => write!(f, "cannot be summed: {reason}"),
        }
    }
}

/// A bundle left out of the scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanSkip {
    /// Label of the input (usually its path).
    pub source: String,
    /// Why it was skipped.
    pub reason: ScanSkipReason,
}

/// One row of the energy scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPoint {
    /// Collision-energy label, written verbatim in the tables.
    pub energy_label: String,
    /// Numeric value of the label, used for ordering.
    pub energy: f64,
    /// Sum of every bundle carrying this label.
    pub bundle: ResultBundle,
    /// Inputs that contributed to `bundle`.
    pub inputs: Vec<String>,
}

/// Bundles of an energy scan, one point per distinct collision energy in
/// ascending numeric order.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyScan {
    /// Simulation version shared by every point.
    pub version: String,
    /// Species table shared by every point.
    pub species: SpeciesTable,
    /// Points sorted by energy.
    pub points: Vec<ScanPoint>,
    /// Inputs left out, with reasons.
    pub skipped: Vec<ScanSkip>,
}

struct Group {
    energy: f64,
    members: Vec<(String, ResultBundle)>,
}

impl EnergyScan {
    /// Validates labelled bundles against the first one and groups them by
    /// collision energy.
    pub fn collect<I>(inputs: I) -> Result<Self, HicError>
    where
        I: IntoIterator<Item = (String, ResultBundle)>,
    {
        let mut reference: Option<(String, SpeciesTable)> = None;
        let mut groups: BTreeMap<String, Group> = BTreeMap::new();
        let mut skipped = Vec::new();
        let mut seen = 0usize;

        for (source, bundle) in inputs {
            seen += 1;
            let descriptor = &bundle.descriptor;
            let (version, species) = reference.get_or_insert_with(|| {
                (
                    descriptor.simulation_version.clone(),
                    descriptor.species.clone(),
                )
            });
            let verdict = if descriptor.simulation_version != *version {
                Err(ScanSkipReason::Version {
                    reference: version.clone(),
                    found: descriptor.simulation_version.clone(),
                })
            } else if descriptor.species != *species {
                Err(ScanSkipReason::SpeciesTable)
            } else if bundle.events() == 0 {
                Err(ScanSkipReason::NoEvents)
            } else {
                parse_energy(&descriptor.collision_energy).ok_or_else(|| {
                    ScanSkipReason::EnergyLabel {
                        label: descriptor.collision_energy.clone(),
                    }
                })
            };

            match verdict {
                Ok(energy) => {
                    debug!(
                        "{source}: {} events at {}",
                        bundle.events(),
                        descriptor.collision_energy
                    );
                    groups
                        .entry(descriptor.collision_energy.clone())
                        .or_insert_with(|| Group {
                            energy,
                            members: Vec::new(),
                        })
                        .members
                        .push((source, bundle));
                }
                Err(reason) => {
                    warn!("Skipping {source}: {reason}");
                    skipped.push(ScanSkip { source, reason });
                }
            }
        }

        let mut points = Vec::with_capacity(groups.len());
        for (energy_label, group) in groups {
            let mut members = group.members.into_iter();
            let Some((first_source, first)) = members.next() else {
                continue;
            };
            let report =
                merge_bundles(first_source, first, members, MergePolicy::SkipIncompatible)?;
            if report.accepted.len() > 1 {
                info!(
                    "Summed {} bundles at collision energy {energy_label}",
                    report.accepted.len()
                );
            }
            skipped.extend(report.skipped.into_iter().map(|skip| ScanSkip {
                source: skip.source,
                reason: ScanSkipReason::Merge {
                    reason: skip.reason,
                },
            }));
            points.push(ScanPoint {
                energy_label,
                energy: group.energy,
                bundle: report.bundle,
                inputs: report.accepted,
            });
        }
        points.sort_by(|a, b| a.energy.total_cmp(&b.energy));

        match reference {
            Some((version, species)) if !points.is_empty() => Ok(Self {
                version,
                species,
                points,
                skipped,
            }),
            _ => Err(HicError::Compat(
                ErrorInfo::new("no-usable-bundle", "none of the input bundles can be tabulated")
                    .with_context("given", seen.to_string())
                    .with_context("skipped", skipped.len().to_string()),
            )),
        }
    }

    /// Loads bundles from `paths` and collects them; unreadable files are
    /// skipped with a warning and never become the reference.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, HicError> {
        if paths.is_empty() {
            return Err(HicError::Usage(ErrorInfo::new(
                "format-inputs",
                "at least one bundle is required",
            )));
        }
        let mut unreadable = Vec::new();
        let mut loaded = Vec::new();
        for path in paths {
            let path = path.as_ref();
            let source = path.display().to_string();
            match read_bundle(path) {
                Ok(bundle) => loaded.push((source, bundle)),
                Err(err) => {
                    let reason = ScanSkipReason::Unreadable {
                        message: err.to_string(),
                    };
                    warn!("Skipping {source}: {reason}");
                    unreadable.push(ScanSkip { source, reason });
                }
            }
        }
        let mut scan = Self::collect(loaded)?;
        unreadable.append(&mut scan.skipped);
        scan.skipped = unreadable;
        Ok(scan)
    }
}

fn parse_energy(label: &str) -> Option<f64> {
    label
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
