use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use hic_core::{
    Accumulator, ErrorInfo, HicError, Mismatch, ResultBundle, RunDescriptor, Species,
    SpeciesTable,
};
use log::{debug, info, warn};
use serde::Serialize;

use crate::classify::classify;
use crate::config::ExtractConfig;
use crate::kinematics::Kinematics;
use crate::reader::{EventBlock, F15Reader, FileHeader, ParseStop};

/// Counters of a single event, computed without touching any running total.
pub fn tally_event(event: &EventBlock, rapidity_cut: f64) -> Accumulator {
    event
        .particles
        .iter()
        .filter_map(|particle| {
            Kinematics::from_particle(particle)
                .map(|kin| (classify(particle.type_code, particle.charge), kin))
        })
        .fold(
            Accumulator::zeroed(Species::COUNT),
            |mut delta, (species, kin)| {
                delta.record(species.index(), kin.pt, kin.within(rapidity_cut));
                delta
            },
        )
}

/// Result of reading one event stream.
#[derive(Debug, Clone, PartialEq)]
pub struct FileScan {
    /// Header of the first block, if it could be read.
    pub header: Option<FileHeader>,
    /// Number of complete events.
    pub events: u64,
    /// Sum of the per-event deltas.
    pub accumulator: Accumulator,
    /// Why reading stopped.
    pub stop: ParseStop,
}

/// Reads every complete event from `source` and folds their deltas.
pub fn scan_reader<R: BufRead>(source: R, config: &ExtractConfig) -> Result<FileScan, HicError> {
    let mut reader = F15Reader::new(source, config.layout.clone());
    let (events, accumulator) = reader.by_ref().try_fold(
        (0u64, Accumulator::zeroed(Species::COUNT)),
        |(events, mut total), event| {
            total.absorb(&tally_event(&event, config.rapidity_cut))?;
            Ok::<_, HicError>((events + 1, total))
        },
    )?;
    let (header, stop) = reader.finish();
    Ok(FileScan {
        header,
        events,
        accumulator,
        stop,
    })
}

/// Opens and scans one event file.
pub fn scan_file(path: &Path, config: &ExtractConfig) -> Result<FileScan, HicError> {
    let file = File::open(path).map_err(|err| HicError::io("event-file-open", path, err))?;
    scan_reader(BufReader::new(file), config)
}

/// Why an input file was left out of the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// The file could not be opened.
    Unreadable {
        /// Underlying error.
        message: String,
    },
    /// No complete event could be read.
    NoEvents {
        /// Where reading stopped.
        stop: ParseStop,
    },
    /// Header disagrees with the reference file.
    Incompatible {
        /// The disagreeing field.
        mismatch: Mismatch,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Unreadable { message } => write!(f, "unreadable: {message}"),
            Rejection::NoEvents { stop } => write!(f, "0 events found ({stop})"),
            Rejection::Incompatible { mismatch } => write!(f, "{mismatch}"),
        }
    }
}

/// An input file that contributed events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptedFile {
    /// Input path.
    pub path: PathBuf,
    /// Complete events read from it.
    pub events: u64,
    /// Where reading stopped.
    pub stop: ParseStop,
}

/// An input file that was skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedFile {
    /// Input path.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: Rejection,
}

/// Outcome of an extraction run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractReport {
    /// The summed bundle.
    pub bundle: ResultBundle,
    /// Files that contributed, in input order.
    pub accepted: Vec<AcceptedFile>,
    /// Files that were skipped, in input order.
    pub rejected: Vec<RejectedFile>,
}

/// Drives extraction over a list of event files.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    /// Creates an extractor with the given configuration.
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Reads every file, keeps those whose header agrees with the first
    /// readable header and sums their counters into a single bundle.
    ///
    /// Fails with [`HicError::NoEvents`] when no file contributes an event.
    pub fn run<P: AsRef<Path>>(&self, paths: &[P]) -> Result<ExtractReport, HicError> {
        self.config.validate()?;
        let mut reference: Option<FileHeader> = None;
        let mut total = Accumulator::zeroed(Species::COUNT);
        let mut events = 0u64;
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for path in paths {
            let path = path.as_ref();
            info!("Working on {}", path.display());
            let verdict = scan_file(path, &self.config)
                .map_err(|err| Rejection::Unreadable {
                    message: err.to_string(),
                })
                .and_then(|scan| {
                    // The first readable header is the reference, even when
                    // its file contributes no events.
                    if reference.is_none() {
                        reference = scan.header.clone();
                    }
                    judge(path, scan, reference.as_ref())
                });
            let scan = match verdict {
                Ok(scan) => scan,
                Err(reason) => {
                    warn!("Discarding {}: {reason}", path.display());
                    rejected.push(RejectedFile {
                        path: path.to_path_buf(),
                        reason,
                    });
                    continue;
                }
            };
            total.absorb(&scan.accumulator)?;
            events += scan.events;
            debug!("{}: {} events accepted", path.display(), scan.events);
            accepted.push(AcceptedFile {
                path: path.to_path_buf(),
                events: scan.events,
                stop: scan.stop,
            });
        }

        let reference = match reference {
            Some(header) if events > 0 => header,
            _ => {
                return Err(HicError::NoEvents(
                    ErrorInfo::new("no-events", "collected 0 events from the input files")
                        .with_context("inputs", paths.len().to_string())
                        .with_context("rejected", rejected.len().to_string()),
                ))
            }
        };

        let descriptor = RunDescriptor {
            events,
            simulation_version: reference.simulation_version,
            collision_energy: reference.collision_energy,
            rapidity_cut: self.config.rapidity_cut,
            species: SpeciesTable::standard(),
            note: self.config.note.clone(),
        };
        let sources = accepted
            .iter()
            .map(|file| file.path.display().to_string())
            .collect();
        let bundle = ResultBundle::new(descriptor, total, sources)?;
        Ok(ExtractReport {
            bundle,
            accepted,
            rejected,
        })
    }
}

fn judge(
    path: &Path,
    scan: FileScan,
    reference: Option<&FileHeader>,
) -> Result<FileScan, Rejection> {
    if !scan.stop.is_clean() && scan.events > 0 {
        warn!(
            "{}: reading stopped early ({}), keeping {} complete events",
            path.display(),
            scan.stop,
            scan.events
        );
    }
    let header = match (&scan.header, scan.events) {
        (Some(header), events) if events > 0 => header,
        _ => return Err(Rejection::NoEvents { stop: scan.stop }),
    };
    if let Some(mismatch) = reference.and_then(|reference| header_mismatch(reference, header)) {
        return Err(Rejection::Incompatible { mismatch });
    }
    Ok(scan)
}

fn header_mismatch(reference: &FileHeader, candidate: &FileHeader) -> Option<Mismatch> {
    if candidate.collision_energy != reference.collision_energy {
        return Some(Mismatch::CollisionEnergy {
            reference: reference.collision_energy.clone(),
            found: candidate.collision_energy.clone(),
        });
    }
    if candidate.simulation_version != reference.simulation_version {
        return Some(Mismatch::Version {
            reference: reference.simulation_version.clone(),
            found: candidate.simulation_version.clone(),
        });
    }
    None
}
