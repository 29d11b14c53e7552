//! Line-oriented reader for f15 event files.
//!
//! A file is a sequence of event blocks: a fixed preamble (whose first
//! occurrence carries the simulation version and collision energy), a
//! particle-count line, boilerplate, then one line per particle. Reading
//! stops at the first failure and the reason is kept as a [`ParseStop`] so
//! callers can tell a clean end of file from a damaged one.

use std::fmt;
use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::layout::F15Layout;

// A corrupt count line must not turn into a huge up-front allocation.
const MAX_PREALLOCATED: usize = 4096;

/// Tokens taken from the preamble of the first event block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHeader {
    /// Simulation version token.
    pub simulation_version: String,
    /// Collision energy token, verbatim.
    pub collision_energy: String,
}

/// Fields of one particle record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Energy.
    pub energy: f64,
    /// Momentum along x.
    pub px: f64,
    /// Momentum along y.
    pub py: f64,
    /// Momentum along the beam axis.
    pub pz: f64,
    /// Simulation particle type code.
    pub type_code: i32,
    /// Electric charge in units of e.
    pub charge: i32,
}

/// A fully read event block.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBlock {
    /// Particles in file order.
    pub particles: Vec<Particle>,
}

/// Why reading a file stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseStop {
    /// End of input at an event boundary (trailing blank lines allowed).
    EndOfFile,
    /// End of input in the middle of an event block.
    Truncated {
        /// Last line that was read.
        line: usize,
    },
    /// A line that does not match the expected layout.
    Malformed {
        /// Offending line.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
}

impl ParseStop {
    /// Whether the file ended where an event boundary was expected.
    pub fn is_clean(&self) -> bool {
        matches!(self, ParseStop::EndOfFile)
    }
}

impl fmt::Display for ParseStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseStop::EndOfFile => write!(f, "end of file"),
            ParseStop::Truncated { line } => {
                write!(f, "file ends inside an event block after line {line}")
            }
            ParseStop::Malformed { line, reason } => write!(f, "line {line}: {reason}"),
        }
    }
}

/// Iterator over the event blocks of one f15 stream.
pub struct F15Reader<R> {
    source: R,
    layout: F15Layout,
    line: usize,
    buf: String,
    header: Option<FileHeader>,
    stop: Option<ParseStop>,
}

impl<R: BufRead> F15Reader<R> {
    /// Wraps a buffered source.
    pub fn new(source: R, layout: F15Layout) -> Self {
        Self {
            source,
            layout,
            line: 0,
            buf: String::new(),
            header: None,
            stop: None,
        }
    }

    /// Consumes the reader, returning the header and the stop reason.
    pub fn finish(self) -> (Option<FileHeader>, ParseStop) {
        (self.header, self.stop.unwrap_or(ParseStop::EndOfFile))
    }

    fn advance(&mut self) -> Result<bool, ParseStop> {
        self.buf.clear();
        match self.source.read_line(&mut self.buf) {
            Ok(0) => Ok(false),
            Ok(_) => {
                self.line += 1;
                Ok(true)
            }
            Err(err) => Err(ParseStop::Malformed {
                line: self.line + 1,
                reason: format!("read failed: {err}"),
            }),
        }
    }

    fn malformed(&self, reason: impl Into<String>) -> ParseStop {
        ParseStop::Malformed {
            line: self.line,
            reason: reason.into(),
        }
    }

    fn token(&self, index: usize, what: &str) -> Result<String, ParseStop> {
        self.buf
            .split_whitespace()
            .nth(index)
            .map(str::to_string)
            .ok_or_else(|| self.malformed(format!("missing {what} (token {index})")))
    }

    // Moves to the next non-blank line; `false` once the input is exhausted.
    fn skip_blank_lines(&mut self) -> Result<bool, ParseStop> {
        loop {
            if !self.advance()? {
                return Ok(false);
            }
            if !self.buf.trim().is_empty() {
                return Ok(true);
            }
        }
    }

    fn next_line_or_truncated(&mut self) -> Result<(), ParseStop> {
        if self.advance()? {
            Ok(())
        } else {
            Err(ParseStop::Truncated { line: self.line })
        }
    }

    fn read_block(&mut self) -> Result<Option<EventBlock>, ParseStop> {
        // Blank lines between or after blocks carry nothing.
        if !self.skip_blank_lines()? {
            return Ok(None);
        }
        let first = self.header.is_none();
        let mut version = None;
        let mut energy = None;

        for preamble_line in 1..=self.layout.preamble_lines {
            if preamble_line > 1 {
                self.next_line_or_truncated()?;
            }
            if first && preamble_line == self.layout.version_line {
                version = Some(self.token(self.layout.version_token, "simulation version")?);
            }
            if first && preamble_line == self.layout.energy_line {
                energy = Some(self.token(self.layout.energy_token, "collision energy")?);
            }
        }
        if let (Some(simulation_version), Some(collision_energy)) = (version, energy) {
            self.header = Some(FileHeader {
                simulation_version,
                collision_energy,
            });
        }

        self.next_line_or_truncated()?;
        let declared = self.token(0, "particle count")?;
        let declared: usize = declared
            .parse()
            .map_err(|_| self.malformed(format!("invalid particle count '{declared}'")))?;

        for _ in 0..self.layout.lines_after_count {
            self.next_line_or_truncated()?;
        }

        let mut particles = Vec::with_capacity(declared.min(MAX_PREALLOCATED));
        for _ in 0..declared {
            self.next_line_or_truncated()?;
            particles.push(self.parse_particle()?);
        }
        Ok(Some(EventBlock { particles }))
    }

    fn parse_particle(&self) -> Result<Particle, ParseStop> {
        let fields: Vec<&str> = self.buf.split_whitespace().collect();
        let width = self.layout.record_width();
        if fields.len() < width {
            return Err(self.malformed(format!(
                "particle record has {} fields, expected at least {width}",
                fields.len()
            )));
        }
        let float = |index: usize, what: &str| -> Result<f64, ParseStop> {
            fields[index]
                .parse::<f64>()
                .map_err(|_| self.malformed(format!("invalid {what} '{}'", fields[index])))
        };
        let int = |index: usize, what: &str| -> Result<i32, ParseStop> {
            fields[index]
                .parse::<i32>()
                .map_err(|_| self.malformed(format!("invalid {what} '{}'", fields[index])))
        };
        let e = self.layout.energy_field;
        Ok(Particle {
            energy: float(e, "energy")?,
            px: float(e + 1, "px")?,
            py: float(e + 2, "py")?,
            pz: float(e + 3, "pz")?,
            type_code: int(self.layout.type_field, "type code")?,
            charge: int(self.layout.charge_field, "charge")?,
        })
    }
}

impl<R: BufRead> Iterator for F15Reader<R> {
    type Item = EventBlock;

    fn next(&mut self) -> Option<EventBlock> {
        if self.stop.is_some() {
            return None;
        }
        match self.read_block() {
            Ok(Some(block)) => Some(block),
            Ok(None) => {
                self.stop = Some(ParseStop::EndOfFile);
                None
            }
            Err(stop) => {
                self.stop = Some(stop);
                None
            }
        }
    }
}
