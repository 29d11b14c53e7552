use serde::{Deserialize, Serialize};

use hic_core::{ErrorInfo, HicError};

/// Fixed line and token positions of the f15 event-file format.
///
/// Line numbers are 1-based within the event preamble, token positions are
/// 0-based indices into the whitespace-split line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct F15Layout {
    /// Lines preceding the particle-count line of every event block.
    pub preamble_lines: usize,
    /// Preamble line carrying the simulation version (first block only).
    pub version_line: usize,
    /// Token index of the simulation version on `version_line`.
    pub version_token: usize,
    /// Preamble line carrying the collision energy (first block only).
    pub energy_line: usize,
    /// Token index of the collision energy on `energy_line`.
    pub energy_token: usize,
    /// Boilerplate lines between the particle count and the first record.
    pub lines_after_count: usize,
    /// Token index of the particle energy; px, py, pz follow it.
    pub energy_field: usize,
    /// Token index of the particle type code.
    pub type_field: usize,
    /// Token index of the particle charge.
    pub charge_field: usize,
}

impl Default for F15Layout {
    fn default() -> Self {
        Self {
            preamble_lines: 17,
            version_line: 1,
            version_token: 2,
            energy_line: 5,
            energy_token: 5,
            lines_after_count: 1,
            energy_field: 4,
            type_field: 9,
            charge_field: 11,
        }
    }
}

impl F15Layout {
    /// Number of tokens a particle record must provide.
    pub fn record_width(&self) -> usize {
        (self.energy_field + 4)
            .max(self.type_field + 1)
            .max(self.charge_field + 1)
    }

    /// Rejects layouts whose header lines fall outside the preamble.
    pub fn validate(&self) -> Result<(), HicError> {
        for (name, line) in [
            ("version_line", self.version_line),
            ("energy_line", self.energy_line),
        ] {
            if line == 0 || line > self.preamble_lines {
                return Err(HicError::Usage(
                    ErrorInfo::new("layout-line", "header line lies outside the event preamble")
                        .with_context("field", name)
                        .with_context("line", line.to_string())
                        .with_context("preamble_lines", self.preamble_lines.to_string()),
                ));
            }
        }
        Ok(())
    }
}
