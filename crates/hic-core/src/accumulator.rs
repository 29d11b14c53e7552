//! Per-species counters accumulated over events.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HicError};

/// Counters tracked for a single species.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpeciesCounters {
    /// Number of particles with no kinematic cut.
    pub total: u64,
    /// Sum of transverse momenta of particles inside the rapidity window.
    pub midrapidity_pt_sum: f64,
    /// Number of particles inside the rapidity window.
    pub midrapidity_count: u64,
}

impl SpeciesCounters {
    fn absorb(&mut self, other: &SpeciesCounters) {
        self.total += other.total;
        self.midrapidity_pt_sum += other.midrapidity_pt_sum;
        self.midrapidity_count += other.midrapidity_count;
    }

    /// Mean transverse momentum inside the window, zero when it is empty.
    pub fn mean_midrapidity_pt(&self) -> f64 {
        if self.midrapidity_count > 0 {
            self.midrapidity_pt_sum / self.midrapidity_count as f64
        } else {
            0.0
        }
    }
}

/// Dense `species x counters` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Accumulator {
    rows: Vec<SpeciesCounters>,
}

impl Accumulator {
    /// Creates a table with `species` zeroed rows.
    pub fn zeroed(species: usize) -> Self {
        Self {
            rows: vec![SpeciesCounters::default(); species],
        }
    }

    /// Builds a table from explicit rows.
    pub fn from_rows(rows: Vec<SpeciesCounters>) -> Self {
        Self { rows }
    }

    /// Number of species rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in species order.
    pub fn rows(&self) -> &[SpeciesCounters] {
        &self.rows
    }

    /// Counters for one species.
    pub fn row(&self, index: usize) -> Option<&SpeciesCounters> {
        self.rows.get(index)
    }

    /// Records one particle of species `index`.
    ///
    /// Panics if `index` is out of range; callers classify against the same
    /// species table the accumulator was sized from.
    pub fn record(&mut self, index: usize, pt: f64, at_midrapidity: bool) {
        let row = &mut self.rows[index];
        row.total += 1;
        if at_midrapidity {
            row.midrapidity_pt_sum += pt;
            row.midrapidity_count += 1;
        }
    }

    /// Adds `other` elementwise into `self`.
    pub fn absorb(&mut self, other: &Accumulator) -> Result<(), HicError> {
        if self.rows.len() != other.rows.len() {
            return Err(HicError::Compat(
                ErrorInfo::new("accumulator-shape", "accumulator row counts differ")
                    .with_context("expected", self.rows.len().to_string())
                    .with_context("found", other.rows.len().to_string()),
            ));
        }
        for (mine, theirs) in self.rows.iter_mut().zip(&other.rows) {
            mine.absorb(theirs);
        }
        Ok(())
    }

    /// Total number of recorded particles across all species.
    pub fn particles(&self) -> u64 {
        self.rows.iter().map(|row| row.total).sum()
    }

    /// Checks the counter invariants: midrapidity counts never exceed the
    /// totals and momentum sums are finite and non-negative.
    pub fn is_consistent(&self) -> bool {
        self.rows.iter().all(|row| {
            row.midrapidity_count <= row.total
                && row.midrapidity_pt_sum.is_finite()
                && row.midrapidity_pt_sum >= 0.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_respects_window() {
        let mut acc = Accumulator::zeroed(3);
        acc.record(1, 0.5, true);
        acc.record(1, 0.7, false);
        let row = acc.row(1).unwrap();
        assert_eq!(row.total, 2);
        assert_eq!(row.midrapidity_count, 1);
        assert!((row.midrapidity_pt_sum - 0.5).abs() < 1e-12);
        assert_eq!(acc.particles(), 2);
        assert!(acc.is_consistent());
    }

    #[test]
    fn absorb_rejects_shape_mismatch() {
        let mut acc = Accumulator::zeroed(3);
        let err = acc.absorb(&Accumulator::zeroed(4)).unwrap_err();
        assert_eq!(err.info().code, "accumulator-shape");
    }

    #[test]
    fn empty_window_mean_is_zero() {
        assert_eq!(SpeciesCounters::default().mean_midrapidity_pt(), 0.0);
    }
}
