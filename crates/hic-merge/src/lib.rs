//! Combiner stage: merges result bundles from independent runs of the same
//! physical setup by summing their event counts and counters.

mod merge;
mod policy;

pub use merge::{combine, merge_bundles, MergeReport, SkipReason, SkippedInput};
pub use policy::{assess, MergePolicy, Verdict};
