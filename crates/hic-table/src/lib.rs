//! Formatter stage: arranges result bundles from an energy scan into the
//! three per-species text tables.

mod scan;
mod table;

pub use scan::{EnergyScan, ScanPoint, ScanSkip, ScanSkipReason};
pub use table::{render_table, table_path, write_tables, TableKind, TABLE_PRECISION};
