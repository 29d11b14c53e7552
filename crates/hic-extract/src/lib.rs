//! Extraction stage: reads f15 event files, classifies particles and sums
//! per-species counters into a result bundle.

pub mod classify;
pub mod config;
pub mod extractor;
pub mod kinematics;
pub mod layout;
pub mod reader;
pub mod summary;

pub use classify::{classify, ChargeMatch, Rule, TypeMatch, RULES};
pub use config::ExtractConfig;
pub use extractor::{
    scan_file, scan_reader, tally_event, AcceptedFile, ExtractReport, Extractor, FileScan,
    RejectedFile, Rejection,
};
pub use kinematics::Kinematics;
pub use layout::F15Layout;
pub use reader::{EventBlock, F15Reader, FileHeader, ParseStop, Particle};
pub use summary::{render_text_summary, summary_path, write_text_summary};
