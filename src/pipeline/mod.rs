//! Pipeline stages for a sentiment run.
//!
//! - `assemble`: score posts and flatten them into export rows
//! - `export`: write (and read back) the CSV artifact
//! - `summary`: aggregate counts and overall sentiment
//! - `run`: orchestrate the stages end to end

pub mod assemble;
pub mod export;
pub mod run;
pub mod summary;

pub use assemble::{analyze_posts, assemble_record, assemble_records};
pub use export::{ExportArtifact, decode_csv, encode_csv, read_records, write_csv};
pub use run::{RunReport, run, run_pipeline};
pub use summary::{SummaryReport, overall_label};
