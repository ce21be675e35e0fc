//! Session domain module.
//!
//! Snapshots capture everything a reflection session has produced so it can
//! be saved by the caller and resumed later. The markdown report is rendered
//! from a snapshot.

mod report;
mod snapshot;

pub use report::render_markdown_report;
pub use snapshot::{SessionSnapshot, SnapshotSummary, SNAPSHOT_VERSION};
