//! Collect, enhance and review stages for the tractor-tyre business dataset.
//!
//! The stages are plain functions over `BusinessRecord` slices plus a
//! [`Pipeline`] that sequences them against the external collaborators in
//! [`sources`] and persists a snapshot after each stage.

pub mod classify;
pub mod dedup;
pub mod error;
pub mod export;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod quality;
pub mod report;
pub mod review;
pub mod snapshot;
pub mod sources;

pub use dedup::{dedup_records, Deduplicator};
pub use error::PipelineError;
pub use export::{export_snapshot, spreadsheet_url, ExportOutcome, SheetsExporter};
pub use pipeline::{Collector, Enhancer, Pipeline, Reviewer, RunSummary};
pub use quality::{score_records, Assessment, DatasetQuality};
pub use report::{DatasetReport, Field};
pub use review::{review_records, ReviewOutcome};
pub use snapshot::{read_snapshot, snapshot_path, write_snapshot, Stage};
pub use sources::{ContactDetails, PageSource, PlacesSearch, SearchHit, SpreadsheetExport};
