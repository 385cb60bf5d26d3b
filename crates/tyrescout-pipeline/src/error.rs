use thiserror::Error;

use crate::snapshot::Stage;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no {stage} snapshot at {path}; run `{}` first", .stage.command())]
    MissingSnapshot { stage: Stage, path: String },

    #[error("failed to {action} snapshot {path}: {source}")]
    SnapshotIo {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot {path}: {source}")]
    SnapshotParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize snapshot: {0}")]
    SnapshotSerialize(#[source] serde_json::Error),

    #[error("spreadsheet export failed: {0}")]
    Export(String),
}
