//! Flat JSON snapshot files, one per completed stage.
//!
//! Each file is a pretty-printed array of records with no wrapper object.
//! Writes go to a sibling temporary file that is renamed over the target, so
//! a failed write leaves the previous snapshot intact.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tyrescout_core::BusinessRecord;

use crate::error::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Collected,
    Enhanced,
    Reviewed,
}

impl Stage {
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Stage::Collected => "google_places_data.json",
            Stage::Enhanced => "enhanced_data.json",
            Stage::Reviewed => "final_data.json",
        }
    }

    /// CLI subcommand that produces this stage's snapshot.
    #[must_use]
    pub fn command(self) -> &'static str {
        match self {
            Stage::Collected => "collect",
            Stage::Enhanced => "enhance",
            Stage::Reviewed => "review",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Collected => write!(f, "collected"),
            Stage::Enhanced => write!(f, "enhanced"),
            Stage::Reviewed => write!(f, "reviewed"),
        }
    }
}

#[must_use]
pub fn snapshot_path(data_dir: &Path, stage: Stage) -> PathBuf {
    data_dir.join(stage.file_name())
}

/// Overwrites the snapshot for `stage`, creating `data_dir` if needed.
///
/// # Errors
///
/// Returns [`PipelineError::SnapshotSerialize`] if the records cannot be
/// encoded, or [`PipelineError::SnapshotIo`] if the directory or file cannot
/// be written.
pub fn write_snapshot(
    data_dir: &Path,
    stage: Stage,
    records: &[BusinessRecord],
) -> Result<PathBuf, PipelineError> {
    let path = snapshot_path(data_dir, stage);
    let json = serde_json::to_string_pretty(records).map_err(PipelineError::SnapshotSerialize)?;

    std::fs::create_dir_all(data_dir).map_err(|source| PipelineError::SnapshotIo {
        action: "create directory for",
        path: path.display().to_string(),
        source,
    })?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(|source| PipelineError::SnapshotIo {
        action: "write",
        path: tmp.display().to_string(),
        source,
    })?;
    std::fs::rename(&tmp, &path).map_err(|source| PipelineError::SnapshotIo {
        action: "replace",
        path: path.display().to_string(),
        source,
    })?;

    tracing::info!(%stage, path = %path.display(), records = records.len(), "snapshot written");
    Ok(path)
}

/// Loads the snapshot for `stage`.
///
/// # Errors
///
/// - [`PipelineError::MissingSnapshot`] if the file does not exist.
/// - [`PipelineError::SnapshotIo`] for any other read failure.
/// - [`PipelineError::SnapshotParse`] if the file is not a JSON array of
///   records.
pub fn read_snapshot(data_dir: &Path, stage: Stage) -> Result<Vec<BusinessRecord>, PipelineError> {
    let path = snapshot_path(data_dir, stage);
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(PipelineError::MissingSnapshot {
                stage,
                path: path.display().to_string(),
            });
        }
        Err(source) => {
            return Err(PipelineError::SnapshotIo {
                action: "read",
                path: path.display().to_string(),
                source,
            });
        }
    };

    let records: Vec<BusinessRecord> =
        serde_json::from_str(&raw).map_err(|source| PipelineError::SnapshotParse {
            path: path.display().to_string(),
            source,
        })?;
    tracing::debug!(%stage, records = records.len(), "snapshot loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> BusinessRecord {
        BusinessRecord::new(id, name)
    }

    #[test]
    fn stage_file_names() {
        assert_eq!(Stage::Collected.file_name(), "google_places_data.json");
        assert_eq!(Stage::Enhanced.file_name(), "enhanced_data.json");
        assert_eq!(Stage::Reviewed.file_name(), "final_data.json");
    }

    #[test]
    fn write_creates_directory_and_reads_back() {
        let tmp = tempfile::tempdir().unwrap();
        let data_dir = tmp.path().join("nested").join("data");
        let records = vec![record("A", "Boland Tyres"), record("B", "Agri Wheel")];

        let path = write_snapshot(&data_dir, Stage::Collected, &records).unwrap();
        assert_eq!(path, data_dir.join("google_places_data.json"));
        assert!(!data_dir.join("google_places_data.json.tmp").exists());

        let loaded = read_snapshot(&data_dir, Stage::Collected).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn snapshot_is_a_bare_array_with_unknown_sentinels() {
        let tmp = tempfile::tempdir().unwrap();
        write_snapshot(tmp.path(), Stage::Enhanced, &[record("A", "Boland Tyres")]).unwrap();

        let raw = std::fs::read_to_string(tmp.path().join("enhanced_data.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value.as_array().expect("top-level array")[0];
        assert_eq!(first["externalId"], "A");
        assert_eq!(first["companyType"], "Unknown");
        assert_eq!(first["repairCosts"], "Unknown");
        assert_eq!(first["website"], "Unknown");
        assert!(raw.contains('\n'), "snapshot should be pretty-printed");
    }

    #[test]
    fn write_overwrites_previous_snapshot() {
        let tmp = tempfile::tempdir().unwrap();
        write_snapshot(
            tmp.path(),
            Stage::Reviewed,
            &[record("A", "a"), record("B", "b")],
        )
        .unwrap();
        write_snapshot(tmp.path(), Stage::Reviewed, &[record("C", "c")]).unwrap();

        let loaded = read_snapshot(tmp.path(), Stage::Reviewed).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].external_id, "C");
    }

    #[test]
    fn missing_snapshot_names_the_producing_command() {
        let tmp = tempfile::tempdir().unwrap();
        let err = read_snapshot(tmp.path(), Stage::Collected).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingSnapshot {
                stage: Stage::Collected,
                ..
            }
        ));
        assert!(err.to_string().contains("run `collect` first"));
    }

    #[test]
    fn malformed_snapshot_is_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("enhanced_data.json"), "{ not json").unwrap();
        let err = read_snapshot(tmp.path(), Stage::Enhanced).unwrap_err();
        assert!(matches!(err, PipelineError::SnapshotParse { .. }));
    }

    #[test]
    fn reads_legacy_key_names() {
        let tmp = tempfile::tempdir().unwrap();
        let legacy = r#"[{
            "placeId": "ChIJA",
            "companyName": "Boland Tyres",
            "companyType": "Unknown",
            "phoneNumber": "Unknown",
            "website": "https://boland.co.za",
            "searchTerm": "tractor tyre repair Paarl",
            "area": "Paarl"
        }]"#;
        std::fs::write(tmp.path().join("google_places_data.json"), legacy).unwrap();

        let loaded = read_snapshot(tmp.path(), Stage::Collected).unwrap();
        assert_eq!(loaded[0].external_id, "ChIJA");
        assert_eq!(loaded[0].name, "Boland Tyres");
        assert_eq!(loaded[0].website.as_deref(), Some("https://boland.co.za"));
        assert_eq!(loaded[0].source_area, "Paarl");
        assert!(loaded[0].company_type.is_none());
    }
}
