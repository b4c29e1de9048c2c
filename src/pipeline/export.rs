// src/pipeline/export.rs

//! CSV export of analyzed records, and reading an export back.

use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::{AnalyzedRecord, EXPORT_COLUMNS};

/// The file written by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub path: PathBuf,
    /// Data rows, excluding the header
    pub row_count: usize,
}

impl ExportArtifact {
    /// File name component of the artifact path.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}

/// Encode records as CSV with the fixed header row.
pub fn encode_csv(records: &[AnalyzedRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_COLUMNS)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer.flush()?;

    writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))
}

/// Write records to `path`, replacing any existing file.
pub async fn write_csv(path: &Path, records: &[AnalyzedRecord]) -> Result<ExportArtifact> {
    let bytes = encode_csv(records)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, &bytes).await?;

    log::info!("Wrote {} rows to {}", records.len(), path.display());

    Ok(ExportArtifact {
        path: path.to_path_buf(),
        row_count: records.len(),
    })
}

/// Decode CSV produced by `encode_csv`. The header must match exactly.
pub fn decode_csv(bytes: &[u8]) -> Result<Vec<AnalyzedRecord>> {
    let mut reader = csv::Reader::from_reader(bytes);

    let headers = reader.headers()?;
    if !headers.iter().eq(EXPORT_COLUMNS) {
        return Err(AppError::validation(format!(
            "unexpected header '{}', expected '{}'",
            headers.iter().collect::<Vec<_>>().join(","),
            EXPORT_COLUMNS.join(",")
        )));
    }

    let mut records = Vec::new();
    for result in reader.deserialize() {
        records.push(result?);
    }
    Ok(records)
}

/// Read an exported file back into records.
pub async fn read_records(path: &Path) -> Result<Vec<AnalyzedRecord>> {
    let bytes = tokio::fs::read(path).await?;
    decode_csv(&bytes)
}
