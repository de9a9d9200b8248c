use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use crate::domain::ClassificationResult;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No results to download")]
    NothingToExport,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed results file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("classification-results-{}.json", date.format("%Y-%m-%d"))
}

pub fn export_results(dir: &Path, result: &ClassificationResult) -> Result<PathBuf, ExportError> {
    export_results_on(dir, result, Utc::now().date_naive())
}

pub fn export_results_on(
    dir: &Path,
    result: &ClassificationResult,
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    if result.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    let path = dir.join(export_file_name(date));
    save_results(&path, result)?;
    tracing::info!(target: "export", path = %path.display(), "classification results saved");
    Ok(path)
}

pub fn save_results(path: &Path, result: &ClassificationResult) -> Result<(), ExportError> {
    let text = serde_json::to_string_pretty(result).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_results(path: &Path) -> Result<ClassificationResult, ExportError> {
    let text = fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })
}
