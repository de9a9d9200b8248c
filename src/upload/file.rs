use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use thiserror::Error;

use crate::config::UploadConfig;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No files selected")]
    Empty,
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{name} is {size} bytes, above the {limit} byte limit")]
    TooLarge { name: String, size: u64, limit: u64 },
    #[error("{name} ({content_type}) is not an accepted file type")]
    UnsupportedType { name: String, content_type: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub data: Arc<[u8]>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub async fn read(path: &Path) -> Result<Self, UploadError> {
        let data = tokio::fs::read(path).await.map_err(|source| UploadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self::new(name, content_type, data))
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn validate(&self, cfg: &UploadConfig) -> Result<(), UploadError> {
        if self.size() > cfg.max_file_size {
            return Err(UploadError::TooLarge {
                name: self.name.clone(),
                size: self.size(),
                limit: cfg.max_file_size,
            });
        }
        if !cfg
            .allowed_file_types
            .iter()
            .any(|pattern| self.matches_type(pattern))
        {
            return Err(UploadError::UnsupportedType {
                name: self.name.clone(),
                content_type: self.content_type.clone(),
            });
        }
        Ok(())
    }

    // `.ext`, `type/*` or an exact content type
    pub fn matches_type(&self, pattern: &str) -> bool {
        let pattern = pattern.trim().to_ascii_lowercase();
        let content_type = self.content_type.to_ascii_lowercase();
        if pattern.starts_with('.') {
            return self.name.to_ascii_lowercase().ends_with(&pattern);
        }
        if let Some(prefix) = pattern.strip_suffix("/*") {
            return content_type
                .split_once('/')
                .is_some_and(|(top, _)| top == prefix);
        }
        content_type == pattern
    }
}

pub async fn load_batch(paths: &[PathBuf], cfg: &UploadConfig) -> Result<Vec<UploadFile>, UploadError> {
    if paths.is_empty() {
        return Err(UploadError::Empty);
    }
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let file = UploadFile::read(path).await?;
        file.validate(cfg)?;
        tracing::debug!(
            target: "upload",
            name = %file.name,
            content_type = %file.content_type,
            size = file.size(),
            "file accepted"
        );
        files.push(file);
    }
    Ok(files)
}
