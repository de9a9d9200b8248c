use std::collections::HashSet;

use crate::{
    api::{ApiClient, ApiError},
    domain::{Category, ClassificationResult},
    preview::{FileUrlMap, PreviewRegistry},
    upload::{BatchPayload, UploadFile},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub category: Category,
    pub id: i64,
    pub filenames: Vec<String>,
}

pub struct IntakeSession {
    client: ApiClient,
    previews: PreviewRegistry,
    result: ClassificationResult,
    file_urls: Option<FileUrlMap>,
}

impl IntakeSession {
    pub fn new(client: ApiClient, previews: PreviewRegistry) -> Self {
        Self {
            client,
            previews,
            result: ClassificationResult::default(),
            file_urls: None,
        }
    }

    pub fn result(&self) -> &ClassificationResult {
        &self.result
    }

    pub fn file_urls(&self) -> Option<&FileUrlMap> {
        self.file_urls.as_ref()
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    /// On failure the previous result and previews are left as they were.
    pub async fn submit(&mut self, files: &[UploadFile]) -> Result<&ClassificationResult, ApiError> {
        let payload = BatchPayload::encode(files);
        let result = self.client.categorize(&payload).await?;

        let submitted: HashSet<&str> = files.iter().map(|file| file.name.as_str()).collect();
        for filename in result.referenced_filenames() {
            if !submitted.contains(filename) {
                tracing::warn!(
                    target: "session",
                    filename,
                    "result references a file that was not part of the batch"
                );
            }
        }

        self.file_urls = None;
        self.file_urls = Some(self.previews.acquire(files));
        self.set_result(result);
        tracing::info!(
            target: "session",
            files = files.len(),
            documents = self.result.total_items(),
            "batch classified"
        );
        Ok(&self.result)
    }

    pub fn set_result(&mut self, result: ClassificationResult) {
        self.result = result.normalized();
    }

    pub fn remove_item(&mut self, category: Category, id: i64) -> Option<Removal> {
        let mut next = self.result.clone();
        let filenames = next.remove_in_place(category, id)?;
        self.result = next;
        tracing::info!(
            target: "session",
            category = %category,
            id,
            files = ?filenames,
            "document removed from {}",
            category.title()
        );
        Some(Removal {
            category,
            id,
            filenames,
        })
    }

    pub fn clear(&mut self) {
        self.result = ClassificationResult::default();
        self.file_urls = None;
    }
}
