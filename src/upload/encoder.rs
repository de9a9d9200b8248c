use std::sync::Arc;

use reqwest::multipart::{Form, Part};

use super::file::UploadFile;

pub const FILES_FIELD: &str = "files";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: &'static str,
    pub file_name: String,
    pub content_type: String,
    pub data: Arc<[u8]>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchPayload {
    parts: Vec<FilePart>,
}

impl BatchPayload {
    pub fn encode(files: &[UploadFile]) -> Self {
        let parts = files
            .iter()
            .map(|file| FilePart {
                field: FILES_FIELD,
                file_name: file.name.clone(),
                content_type: file.content_type.clone(),
                data: Arc::clone(&file.data),
            })
            .collect();
        Self { parts }
    }

    pub fn parts(&self) -> &[FilePart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    // Forms are single-use, so this runs once per attempt.
    pub fn to_form(&self) -> reqwest::Result<Form> {
        self.parts.iter().try_fold(Form::new(), |form, part| {
            let body = Part::bytes(part.data.to_vec())
                .file_name(part.file_name.clone())
                .mime_str(&part.content_type)?;
            Ok(form.part(part.field, body))
        })
    }
}
