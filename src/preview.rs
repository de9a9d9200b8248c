use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    sync::Arc,
};

use parking_lot::Mutex;
use uuid::Uuid;

use crate::upload::UploadFile;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    fn mint(batch: Uuid, index: usize) -> Self {
        Self(format!("preview://{batch}/{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct PreviewContent {
    pub file_name: String,
    pub content_type: String,
    pub data: Arc<[u8]>,
}

#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    live: Arc<Mutex<HashMap<PreviewHandle, PreviewContent>>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // Duplicate names are last-write-wins; the overwritten handle is released at once.
    pub fn acquire(&self, files: &[UploadFile]) -> FileUrlMap {
        let batch = Uuid::new_v4();
        let mut entries = BTreeMap::new();
        {
            let mut live = self.live.lock();
            for (index, file) in files.iter().enumerate() {
                let handle = PreviewHandle::mint(batch, index);
                live.insert(
                    handle.clone(),
                    PreviewContent {
                        file_name: file.name.clone(),
                        content_type: file.content_type.clone(),
                        data: Arc::clone(&file.data),
                    },
                );
                if let Some(previous) = entries.insert(file.name.clone(), handle) {
                    live.remove(&previous);
                    tracing::warn!(
                        target: "preview",
                        name = %file.name,
                        "duplicate filename in batch; keeping the later file"
                    );
                }
            }
        }
        tracing::debug!(target: "preview", %batch, handles = entries.len(), "preview handles acquired");
        FileUrlMap {
            registry: self.clone(),
            batch,
            entries,
        }
    }

    pub fn resolve(&self, handle: &PreviewHandle) -> Option<PreviewContent> {
        self.live.lock().get(handle).cloned()
    }

    pub fn live(&self) -> usize {
        self.live.lock().len()
    }

    fn release_all<'a>(&self, handles: impl Iterator<Item = &'a PreviewHandle>) -> usize {
        let mut live = self.live.lock();
        handles.filter(|handle| live.remove(*handle).is_some()).count()
    }
}

/// Filename → preview handle for one submitted batch.
///
/// Dropping the map releases every handle it holds.
#[derive(Debug)]
pub struct FileUrlMap {
    registry: PreviewRegistry,
    batch: Uuid,
    entries: BTreeMap<String, PreviewHandle>,
}

impl FileUrlMap {
    pub fn get(&self, filename: &str) -> Option<&PreviewHandle> {
        self.entries.get(filename)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PreviewHandle)> {
        self.entries.iter().map(|(name, handle)| (name.as_str(), handle))
    }
}

impl Drop for FileUrlMap {
    fn drop(&mut self) {
        let released = self.registry.release_all(self.entries.values());
        tracing::debug!(target: "preview", batch = %self.batch, released, "preview handles released");
    }
}
