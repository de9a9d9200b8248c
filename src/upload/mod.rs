mod encoder;
mod file;

pub use encoder::{BatchPayload, FILES_FIELD, FilePart};
pub use file::{UploadError, UploadFile, load_batch};
