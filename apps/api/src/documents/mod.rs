// Document intake: upload, object storage, and text extraction (PDF parsing,
// vision-model OCR for images, plain text).

pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod storage;
