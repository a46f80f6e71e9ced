//! Text extraction for uploaded documents.
//!
//! PDFs go through `pdf-extract` on the blocking pool, images through the vision
//! model, plain text is decoded as lossy UTF-8.

use async_trait::async_trait;
use base64::Engine;
use tracing::{debug, warn};

use crate::documents::prompts::{OCR_PROMPT, OCR_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// PDFs yielding less text than this are treated as scanned/image-only.
const MIN_PDF_TEXT_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Png,
    Jpeg,
    PlainText,
}

impl DocumentKind {
    /// Resolves the kind from the declared content type, falling back to the
    /// file extension when the content type is absent or generic.
    pub fn detect(content_type: Option<&str>, file_name: &str) -> Option<Self> {
        let from_mime = content_type.and_then(|ct| {
            let essence = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            match essence.as_str() {
                "application/pdf" => Some(DocumentKind::Pdf),
                "image/png" => Some(DocumentKind::Png),
                "image/jpeg" | "image/jpg" => Some(DocumentKind::Jpeg),
                "text/plain" => Some(DocumentKind::PlainText),
                _ => None,
            }
        });
        from_mime.or_else(|| {
            let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
            match ext.as_str() {
                "pdf" => Some(DocumentKind::Pdf),
                "png" => Some(DocumentKind::Png),
                "jpg" | "jpeg" => Some(DocumentKind::Jpeg),
                "txt" => Some(DocumentKind::PlainText),
                _ => None,
            }
        })
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Png => "image/png",
            DocumentKind::Jpeg => "image/jpeg",
            DocumentKind::PlainText => "text/plain",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    PdfText,
    /// The PDF parsed but held (almost) no text, typically a scan.
    PdfEmpty,
    VisionOcr,
    PlainText,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::PdfText => "pdf_text",
            ExtractionMethod::PdfEmpty => "pdf_empty",
            ExtractionMethod::VisionOcr => "vision_ocr",
            ExtractionMethod::PlainText => "plain_text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: Option<String>,
    pub method: ExtractionMethod,
}

/// Reads the text out of an image.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, image: &[u8]) -> Result<String, AppError>;
}

/// OCR through the configured vision model.
#[async_trait]
impl TextRecognizer for LlmClient {
    async fn recognize(&self, image: &[u8]) -> Result<String, AppError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image);
        self.describe_images(OCR_PROMPT, OCR_SYSTEM, &[encoded])
            .await
            .map_err(|e| AppError::Llm(format!("OCR failed: {e}")))
    }
}

pub async fn extract_text(
    kind: DocumentKind,
    bytes: &[u8],
    ocr: &dyn TextRecognizer,
) -> Result<Extraction, AppError> {
    match kind {
        DocumentKind::Pdf => {
            let owned = bytes.to_vec();
            let raw = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&owned))
                .await
                .map_err(|e| {
                    if e.is_panic() {
                        AppError::UnprocessableEntity("Could not read PDF: parser aborted".to_string())
                    } else {
                        AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}"))
                    }
                })?
                .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?;
            let text = normalize_text(&raw);
            if text.chars().count() < MIN_PDF_TEXT_CHARS {
                warn!("PDF yielded only {} chars of text", text.chars().count());
                return Ok(Extraction {
                    text: non_empty(text),
                    method: ExtractionMethod::PdfEmpty,
                });
            }
            Ok(Extraction {
                text: Some(text),
                method: ExtractionMethod::PdfText,
            })
        }
        DocumentKind::Png | DocumentKind::Jpeg => {
            let raw = ocr.recognize(bytes).await?;
            debug!("OCR returned {} chars", raw.len());
            Ok(Extraction {
                text: non_empty(normalize_text(&raw)),
                method: ExtractionMethod::VisionOcr,
            })
        }
        DocumentKind::PlainText => Ok(Extraction {
            text: non_empty(normalize_text(&String::from_utf8_lossy(bytes))),
            method: ExtractionMethod::PlainText,
        }),
    }
}

/// CRLF to LF, trailing whitespace stripped per line, blank-line runs capped at two.
pub fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0;
    for line in raw.replace("\r\n", "\n").replace('\r', "\n").lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 2 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim().to_string()
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeOcr(&'static str);

    /// Single-page PDF drawing `text` in Helvetica, with a correct xref table.
    fn one_line_pdf(text: &str) -> Vec<u8> {
        let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
                .to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
            format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }
        let xref_at = pdf.len();
        let mut tail = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            tail.push_str(&format!("{offset:010} 00000 n \n"));
        }
        tail.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        ));
        pdf.extend_from_slice(tail.as_bytes());
        pdf
    }

    #[async_trait]
    impl TextRecognizer for FakeOcr {
        async fn recognize(&self, _image: &[u8]) -> Result<String, AppError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_detect_prefers_content_type() {
        assert_eq!(
            DocumentKind::detect(Some("application/pdf"), "resume.txt"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::detect(Some("text/plain; charset=utf-8"), "resume"),
            Some(DocumentKind::PlainText)
        );
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        assert_eq!(
            DocumentKind::detect(Some("application/octet-stream"), "Scan.JPG"),
            Some(DocumentKind::Jpeg)
        );
        assert_eq!(DocumentKind::detect(None, "cv.png"), Some(DocumentKind::Png));
        assert_eq!(DocumentKind::detect(None, "cv.docx"), None);
        assert_eq!(DocumentKind::detect(None, "noextension"), None);
    }

    #[test]
    fn test_normalize_text() {
        let raw = "Jane Doe   \r\n\r\n\r\n\r\n\r\nExperience\t\nAcme\n";
        assert_eq!(normalize_text(raw), "Jane Doe\n\n\nExperience\nAcme");
    }

    #[test]
    fn test_normalize_blank_input() {
        assert_eq!(normalize_text(" \n\n \t\n"), "");
    }

    #[tokio::test]
    async fn test_plain_text_extraction() {
        let e = extract_text(DocumentKind::PlainText, b"Jane Doe\r\nSkills", &FakeOcr(""))
            .await
            .unwrap();
        assert_eq!(e.method, ExtractionMethod::PlainText);
        assert_eq!(e.text.as_deref(), Some("Jane Doe\nSkills"));
    }

    #[tokio::test]
    async fn test_image_goes_through_ocr() {
        let e = extract_text(DocumentKind::Png, &[0x89, 0x50], &FakeOcr("Jane Doe  \nPython"))
            .await
            .unwrap();
        assert_eq!(e.method, ExtractionMethod::VisionOcr);
        assert_eq!(e.text.as_deref(), Some("Jane Doe\nPython"));
    }

    #[tokio::test]
    async fn test_empty_ocr_result_has_no_text() {
        let e = extract_text(DocumentKind::Jpeg, &[0xff, 0xd8], &FakeOcr("   "))
            .await
            .unwrap();
        assert_eq!(e.text, None);
    }

    #[tokio::test]
    async fn test_text_light_pdf_is_marked_empty() {
        let e = extract_text(DocumentKind::Pdf, &one_line_pdf("Jane Doe"), &FakeOcr(""))
            .await
            .unwrap();
        assert_eq!(e.method, ExtractionMethod::PdfEmpty);
        let chars = e.text.as_deref().map_or(0, |t| t.chars().count());
        assert!(chars < MIN_PDF_TEXT_CHARS, "{chars} chars");
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_unprocessable() {
        let result = extract_text(DocumentKind::Pdf, b"not a pdf", &FakeOcr("")).await;
        assert!(matches!(result, Err(AppError::UnprocessableEntity(_))));
    }

    #[test]
    fn test_extraction_method_labels() {
        assert_eq!(ExtractionMethod::PdfEmpty.as_str(), "pdf_empty");
        assert_eq!(ExtractionMethod::VisionOcr.as_str(), "vision_ocr");
    }
}
