//! Text extraction keyed on file extension

use crate::error::{Error, Result};

/// Text pulled out of a stored file
#[derive(Debug, Clone)]
pub struct ExtractedText {
    /// Full extracted text
    pub text: String,
    /// Page count, when the format has pages
    pub page_count: Option<u32>,
}

/// Extract text from a file based on its extension.
///
/// Supported: `.pdf`, `.docx`, `.txt`. Anything else is an unsupported-input
/// error, which the ingestion pipeline turns into a terminal FAILED status.
pub fn extract_text(filename: &str, data: &[u8]) -> Result<ExtractedText> {
    let extension = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    match extension.as_str() {
        "pdf" => extract_pdf(filename, data),
        "docx" => extract_docx(filename, data),
        "txt" => Ok(extract_txt(data)),
        other => Err(Error::UnsupportedFileType(other.to_string())),
    }
}

fn extract_pdf(filename: &str, data: &[u8]) -> Result<ExtractedText> {
    let text = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| Error::extraction(filename, e.to_string()))?;

    // Page count is advisory; a malformed xref table shouldn't fail extraction
    let page_count = lopdf::Document::load_mem(data)
        .ok()
        .map(|doc| doc.get_pages().len() as u32);

    Ok(ExtractedText { text, page_count })
}

fn extract_docx(filename: &str, data: &[u8]) -> Result<ExtractedText> {
    let doc =
        docx_rs::read_docx(data).map_err(|e| Error::extraction(filename, e.to_string()))?;

    let mut text = String::new();

    for child in doc.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            for child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(t) = child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }

    Ok(ExtractedText {
        text,
        page_count: None,
    })
}

fn extract_txt(data: &[u8]) -> ExtractedText {
    ExtractedText {
        text: String::from_utf8_lossy(data).to_string(),
        page_count: None,
    }
}
