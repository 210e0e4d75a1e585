//! Text Extractor — format-dispatching reader producing raw text from a resume file.
//!
//! Extraction is best-effort: a corrupt PDF or DOCX yields an empty string and a
//! warning, never an error. Only a missing path fails.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};
use tracing::{debug, warn};

use crate::errors::ResumeError;
use crate::resume::models::{DocumentFormat, RawDocument};

/// Reads the file at `path` and returns its visible text.
pub fn extract_text(path: &Path) -> Result<String, ResumeError> {
    let document = RawDocument::read(path)?;
    Ok(extract_document(&document))
}

/// Dispatches on the document's format tag.
pub fn extract_document(document: &RawDocument) -> String {
    let text = match document.format {
        DocumentFormat::Pdf => extract_pdf_text(&document.content),
        DocumentFormat::Docx => extract_docx_text(&document.content),
        DocumentFormat::Text => extract_plain_text(&document.content),
    };

    debug!(
        path = %document.path.display(),
        format = ?document.format,
        chars = text.chars().count(),
        "Extracted resume text"
    );
    text
}

/// Extracts PDF text page by page, joining pages with newlines.
///
/// Pages without a text layer contribute an empty string. pdf-extract panics on
/// some malformed streams, so the whole extraction runs under `catch_unwind`.
pub fn extract_pdf_text(bytes: &[u8]) -> String {
    let result = catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));

    match result {
        Ok(Ok(pages)) => join_pages(&pages),
        Ok(Err(e)) => {
            warn!(error = %e, "PDF extraction failed, returning empty text");
            String::new()
        }
        Err(_) => {
            warn!("PDF extraction panicked on a malformed document, returning empty text");
            String::new()
        }
    }
}

/// Joins page texts with newlines; a page holding only whitespace becomes "".
fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| if page.trim().is_empty() { "" } else { page.as_str() })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extracts the visible text of a DOCX package: body paragraphs and table
/// cells in document order, including hyperlink text.
/// Legacy binary `.doc` files fail to parse and yield an empty string.
pub fn extract_docx_text(bytes: &[u8]) -> String {
    let docx = match read_docx(bytes) {
        Ok(docx) => docx,
        Err(e) => {
            warn!(error = ?e, "DOCX extraction failed, returning empty text");
            return String::new();
        }
    };

    let mut blocks = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(para) => blocks.push(paragraph_text(para)),
            DocumentChild::Table(table) => table_text(table, &mut blocks),
            _ => {}
        }
    }

    blocks
        .into_iter()
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// One block per cell paragraph, row by row; nested tables are walked in place.
fn table_text(table: &Table, blocks: &mut Vec<String>) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(para) => blocks.push(paragraph_text(para)),
                    TableCellContent::Table(nested) => table_text(nested, blocks),
                    _ => {}
                }
            }
        }
    }
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut out = String::new();
    push_paragraph_children(&para.children, &mut out);
    out
}

fn push_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, out),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            _ => {}
        }
    }
}

fn push_run(run: &Run, out: &mut String) {
    for rc in &run.children {
        match rc {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

/// Decodes as UTF-8, replacing invalid sequences with U+FFFD.
pub fn extract_plain_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
