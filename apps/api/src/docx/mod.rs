//! WordprocessingML container: serialize a `DocumentBuffer` to `.docx` bytes, and project an
//! uploaded `.docx` back to plain paragraph text.

pub mod filename;
pub mod reader;
pub mod writer;

use std::io;

use thiserror::Error;

pub use filename::{cover_letter_filename, resume_filename};
pub use reader::{extract_paragraphs, paragraphs_to_text};
pub use writer::write_docx;

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("missing required part: {0}")]
    MissingPart(&'static str),
}
