//! Document assembly: drives the section renderers in a fixed order against one buffer
//! and serializes the result.
//!
//! Order: header → summary → skills → experience → education. Page margins are applied
//! once before any renderer runs. The first renderer error aborts assembly and no bytes
//! are produced.

use thiserror::Error;
use tracing::{debug, info};

use crate::docx::{self, DocxError};
use crate::layout::buffer::{DocumentBuffer, LayoutError, PageMargins, SectionKind};
use crate::layout::renderers::{
    EducationRenderer, ExperienceRenderer, HeaderRenderer, SectionRenderer, SkillsRenderer,
    SummaryRenderer,
};
use crate::layout::styles::StylePreset;
use crate::models::ResumeDocument;

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Docx(#[from] DocxError),
}

const RENDER_ORDER: [&dyn SectionRenderer; 5] = [
    &HeaderRenderer,
    &SummaryRenderer,
    &SkillsRenderer,
    &ExperienceRenderer,
    &EducationRenderer,
];

/// Builds the resume's document buffer without serializing it.
pub fn build_resume(resume: &ResumeDocument) -> Result<DocumentBuffer, LayoutError> {
    let mut buffer = DocumentBuffer::new();
    buffer.apply_page_margins(PageMargins::RESUME)?;
    for renderer in RENDER_ORDER {
        let start = buffer.len();
        renderer.render(&mut buffer, resume)?;
        debug!(
            section = ?renderer.section(),
            paragraphs = buffer.len() - start,
            "Rendered section"
        );
    }
    Ok(buffer)
}

/// Renders the resume and returns the `.docx` bytes.
pub fn assemble(resume: &ResumeDocument) -> Result<Vec<u8>, AssemblyError> {
    let buffer = build_resume(resume)?;
    let bytes = docx::write_docx(&buffer)?;
    info!(
        paragraphs = buffer.len(),
        bytes = bytes.len(),
        "Assembled resume document"
    );
    Ok(bytes)
}

/// One letter paragraph per input line, on a standard one-inch page.
pub fn build_letter(text: &str) -> Result<DocumentBuffer, LayoutError> {
    let mut buffer = DocumentBuffer::new();
    buffer.apply_page_margins(PageMargins::STANDARD)?;
    for line in text.lines() {
        let paragraph = buffer.add_paragraph(SectionKind::Letter, StylePreset::LetterText.paragraph());
        if !line.trim().is_empty() {
            paragraph.push_run(line.trim_end(), StylePreset::LetterText)?;
        }
    }
    Ok(buffer)
}

/// Renders plain letter text and returns the `.docx` bytes.
pub fn assemble_letter(text: &str) -> Result<Vec<u8>, AssemblyError> {
    let buffer = build_letter(text)?;
    let bytes = docx::write_docx(&buffer)?;
    info!(
        paragraphs = buffer.len(),
        bytes = bytes.len(),
        "Assembled cover letter document"
    );
    Ok(bytes)
}
