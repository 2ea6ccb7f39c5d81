//! Section renderers, one per resume section, each appending styled paragraphs to the
//! shared `DocumentBuffer`.
//!
//! Renderers are stateless. Absent optional data never fails a renderer: the affected line
//! is omitted and the rest of the entry still renders. The only failure is text that cannot
//! be represented in the output container (`LayoutError::InvalidText`).

pub mod education;
pub mod experience;
pub mod header;
pub mod skills;
pub mod summary;

use crate::layout::buffer::{DocumentBuffer, LayoutError, SectionKind};
use crate::layout::styles::{StylePreset, ENTRY_GAP_PT};
use crate::models::ResumeDocument;

pub use education::EducationRenderer;
pub use experience::ExperienceRenderer;
pub use header::HeaderRenderer;
pub use skills::SkillsRenderer;
pub use summary::SummaryRenderer;

/// A renderer for one resume section. Implemented by the five section renderers and
/// driven in a fixed order by the assembler.
pub trait SectionRenderer: Send + Sync {
    fn section(&self) -> SectionKind;

    fn render(&self, buffer: &mut DocumentBuffer, resume: &ResumeDocument)
        -> Result<(), LayoutError>;
}

/// Emits a section heading: 13pt bold italic with a bottom rule, no spacing.
pub fn render_section_title(
    buffer: &mut DocumentBuffer,
    section: SectionKind,
    title: &str,
) -> Result<(), LayoutError> {
    buffer
        .add_paragraph(section, StylePreset::SectionTitle.paragraph())
        .push_run(title, StylePreset::SectionTitle)
}

/// Gives the last paragraph appended since `start_len` the entry gap, if any was appended.
pub(crate) fn close_entry(buffer: &mut DocumentBuffer, start_len: usize) {
    if buffer.len() > start_len {
        if let Some(last) = buffer.last_paragraph_mut() {
            last.format.space_after_pt = ENTRY_GAP_PT;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_title_uses_title_preset() {
        let mut buffer = DocumentBuffer::new();
        render_section_title(&mut buffer, SectionKind::Education, "Education").unwrap();
        let p = &buffer.paragraphs()[0];
        assert_eq!(p.text(), "Education");
        assert!(p.format.bottom_border);
        assert_eq!(p.runs[0].format.size_pt, 13.0);
        assert_eq!(p.section, SectionKind::Education);
    }

    #[test]
    fn test_close_entry_only_touches_new_paragraphs() {
        let mut buffer = DocumentBuffer::new();
        buffer.add_paragraph(SectionKind::Skills, StylePreset::PlainRun.paragraph());
        let start = buffer.len();
        close_entry(&mut buffer, start);
        assert_eq!(buffer.paragraphs()[0].format.space_after_pt, 0.0);

        buffer.add_paragraph(SectionKind::Skills, StylePreset::PlainRun.paragraph());
        close_entry(&mut buffer, start);
        assert_eq!(buffer.paragraphs()[1].format.space_after_pt, ENTRY_GAP_PT);
    }
}
