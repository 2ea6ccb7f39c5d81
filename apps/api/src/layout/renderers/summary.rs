//! Professional summary: title plus one justified paragraph.

use crate::layout::buffer::{DocumentBuffer, LayoutError, SectionKind};
use crate::layout::renderers::{render_section_title, SectionRenderer};
use crate::layout::styles::StylePreset;
use crate::models::resume::non_blank;
use crate::models::ResumeDocument;

pub const SUMMARY_TITLE: &str = "Professional Summary";

pub struct SummaryRenderer;

impl SectionRenderer for SummaryRenderer {
    fn section(&self) -> SectionKind {
        SectionKind::Summary
    }

    fn render(&self, buffer: &mut DocumentBuffer, resume: &ResumeDocument) -> Result<(), LayoutError> {
        render_summary(buffer, &resume.summary)
    }
}

pub fn render_summary(buffer: &mut DocumentBuffer, summary: &str) -> Result<(), LayoutError> {
    render_section_title(buffer, SectionKind::Summary, SUMMARY_TITLE)?;
    if let Some(text) = non_blank(summary) {
        buffer
            .add_paragraph(SectionKind::Summary, StylePreset::BodyText.paragraph())
            .push_run(text, StylePreset::BodyText)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::styles::{Alignment, ENTRY_GAP_PT};

    #[test]
    fn test_summary_is_justified_with_trailing_gap() {
        let mut buffer = DocumentBuffer::new();
        render_summary(&mut buffer, "Builds things.").unwrap();
        assert_eq!(
            buffer.paragraph_texts(),
            vec!["Professional Summary", "Builds things."]
        );
        let body = &buffer.paragraphs()[1];
        assert_eq!(body.format.alignment, Alignment::Justified);
        assert_eq!(body.format.space_after_pt, ENTRY_GAP_PT);
        assert_eq!(body.runs[0].format.size_pt, 10.0);
    }

    #[test]
    fn test_blank_summary_keeps_title_only() {
        let mut buffer = DocumentBuffer::new();
        render_summary(&mut buffer, "  ").unwrap();
        assert_eq!(buffer.paragraph_texts(), vec!["Professional Summary"]);
    }
}
