//! In-memory document buffer: the single mutable target of one assembly call.
//!
//! Renderers append styled paragraphs; the `docx` module serializes the finished buffer.
//! Every paragraph remembers which resume section produced it so that the fit report can
//! attribute estimated lines back to the allocator's budget keys.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::styles::{ParagraphFormat, RunFormat, StylePreset};

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("page margins were already applied to this document")]
    MarginsAlreadyApplied,

    #[error("{section:?} text contains a character that cannot be written to the document: {text:?}")]
    InvalidText { section: SectionKind, text: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Buffer types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    Summary,
    Skills,
    Experience,
    Education,
    /// Free-text paragraphs (cover letters) that belong to no resume section.
    Letter,
}

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMargins {
    pub top_in: f32,
    pub bottom_in: f32,
    pub left_in: f32,
    pub right_in: f32,
    pub gutter_in: f32,
}

impl PageMargins {
    /// Resume layout: half-inch top and sides, no bottom margin, no gutter.
    pub const RESUME: PageMargins = PageMargins {
        top_in: 0.5,
        bottom_in: 0.0,
        left_in: 0.5,
        right_in: 0.5,
        gutter_in: 0.0,
    };

    /// Word's default one-inch page, used when no margins were applied.
    pub const STANDARD: PageMargins = PageMargins {
        top_in: 1.0,
        bottom_in: 1.0,
        left_in: 1.0,
        right_in: 1.0,
        gutter_in: 0.0,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub format: RunFormat,
    /// Target URL when the run is a hyperlink.
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub section: SectionKind,
    pub format: ParagraphFormat,
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Concatenated text of all runs, formatting stripped.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn push_run(&mut self, text: &str, preset: StylePreset) -> Result<(), LayoutError> {
        self.push(text, preset, None)
    }

    pub fn push_link(
        &mut self,
        text: &str,
        url: &str,
        preset: StylePreset,
    ) -> Result<(), LayoutError> {
        self.push(text, preset, Some(url.to_string()))
    }

    fn push(
        &mut self,
        text: &str,
        preset: StylePreset,
        link: Option<String>,
    ) -> Result<(), LayoutError> {
        if !text.chars().all(is_xml_char) {
            return Err(LayoutError::InvalidText {
                section: self.section,
                text: text.to_string(),
            });
        }
        self.runs.push(Run {
            text: text.to_string(),
            format: preset.run(),
            link,
        });
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentBuffer {
    margins: Option<PageMargins>,
    paragraphs: Vec<Paragraph>,
}

impl DocumentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page margins. Allowed exactly once per buffer.
    pub fn apply_page_margins(&mut self, margins: PageMargins) -> Result<(), LayoutError> {
        if self.margins.is_some() {
            return Err(LayoutError::MarginsAlreadyApplied);
        }
        self.margins = Some(margins);
        Ok(())
    }

    pub fn page_margins(&self) -> PageMargins {
        self.margins.unwrap_or(PageMargins::STANDARD)
    }

    /// Appends an empty paragraph and returns it for run insertion.
    pub fn add_paragraph(&mut self, section: SectionKind, format: ParagraphFormat) -> &mut Paragraph {
        self.paragraphs.push(Paragraph {
            section,
            format,
            runs: Vec::new(),
        });
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn last_paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        self.paragraphs.last_mut()
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// Plain text of every paragraph, in document order.
    pub fn paragraph_texts(&self) -> Vec<String> {
        self.paragraphs.iter().map(Paragraph::text).collect()
    }
}

/// Characters allowed by XML 1.0 (surrogates are already excluded by `char`).
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || (c >= '\u{20}' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margins_apply_once() {
        let mut buffer = DocumentBuffer::new();
        assert_eq!(buffer.page_margins(), PageMargins::STANDARD);
        buffer.apply_page_margins(PageMargins::RESUME).unwrap();
        assert_eq!(buffer.page_margins(), PageMargins::RESUME);
        assert_eq!(
            buffer.apply_page_margins(PageMargins::RESUME),
            Err(LayoutError::MarginsAlreadyApplied)
        );
    }

    #[test]
    fn test_paragraph_text_concatenates_runs() {
        let mut buffer = DocumentBuffer::new();
        let p = buffer.add_paragraph(SectionKind::Skills, StylePreset::BoldLabel.paragraph());
        p.push_run("Languages:", StylePreset::BoldLabel).unwrap();
        p.push_run(" Go, Rust", StylePreset::PlainRun).unwrap();
        assert_eq!(buffer.paragraph_texts(), vec!["Languages: Go, Rust".to_string()]);
        assert!(buffer.paragraphs()[0].runs[0].format.bold);
        assert!(!buffer.paragraphs()[0].runs[1].format.bold);
    }

    #[test]
    fn test_link_run_keeps_target() {
        let mut buffer = DocumentBuffer::new();
        let p = buffer.add_paragraph(SectionKind::Header, StylePreset::ContactLine.paragraph());
        p.push_link("jane@x.com", "mailto:jane@x.com", StylePreset::Hyperlink)
            .unwrap();
        let run = &buffer.paragraphs()[0].runs[0];
        assert_eq!(run.link.as_deref(), Some("mailto:jane@x.com"));
        assert!(run.format.underline);
    }

    #[test]
    fn test_control_characters_are_rejected() {
        let mut buffer = DocumentBuffer::new();
        let p = buffer.add_paragraph(SectionKind::Summary, StylePreset::BodyText.paragraph());
        let err = p.push_run("bad\u{0007}bell", StylePreset::PlainRun).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidText {
                section: SectionKind::Summary,
                ..
            }
        ));
        assert!(p.push_run("tab\tand\nnewline", StylePreset::PlainRun).is_ok());
    }
}
