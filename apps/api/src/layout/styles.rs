//! Style primitives: the fixed typography every section renderer draws from.
//!
//! A `StylePreset` names one complete set of paragraph + run attributes. Renderers open a
//! paragraph with the paragraph half of a preset and add runs with the run half of
//! (possibly different) presets, so one line can mix a bold label with an italic date.

use serde::{Deserialize, Serialize};

pub const FONT_FAMILY: &str = "Times New Roman";

/// Gap after the last line of an entry (skill block, job, certificate list, degree).
pub const ENTRY_GAP_PT: f32 = 10.0;
/// Gap after a job's extra heading line ("Applications Developed:").
pub const EXTRA_LINE_GAP_PT: f32 = 5.0;
/// Joins the contact fields of the header line.
pub const CONTACT_SEPARATOR: &str = " ⬥ ";
/// Joins a label and its date on one line.
pub const FIELD_SEPARATOR: &str = " | ";
pub const HYPERLINK_COLOR: &str = "0000FF";
/// Section-title bottom rule: width in eighths of a point, padding in points.
pub const TITLE_BORDER_SIZE: u32 = 8;
pub const TITLE_BORDER_SPACE_PT: u32 = 1;

// ────────────────────────────────────────────────────────────────────────────
// Attribute types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
    Justified,
}

/// Paragraph-level attributes. Spacing and indentation are in points; `line_spacing`
/// is a multiple of single spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParagraphFormat {
    pub alignment: Alignment,
    pub space_before_pt: f32,
    pub space_after_pt: f32,
    pub line_spacing: f32,
    pub left_indent_pt: f32,
    pub bulleted: bool,
    pub bottom_border: bool,
}

impl ParagraphFormat {
    pub fn with_space_after(mut self, points: f32) -> Self {
        self.space_after_pt = points;
        self
    }
}

/// Run-level attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunFormat {
    pub font_family: &'static str,
    pub size_pt: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Hex RGB, `None` for the automatic colour.
    pub color: Option<&'static str>,
}

// ────────────────────────────────────────────────────────────────────────────
// Presets
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StylePreset {
    /// Candidate name: 18pt bold, centered.
    NameHeader,
    /// Contact line under the name: 10pt, centered.
    ContactLine,
    /// Section heading: 13pt bold italic with a rule underneath.
    SectionTitle,
    /// Justified 10pt paragraph with trailing spacing (summary body).
    BodyText,
    BoldLabel,
    PlainRun,
    ItalicDate,
    /// Indented bulleted detail line.
    BulletText,
    /// Blue, underlined link text.
    Hyperlink,
    /// Plain paragraphs of a free-text letter.
    LetterText,
}

/// The full attribute set behind one preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StyleAttributes {
    pub paragraph: ParagraphFormat,
    pub run: RunFormat,
}

const BASE_PARAGRAPH: ParagraphFormat = ParagraphFormat {
    alignment: Alignment::Left,
    space_before_pt: 0.0,
    space_after_pt: 0.0,
    line_spacing: 1.0,
    left_indent_pt: 0.0,
    bulleted: false,
    bottom_border: false,
};

const BASE_RUN: RunFormat = RunFormat {
    font_family: FONT_FAMILY,
    size_pt: 10.0,
    bold: false,
    italic: false,
    underline: false,
    color: None,
};

impl StylePreset {
    pub const fn attributes(self) -> StyleAttributes {
        match self {
            StylePreset::NameHeader => StyleAttributes {
                paragraph: ParagraphFormat {
                    alignment: Alignment::Center,
                    ..BASE_PARAGRAPH
                },
                run: RunFormat {
                    size_pt: 18.0,
                    bold: true,
                    ..BASE_RUN
                },
            },
            StylePreset::ContactLine => StyleAttributes {
                paragraph: ParagraphFormat {
                    alignment: Alignment::Center,
                    ..BASE_PARAGRAPH
                },
                run: BASE_RUN,
            },
            StylePreset::SectionTitle => StyleAttributes {
                paragraph: ParagraphFormat {
                    bottom_border: true,
                    ..BASE_PARAGRAPH
                },
                run: RunFormat {
                    size_pt: 13.0,
                    bold: true,
                    italic: true,
                    ..BASE_RUN
                },
            },
            StylePreset::BodyText => StyleAttributes {
                paragraph: ParagraphFormat {
                    alignment: Alignment::Justified,
                    space_after_pt: ENTRY_GAP_PT,
                    ..BASE_PARAGRAPH
                },
                run: BASE_RUN,
            },
            StylePreset::BoldLabel => StyleAttributes {
                paragraph: BASE_PARAGRAPH,
                run: RunFormat {
                    bold: true,
                    ..BASE_RUN
                },
            },
            StylePreset::PlainRun => StyleAttributes {
                paragraph: BASE_PARAGRAPH,
                run: BASE_RUN,
            },
            StylePreset::ItalicDate => StyleAttributes {
                paragraph: BASE_PARAGRAPH,
                run: RunFormat {
                    italic: true,
                    ..BASE_RUN
                },
            },
            StylePreset::BulletText => StyleAttributes {
                paragraph: ParagraphFormat {
                    left_indent_pt: 18.0,
                    bulleted: true,
                    ..BASE_PARAGRAPH
                },
                run: BASE_RUN,
            },
            StylePreset::Hyperlink => StyleAttributes {
                paragraph: BASE_PARAGRAPH,
                run: RunFormat {
                    underline: true,
                    color: Some(HYPERLINK_COLOR),
                    ..BASE_RUN
                },
            },
            StylePreset::LetterText => StyleAttributes {
                paragraph: BASE_PARAGRAPH,
                run: RunFormat {
                    size_pt: 11.0,
                    ..BASE_RUN
                },
            },
        }
    }

    pub const fn paragraph(self) -> ParagraphFormat {
        self.attributes().paragraph
    }

    pub const fn run(self) -> RunFormat {
        self.attributes().run
    }
}
