//! Technical skills: one "category: details" line per group, single-spaced as a block.

use crate::layout::buffer::{DocumentBuffer, LayoutError, SectionKind};
use crate::layout::renderers::{render_section_title, SectionRenderer};
use crate::layout::styles::{StylePreset, ENTRY_GAP_PT};
use crate::models::resume::non_blank;
use crate::models::{ResumeDocument, SkillGroup};

pub const SKILLS_TITLE: &str = "Technical Skills";

pub struct SkillsRenderer;

impl SectionRenderer for SkillsRenderer {
    fn section(&self) -> SectionKind {
        SectionKind::Skills
    }

    fn render(&self, buffer: &mut DocumentBuffer, resume: &ResumeDocument) -> Result<(), LayoutError> {
        render_skills(buffer, &resume.skills)
    }
}

pub fn render_skills(buffer: &mut DocumentBuffer, skills: &[SkillGroup]) -> Result<(), LayoutError> {
    render_section_title(buffer, SectionKind::Skills, SKILLS_TITLE)?;

    let groups: Vec<(Option<&str>, Option<&str>)> = skills
        .iter()
        .map(|g| (non_blank(&g.category), non_blank(&g.details)))
        .filter(|(category, details)| category.is_some() || details.is_some())
        .collect();

    for (i, (category, details)) in groups.iter().enumerate() {
        let gap = if i == groups.len() - 1 { ENTRY_GAP_PT } else { 0.0 };
        let line = buffer.add_paragraph(
            SectionKind::Skills,
            StylePreset::BoldLabel.paragraph().with_space_after(gap),
        );
        match (category, details) {
            (Some(category), Some(details)) => {
                line.push_run(&format!("{category}:"), StylePreset::BoldLabel)?;
                line.push_run(&format!(" {details}"), StylePreset::PlainRun)?;
            }
            (Some(category), None) => line.push_run(&format!("{category}:"), StylePreset::BoldLabel)?,
            (None, Some(details)) => line.push_run(details, StylePreset::PlainRun)?,
            (None, None) => {}
        }
    }
    Ok(())
}
