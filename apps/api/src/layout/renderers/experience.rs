//! Professional experience: per job a heading block followed by its application blocks.
//!
//! Heading lines, in order:
//! 1. `company, location` (bold), only when both are present
//! 2. `position | date_range` (position bold, date italic)
//! 3. optional extra line (bold, 5pt after)
//!
//! Detail lines: for each application block an optional bold title, then indented bullets.
//! Only the final paragraph of the job's detail block carries the entry gap.

use crate::layout::buffer::{DocumentBuffer, LayoutError, SectionKind};
use crate::layout::renderers::{close_entry, render_section_title, SectionRenderer};
use crate::layout::styles::{StylePreset, EXTRA_LINE_GAP_PT, FIELD_SEPARATOR};
use crate::models::resume::{non_blank, ApplicationView};
use crate::models::{JobEntry, ResumeDocument};

pub const EXPERIENCE_TITLE: &str = "Professional Experience";

pub struct ExperienceRenderer;

impl SectionRenderer for ExperienceRenderer {
    fn section(&self) -> SectionKind {
        SectionKind::Experience
    }

    fn render(&self, buffer: &mut DocumentBuffer, resume: &ResumeDocument) -> Result<(), LayoutError> {
        render_experience(buffer, &resume.experience)
    }
}

pub fn render_experience(buffer: &mut DocumentBuffer, jobs: &[JobEntry]) -> Result<(), LayoutError> {
    render_section_title(buffer, SectionKind::Experience, EXPERIENCE_TITLE)?;
    for job in jobs {
        render_job_heading(buffer, job)?;
        render_job_details(buffer, &job.application_blocks())?;
    }
    Ok(())
}

pub fn render_job_heading(buffer: &mut DocumentBuffer, job: &JobEntry) -> Result<(), LayoutError> {
    if let Some(company_line) = job.company_line() {
        buffer
            .add_paragraph(SectionKind::Experience, StylePreset::BoldLabel.paragraph())
            .push_run(&company_line, StylePreset::BoldLabel)?;
    }

    let position = non_blank(&job.position);
    let date_range = non_blank(&job.date_range);
    if position.is_some() || date_range.is_some() {
        let line = buffer.add_paragraph(SectionKind::Experience, StylePreset::BoldLabel.paragraph());
        if let Some(position) = position {
            line.push_run(position, StylePreset::BoldLabel)?;
        }
        if let Some(date_range) = date_range {
            if position.is_some() {
                line.push_run(FIELD_SEPARATOR, StylePreset::PlainRun)?;
            }
            line.push_run(date_range, StylePreset::ItalicDate)?;
        }
    }

    if let Some(extra) = job.extra_line.as_deref().and_then(non_blank) {
        buffer
            .add_paragraph(
                SectionKind::Experience,
                StylePreset::BoldLabel
                    .paragraph()
                    .with_space_after(EXTRA_LINE_GAP_PT),
            )
            .push_run(extra, StylePreset::BoldLabel)?;
    }
    Ok(())
}

pub fn render_job_details(
    buffer: &mut DocumentBuffer,
    blocks: &[ApplicationView<'_>],
) -> Result<(), LayoutError> {
    let start = buffer.len();
    for block in blocks {
        if let Some(title) = non_blank(block.title) {
            buffer
                .add_paragraph(SectionKind::Experience, StylePreset::BoldLabel.paragraph())
                .push_run(title, StylePreset::BoldLabel)?;
        }
        for detail in block.details.iter().filter_map(|d| non_blank(d)) {
            buffer
                .add_paragraph(SectionKind::Experience, StylePreset::BulletText.paragraph())
                .push_run(detail, StylePreset::BulletText)?;
        }
    }
    close_entry(buffer, start);
    Ok(())
}
