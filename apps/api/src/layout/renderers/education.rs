//! Education: certificates, then specializations, then degrees, under one section title.

use crate::layout::buffer::{DocumentBuffer, LayoutError, Paragraph, SectionKind};
use crate::layout::renderers::{close_entry, render_section_title, SectionRenderer};
use crate::layout::styles::{StylePreset, FIELD_SEPARATOR};
use crate::models::resume::{join_present, non_blank};
use crate::models::{Certificate, Degree, EducationBlock, ResumeDocument, Specialization};

pub const EDUCATION_TITLE: &str = "Education";
pub const CERTIFICATES_LABEL: &str = "Professional Certificates:";

pub struct EducationRenderer;

impl SectionRenderer for EducationRenderer {
    fn section(&self) -> SectionKind {
        SectionKind::Education
    }

    fn render(&self, buffer: &mut DocumentBuffer, resume: &ResumeDocument) -> Result<(), LayoutError> {
        render_education(buffer, &resume.education)
    }
}

pub fn render_education(buffer: &mut DocumentBuffer, education: &EducationBlock) -> Result<(), LayoutError> {
    render_section_title(buffer, SectionKind::Education, EDUCATION_TITLE)?;
    render_certificates(buffer, &education.certificates)?;
    render_specializations(buffer, &education.specializations)?;
    render_degrees(buffer, &education.degrees)
}

/// Bold label, then one `name | date` line per certificate. Gap after the last.
pub fn render_certificates(buffer: &mut DocumentBuffer, certificates: &[Certificate]) -> Result<(), LayoutError> {
    let present: Vec<&Certificate> = certificates
        .iter()
        .filter(|c| non_blank(&c.name).is_some() || non_blank(&c.date).is_some())
        .collect();
    if present.is_empty() {
        return Ok(());
    }

    buffer
        .add_paragraph(SectionKind::Education, StylePreset::BoldLabel.paragraph())
        .push_run(CERTIFICATES_LABEL, StylePreset::BoldLabel)?;

    let start = buffer.len();
    for cert in present {
        let line = buffer.add_paragraph(SectionKind::Education, StylePreset::BoldLabel.paragraph());
        labelled_date(line, &cert.name, "", &cert.date)?;
    }
    close_entry(buffer, start);
    Ok(())
}

/// Two lines per entry: `institution, location`, then `specialization | Completed date`.
pub fn render_specializations(
    buffer: &mut DocumentBuffer,
    specializations: &[Specialization],
) -> Result<(), LayoutError> {
    for entry in specializations {
        let start = buffer.len();
        let place = join_present(&[entry.institution.as_str(), entry.location.as_str()]);
        if !place.is_empty() {
            buffer
                .add_paragraph(SectionKind::Education, StylePreset::BoldLabel.paragraph())
                .push_run(&place, StylePreset::BoldLabel)?;
        }
        if non_blank(&entry.specialization).is_some() || non_blank(&entry.date).is_some() {
            let line = buffer.add_paragraph(SectionKind::Education, StylePreset::BoldLabel.paragraph());
            labelled_date(line, &entry.specialization, "Completed ", &entry.date)?;
        }
        close_entry(buffer, start);
    }
    Ok(())
}

/// Two lines per entry: `university, location | Graduated date`, then the degree line.
pub fn render_degrees(buffer: &mut DocumentBuffer, degrees: &[Degree]) -> Result<(), LayoutError> {
    for degree in degrees {
        let start = buffer.len();
        let place = join_present(&[degree.university.as_str(), degree.location.as_str()]);
        if !place.is_empty() || non_blank(&degree.date).is_some() {
            let line = buffer.add_paragraph(SectionKind::Education, StylePreset::BoldLabel.paragraph());
            labelled_date(line, &place, "Graduated ", &degree.date)?;
        }
        if let Some(description) = non_blank(&degree.degree) {
            buffer
                .add_paragraph(SectionKind::Education, StylePreset::BoldLabel.paragraph())
                .push_run(description, StylePreset::BoldLabel)?;
        }
        close_entry(buffer, start);
    }
    Ok(())
}

/// Bold label, plain separator, italic `{prefix}{date}`. Blank halves are dropped along
/// with the separator.
fn labelled_date(line: &mut Paragraph, label: &str, prefix: &str, date: &str) -> Result<(), LayoutError> {
    let label = non_blank(label);
    if let Some(label) = label {
        line.push_run(label, StylePreset::BoldLabel)?;
    }
    if let Some(date) = non_blank(date) {
        if label.is_some() {
            line.push_run(FIELD_SEPARATOR, StylePreset::PlainRun)?;
        }
        line.push_run(&format!("{prefix}{date}"), StylePreset::ItalicDate)?;
    }
    Ok(())
}
