//! Structured resume data: the typed shape the generative collaborator is asked to emit
//! and the editing endpoints mutate before a document is assembled.
//!
//! Every field tolerates absence: missing keys and JSON `null` deserialize to the empty
//! default, and blank optional strings are normalized to `None`, so a partially-formed
//! model response still produces a renderable document.

use serde::{Deserialize, Deserializer, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Top-level document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeDocument {
    #[serde(deserialize_with = "null_as_default")]
    pub header: Header,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<SkillGroup>,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<JobEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: EducationBlock,
}

impl ResumeDocument {
    /// Applies the editing-view normalizations to every job (see `JobEntry::normalize_bullets`).
    pub fn normalize(&mut self) {
        for job in &mut self.experience {
            job.normalize_bullets();
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "blank_as_none")]
    pub email: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub linkedin: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub github: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub website: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillGroup {
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub details: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_range: String,
    #[serde(deserialize_with = "blank_as_none")]
    pub company: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub location: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub extra_line: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub bullet_points: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub applications: Vec<Application>,
}

/// A borrowed view over one application block of a job: either a real `Application`
/// or the untitled block synthesized from the job's free-standing bullet points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplicationView<'a> {
    pub title: &'a str,
    pub details: &'a [String],
}

impl JobEntry {
    /// Returns `"company, location"` only when both halves are present and non-blank.
    pub fn company_line(&self) -> Option<String> {
        let company = self.company.as_deref().and_then(non_blank)?;
        let location = self.location.as_deref().and_then(non_blank)?;
        Some(format!("{company}, {location}"))
    }

    /// Application blocks in render order: free-standing bullets first (untitled),
    /// then the titled applications as given.
    pub fn application_blocks(&self) -> Vec<ApplicationView<'_>> {
        let mut blocks = Vec::with_capacity(self.applications.len() + 1);
        if !self.bullet_points.is_empty() {
            blocks.push(ApplicationView {
                title: "",
                details: &self.bullet_points,
            });
        }
        blocks.extend(self.applications.iter().map(|app| ApplicationView {
            title: &app.title,
            details: &app.details,
        }));
        blocks
    }

    /// Promotes an untitled leading application to the job's free-standing bullets.
    ///
    /// Models frequently return plain jobs as `applications: [{title: "", details: [...]}]`;
    /// the editor works on `bullet_points`, so the block is moved there when the job has none.
    pub fn normalize_bullets(&mut self) {
        let leading_untitled = self
            .applications
            .first()
            .map(|app| app.title.trim().is_empty())
            .unwrap_or(false);

        if self.bullet_points.is_empty() && leading_untitled {
            let first = self.applications.remove(0);
            self.bullet_points = first.details;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub details: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub certificates: Vec<Certificate>,
    #[serde(deserialize_with = "null_as_default")]
    pub specializations: Vec<Specialization>,
    #[serde(deserialize_with = "null_as_default")]
    pub degrees: Vec<Degree>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certificate {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Specialization {
    #[serde(deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub specialization: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Degree {
    #[serde(deserialize_with = "null_as_default")]
    pub university: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Returns the trimmed string, or `None` when it is empty after trimming.
pub fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Joins the non-blank parts with `", "`, used for "institution, location" style lines.
pub fn join_present(parts: &[&str]) -> String {
    parts
        .iter()
        .filter_map(|p| non_blank(p))
        .collect::<Vec<_>>()
        .join(", ")
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|s| non_blank(&s).map(str::to_string)))
}
