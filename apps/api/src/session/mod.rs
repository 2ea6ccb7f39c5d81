//! Wizard session state.
//!
//! The whole state of one user's session travels with every request and comes back in
//! every response; the server keeps nothing between calls.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::parse::PlacementReport;
use crate::layout::allocator::{LineAllocation, LineOverrides, SectionWeights};
use crate::models::ResumeDocument;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Polish,
    CoverLetter,
    Placement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardState {
    pub step: WizardStep,
    pub job_title: String,
    pub company_name: String,
    pub job_description: String,
    /// Plain text of the candidate's current resume (typed or extracted from an upload).
    pub resume_content: String,
    pub polish_instruction: Option<String>,
    pub recruiter_name: Option<String>,
    pub preferences: Option<String>,
    /// Raw model answer of the last polish call, kept for manual recovery.
    pub polished_output: Option<String>,
    pub resume: Option<ResumeDocument>,
    pub cover_letter: Option<String>,
    pub placement: Option<PlacementReport>,
    pub weights: Option<SectionWeights>,
    pub allocation: Option<LineAllocation>,
    pub line_overrides: LineOverrides,
}

impl WizardState {
    /// Back to the first step. Inputs and manual line overrides are kept so the user can
    /// polish again; everything derived from the polished resume is dropped.
    pub fn reset(&mut self) {
        self.step = WizardStep::Polish;
        self.polished_output = None;
        self.resume = None;
        self.cover_letter = None;
        self.placement = None;
        self.weights = None;
        self.allocation = None;
    }

    /// The polished resume, or a validation error naming the missing step.
    pub fn require_resume(&self) -> Result<&ResumeDocument, AppError> {
        self.resume
            .as_ref()
            .ok_or_else(|| AppError::Validation("polish the resume before this step".to_string()))
    }

    pub fn require_resume_mut(&mut self) -> Result<&mut ResumeDocument, AppError> {
        self.resume
            .as_mut()
            .ok_or_else(|| AppError::Validation("polish the resume before this step".to_string()))
    }

    /// Resume text for the letter and placement prompts: the polished resume when present,
    /// otherwise the raw input.
    pub fn resume_text(&self) -> Result<String, AppError> {
        if let Some(resume) = &self.resume {
            return serde_json::to_string_pretty(resume)
                .map_err(|e| AppError::Internal(e.into()));
        }
        require_field("resume_content", &self.resume_content)?;
        Ok(self.resume_content.clone())
    }

    pub fn salutation(&self) -> String {
        match self.recruiter_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!("Dear {name},"),
            _ => "Dear Hiring Manager,".to_string(),
        }
    }

    pub fn candidate_name(&self) -> &str {
        self.resume
            .as_ref()
            .map(|r| r.header.name.as_str())
            .unwrap_or_default()
    }
}

/// Fails with `MissingRequiredField` when `value` is blank.
pub fn require_field(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::MissingRequiredField(field));
    }
    Ok(())
}
