//! The wizard steps. Each takes the session state by `&mut`, calls the content generator
//! at most once and records the result in the state.
//!
//! Required inputs are checked before any call is made. A failed call surfaces as
//! `UpstreamGenerationFailure`; only relevance scoring absorbs failures, by falling back
//! to the default weight table.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::parse::{
    parse_bullet_points, parse_placement_report, parse_relevance_weights, parse_resume_document,
    UnparseableOutput, WeightsOutcome,
};
use crate::generation::prompts;
use crate::layout::allocator::{allocate, apply_overrides, budget_warnings, BudgetWarning};
use crate::layout::assembler::build_resume;
use crate::layout::fit::{analyze_fit, FitReport};
use crate::llm_client::{ContentGenerator, GenerationParams};
use crate::models::ResumeDocument;
use crate::session::{require_field, WizardState, WizardStep};

// ────────────────────────────────────────────────────────────────────────────
// Sampling parameters per step
// ────────────────────────────────────────────────────────────────────────────

const POLISH_TEMPERATURE: f32 = 0.7;
const POLISH_MAX_TOKENS: u32 = 1500;
pub const DEFAULT_SUMMARY_TEMPERATURE: f32 = 0.7;
const SUMMARY_MAX_TOKENS: u32 = 200;
const BULLETS_TEMPERATURE: f32 = 0.7;
const BULLETS_MAX_TOKENS: u32 = 300;
const COVER_LETTER_TEMPERATURE: f32 = 0.7;
const COVER_LETTER_MAX_TOKENS: u32 = 800;
const PLACEMENT_TEMPERATURE: f32 = 0.2;
const PLACEMENT_MAX_TOKENS: u32 = 600;
const RELEVANCE_TEMPERATURE: f32 = 0.0;
const RELEVANCE_MAX_TOKENS: u32 = 200;

/// Generator plus the model every call is made against.
#[derive(Clone, Copy)]
pub struct StepContext<'a> {
    pub generator: &'a dyn ContentGenerator,
    pub model: &'a str,
}

impl StepContext<'_> {
    async fn generate(&self, prompt: &str, temperature: f32, max_tokens: u32) -> Result<String, AppError> {
        let params = GenerationParams::new(self.model, temperature, max_tokens);
        Ok(self.generator.generate(prompt, &params).await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Polish
// ────────────────────────────────────────────────────────────────────────────

/// Rewrites the raw resume text into a structured resume tailored to the job.
pub async fn polish_resume(ctx: StepContext<'_>, state: &mut WizardState) -> Result<(), AppError> {
    require_field("job_title", &state.job_title)?;
    require_field("job_description", &state.job_description)?;
    require_field("resume_content", &state.resume_content)?;

    let prompt = prompts::polish_prompt(
        &state.job_title,
        &state.job_description,
        &state.resume_content,
        state.polish_instruction.as_deref(),
    );
    let raw = ctx.generate(&prompt, POLISH_TEMPERATURE, POLISH_MAX_TOKENS).await?;
    state.polished_output = Some(raw.clone());

    let resume = parse_resume_document(&raw)?;
    info!(
        jobs = resume.experience.len(),
        skills = resume.skills.len(),
        "Polished resume"
    );
    state.resume = Some(resume);
    state.weights = None;
    state.allocation = None;
    state.step = WizardStep::CoverLetter;
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Editing helpers
// ────────────────────────────────────────────────────────────────────────────

/// Clamps a requested temperature into `[0, 1]`; absent or NaN means the default.
pub fn summary_temperature(requested: Option<f32>) -> f32 {
    match requested {
        Some(t) if !t.is_nan() => t.clamp(0.0, 1.0),
        _ => DEFAULT_SUMMARY_TEMPERATURE,
    }
}

/// Regenerates the resume's summary paragraph from its skills, experience and education.
pub async fn regenerate_summary(
    ctx: StepContext<'_>,
    state: &mut WizardState,
    temperature: Option<f32>,
) -> Result<(), AppError> {
    let (skills, experience, education) = summary_inputs(state.require_resume()?);
    let prompt = prompts::summary_prompt(&skills, &experience, &education);
    let temperature = summary_temperature(temperature);

    let raw = ctx.generate(&prompt, temperature, SUMMARY_MAX_TOKENS).await?;
    let summary = raw.trim();
    if summary.is_empty() {
        return Err(UnparseableOutput {
            expected: "a summary paragraph",
            raw,
        }
        .into());
    }

    info!(temperature, chars = summary.len(), "Regenerated summary");
    state.require_resume_mut()?.summary = summary.to_string();
    Ok(())
}

fn summary_inputs(resume: &ResumeDocument) -> (String, String, String) {
    let skills = resume
        .skills
        .iter()
        .map(|s| format!("{}: {}", s.category, s.details))
        .collect::<Vec<_>>()
        .join("\n");
    let experience = resume
        .experience
        .iter()
        .map(|job| match job.company.as_deref() {
            Some(company) => format!("{} at {} ({})", job.position, company, job.date_range),
            None => format!("{} ({})", job.position, job.date_range),
        })
        .collect::<Vec<_>>()
        .join("\n");
    let education = resume
        .education
        .degrees
        .iter()
        .map(|d| format!("{}, {} ({})", d.degree, d.university, d.date))
        .chain(
            resume
                .education
                .certificates
                .iter()
                .map(|c| format!("{} ({})", c.name, c.date)),
        )
        .collect::<Vec<_>>()
        .join("\n");
    (skills, experience, education)
}

/// Replaces one job's free-standing bullet points with freshly generated ones.
pub async fn generate_bullets(
    ctx: StepContext<'_>,
    state: &mut WizardState,
    job_index: usize,
) -> Result<(), AppError> {
    let job = state
        .require_resume()?
        .experience
        .get(job_index)
        .ok_or_else(|| AppError::Validation(format!("no job at index {job_index}")))?;

    let prompt = prompts::bullets_prompt(
        &job.position,
        job.company.as_deref().unwrap_or_default(),
        job.location.as_deref().unwrap_or_default(),
        &job.date_range,
    );
    let raw = ctx.generate(&prompt, BULLETS_TEMPERATURE, BULLETS_MAX_TOKENS).await?;
    let bullets = parse_bullet_points(&raw)?;

    info!(job_index, bullets = bullets.len(), "Generated bullet points");
    if let Some(job) = state.require_resume_mut()?.experience.get_mut(job_index) {
        job.bullet_points = bullets;
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Cover letter and placement
// ────────────────────────────────────────────────────────────────────────────

pub async fn write_cover_letter(ctx: StepContext<'_>, state: &mut WizardState) -> Result<(), AppError> {
    require_field("company_name", &state.company_name)?;
    require_field("job_title", &state.job_title)?;
    require_field("job_description", &state.job_description)?;
    let resume_text = state.resume_text()?;

    let prompt = prompts::cover_letter_prompt(
        &state.salutation(),
        &state.company_name,
        &state.job_title,
        &state.job_description,
        &resume_text,
    );
    let raw = ctx
        .generate(&prompt, COVER_LETTER_TEMPERATURE, COVER_LETTER_MAX_TOKENS)
        .await?;
    let letter = raw.trim();
    if letter.is_empty() {
        return Err(UnparseableOutput {
            expected: "a cover letter",
            raw,
        }
        .into());
    }

    info!(chars = letter.len(), "Wrote cover letter");
    state.cover_letter = Some(letter.to_string());
    state.step = WizardStep::Placement;
    Ok(())
}

pub async fn score_placement(ctx: StepContext<'_>, state: &mut WizardState) -> Result<(), AppError> {
    require_field("job_title", &state.job_title)?;
    require_field("job_description", &state.job_description)?;
    let resume_text = state.resume_text()?;

    let prompt = prompts::placement_prompt(
        &state.job_title,
        &state.job_description,
        &resume_text,
        state.preferences.as_deref().unwrap_or_default(),
    );
    let raw = ctx
        .generate(&prompt, PLACEMENT_TEMPERATURE, PLACEMENT_MAX_TOKENS)
        .await?;
    let report = parse_placement_report(&raw);

    info!(
        fit_for_job = ?report.fit_for_job,
        job_fit_for_you = ?report.job_fit_for_you,
        "Scored placement"
    );
    state.placement = Some(report);
    state.step = WizardStep::Placement;
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Relevance scoring and line allocation
// ────────────────────────────────────────────────────────────────────────────

/// Asks the generator how relevant each section is. Never fails: an upstream error or an
/// unusable answer yields `FallbackDefaultWeights`.
pub async fn score_relevance(ctx: StepContext<'_>, state: &WizardState) -> Result<WeightsOutcome, AppError> {
    let resume = state.require_resume()?;
    let resume_json = serde_json::to_string(resume).map_err(|e| AppError::Internal(e.into()))?;
    let prompt = prompts::relevance_prompt(&state.job_title, &state.job_description, &resume_json);

    let outcome = match ctx
        .generate(&prompt, RELEVANCE_TEMPERATURE, RELEVANCE_MAX_TOKENS)
        .await
    {
        Ok(raw) => parse_relevance_weights(&raw),
        Err(e) => {
            warn!(error = %e, "Relevance scoring failed; using default weights");
            return Ok(WeightsOutcome::FallbackDefaultWeights);
        }
    };
    if outcome == WeightsOutcome::FallbackDefaultWeights {
        warn!("Relevance scores unparseable; using default weights");
    }
    Ok(outcome)
}

/// What the allocation step reports besides the updated state.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationReport {
    pub outcome: WeightsOutcome,
    pub warnings: Vec<BudgetWarning>,
    pub fit_report: FitReport,
}

/// Scores relevance, allocates the line budget, applies manual overrides and estimates how
/// the rendered resume fits. Scoring is skipped when the state already carries scored
/// weights; a fallback is never stored, so the next call scores again.
pub async fn allocate_lines(
    ctx: StepContext<'_>,
    state: &mut WizardState,
    line_budget: u32,
) -> Result<AllocationReport, AppError> {
    let outcome = match state.weights {
        Some(weights) => WeightsOutcome::Scored {
            weights: weights.validated(),
        },
        None => score_relevance(ctx, state).await?,
    };
    let weights = outcome.weights();

    let allocation = apply_overrides(&allocate(&weights, line_budget), &state.line_overrides);
    let warnings = budget_warnings(&allocation);
    for warning in &warnings {
        warn!(%warning, "Line allocation over budget");
    }

    let buffer = build_resume(state.require_resume()?)?;
    let fit_report = analyze_fit(&buffer, &allocation);
    info!(
        budget = line_budget,
        allocated = allocation.total_allocated,
        estimated = fit_report.total_estimated_lines,
        sections_over = fit_report.over_budget_sections().count(),
        "Allocated line budget"
    );

    state.weights = match outcome {
        WeightsOutcome::Scored { weights } => Some(weights),
        WeightsOutcome::FallbackDefaultWeights => None,
    };
    state.allocation = Some(allocation);
    Ok(AllocationReport {
        outcome,
        warnings,
        fit_report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::testing::StubGenerator;
    use crate::layout::allocator::{SectionKey, SectionWeights};
    use crate::models::{JobEntry, SkillGroup};

    fn ready_state() -> WizardState {
        WizardState {
            job_title: "Engineer".to_string(),
            company_name: "Acme".to_string(),
            job_description: "Build reliable things".to_string(),
            resume_content: "Jane Doe\nEngineer at Acme".to_string(),
            ..Default::default()
        }
    }

    fn polished_state() -> WizardState {
        let mut state = ready_state();
        state.resume = Some(ResumeDocument {
            summary: "Builds things.".to_string(),
            skills: vec![SkillGroup {
                category: "Languages".to_string(),
                details: "Go, Rust".to_string(),
            }],
            experience: vec![JobEntry {
                position: "Engineer".to_string(),
                date_range: "2020-2023".to_string(),
                company: Some("Acme".to_string()),
                bullet_points: vec!["Shipped X".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        });
        state.step = WizardStep::CoverLetter;
        state
    }

    fn ctx(generator: &StubGenerator) -> StepContext<'_> {
        StepContext {
            generator,
            model: "test-model",
        }
    }

    #[tokio::test]
    async fn test_polish_parses_resume_and_advances() {
        let stub = StubGenerator::new([Ok(
            r#"{"header": {"name": "Jane Doe"}, "summary": "Builds things."}"#,
        )]);
        let mut state = ready_state();
        polish_resume(ctx(&stub), &mut state).await.unwrap();

        let resume = state.resume.as_ref().unwrap();
        assert_eq!(resume.header.name, "Jane Doe");
        assert_eq!(state.step, WizardStep::CoverLetter);
        assert!(state.polished_output.is_some());

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, GenerationParams::new("test-model", 0.7, 1500));
        assert!(calls[0].0.contains("Build reliable things"));
    }

    #[tokio::test]
    async fn test_polish_missing_field_makes_no_call() {
        let stub = StubGenerator::default();
        let mut state = ready_state();
        state.job_description = " ".to_string();
        let err = polish_resume(ctx(&stub), &mut state).await.unwrap_err();
        assert!(matches!(err, AppError::MissingRequiredField("job_description")));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_polish_unparseable_keeps_raw_output() {
        let stub = StubGenerator::new([Ok("Sorry, I can't do that.")]);
        let mut state = ready_state();
        let err = polish_resume(ctx(&stub), &mut state).await.unwrap_err();
        match err {
            AppError::UnparseableGenerationOutput { raw, .. } => {
                assert_eq!(raw, "Sorry, I can't do that.")
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(state.polished_output.as_deref(), Some("Sorry, I can't do that."));
        assert!(state.resume.is_none());
        assert_eq!(state.step, WizardStep::Polish);
    }

    #[tokio::test]
    async fn test_polish_upstream_failure_surfaces() {
        let stub = StubGenerator::new([Err(())]);
        let mut state = ready_state();
        let err = polish_resume(ctx(&stub), &mut state).await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamGenerationFailure(_)));
        assert!(state.polished_output.is_none());
    }

    #[test]
    fn test_summary_temperature_is_clamped() {
        assert_eq!(summary_temperature(None), 0.7);
        assert_eq!(summary_temperature(Some(1.5)), 1.0);
        assert_eq!(summary_temperature(Some(-0.2)), 0.0);
        assert_eq!(summary_temperature(Some(0.3)), 0.3);
        assert_eq!(summary_temperature(Some(f32::NAN)), 0.7);
    }

    #[tokio::test]
    async fn test_regenerate_summary_replaces_paragraph() {
        let stub = StubGenerator::new([Ok("  Seasoned engineer.  ")]);
        let mut state = polished_state();
        regenerate_summary(ctx(&stub), &mut state, Some(2.0)).await.unwrap();

        assert_eq!(state.resume.as_ref().unwrap().summary, "Seasoned engineer.");
        let calls = stub.calls();
        assert_eq!(calls[0].1.temperature, 1.0);
        assert_eq!(calls[0].1.max_tokens, 200);
        assert!(calls[0].0.contains("Languages: Go, Rust"));
        assert!(calls[0].0.contains("Engineer at Acme (2020-2023)"));
    }

    #[tokio::test]
    async fn test_regenerate_summary_requires_resume() {
        let stub = StubGenerator::default();
        let mut state = ready_state();
        let err = regenerate_summary(ctx(&stub), &mut state, None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_generate_bullets_replaces_job_bullets() {
        let stub = StubGenerator::new([Ok(r#"["Built X", "Led Y"]"#)]);
        let mut state = polished_state();
        generate_bullets(ctx(&stub), &mut state, 0).await.unwrap();
        assert_eq!(
            state.resume.as_ref().unwrap().experience[0].bullet_points,
            vec!["Built X", "Led Y"]
        );
        assert_eq!(stub.calls()[0].1.max_tokens, 300);
    }

    #[tokio::test]
    async fn test_generate_bullets_rejects_bad_index_and_output() {
        let stub = StubGenerator::new([Ok("not a list")]);
        let mut state = polished_state();
        assert!(matches!(
            generate_bullets(ctx(&stub), &mut state, 3).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            generate_bullets(ctx(&stub), &mut state, 0).await,
            Err(AppError::UnparseableGenerationOutput { .. })
        ));
        assert_eq!(
            state.resume.as_ref().unwrap().experience[0].bullet_points,
            vec!["Shipped X"]
        );
    }

    #[tokio::test]
    async fn test_cover_letter_uses_recruiter_salutation() {
        let stub = StubGenerator::new([Ok("Dear Ms. Smith,\n\nI am writing.")]);
        let mut state = polished_state();
        state.recruiter_name = Some("Ms. Smith".to_string());
        write_cover_letter(ctx(&stub), &mut state).await.unwrap();

        assert_eq!(state.cover_letter.as_deref(), Some("Dear Ms. Smith,\n\nI am writing."));
        assert_eq!(state.step, WizardStep::Placement);
        let calls = stub.calls();
        assert!(calls[0].0.contains("addressed as follows: Dear Ms. Smith,"));
        assert_eq!(calls[0].1, GenerationParams::new("test-model", 0.7, 800));
    }

    #[tokio::test]
    async fn test_cover_letter_requires_company() {
        let stub = StubGenerator::default();
        let mut state = polished_state();
        state.company_name.clear();
        assert!(matches!(
            write_cover_letter(ctx(&stub), &mut state).await,
            Err(AppError::MissingRequiredField("company_name"))
        ));
    }

    #[tokio::test]
    async fn test_placement_records_scores() {
        let stub = StubGenerator::new([Ok(
            "Fit for Job: 70/100 - Good.\nJob Fit for You: 90/100 - Great.",
        )]);
        let mut state = ready_state();
        score_placement(ctx(&stub), &mut state).await.unwrap();

        let report = state.placement.as_ref().unwrap();
        assert_eq!(report.fit_for_job, Some(70));
        assert_eq!(report.job_fit_for_you, Some(90));
        let calls = stub.calls();
        assert_eq!(calls[0].1, GenerationParams::new("test-model", 0.2, 600));
        assert!(calls[0].0.contains("CANDIDATE PREFERENCES:\nN/A"));
    }

    #[tokio::test]
    async fn test_relevance_failure_falls_back_silently() {
        let stub = StubGenerator::new([Err(())]);
        let state = polished_state();
        let outcome = score_relevance(ctx(&stub), &state).await.unwrap();
        assert_eq!(outcome, WeightsOutcome::FallbackDefaultWeights);
        assert_eq!(stub.calls()[0].1, GenerationParams::new("test-model", 0.0, 200));
    }

    #[tokio::test]
    async fn test_allocate_lines_with_scored_weights() {
        let stub = StubGenerator::new([Ok(
            r#"{"summary": 1, "skills": 1, "experience": 1, "education": 1}"#,
        )]);
        let mut state = polished_state();
        let report = allocate_lines(ctx(&stub), &mut state, 60).await.unwrap();

        let allocation = state.allocation.as_ref().unwrap();
        for key in SectionKey::TOP_LEVEL {
            assert_eq!(allocation.get(key), 15);
        }
        assert!(report.warnings.is_empty());
        assert!(matches!(report.outcome, WeightsOutcome::Scored { .. }));
        assert_eq!(report.fit_report.total_budget_lines, 60);
    }

    #[tokio::test]
    async fn test_allocate_lines_reuses_weights_and_warns_on_overrides() {
        let stub = StubGenerator::default();
        let mut state = polished_state();
        state.weights = Some(SectionWeights::default());
        state.line_overrides.insert(SectionKey::Experience, 58);

        let report = allocate_lines(ctx(&stub), &mut state, 60).await.unwrap();
        assert!(stub.calls().is_empty());
        assert_eq!(state.allocation.as_ref().unwrap().experience, 58);
        assert!(matches!(
            report.warnings.as_slice(),
            [BudgetWarning::TopLevelOverBudget { budget: 60, .. }]
        ));
    }

    #[tokio::test]
    async fn test_repolish_discards_previous_relevance_scores() {
        let stub = StubGenerator::new([
            Ok(r#"{"summary": "First."}"#),
            Ok(r#"{"summary": 9, "skills": 1, "experience": 1, "education": 1}"#),
            Ok(r#"{"summary": "Second."}"#),
            Ok(r#"{"summary": 1, "skills": 1, "experience": 1, "education": 1}"#),
        ]);
        let mut state = ready_state();
        polish_resume(ctx(&stub), &mut state).await.unwrap();
        allocate_lines(ctx(&stub), &mut state, 60).await.unwrap();
        assert_eq!(state.allocation.as_ref().unwrap().summary, 45);

        polish_resume(ctx(&stub), &mut state).await.unwrap();
        assert!(state.weights.is_none());
        assert!(state.allocation.is_none());

        allocate_lines(ctx(&stub), &mut state, 60).await.unwrap();
        assert_eq!(stub.calls().len(), 4);
        assert_eq!(state.allocation.as_ref().unwrap().summary, 15);
    }

    #[tokio::test]
    async fn test_fallback_weights_are_not_kept_as_scores() {
        let stub = StubGenerator::new([
            Err(()),
            Ok(r#"{"summary": 1, "skills": 1, "experience": 1, "education": 1}"#),
        ]);
        let mut state = polished_state();

        let first = allocate_lines(ctx(&stub), &mut state, 60).await.unwrap();
        assert_eq!(first.outcome, WeightsOutcome::FallbackDefaultWeights);
        assert!(state.weights.is_none());
        assert!(state.allocation.is_some());

        let second = allocate_lines(ctx(&stub), &mut state, 60).await.unwrap();
        assert_eq!(stub.calls().len(), 2);
        assert!(matches!(second.outcome, WeightsOutcome::Scored { .. }));
        assert_eq!(state.allocation.as_ref().unwrap().summary, 15);
    }

    #[tokio::test]
    async fn test_allocate_lines_unparseable_scores_use_defaults() {
        let stub = StubGenerator::new([Ok("summary is most important")]);
        let mut state = polished_state();
        let report = allocate_lines(ctx(&stub), &mut state, 60).await.unwrap();
        assert_eq!(report.outcome, WeightsOutcome::FallbackDefaultWeights);
        assert_eq!(
            state.allocation.as_ref().unwrap(),
            &allocate(&SectionWeights::default(), 60)
        );
    }
}
