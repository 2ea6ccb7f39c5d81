//! Axum route handlers for the wizard steps.
//!
//! Every handler receives the full `WizardState`, runs one step against it and returns
//! the updated state.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::steps::{self, StepContext};
use crate::layout::fit::FitReport;
use crate::session::WizardState;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StepResponse {
    pub state: WizardState,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit_report: Option<FitReport>,
}

impl StepResponse {
    fn new(state: WizardState) -> Json<Self> {
        Json(Self {
            state,
            warnings: Vec::new(),
            fit_report: None,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub state: WizardState,
    pub temperature: Option<f32>,
}

fn step_context(state: &AppState) -> StepContext<'_> {
    StepContext {
        generator: state.generator.as_ref(),
        model: &state.config.llm_model,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/wizard/polish
pub async fn handle_polish(
    State(state): State<AppState>,
    Json(mut wizard): Json<WizardState>,
) -> Result<Json<StepResponse>, AppError> {
    steps::polish_resume(step_context(&state), &mut wizard).await?;
    Ok(StepResponse::new(wizard))
}

/// POST /api/v1/wizard/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<StepResponse>, AppError> {
    let SummaryRequest {
        state: mut wizard,
        temperature,
    } = request;
    steps::regenerate_summary(step_context(&state), &mut wizard, temperature).await?;
    Ok(StepResponse::new(wizard))
}

/// POST /api/v1/wizard/bullets/:job_index
pub async fn handle_bullets(
    State(state): State<AppState>,
    Path(job_index): Path<usize>,
    Json(mut wizard): Json<WizardState>,
) -> Result<Json<StepResponse>, AppError> {
    steps::generate_bullets(step_context(&state), &mut wizard, job_index).await?;
    Ok(StepResponse::new(wizard))
}

/// POST /api/v1/wizard/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(mut wizard): Json<WizardState>,
) -> Result<Json<StepResponse>, AppError> {
    steps::write_cover_letter(step_context(&state), &mut wizard).await?;
    Ok(StepResponse::new(wizard))
}

/// POST /api/v1/wizard/placement
pub async fn handle_placement(
    State(state): State<AppState>,
    Json(mut wizard): Json<WizardState>,
) -> Result<Json<StepResponse>, AppError> {
    steps::score_placement(step_context(&state), &mut wizard).await?;
    Ok(StepResponse::new(wizard))
}

/// POST /api/v1/wizard/allocate
///
/// Allocation never blocks: over-budget overrides come back as warnings next to the
/// advisory fit report.
pub async fn handle_allocate(
    State(state): State<AppState>,
    Json(mut wizard): Json<WizardState>,
) -> Result<Json<StepResponse>, AppError> {
    let report =
        steps::allocate_lines(step_context(&state), &mut wizard, state.config.line_budget).await?;
    Ok(Json(StepResponse {
        state: wizard,
        warnings: report.warnings.iter().map(ToString::to_string).collect(),
        fit_report: Some(report.fit_report),
    }))
}

/// POST /api/v1/wizard/reset
pub async fn handle_reset(Json(mut wizard): Json<WizardState>) -> Json<StepResponse> {
    wizard.reset();
    StepResponse::new(wizard)
}
