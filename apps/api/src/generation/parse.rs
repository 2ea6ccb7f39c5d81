//! Parsing of collaborator output into typed values.
//!
//! Every parser returns an explicit outcome. Structured steps (resume, bullets) report
//! `UnparseableOutput` carrying the raw text so it can be shown for manual recovery; the
//! relevance step never fails and falls back to the default weight table instead.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::allocator::{is_valid_weight, SectionKey, SectionWeights};
use crate::models::ResumeDocument;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("model output is not {expected}")]
pub struct UnparseableOutput {
    pub expected: &'static str,
    pub raw: String,
}

const RESUME_SHAPE: &str = "a JSON object matching the resume schema";
const BULLETS_SHAPE: &str = "a non-empty JSON list of strings";

/// Parses a polished resume and applies the editing-view normalizations.
pub fn parse_resume_document(raw: &str) -> Result<ResumeDocument, UnparseableOutput> {
    let mut resume: ResumeDocument = parse_json(raw, '{', '}').ok_or_else(|| UnparseableOutput {
        expected: RESUME_SHAPE,
        raw: raw.to_string(),
    })?;
    resume.normalize();
    Ok(resume)
}

/// Parses a bullet list, trimming each entry and dropping blanks and leading bullet glyphs.
pub fn parse_bullet_points(raw: &str) -> Result<Vec<String>, UnparseableOutput> {
    let unparseable = || UnparseableOutput {
        expected: BULLETS_SHAPE,
        raw: raw.to_string(),
    };
    let items: Vec<String> = parse_json(raw, '[', ']').ok_or_else(unparseable)?;
    let bullets: Vec<String> = items
        .iter()
        .map(|item| item.trim().trim_start_matches(['•', '-', '*']).trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();
    if bullets.is_empty() {
        return Err(unparseable());
    }
    Ok(bullets)
}

/// Tries the whole text first, then the outermost `open..close` span, so a stray
/// sentence around the JSON does not sink the parse.
fn parse_json<T: DeserializeOwned>(raw: &str, open: char, close: char) -> Option<T> {
    let text = raw.trim();
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

// ────────────────────────────────────────────────────────────────────────────
// Relevance weights
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WeightsOutcome {
    Scored { weights: SectionWeights },
    FallbackDefaultWeights,
}

impl WeightsOutcome {
    pub fn weights(&self) -> SectionWeights {
        match self {
            WeightsOutcome::Scored { weights } => *weights,
            WeightsOutcome::FallbackDefaultWeights => SectionWeights::default(),
        }
    }
}

/// Accepts numbers or numeric strings per key. A missing or non-positive top-level weight
/// means the answer is unusable as a whole.
pub fn parse_relevance_weights(raw: &str) -> WeightsOutcome {
    let Some(object) = parse_json::<BTreeMap<String, serde_json::Value>>(raw, '{', '}') else {
        return WeightsOutcome::FallbackDefaultWeights;
    };

    let map: BTreeMap<String, f64> = object
        .iter()
        .filter_map(|(key, value)| {
            let weight = match value {
                serde_json::Value::Number(n) => n.as_f64(),
                serde_json::Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }?;
            let key = SectionKey::parse(key)?;
            Some((key.as_str().to_string(), weight))
        })
        .collect();

    let top_level_ok = SectionKey::TOP_LEVEL
        .iter()
        .all(|key| map.get(key.as_str()).copied().is_some_and(is_valid_weight));
    if !top_level_ok {
        return WeightsOutcome::FallbackDefaultWeights;
    }

    WeightsOutcome::Scored {
        weights: SectionWeights::from_map(&map),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Placement scores
// ────────────────────────────────────────────────────────────────────────────

/// The placement assessment: the model's text plus the two scores when they could be read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementReport {
    pub text: String,
    pub fit_for_job: Option<u8>,
    pub job_fit_for_you: Option<u8>,
}

const FIT_FOR_JOB_LABEL: &str = "fit for job:";
const JOB_FIT_FOR_YOU_LABEL: &str = "job fit for you:";

pub fn parse_placement_report(raw: &str) -> PlacementReport {
    let mut report = PlacementReport {
        text: raw.trim().to_string(),
        ..Default::default()
    };
    for line in raw.lines() {
        let lower = line.to_lowercase();
        if let Some(pos) = lower.find(JOB_FIT_FOR_YOU_LABEL) {
            report.job_fit_for_you = report
                .job_fit_for_you
                .or_else(|| score_out_of_100(&lower[pos + JOB_FIT_FOR_YOU_LABEL.len()..]));
        } else if let Some(pos) = lower.find(FIT_FOR_JOB_LABEL) {
            report.fit_for_job = report
                .fit_for_job
                .or_else(|| score_out_of_100(&lower[pos + FIT_FOR_JOB_LABEL.len()..]));
        }
    }
    report
}

/// Reads `NN/100` at the start of `rest`, ignoring surrounding markup like `**`.
fn score_out_of_100(rest: &str) -> Option<u8> {
    let rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '*');
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    let after = rest[digits.len()..].trim_start();
    if !after.starts_with("/100") && !after.starts_with("/ 100") {
        return None;
    }
    digits.parse::<u8>().ok().filter(|score| *score <= 100)
}
