//! Fit report: compares the estimated printed length of an assembled resume with its
//! line allocation.
//!
//! Purely advisory. Sections over their allocation are flagged with the number of excess
//! lines; nothing is removed or shortened.

use serde::{Deserialize, Serialize};

use crate::layout::allocator::{LineAllocation, SectionKey};
use crate::layout::buffer::{DocumentBuffer, SectionKind};
use crate::layout::metrics::paragraph_lines;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum SectionVerdict {
    WithinBudget,
    OverBudget { excess: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum PageVerdict {
    Fits,
    Overflow { excess: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionFit {
    pub section: SectionKey,
    pub estimated_lines: u32,
    pub allocated_lines: u32,
    pub verdict: SectionVerdict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub sections: Vec<SectionFit>,
    /// Estimated lines for the whole document, header included.
    pub total_estimated_lines: u32,
    pub total_budget_lines: u32,
    pub whitespace_fraction: f32,
    pub overflow_fraction: f32,
    pub verdict: PageVerdict,
}

impl FitReport {
    pub fn over_budget_sections(&self) -> impl Iterator<Item = &SectionFit> {
        self.sections
            .iter()
            .filter(|s| matches!(s.verdict, SectionVerdict::OverBudget { .. }))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Estimates each top-level section's printed lines and checks them against `allocation`.
pub fn analyze_fit(buffer: &DocumentBuffer, allocation: &LineAllocation) -> FitReport {
    let margins = buffer.page_margins();
    let mut per_section = [0u32; 4];
    let mut total_estimated_lines = 0u32;

    for paragraph in buffer.paragraphs() {
        let lines = paragraph_lines(paragraph, &margins);
        total_estimated_lines += lines;
        if let Some(index) = budget_index(paragraph.section) {
            per_section[index] += lines;
        }
    }

    let sections = SectionKey::TOP_LEVEL
        .iter()
        .zip(per_section)
        .map(|(key, estimated_lines)| {
            let allocated_lines = allocation.get(*key);
            let verdict = if estimated_lines > allocated_lines {
                SectionVerdict::OverBudget {
                    excess: estimated_lines - allocated_lines,
                }
            } else {
                SectionVerdict::WithinBudget
            };
            SectionFit {
                section: *key,
                estimated_lines,
                allocated_lines,
                verdict,
            }
        })
        .collect();

    let budget = allocation.total_lines;
    let fill_ratio = if budget == 0 {
        f32::INFINITY
    } else {
        total_estimated_lines as f32 / budget as f32
    };
    let verdict = if total_estimated_lines > budget {
        PageVerdict::Overflow {
            excess: total_estimated_lines - budget,
        }
    } else {
        PageVerdict::Fits
    };

    FitReport {
        sections,
        total_estimated_lines,
        total_budget_lines: budget,
        whitespace_fraction: (1.0 - fill_ratio).max(0.0),
        overflow_fraction: if fill_ratio.is_finite() {
            (fill_ratio - 1.0).max(0.0)
        } else {
            1.0
        },
        verdict,
    }
}

/// Position of a rendered section in `SectionKey::TOP_LEVEL`. The header and letter
/// paragraphs have no budget of their own.
fn budget_index(section: SectionKind) -> Option<usize> {
    match section {
        SectionKind::Summary => Some(0),
        SectionKind::Skills => Some(1),
        SectionKind::Experience => Some(2),
        SectionKind::Education => Some(3),
        SectionKind::Header | SectionKind::Letter => None,
    }
}
