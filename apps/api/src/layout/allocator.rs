//! Line-budget allocator: splits a page's line budget across resume sections by weight.
//!
//! Top-level sections get `floor(total × w / Σw)` lines with a floor of 1; the education
//! allocation is then split across its three subsections the same way with a floor of 0.
//! Flooring can push the top-level sum past the budget; that is reported, not corrected.
//! The result is advisory: nothing here truncates rendered content.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default page budget in lines.
pub const DEFAULT_LINE_BUDGET: u32 = 60;

// ────────────────────────────────────────────────────────────────────────────
// Keys and weights
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Summary,
    Skills,
    Experience,
    Education,
    Certificates,
    Specializations,
    Degrees,
}

impl SectionKey {
    pub const TOP_LEVEL: [SectionKey; 4] = [
        SectionKey::Summary,
        SectionKey::Skills,
        SectionKey::Experience,
        SectionKey::Education,
    ];

    pub const EDUCATION_SUBSECTIONS: [SectionKey; 3] = [
        SectionKey::Degrees,
        SectionKey::Specializations,
        SectionKey::Certificates,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Summary => "summary",
            SectionKey::Skills => "skills",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Certificates => "certificates",
            SectionKey::Specializations => "specializations",
            SectionKey::Degrees => "degrees",
        }
    }

    pub fn parse(key: &str) -> Option<SectionKey> {
        let key = key.trim().to_ascii_lowercase();
        [SectionKey::TOP_LEVEL.as_slice(), SectionKey::EDUCATION_SUBSECTIONS.as_slice()]
            .concat()
            .into_iter()
            .find(|k| k.as_str() == key)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relevance weight per section. Higher means more of the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionWeights {
    pub summary: f64,
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub certificates: f64,
    pub specializations: f64,
    pub degrees: f64,
}

impl Default for SectionWeights {
    fn default() -> Self {
        Self {
            summary: 1.0,
            skills: 2.0,
            experience: 5.0,
            education: 3.0,
            certificates: 1.0,
            specializations: 1.0,
            degrees: 1.0,
        }
    }
}

impl SectionWeights {
    pub fn get(&self, key: SectionKey) -> f64 {
        match key {
            SectionKey::Summary => self.summary,
            SectionKey::Skills => self.skills,
            SectionKey::Experience => self.experience,
            SectionKey::Education => self.education,
            SectionKey::Certificates => self.certificates,
            SectionKey::Specializations => self.specializations,
            SectionKey::Degrees => self.degrees,
        }
    }

    fn set(&mut self, key: SectionKey, weight: f64) {
        match key {
            SectionKey::Summary => self.summary = weight,
            SectionKey::Skills => self.skills = weight,
            SectionKey::Experience => self.experience = weight,
            SectionKey::Education => self.education = weight,
            SectionKey::Certificates => self.certificates = weight,
            SectionKey::Specializations => self.specializations = weight,
            SectionKey::Degrees => self.degrees = weight,
        }
    }

    /// Builds weights from a loosely-keyed mapping (e.g. a model's JSON answer).
    /// Unknown keys are ignored; missing keys are treated as invalid.
    pub fn from_map(map: &BTreeMap<String, f64>) -> Self {
        let mut weights = SectionWeights {
            summary: f64::NAN,
            skills: f64::NAN,
            experience: f64::NAN,
            education: f64::NAN,
            certificates: f64::NAN,
            specializations: f64::NAN,
            degrees: f64::NAN,
        };
        for (key, value) in map {
            if let Some(key) = SectionKey::parse(key) {
                weights.set(key, *value);
            }
        }
        weights.validated()
    }

    /// Any invalid top-level weight discards the whole set in favour of the default table.
    /// Invalid education subsection weights are replaced one by one.
    pub fn validated(&self) -> SectionWeights {
        let defaults = SectionWeights::default();
        if !SectionKey::TOP_LEVEL.iter().all(|k| is_valid_weight(self.get(*k))) {
            return defaults;
        }
        let mut weights = *self;
        for key in SectionKey::EDUCATION_SUBSECTIONS {
            if !is_valid_weight(weights.get(key)) {
                weights.set(key, defaults.get(key));
            }
        }
        weights
    }
}

pub fn is_valid_weight(weight: f64) -> bool {
    weight.is_finite() && weight > 0.0
}

// ────────────────────────────────────────────────────────────────────────────
// Allocation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAllocation {
    pub total_lines: u32,
    pub summary: u32,
    pub skills: u32,
    pub experience: u32,
    pub education: u32,
    pub degrees: u32,
    pub specializations: u32,
    pub certificates: u32,
    /// Sum of the four top-level allocations.
    pub total_allocated: u32,
    pub over_budget: bool,
}

impl LineAllocation {
    pub fn get(&self, key: SectionKey) -> u32 {
        match key {
            SectionKey::Summary => self.summary,
            SectionKey::Skills => self.skills,
            SectionKey::Experience => self.experience,
            SectionKey::Education => self.education,
            SectionKey::Certificates => self.certificates,
            SectionKey::Specializations => self.specializations,
            SectionKey::Degrees => self.degrees,
        }
    }

    fn set(&mut self, key: SectionKey, lines: u32) {
        match key {
            SectionKey::Summary => self.summary = lines,
            SectionKey::Skills => self.skills = lines,
            SectionKey::Experience => self.experience = lines,
            SectionKey::Education => self.education = lines,
            SectionKey::Certificates => self.certificates = lines,
            SectionKey::Specializations => self.specializations = lines,
            SectionKey::Degrees => self.degrees = lines,
        }
    }

    pub fn education_sub_total(&self) -> u32 {
        self.degrees + self.specializations + self.certificates
    }

    fn refresh_totals(&mut self) {
        self.total_allocated = SectionKey::TOP_LEVEL.iter().map(|k| self.get(*k)).sum();
        self.over_budget = self.total_allocated > self.total_lines;
    }
}

/// Proportional-floor allocation of `total_lines` across the sections.
pub fn allocate(weights: &SectionWeights, total_lines: u32) -> LineAllocation {
    let weights = weights.validated();

    let mut allocation = LineAllocation {
        total_lines,
        summary: 0,
        skills: 0,
        experience: 0,
        education: 0,
        degrees: 0,
        specializations: 0,
        certificates: 0,
        total_allocated: 0,
        over_budget: false,
    };

    let top = proportional_floor(&weights, &SectionKey::TOP_LEVEL, total_lines, 1);
    for (key, lines) in top {
        allocation.set(key, lines);
    }

    let sub = proportional_floor(
        &weights,
        &SectionKey::EDUCATION_SUBSECTIONS,
        allocation.education,
        0,
    );
    for (key, lines) in sub {
        allocation.set(key, lines);
    }

    allocation.refresh_totals();
    allocation
}

fn proportional_floor(
    weights: &SectionWeights,
    keys: &[SectionKey],
    total: u32,
    minimum: u32,
) -> Vec<(SectionKey, u32)> {
    let sum: f64 = keys.iter().map(|k| weights.get(*k)).sum();
    keys.iter()
        .map(|key| {
            let share = (f64::from(total) * weights.get(*key) / sum).floor();
            // share is finite and within 0..=total because every weight is positive
            (*key, (share as u32).max(minimum))
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Manual overrides and budget warnings
// ────────────────────────────────────────────────────────────────────────────

/// Per-section line counts entered by a person, replacing computed values.
pub type LineOverrides = BTreeMap<SectionKey, u32>;

/// Over-budget conditions. These never block generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BudgetWarning {
    TopLevelOverBudget { allocated: u32, budget: u32 },
    EducationOverAllocated { sub_total: u32, education: u32 },
}

impl fmt::Display for BudgetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetWarning::TopLevelOverBudget { allocated, budget } => write!(
                f,
                "section allocations total {allocated} lines, over the {budget}-line budget"
            ),
            BudgetWarning::EducationOverAllocated {
                sub_total,
                education,
            } => write!(
                f,
                "education subsections total {sub_total} lines, over the {education} lines given to education"
            ),
        }
    }
}

/// Replaces computed values with the overrides and recomputes the totals.
pub fn apply_overrides(allocation: &LineAllocation, overrides: &LineOverrides) -> LineAllocation {
    let mut adjusted = allocation.clone();
    for (key, lines) in overrides {
        adjusted.set(*key, *lines);
    }
    adjusted.refresh_totals();
    adjusted
}

pub fn budget_warnings(allocation: &LineAllocation) -> Vec<BudgetWarning> {
    let mut warnings = Vec::new();
    if allocation.over_budget {
        warnings.push(BudgetWarning::TopLevelOverBudget {
            allocated: allocation.total_allocated,
            budget: allocation.total_lines,
        });
    }
    let sub_total = allocation.education_sub_total();
    if sub_total > allocation.education {
        warnings.push(BudgetWarning::EducationOverAllocated {
            sub_total,
            education: allocation.education,
        });
    }
    warnings
}
