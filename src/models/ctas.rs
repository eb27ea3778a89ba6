//! CTAS (Canadian Triage and Acuity Scale) reference conditions

use serde::{Deserialize, Serialize};

/// Baseline severity of every condition in the reference table (CTAS level 3, urgent)
pub const BASE_SEVERITY: u8 = 3;

/// One condition of the pediatric CTAS reference table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtasCondition {
    pub system: String,
    pub ctas_level: Option<i64>,
    pub needs_pediatric_specialist: Option<bool>,
    pub pediatric_safe_to_general_er: Option<bool>,
    pub severity_score: u8,
}

impl CtasCondition {
    pub fn new(
        system: impl Into<String>,
        ctas_level: Option<i64>,
        needs_pediatric_specialist: Option<bool>,
        pediatric_safe_to_general_er: Option<bool>,
    ) -> Self {
        Self {
            system: system.into(),
            ctas_level,
            needs_pediatric_specialist,
            pediatric_safe_to_general_er,
            severity_score: severity_score(needs_pediatric_specialist, pediatric_safe_to_general_er),
        }
    }
}

/// Additive severity: base 3, +1 when a specialist is needed, +1 when the condition is
/// not safe for a general ER. Unknown flags add nothing.
#[must_use]
pub const fn severity_score(
    needs_pediatric_specialist: Option<bool>,
    pediatric_safe_to_general_er: Option<bool>,
) -> u8 {
    let mut score = BASE_SEVERITY;
    if matches!(needs_pediatric_specialist, Some(true)) {
        score += 1;
    }
    if matches!(pediatric_safe_to_general_er, Some(false)) {
        score += 1;
    }
    score
}
