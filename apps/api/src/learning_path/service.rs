use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::learning_path::rules::{build_rule_based_learning_path, WeekPlan};

#[derive(Debug, Clone, Deserialize)]
pub struct LearningPathRequest {
    #[serde(default)]
    pub candidate_skills: Vec<String>,
    #[serde(default)]
    pub target_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPathResponse {
    pub candidate_skills: Vec<String>,
    pub target_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub plan: Vec<WeekPlan>,
}

pub fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Normalized, deduplicated, sorted; blank entries are dropped.
pub fn normalize_skills(skills: &[String]) -> BTreeSet<String> {
    skills
        .iter()
        .map(|s| normalize_skill(s))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Target skills the candidate lacks, sorted.
pub fn compute_missing_skills(candidate: &BTreeSet<String>, target: &BTreeSet<String>) -> Vec<String> {
    target.difference(candidate).cloned().collect()
}

pub fn generate_learning_path(req: &LearningPathRequest) -> LearningPathResponse {
    let candidate = normalize_skills(&req.candidate_skills);
    let target = normalize_skills(&req.target_skills);
    let missing = compute_missing_skills(&candidate, &target);
    let plan = build_rule_based_learning_path(&missing);

    debug!(
        candidate = candidate.len(),
        target = target.len(),
        missing = missing.len(),
        weeks = plan.len(),
        "Learning path generated"
    );

    LearningPathResponse {
        candidate_skills: candidate.into_iter().collect(),
        target_skills: target.into_iter().collect(),
        missing_skills: missing,
        plan,
    }
}
