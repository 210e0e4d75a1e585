//! Rule-based learning-path scheduler.
//!
//! Missing skills are ordered by a fixed foundational-first priority list and
//! bucketed two per week.

use serde::{Deserialize, Serialize};

/// Foundational skills first. Skills not listed sort after all of these.
pub const SKILL_PRIORITY: &[&str] = &[
    "git",
    "linux",
    "html",
    "css",
    "javascript",
    "typescript",
    "react",
    "redux",
    "node.js",
    "express",
    "python",
    "java",
    "sql",
    "mongodb",
    "postgresql",
    "docker",
    "kubernetes",
    "aws",
    "gcp",
    "azure",
    "ci/cd",
];

pub const SKILLS_PER_WEEK: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub week: u32,
    pub skills: Vec<String>,
    pub goal: String,
    pub suggested_resources: Vec<String>,
}

fn priority(skill: &str) -> usize {
    SKILL_PRIORITY
        .iter()
        .position(|known| *known == skill)
        .unwrap_or(SKILL_PRIORITY.len() + 100)
}

/// Stable sort by priority; unknown skills keep their relative order.
pub fn sort_missing_skills(mut skills: Vec<String>) -> Vec<String> {
    skills.sort_by_key(|skill| priority(skill));
    skills
}

pub fn suggested_resource(skill: &str) -> String {
    format!(
        "Watch 2–3 beginner tutorials on '{skill}', read official docs, and build 1 mini project using {skill}."
    )
}

/// Week-by-week plan for already normalized missing skills.
pub fn build_rule_based_learning_path(missing: &[String]) -> Vec<WeekPlan> {
    let ordered = sort_missing_skills(missing.to_vec());

    ordered
        .chunks(SKILLS_PER_WEEK)
        .zip(1u32..)
        .map(|(skills, week)| WeekPlan {
            week,
            skills: skills.to_vec(),
            goal: format!("Get comfortable with: {}", skills.join(", ")),
            suggested_resources: skills.iter().map(|s| suggested_resource(s)).collect(),
        })
        .collect()
}
