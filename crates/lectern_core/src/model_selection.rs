//! Heuristic model choice for a task.

use serde::{Deserialize, Serialize};

/// Cheapest general-purpose model.
pub const BUDGET_MODEL: &str = "gpt-3.5-turbo";
/// Most capable model, for complex tasks.
pub const COMPLEX_MODEL: &str = "gpt-4-turbo";
/// Long-context middle ground.
pub const MODERATE_MODEL: &str = "gpt-3.5-turbo-16k";

/// How demanding a task is.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskComplexity {
    /// Short factual answers, classification
    Simple,
    /// Everything between
    Moderate,
    /// Multi-step reasoning, long-form writing
    Complex,
}

/// Picks a model for a task.
///
/// Budget sensitivity wins over complexity.
///
/// # Examples
///
/// ```
/// use lectern_core::{select_model, TaskComplexity};
///
/// assert_eq!(select_model(TaskComplexity::Complex, false), "gpt-4-turbo");
/// assert_eq!(select_model(TaskComplexity::Complex, true), "gpt-3.5-turbo");
/// assert_eq!(select_model(TaskComplexity::Moderate, false), "gpt-3.5-turbo-16k");
/// ```
pub fn select_model(complexity: TaskComplexity, budget_sensitive: bool) -> &'static str {
    if budget_sensitive {
        return BUDGET_MODEL;
    }
    match complexity {
        TaskComplexity::Simple => BUDGET_MODEL,
        TaskComplexity::Complex => COMPLEX_MODEL,
        TaskComplexity::Moderate => MODERATE_MODEL,
    }
}
