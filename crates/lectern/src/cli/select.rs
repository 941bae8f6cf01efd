//! Model selection handler.

use lectern::{TaskComplexity, select_model};

/// Handle `select-model`.
pub fn run_select_model(complexity: TaskComplexity, budget_sensitive: bool) {
    println!("{}", select_model(complexity, budget_sensitive));
}
