// Gateway contract between the model builder and any solver backend.
// The builder and extractor depend only on this trait, so backends can be
// swapped without touching them.

use super::models::{OptimizationProblem, Solution};

/// Error types for the solver gateway
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// External solving capability consumed by the optimizer.
///
/// Implementations accept a fully built mixed-integer model and return a
/// terminal [`Solution`]. Infeasible and unbounded outcomes are statuses,
/// not errors; `Err` is reserved for backend failures.
pub trait SolverService: Send + Sync {
    /// Solve a mixed-integer problem
    fn solve(&self, problem: &OptimizationProblem) -> Result<Solution>;

    /// Structural validation of a model before it is handed to the backend
    fn validate(&self, problem: &OptimizationProblem) -> Result<()> {
        let mut errors = Vec::new();

        if problem.variables.is_empty() {
            errors.push("Model must declare at least one variable".to_string());
        }

        let num_vars = problem.num_variables();

        if problem.objective.num_variables() != num_vars {
            errors.push(format!(
                "Objective has {} coefficients but the model has {} variables",
                problem.objective.num_variables(),
                num_vars
            ));
        }

        for (i, constraint) in problem.constraints.iter().enumerate() {
            if constraint.num_variables() != num_vars {
                errors.push(format!(
                    "Constraint {} '{}' has {} coefficients but the model has {} variables",
                    i,
                    constraint.name,
                    constraint.num_variables(),
                    num_vars
                ));
            }
        }

        for (i, var) in problem.variables.iter().enumerate() {
            if let Some(upper) = var.upper_bound {
                if var.lower_bound > upper {
                    errors.push(format!(
                        "Variable {} '{}' has lower bound ({}) > upper bound ({})",
                        i, var.name, var.lower_bound, upper
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SolverError::InvalidModel(errors.join("; ")))
        }
    }

    /// Name of this solver backend
    fn name(&self) -> &str;

    /// Whether this backend supports mixed-integer programming
    fn supports_mip(&self) -> bool;
}
