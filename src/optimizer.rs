//! Optimizer Facade: validate → build → solve → extract in one call.
//!
//! One facade instance runs one solve at a time; the specification is taken
//! by value on the async path so it stays frozen for the duration of the
//! solve. There are no implicit retries: a caller wanting a second attempt
//! with relaxed constraints submits a new specification. Cancellation is
//! expressed only through the time limit.

use std::sync::Arc;

use log::{info, warn};

use crate::domain::{SolutionStatus, SolverConfig, SolverError, SolverService};
use crate::line::{AssignmentPlan, ProblemSpec, SpecError};
use crate::model::{ModelBuilder, SolutionExtractor, DEFAULT_ROUNDING_THRESHOLD};
use crate::solver::SolverFactory;

/// Recognized time-limit range, seconds.
const MIN_TIME_LIMIT: f64 = 10.0;
const MAX_TIME_LIMIT: f64 = 3600.0;

/// Classified failure of a solve invocation.
///
/// Every failure crossing the facade boundary is one of these variants;
/// no unclassified error leaks through.
#[derive(Debug, thiserror::Error)]
pub enum BalanceError {
    /// Caller-correctable specification problem, detected before solving.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// The solver proved that no assignment satisfies all constraints.
    #[error("No assignment satisfies all constraints")]
    Infeasible,

    /// The model is unbounded (indicates a construction defect).
    #[error("Model is unbounded")]
    Unbounded,

    /// Backend or extraction failure; not retried.
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Parameters of one solve invocation.
#[derive(Debug, Clone, Copy)]
pub struct SolveParams {
    /// Wall-clock budget in seconds, clamped into 10–3600.
    pub time_limit_seconds: f64,
    /// Relative optimality-gap tolerance (0.01 = 1%).
    pub gap_tolerance: f64,
}

impl Default for SolveParams {
    fn default() -> Self {
        Self {
            time_limit_seconds: 300.0,
            gap_tolerance: 0.01,
        }
    }
}

impl SolveParams {
    pub fn new(time_limit_seconds: f64, gap_tolerance: f64) -> Self {
        Self {
            time_limit_seconds,
            gap_tolerance,
        }
    }

    fn clamped_time_limit(&self) -> f64 {
        let clamped = self.time_limit_seconds.clamp(MIN_TIME_LIMIT, MAX_TIME_LIMIT);
        if clamped != self.time_limit_seconds {
            warn!(
                "time limit {}s outside the recognized range, clamped to {}s",
                self.time_limit_seconds, clamped
            );
        }
        clamped
    }
}

/// Single entry point for line balancing.
#[derive(Clone)]
pub struct Optimizer {
    solver: Arc<dyn SolverService>,
    rounding_threshold: f64,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new(SolverFactory::default_solver())
    }
}

impl Optimizer {
    pub fn new(solver: Arc<dyn SolverService>) -> Self {
        Self {
            solver,
            rounding_threshold: DEFAULT_ROUNDING_THRESHOLD,
        }
    }

    /// Threshold above which a relaxed binary counts as assigned.
    pub fn with_rounding_threshold(mut self, threshold: f64) -> Self {
        self.rounding_threshold = threshold;
        self
    }

    /// Validates the specification, builds the model, solves it, and
    /// extracts the plan. Blocks for up to the time limit.
    pub fn solve(
        &self,
        spec: &ProblemSpec,
        params: &SolveParams,
    ) -> Result<AssignmentPlan, BalanceError> {
        spec.validate()?;

        let config = SolverConfig {
            time_limit: Some(params.clamped_time_limit()),
            gap_tolerance: Some(params.gap_tolerance),
            ..SolverConfig::default()
        };
        let built = ModelBuilder::build(spec, config)?;

        info!(
            "solving line balancing for {} tasks on {} stations with {}",
            spec.tasks.len(),
            spec.station_count,
            self.solver.name()
        );
        let solution = self.solver.solve(&built.problem)?;

        match solution.status {
            SolutionStatus::Optimal | SolutionStatus::TimeLimitFeasible => {
                let plan = SolutionExtractor::extract(
                    spec,
                    &built.layout,
                    &solution,
                    self.rounding_threshold,
                )?;
                info!(
                    "{}: cycle time {:.2}s, efficiency {:.1}%",
                    solution.status, plan.cycle_time, plan.efficiency_percent
                );
                Ok(plan)
            }
            SolutionStatus::Infeasible => Err(BalanceError::Infeasible),
            SolutionStatus::Unbounded => Err(BalanceError::Unbounded),
            SolutionStatus::Error => Err(BalanceError::Solver(SolverError::ExecutionFailed(
                solution.message,
            ))),
        }
    }

    /// Runs [`solve`](Self::solve) on the blocking pool so a long MIP search
    /// never stalls the async caller. The specification is moved in and
    /// stays frozen until completion.
    pub async fn solve_async(
        &self,
        spec: ProblemSpec,
        params: SolveParams,
    ) -> Result<AssignmentPlan, BalanceError> {
        let optimizer = self.clone();
        tokio::task::spawn_blocking(move || optimizer.solve(&spec, &params))
            .await
            .map_err(|e| {
                BalanceError::Solver(SolverError::ExecutionFailed(format!(
                    "solver worker aborted: {e}"
                )))
            })?
    }
}
