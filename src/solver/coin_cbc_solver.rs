use crate::domain::{
    ConstraintType, OptimizationProblem, OptimizationType, Result, Solution as DomainSolution,
    SolutionStatus, SolverError, SolverService, SolverStatistics, VariableKind,
};
use good_lp::{
    solvers::coin_cbc::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolution, SolverModel, Variable as GoodLpVariable,
};
use std::time::Instant;

use super::certified_gap;

/// COIN-OR CBC adapter through `good_lp`.
///
/// `good_lp` surfaces CBC results only as solved/infeasible/unbounded and
/// drops the incumbent when CBC is stopped by its time limit, so that stop
/// surfaces as a [`SolverError`] here; the HiGHS adapter returns the
/// incumbent as a time-limit-feasible solution instead.
pub struct CoinCbcSolver;

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for CoinCbcSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        self.validate(problem)?;

        let start_time = Instant::now();
        let num_vars = problem.num_variables();

        let mut vars = variables!();
        let mut lp_variables: Vec<GoodLpVariable> = Vec::new();
        for var_def in &problem.variables {
            let var = match var_def.kind {
                VariableKind::Binary => vars.add(variable().binary()),
                VariableKind::Continuous => {
                    let upper = var_def.upper_bound.unwrap_or(f64::INFINITY);
                    vars.add(variable().min(var_def.lower_bound).max(upper))
                }
            };
            lp_variables.push(var);
        }

        // good_lp minimizes, so negate coefficients for maximization
        let is_maximize = problem.objective.optimization_type == OptimizationType::Maximize;
        let mut obj_expr: Expression = 0.into();
        for (i, &coeff) in problem.objective.coefficients.iter().enumerate() {
            if coeff != 0.0 {
                let c = if is_maximize { -coeff } else { coeff };
                obj_expr += c * lp_variables[i];
            }
        }

        let mut lp_model = vars.minimise(obj_expr).using(coin_cbc);
        if !problem.solver_config.verbose {
            lp_model.set_parameter("loglevel", "0");
        }
        if let Some(time_limit) = problem.solver_config.time_limit {
            lp_model.set_parameter("sec", &time_limit.to_string());
        }
        if let Some(gap) = problem.solver_config.gap_tolerance {
            lp_model.set_parameter("ratio", &gap.to_string());
        }

        for constraint in &problem.constraints {
            let mut lhs: Expression = 0.into();
            for (i, &coeff) in constraint.coefficients.iter().enumerate() {
                if coeff != 0.0 {
                    lhs += coeff * lp_variables[i];
                }
            }
            match constraint.constraint_type {
                ConstraintType::LessThanOrEqual => {
                    lp_model = lp_model.with(lhs.leq(constraint.bound));
                }
                ConstraintType::Equal => {
                    lp_model = lp_model.with(lhs.eq(constraint.bound));
                }
                ConstraintType::GreaterThanOrEqual => {
                    lp_model = lp_model.with(lhs.geq(constraint.bound));
                }
            }
        }

        let solution_result = lp_model.solve();
        let solve_time = start_time.elapsed().as_secs_f64();

        let statistics = SolverStatistics {
            num_variables: num_vars as u32,
            num_constraints: problem.constraints.len() as u32,
            num_binary_vars: problem.num_binary_variables() as u32,
        };

        match solution_result {
            Ok(sol) => {
                let mut variable_values = vec![0.0; num_vars];
                for (i, &var) in lp_variables.iter().enumerate() {
                    variable_values[i] = sol.value(var);
                }

                // Recompute the objective in the original orientation
                let mut actual_obj = 0.0;
                for (i, &coeff) in problem.objective.coefficients.iter().enumerate() {
                    actual_obj += coeff * variable_values[i];
                }

                let mut solution = DomainSolution::optimal(actual_obj, variable_values)
                    .with_statistics(statistics)
                    .with_solve_time(solve_time);
                solution.gap = certified_gap(&problem.solver_config);
                solution.message = format!("Optimal solution found for '{}'", problem.name);
                Ok(solution)
            }
            Err(ResolutionError::Infeasible) => Ok(DomainSolution::new(
                SolutionStatus::Infeasible,
                "Problem is infeasible: no assignment satisfies all constraints",
            )
            .with_statistics(statistics)
            .with_solve_time(solve_time)),
            Err(ResolutionError::Unbounded) => Ok(DomainSolution::new(
                SolutionStatus::Unbounded,
                "Problem is unbounded: objective can be improved infinitely",
            )
            .with_statistics(statistics)
            .with_solve_time(solve_time)),
            // CBC reports a limit stop as "Stopped"; good_lp drops any
            // incumbent on that path, so no time-limit plan can be built
            Err(ResolutionError::Other(msg)) if msg.contains("Stopped") => {
                Err(SolverError::ExecutionFailed(
                    "CBC stopped at its time limit before proving optimality and this \
                     backend exposes no incumbent; lower the problem size or use the \
                     HiGHS backend for time-limit plans"
                        .to_string(),
                ))
            }
            Err(e) => Err(SolverError::ExecutionFailed(format!("{e:?}"))),
        }
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}
