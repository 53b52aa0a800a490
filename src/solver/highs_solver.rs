// HiGHS adapter: translates the gateway model to the HiGHS row API.
// Unlike the CBC path this backend distinguishes a time-limit incumbent
// from a proven optimum.

use crate::domain::{
    ConstraintType, OptimizationProblem, OptimizationType, Result, Solution as DomainSolution,
    SolutionStatus, SolverError, SolverService, SolverStatistics, VariableKind,
};
use std::time::Instant;

use super::certified_gap;

pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for HighsSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        self.validate(problem)?;

        let start_time = Instant::now();
        let num_vars = problem.num_variables();

        use highs::{HighsModelStatus, RowProblem, Sense};

        let mut pb = RowProblem::default();
        let mut vars = Vec::with_capacity(num_vars);
        for (i, var_def) in problem.variables.iter().enumerate() {
            let obj_coeff = problem.objective.coefficients.get(i).copied().unwrap_or(0.0);
            let lower = var_def.lower_bound;
            let upper = var_def.upper_bound.unwrap_or(f64::INFINITY);
            let col = match var_def.kind {
                VariableKind::Binary => pb.add_integer_column(obj_coeff, lower..upper),
                VariableKind::Continuous => pb.add_column(obj_coeff, lower..upper),
            };
            vars.push(col);
        }

        for constraint in &problem.constraints {
            let mut terms = Vec::new();
            for (i, &coeff) in constraint.coefficients.iter().enumerate() {
                if coeff != 0.0 && i < vars.len() {
                    terms.push((vars[i], coeff));
                }
            }
            match constraint.constraint_type {
                ConstraintType::LessThanOrEqual => {
                    pb.add_row(..=constraint.bound, &terms);
                }
                ConstraintType::Equal => {
                    pb.add_row(constraint.bound..=constraint.bound, &terms);
                }
                ConstraintType::GreaterThanOrEqual => {
                    pb.add_row(constraint.bound.., &terms);
                }
            }
        }

        let sense = if problem.objective.optimization_type == OptimizationType::Maximize {
            Sense::Maximise
        } else {
            Sense::Minimise
        };

        let mut model = pb.optimise(sense);
        model.set_option("output_flag", problem.solver_config.verbose);
        if let Some(time_limit) = problem.solver_config.time_limit {
            model.set_option("time_limit", time_limit);
        }
        if let Some(gap) = problem.solver_config.gap_tolerance {
            model.set_option("mip_rel_gap", gap);
        }

        let solved = model.solve();
        let solve_time = start_time.elapsed().as_secs_f64();

        let statistics = SolverStatistics {
            num_variables: num_vars as u32,
            num_constraints: problem.constraints.len() as u32,
            num_binary_vars: problem.num_binary_variables() as u32,
        };

        let objective_of = |values: &[f64]| -> f64 {
            values
                .iter()
                .zip(&problem.objective.coefficients)
                .map(|(v, c)| v * c)
                .sum()
        };

        match solved.status() {
            HighsModelStatus::Optimal => {
                let variable_values = solved.get_solution().columns().to_vec();
                let mut solution =
                    DomainSolution::optimal(objective_of(&variable_values), variable_values)
                        .with_statistics(statistics)
                        .with_solve_time(solve_time);
                solution.gap = certified_gap(&problem.solver_config);
                solution.message = format!("Optimal solution found for '{}'", problem.name);
                Ok(solution)
            }
            HighsModelStatus::ReachedTimeLimit => {
                let variable_values = solved.get_solution().columns().to_vec();
                if variable_values.len() < num_vars {
                    return Err(SolverError::ExecutionFailed(
                        "time limit reached before any feasible solution was found".to_string(),
                    ));
                }
                let mut solution = DomainSolution::new(
                    SolutionStatus::TimeLimitFeasible,
                    "Time limit reached; returning best incumbent without proof of optimality",
                )
                .with_statistics(statistics)
                .with_solve_time(solve_time);
                solution.objective_value = Some(objective_of(&variable_values));
                solution.variable_values = variable_values;
                // HiGHS does not report the residual bound here
                solution.gap = None;
                Ok(solution)
            }
            HighsModelStatus::Infeasible => Ok(DomainSolution::new(
                SolutionStatus::Infeasible,
                "Problem is infeasible: no assignment satisfies all constraints",
            )
            .with_statistics(statistics)
            .with_solve_time(solve_time)),
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                Ok(DomainSolution::new(
                    SolutionStatus::Unbounded,
                    "Problem is unbounded: objective can be improved infinitely",
                )
                .with_statistics(statistics)
                .with_solve_time(solve_time))
            }
            status => Err(SolverError::ExecutionFailed(format!(
                "HiGHS solver returned status: {status:?}"
            ))),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}
