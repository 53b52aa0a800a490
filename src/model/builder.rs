//! Model Builder: translates a validated [`ProblemSpec`] into a
//! mixed-integer linear model for the solver gateway.
//!
//! Columns are laid out as: `assign[t][s]` binaries for every task × station
//! pair, then `load[s]` per station, then `cycleTime`, then (multi-objective
//! only) `deviation[s]` per station. [`VariableLayout`] owns that mapping so
//! the extractor never recomputes indices.

use std::collections::HashMap;

use log::debug;

use crate::domain::{
    Constraint, ObjectiveFunction, OptimizationProblem, SolverConfig, SolverError, Variable,
};
use crate::line::ProblemSpec;

/// Maps domain entities to column indices of the built model.
#[derive(Debug, Clone)]
pub struct VariableLayout {
    num_tasks: usize,
    num_stations: usize,
    has_deviations: bool,
}

impl VariableLayout {
    pub fn new(num_tasks: usize, num_stations: usize, has_deviations: bool) -> Self {
        Self {
            num_tasks,
            num_stations,
            has_deviations,
        }
    }

    pub fn num_tasks(&self) -> usize {
        self.num_tasks
    }

    pub fn num_stations(&self) -> usize {
        self.num_stations
    }

    /// Column of the binary placement variable for (task, station).
    pub fn assign(&self, task: usize, station: usize) -> usize {
        task * self.num_stations + station
    }

    /// Column of the continuous load variable for a station.
    pub fn load(&self, station: usize) -> usize {
        self.num_tasks * self.num_stations + station
    }

    /// Column of the cycle-time variable.
    pub fn cycle_time(&self) -> usize {
        self.num_tasks * self.num_stations + self.num_stations
    }

    /// Column of the load-deviation variable for a station
    /// (multi-objective mode only).
    pub fn deviation(&self, station: usize) -> usize {
        debug_assert!(self.has_deviations);
        self.cycle_time() + 1 + station
    }

    pub fn num_columns(&self) -> usize {
        let base = self.num_tasks * self.num_stations + self.num_stations + 1;
        if self.has_deviations {
            base + self.num_stations
        } else {
            base
        }
    }
}

/// A gateway model together with the layout needed to interpret its columns.
#[derive(Debug, Clone)]
pub struct BuiltModel {
    pub problem: OptimizationProblem,
    pub layout: VariableLayout,
}

/// Builds the mixed-integer model for a line-balancing specification.
///
/// Expects an already validated specification; a dangling predecessor or
/// incompatible-pair reference still surfaces as an error rather than a
/// panic, since this is a public entry point.
pub struct ModelBuilder;

impl ModelBuilder {
    pub fn build(spec: &ProblemSpec, config: SolverConfig) -> Result<BuiltModel, SolverError> {
        let num_tasks = spec.tasks.len();
        let num_stations = spec.station_count as usize;
        let layout = VariableLayout::new(num_tasks, num_stations, spec.is_multi_objective());
        let num_columns = layout.num_columns();

        let task_index: HashMap<&str, usize> = spec
            .tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();

        let mut variables = Vec::with_capacity(num_columns);
        for task in &spec.tasks {
            for s in 0..num_stations {
                variables.push(Variable::binary(format!("assign_{}_{}", task.id, s + 1)));
            }
        }
        for s in 0..num_stations {
            variables.push(Variable::continuous(format!("load_{}", s + 1)));
        }
        variables.push(Variable::continuous("cycle_time"));
        if spec.is_multi_objective() {
            for s in 0..num_stations {
                variables.push(Variable::continuous(format!("deviation_{}", s + 1)));
            }
        }

        let objective = Self::objective(spec, &layout, num_columns);
        let mut problem = OptimizationProblem::new(objective, variables)
            .with_name("line_balancing")
            .with_config(config);

        let row = || vec![0.0; num_columns];

        // Each task placed at exactly one station
        for (t, task) in spec.tasks.iter().enumerate() {
            let mut coeffs = row();
            for s in 0..num_stations {
                coeffs[layout.assign(t, s)] = 1.0;
            }
            problem.add_constraint(
                Constraint::eq(coeffs, 1.0).with_name(format!("cover_{}", task.id)),
            );
        }

        // load[s] equals the summed duration of the tasks placed there
        for s in 0..num_stations {
            let mut coeffs = row();
            for (t, task) in spec.tasks.iter().enumerate() {
                coeffs[layout.assign(t, s)] = task.duration;
            }
            coeffs[layout.load(s)] = -1.0;
            problem.add_constraint(
                Constraint::eq(coeffs, 0.0).with_name(format!("load_{}", s + 1)),
            );
        }

        // cycleTime >= load[s] for every station
        for s in 0..num_stations {
            let mut coeffs = row();
            coeffs[layout.load(s)] = 1.0;
            coeffs[layout.cycle_time()] = -1.0;
            problem.add_constraint(
                Constraint::leq(coeffs, 0.0).with_name(format!("bottleneck_{}", s + 1)),
            );
        }

        // If a task sits at station s, each predecessor sits at some k <= s
        for (t, task) in spec.tasks.iter().enumerate() {
            for pred in &task.predecessors {
                let p = *task_index.get(pred.as_str()).ok_or_else(|| {
                    SolverError::InvalidModel(format!(
                        "task '{}' references unknown predecessor '{}'",
                        task.id, pred
                    ))
                })?;
                for s in 0..num_stations {
                    let mut coeffs = row();
                    for k in 0..=s {
                        coeffs[layout.assign(p, k)] = 1.0;
                    }
                    coeffs[layout.assign(t, s)] -= 1.0;
                    problem.add_constraint(
                        Constraint::geq(coeffs, 0.0)
                            .with_name(format!("precedence_{}_{}_{}", pred, task.id, s + 1)),
                    );
                }
            }
        }

        if let Some(cap) = spec.max_cycle_time {
            let mut coeffs = row();
            coeffs[layout.cycle_time()] = 1.0;
            problem.add_constraint(Constraint::leq(coeffs, cap).with_name("cycle_time_cap"));
        }

        if let Some(ergo) = &spec.ergonomic_constraints {
            if let Some(penalty_cap) = ergo.max_penalty_per_station {
                for s in 0..num_stations {
                    let mut coeffs = row();
                    for (t, task) in spec.tasks.iter().enumerate() {
                        coeffs[layout.assign(t, s)] = task.penalty;
                    }
                    problem.add_constraint(
                        Constraint::leq(coeffs, penalty_cap)
                            .with_name(format!("penalty_cap_{}", s + 1)),
                    );
                }
            }
            for (a, b) in &ergo.incompatible_pairs {
                let lookup = |id: &str| {
                    task_index.get(id).copied().ok_or_else(|| {
                        SolverError::InvalidModel(format!(
                            "incompatible pair references unknown task '{id}'"
                        ))
                    })
                };
                let (ta, tb) = (lookup(a)?, lookup(b)?);
                for s in 0..num_stations {
                    let mut coeffs = row();
                    coeffs[layout.assign(ta, s)] = 1.0;
                    coeffs[layout.assign(tb, s)] = 1.0;
                    problem.add_constraint(
                        Constraint::leq(coeffs, 1.0)
                            .with_name(format!("incompatible_{}_{}_{}", a, b, s + 1)),
                    );
                }
            }
        }

        // deviation[s] >= |load[s] - mean load|, linearized as two rows
        if spec.is_multi_objective() {
            let mean_load = spec.total_duration() / num_stations as f64;
            for s in 0..num_stations {
                let mut above = row();
                above[layout.load(s)] = 1.0;
                above[layout.deviation(s)] = -1.0;
                problem.add_constraint(
                    Constraint::leq(above, mean_load).with_name(format!("dev_above_{}", s + 1)),
                );

                let mut below = row();
                below[layout.load(s)] = -1.0;
                below[layout.deviation(s)] = -1.0;
                problem.add_constraint(
                    Constraint::leq(below, -mean_load).with_name(format!("dev_below_{}", s + 1)),
                );
            }
        }

        debug!(
            "built line-balancing model: {} columns ({} binary), {} rows",
            problem.num_variables(),
            problem.num_binary_variables(),
            problem.constraints.len()
        );

        Ok(BuiltModel { problem, layout })
    }

    /// Single-objective mode minimizes the cycle-time column alone.
    /// Multi-objective mode minimizes the weighted sum of three normalized
    /// terms. Normalizers are floored at 1 so an all-zero penalty (or an
    /// empty-duration pathological input) cannot divide by zero; the floor
    /// is a stabilization, not a semantic change.
    fn objective(spec: &ProblemSpec, layout: &VariableLayout, num_columns: usize) -> ObjectiveFunction {
        let mut coefficients = vec![0.0; num_columns];

        match &spec.objective_weights {
            None => {
                coefficients[layout.cycle_time()] = 1.0;
            }
            Some(weights) => {
                let total_duration = spec.total_duration().max(1.0);
                let max_penalty = spec.total_penalty().max(1.0);
                let num_stations = layout.num_stations();

                coefficients[layout.cycle_time()] = weights.cycle_time / total_duration;
                for s in 0..num_stations {
                    coefficients[layout.deviation(s)] =
                        weights.balance / (num_stations as f64 * total_duration);
                }
                for (t, task) in spec.tasks.iter().enumerate() {
                    for s in 0..num_stations {
                        coefficients[layout.assign(t, s)] =
                            weights.ergonomics * task.penalty / max_penalty;
                    }
                }
            }
        }

        ObjectiveFunction::minimize(coefficients)
    }
}
