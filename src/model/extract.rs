//! Solution Extractor: turns raw solver output back into an
//! [`AssignmentPlan`].
//!
//! Binary columns are read against a rounding threshold (default 0.5) to
//! absorb backend numerical noise. Station loads are recomputed from task
//! durations rather than read back from the `load` columns, so the reported
//! statistics always agree exactly with the assignment.

use std::collections::BTreeMap;

use crate::domain::{Solution, SolverError};
use crate::line::{AssignedTask, AssignmentPlan, ProblemSpec};
use crate::model::builder::VariableLayout;

/// Default threshold above which a relaxed binary counts as "assigned".
pub const DEFAULT_ROUNDING_THRESHOLD: f64 = 0.5;

pub struct SolutionExtractor;

impl SolutionExtractor {
    /// Builds the plan for a solution whose status carries variable values
    /// (optimal or time-limit feasible). The facade is responsible for
    /// never calling this with an infeasible/unbounded/error outcome.
    pub fn extract(
        spec: &ProblemSpec,
        layout: &VariableLayout,
        solution: &Solution,
        threshold: f64,
    ) -> Result<AssignmentPlan, SolverError> {
        if !solution.is_feasible() {
            return Err(SolverError::ExecutionFailed(format!(
                "cannot extract a plan from a {} solution",
                solution.status
            )));
        }
        if solution.variable_values.len() < layout.num_columns() {
            return Err(SolverError::ExecutionFailed(format!(
                "solution has {} values but the model declared {} columns",
                solution.variable_values.len(),
                layout.num_columns()
            )));
        }

        let num_stations = layout.num_stations();
        let mut assignments: BTreeMap<u32, Vec<AssignedTask>> = BTreeMap::new();
        for s in 0..num_stations {
            assignments.insert(s as u32 + 1, Vec::new());
        }

        for (t, task) in spec.tasks.iter().enumerate() {
            let mut placed_at = None;
            for s in 0..num_stations {
                if solution.variable_values[layout.assign(t, s)] > threshold {
                    if placed_at.is_some() {
                        return Err(SolverError::ExecutionFailed(format!(
                            "task '{}' assigned to more than one station",
                            task.id
                        )));
                    }
                    placed_at = Some(s);
                }
            }
            let station = placed_at.ok_or_else(|| {
                SolverError::ExecutionFailed(format!(
                    "task '{}' assigned to no station",
                    task.id
                ))
            })?;
            if let Some(tasks) = assignments.get_mut(&(station as u32 + 1)) {
                tasks.push(AssignedTask {
                    id: task.id.clone(),
                    name: task.name.clone(),
                    duration: task.duration,
                    penalty: task.penalty,
                });
            }
        }

        let station_loads: BTreeMap<u32, f64> = assignments
            .iter()
            .map(|(&station, tasks)| (station, tasks.iter().map(|t| t.duration).sum()))
            .collect();
        let cycle_time = station_loads.values().cloned().fold(0.0, f64::max);
        let total_load: f64 = station_loads.values().sum();
        let denominator = spec.station_count as f64 * cycle_time;
        let efficiency_percent = if denominator > 0.0 {
            total_load / denominator * 100.0
        } else {
            0.0
        };

        Ok(AssignmentPlan {
            assignments,
            station_loads,
            cycle_time,
            objective_value: solution.objective_value.unwrap_or(0.0),
            optimality_gap: solution.gap,
            solve_duration_seconds: solution.solve_time_seconds,
            station_count: spec.station_count,
            efficiency_percent,
        })
    }
}
