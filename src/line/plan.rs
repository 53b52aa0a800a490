//! Assignment plan: the immutable result of one solve.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A task as placed on a station.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedTask {
    pub id: String,
    pub name: String,
    pub duration: f64,
    pub penalty: f64,
}

/// Result of one solve invocation.
///
/// Stations are keyed 1..N. A station with no tasks still appears with an
/// empty list and zero load. Produced exactly once per solve and never
/// mutated; a re-solve yields a new plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPlan {
    /// Station index → tasks placed there, in input order.
    pub assignments: BTreeMap<u32, Vec<AssignedTask>>,
    /// Station index → summed duration of its tasks.
    pub station_loads: BTreeMap<u32, f64>,
    /// Bottleneck station load.
    pub cycle_time: f64,
    pub objective_value: f64,
    /// `Some(0.0)` for a proven exact optimum, `Some(g)` when the solve was
    /// certified only to within a residual gap of `g`, `None` when the time
    /// limit was hit and the backend reported no bound.
    pub optimality_gap: Option<f64>,
    pub solve_duration_seconds: f64,
    pub station_count: u32,
    /// `Σ loads / (stationCount × cycleTime) × 100`.
    pub efficiency_percent: f64,
}

impl AssignmentPlan {
    /// Station index a task was placed at, if it exists in the plan.
    pub fn station_of(&self, task_id: &str) -> Option<u32> {
        self.assignments.iter().find_map(|(&station, tasks)| {
            tasks.iter().any(|t| t.id == task_id).then_some(station)
        })
    }

    /// Whether the solver proved optimality rather than merely finding an
    /// incumbent within the time budget.
    pub fn is_proven_optimal(&self) -> bool {
        matches!(self.optimality_gap, Some(gap) if gap.abs() < 1e-9)
    }

    /// Total number of tasks across all stations.
    pub fn task_count(&self) -> usize {
        self.assignments.values().map(Vec::len).sum()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> AssignmentPlan {
        let mut assignments = BTreeMap::new();
        assignments.insert(
            1,
            vec![AssignedTask {
                id: "a".into(),
                name: "a".into(),
                duration: 30.0,
                penalty: 0.0,
            }],
        );
        assignments.insert(2, vec![]);
        let mut station_loads = BTreeMap::new();
        station_loads.insert(1, 30.0);
        station_loads.insert(2, 0.0);
        AssignmentPlan {
            assignments,
            station_loads,
            cycle_time: 30.0,
            objective_value: 30.0,
            optimality_gap: Some(0.0),
            solve_duration_seconds: 0.1,
            station_count: 2,
            efficiency_percent: 50.0,
        }
    }

    #[test]
    fn station_lookup_finds_assigned_task() {
        let plan = sample_plan();
        assert_eq!(plan.station_of("a"), Some(1));
        assert_eq!(plan.station_of("missing"), None);
    }

    #[test]
    fn zero_gap_means_proven_optimal() {
        let mut plan = sample_plan();
        assert!(plan.is_proven_optimal());
        plan.optimality_gap = Some(0.05);
        assert!(!plan.is_proven_optimal());
        plan.optimality_gap = None;
        assert!(!plan.is_proven_optimal());
    }

    #[test]
    fn plan_serializes_with_camel_case_keys() {
        let json = sample_plan().to_json().unwrap();
        assert!(json.contains("\"stationLoads\""));
        assert!(json.contains("\"cycleTime\""));
        assert!(json.contains("\"efficiencyPercent\""));
        let parsed = AssignmentPlan::from_json(&json).unwrap();
        assert_eq!(parsed.task_count(), 1);
    }
}
