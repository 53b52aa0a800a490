//! Problem specification: tasks, precedence, stations, ergonomics, weights.
//!
//! A [`ProblemSpec`] is built once from external input (typically JSON) and
//! treated as frozen for the duration of a solve. Re-solving with changed
//! parameters means building a new specification.

use serde::{Deserialize, Serialize};

/// A production task to be placed on exactly one station.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Processing time in seconds. Must be strictly positive.
    pub duration: f64,
    /// Ids of tasks that must be placed at the same or an earlier station.
    #[serde(default)]
    pub predecessors: Vec<String>,
    /// Ergonomic penalty (physical strain). Non-negative.
    #[serde(default)]
    pub penalty: f64,
}

impl Task {
    pub fn new(id: impl Into<String>, duration: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            duration,
            predecessors: Vec::new(),
            penalty: 0.0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_predecessors<I, S>(mut self, predecessors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predecessors = predecessors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }
}

/// Optional ergonomic restrictions on station contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErgonomicConstraints {
    /// Cap on the summed penalty of the tasks at any single station.
    #[serde(default)]
    pub max_penalty_per_station: Option<f64>,
    /// Pairs of task ids forbidden from sharing a station.
    #[serde(default)]
    pub incompatible_pairs: Vec<(String, String)>,
}

/// Weights for the normalized three-term objective.
///
/// Absence of this struct on the specification means single-objective
/// cycle-time minimization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveWeights {
    /// Weight on normalized cycle time.
    pub cycle_time: f64,
    /// Weight on normalized total deviation from the mean station load.
    pub balance: f64,
    /// Weight on normalized total ergonomic penalty.
    pub ergonomics: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            cycle_time: 0.5,
            balance: 0.3,
            ergonomics: 0.2,
        }
    }
}

/// Complete description of a line-balancing problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSpec {
    pub tasks: Vec<Task>,
    /// Number of stations, totally ordered 1..N.
    pub station_count: u32,
    /// Upper bound on the cycle time. `None` leaves the cycle time free.
    #[serde(default)]
    pub max_cycle_time: Option<f64>,
    #[serde(default)]
    pub ergonomic_constraints: Option<ErgonomicConstraints>,
    #[serde(default)]
    pub objective_weights: Option<ObjectiveWeights>,
}

impl ProblemSpec {
    pub fn new(tasks: Vec<Task>, station_count: u32) -> Self {
        Self {
            tasks,
            station_count,
            max_cycle_time: None,
            ergonomic_constraints: None,
            objective_weights: None,
        }
    }

    pub fn with_max_cycle_time(mut self, max_cycle_time: f64) -> Self {
        self.max_cycle_time = Some(max_cycle_time);
        self
    }

    pub fn with_ergonomics(mut self, constraints: ErgonomicConstraints) -> Self {
        self.ergonomic_constraints = Some(constraints);
        self
    }

    pub fn with_objective_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.objective_weights = Some(weights);
        self
    }

    /// Sum of all task durations.
    pub fn total_duration(&self) -> f64 {
        self.tasks.iter().map(|t| t.duration).sum()
    }

    /// Sum of all task penalties.
    pub fn total_penalty(&self) -> f64 {
        self.tasks.iter().map(|t| t.penalty).sum()
    }

    /// Whether the normalized multi-criteria objective is in effect.
    pub fn is_multi_objective(&self) -> bool {
        self.objective_weights.is_some()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
