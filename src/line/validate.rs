//! Specification validation.
//!
//! Every structural problem is detected before a model is built, so a bad
//! specification never reaches the solver. Checks:
//! - non-empty task set
//! - unique task ids
//! - predecessor and incompatible-pair references resolve to existing tasks
//! - strictly positive durations, non-negative penalties and weights
//! - station count ≥ 1, positive cycle-time cap
//! - acyclic precedence graph (Kahn's algorithm)

use std::collections::{HashMap, HashSet, VecDeque};

use super::spec::ProblemSpec;

/// Caller-correctable specification error, reported before any solve.
#[derive(Debug, thiserror::Error)]
#[error("Invalid specification: {0}")]
pub struct SpecError(pub String);

impl ProblemSpec {
    /// Validates the specification, collecting every problem found.
    pub fn validate(&self) -> Result<(), SpecError> {
        let mut errors = Vec::new();

        if self.tasks.is_empty() {
            errors.push("Task set is empty".to_string());
        }
        if self.station_count == 0 {
            errors.push("Station count must be at least 1".to_string());
        }
        if let Some(cap) = self.max_cycle_time {
            if cap <= 0.0 {
                errors.push(format!("Maximum cycle time must be positive, got {cap}"));
            }
        }

        let mut ids = HashSet::new();
        for task in &self.tasks {
            if task.id.is_empty() {
                errors.push("Task with empty id".to_string());
            }
            if !ids.insert(task.id.as_str()) {
                errors.push(format!("Duplicate task id '{}'", task.id));
            }
            if task.duration <= 0.0 {
                errors.push(format!(
                    "Task '{}' has non-positive duration {}",
                    task.id, task.duration
                ));
            }
            if task.penalty < 0.0 {
                errors.push(format!(
                    "Task '{}' has negative penalty {}",
                    task.id, task.penalty
                ));
            }
        }

        for task in &self.tasks {
            for pred in &task.predecessors {
                if pred == &task.id {
                    errors.push(format!("Task '{}' lists itself as predecessor", task.id));
                } else if !ids.contains(pred.as_str()) {
                    errors.push(format!(
                        "Task '{}' references unknown predecessor '{}'",
                        task.id, pred
                    ));
                }
            }
        }

        if let Some(ergo) = &self.ergonomic_constraints {
            if let Some(cap) = ergo.max_penalty_per_station {
                if cap < 0.0 {
                    errors.push(format!("Negative per-station penalty cap {cap}"));
                }
            }
            for (a, b) in &ergo.incompatible_pairs {
                for id in [a, b] {
                    if !ids.contains(id.as_str()) {
                        errors.push(format!("Incompatible pair references unknown task '{id}'"));
                    }
                }
            }
        }

        if let Some(weights) = &self.objective_weights {
            for (name, value) in [
                ("cycleTime", weights.cycle_time),
                ("balance", weights.balance),
                ("ergonomics", weights.ergonomics),
            ] {
                if value < 0.0 {
                    errors.push(format!("Objective weight '{name}' is negative ({value})"));
                }
            }
        }

        // Only meaningful once references resolve
        if errors.is_empty() && self.has_precedence_cycle() {
            errors.push("Precedence graph contains a cycle".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SpecError(errors.join("; ")))
        }
    }

    /// Kahn's algorithm over the predecessor graph.
    fn has_precedence_cycle(&self) -> bool {
        let mut in_degree: HashMap<&str, usize> = HashMap::new();
        let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();

        for task in &self.tasks {
            in_degree.entry(task.id.as_str()).or_insert(0);
            for pred in &task.predecessors {
                *in_degree.entry(task.id.as_str()).or_insert(0) += 1;
                successors
                    .entry(pred.as_str())
                    .or_default()
                    .push(task.id.as_str());
            }
        }

        let mut queue: VecDeque<&str> = in_degree
            .iter()
            .filter(|(_, &d)| d == 0)
            .map(|(&id, _)| id)
            .collect();
        let mut visited = 0usize;

        while let Some(id) = queue.pop_front() {
            visited += 1;
            if let Some(next) = successors.get(id) {
                for &succ in next {
                    if let Some(degree) = in_degree.get_mut(succ) {
                        *degree -= 1;
                        if *degree == 0 {
                            queue.push_back(succ);
                        }
                    }
                }
            }
        }

        visited != self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::spec::{ErgonomicConstraints, Task};

    fn two_tasks() -> Vec<Task> {
        vec![Task::new("a", 10.0), Task::new("b", 20.0)]
    }

    #[test]
    fn valid_spec_passes() {
        let spec = ProblemSpec::new(two_tasks(), 2);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn empty_task_set_is_rejected() {
        let spec = ProblemSpec::new(vec![], 2);
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn zero_stations_are_rejected() {
        let spec = ProblemSpec::new(two_tasks(), 0);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let spec = ProblemSpec::new(vec![Task::new("a", 10.0), Task::new("a", 5.0)], 1);
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate task id 'a'"));
    }

    #[test]
    fn unknown_predecessor_is_rejected() {
        let spec = ProblemSpec::new(
            vec![Task::new("a", 10.0).with_predecessors(["ghost"])],
            1,
        );
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("unknown predecessor 'ghost'"));
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        let spec = ProblemSpec::new(vec![Task::new("a", 0.0)], 1);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn negative_penalty_is_rejected() {
        let spec = ProblemSpec::new(vec![Task::new("a", 1.0).with_penalty(-1.0)], 1);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn precedence_cycle_is_detected() {
        let spec = ProblemSpec::new(
            vec![
                Task::new("a", 10.0).with_predecessors(["c"]),
                Task::new("b", 10.0).with_predecessors(["a"]),
                Task::new("c", 10.0).with_predecessors(["b"]),
            ],
            2,
        );
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn self_reference_is_rejected() {
        let spec = ProblemSpec::new(vec![Task::new("a", 10.0).with_predecessors(["a"])], 1);
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("itself"));
    }

    #[test]
    fn diamond_precedence_is_acyclic() {
        let spec = ProblemSpec::new(
            vec![
                Task::new("root", 5.0),
                Task::new("left", 5.0).with_predecessors(["root"]),
                Task::new("right", 5.0).with_predecessors(["root"]),
                Task::new("join", 5.0).with_predecessors(["left", "right"]),
            ],
            3,
        );
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn incompatible_pair_with_unknown_task_is_rejected() {
        let spec = ProblemSpec::new(two_tasks(), 2).with_ergonomics(ErgonomicConstraints {
            max_penalty_per_station: None,
            incompatible_pairs: vec![("a".into(), "nope".into())],
        });
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("unknown task 'nope'"));
    }

    #[test]
    fn all_problems_are_reported_together() {
        let spec = ProblemSpec::new(vec![Task::new("a", -1.0), Task::new("a", 2.0)], 0);
        let message = spec.validate().unwrap_err().to_string();
        assert!(message.contains("Duplicate task id"));
        assert!(message.contains("non-positive duration"));
        assert!(message.contains("Station count"));
    }
}
