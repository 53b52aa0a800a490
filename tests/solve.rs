// End-to-end solves against the CBC backend.

use lineopt::{
    BalanceError, ErgonomicConstraints, ObjectiveWeights, Optimizer, ProblemSpec, SolveParams,
    Task,
};

fn params() -> SolveParams {
    // Surfaces builder/facade logs when RUST_LOG is set
    let _ = env_logger::builder().is_test(true).try_init();
    SolveParams::new(60.0, 0.0)
}

fn assert_plan_invariants(spec: &ProblemSpec, plan: &lineopt::AssignmentPlan) {
    // Every task appears on exactly one station
    for task in &spec.tasks {
        let stations: Vec<_> = plan
            .assignments
            .iter()
            .filter(|(_, tasks)| tasks.iter().any(|t| t.id == task.id))
            .collect();
        assert_eq!(stations.len(), 1, "task '{}' coverage violated", task.id);
    }

    // Reported loads equal the summed durations, cycle time is the max load
    for (station, tasks) in &plan.assignments {
        let load: f64 = tasks.iter().map(|t| t.duration).sum();
        assert!((plan.station_loads[station] - load).abs() < 1e-6);
    }
    let max_load = plan.station_loads.values().cloned().fold(0.0, f64::max);
    assert!((plan.cycle_time - max_load).abs() < 1e-6);

    // Precedence follows the station order
    for task in &spec.tasks {
        for pred in &task.predecessors {
            let pred_station = plan.station_of(pred).unwrap();
            let task_station = plan.station_of(&task.id).unwrap();
            assert!(
                pred_station <= task_station,
                "predecessor '{}' at station {} after '{}' at station {}",
                pred,
                pred_station,
                task.id,
                task_station
            );
        }
    }

    // Cycle cap respected
    if let Some(cap) = spec.max_cycle_time {
        assert!(plan.cycle_time <= cap + 1e-6);
    }

    // Efficiency formula
    let total: f64 = plan.station_loads.values().sum();
    let expected = total / (plan.station_count as f64 * plan.cycle_time) * 100.0;
    assert!((plan.efficiency_percent - expected).abs() < 1e-6);
}

#[test]
fn balances_three_tasks_on_two_stations() {
    // Durations 30/40/50: the best split is {30,40} vs {50}, bottleneck 70.
    // Guards against the degenerate all-on-one-station assignment (120).
    let spec = ProblemSpec::new(
        vec![
            Task::new("a", 30.0),
            Task::new("b", 40.0),
            Task::new("c", 50.0),
        ],
        2,
    );
    let plan = Optimizer::default().solve(&spec, &params()).unwrap();
    assert!((plan.cycle_time - 70.0).abs() < 1e-6);
    assert!(plan.is_proven_optimal());
    assert_plan_invariants(&spec, &plan);
}

#[test]
fn precedence_orders_stations() {
    let spec = ProblemSpec::new(
        vec![
            Task::new("first", 10.0),
            Task::new("second", 10.0).with_predecessors(["first"]),
        ],
        2,
    );
    let plan = Optimizer::default().solve(&spec, &params()).unwrap();
    let first = plan.station_of("first").unwrap();
    let second = plan.station_of("second").unwrap();
    assert!(first <= second);
    assert_plan_invariants(&spec, &plan);
}

#[test]
fn too_tight_cycle_cap_is_infeasible() {
    let spec = ProblemSpec::new(vec![Task::new("big", 50.0)], 1).with_max_cycle_time(5.0);
    let err = Optimizer::default().solve(&spec, &params()).unwrap_err();
    assert!(matches!(err, BalanceError::Infeasible));
}

#[test]
fn incompatible_pair_on_a_single_station_is_infeasible() {
    let spec = ProblemSpec::new(vec![Task::new("a", 10.0), Task::new("b", 10.0)], 1)
        .with_ergonomics(ErgonomicConstraints {
            max_penalty_per_station: None,
            incompatible_pairs: vec![("a".into(), "b".into())],
        });
    let err = Optimizer::default().solve(&spec, &params()).unwrap_err();
    assert!(matches!(err, BalanceError::Infeasible));
}

#[test]
fn incompatible_pair_separates_onto_distinct_stations() {
    let spec = ProblemSpec::new(vec![Task::new("a", 10.0), Task::new("b", 10.0)], 2)
        .with_ergonomics(ErgonomicConstraints {
            max_penalty_per_station: None,
            incompatible_pairs: vec![("a".into(), "b".into())],
        });
    let plan = Optimizer::default().solve(&spec, &params()).unwrap();
    assert_ne!(plan.station_of("a"), plan.station_of("b"));
    assert_plan_invariants(&spec, &plan);
}

#[test]
fn per_station_penalty_cap_spreads_strain() {
    let spec = ProblemSpec::new(
        vec![
            Task::new("heavy1", 10.0).with_penalty(4.0),
            Task::new("heavy2", 10.0).with_penalty(4.0),
            Task::new("light", 10.0).with_penalty(1.0),
        ],
        2,
    )
    .with_ergonomics(ErgonomicConstraints {
        max_penalty_per_station: Some(5.0),
        incompatible_pairs: vec![],
    });
    let plan = Optimizer::default().solve(&spec, &params()).unwrap();
    for (station, tasks) in &plan.assignments {
        let penalty: f64 = tasks.iter().map(|t| t.penalty).sum();
        assert!(penalty <= 5.0 + 1e-6, "station {station} over the cap");
    }
    assert_plan_invariants(&spec, &plan);
}

#[test]
fn chain_of_precedence_respects_cap() {
    let spec = ProblemSpec::new(
        vec![
            Task::new("t1", 20.0),
            Task::new("t2", 25.0).with_predecessors(["t1"]),
            Task::new("t3", 15.0).with_predecessors(["t1"]),
            Task::new("t4", 30.0).with_predecessors(["t2", "t3"]),
        ],
        3,
    )
    .with_max_cycle_time(45.0);
    let plan = Optimizer::default().solve(&spec, &params()).unwrap();
    assert_plan_invariants(&spec, &plan);
}

#[test]
fn multi_objective_plan_is_balanced() {
    let spec = ProblemSpec::new(
        vec![
            Task::new("a", 25.0).with_penalty(2.0),
            Task::new("b", 25.0).with_penalty(2.0),
            Task::new("c", 25.0).with_penalty(2.0),
            Task::new("d", 25.0).with_penalty(2.0),
        ],
        2,
    )
    .with_objective_weights(ObjectiveWeights::default());
    let plan = Optimizer::default().solve(&spec, &params()).unwrap();
    // Four identical tasks on two stations balance perfectly
    assert!((plan.station_loads[&1] - 50.0).abs() < 1e-6);
    assert!((plan.station_loads[&2] - 50.0).abs() < 1e-6);
    assert!((plan.efficiency_percent - 100.0).abs() < 1e-6);
    assert_plan_invariants(&spec, &plan);
}

#[test]
fn tolerance_limited_solve_does_not_claim_a_proven_optimum() {
    let spec = ProblemSpec::new(
        vec![
            Task::new("a", 30.0),
            Task::new("b", 40.0),
            Task::new("c", 50.0),
        ],
        2,
    );
    let optimizer = Optimizer::default();

    // A 2% tolerance means the backend only certifies the incumbent to
    // within 2%; the plan carries that bound instead of a zero gap
    let relaxed = optimizer
        .solve(&spec, &SolveParams::new(60.0, 0.02))
        .unwrap();
    assert_eq!(relaxed.optimality_gap, Some(0.02));
    assert!(!relaxed.is_proven_optimal());

    // An exact solve still reports a proven optimum
    let exact = optimizer.solve(&spec, &params()).unwrap();
    assert_eq!(exact.optimality_gap, Some(0.0));
    assert!(exact.is_proven_optimal());
}

#[test]
fn resolving_the_same_spec_yields_the_same_objective() {
    let spec = ProblemSpec::new(
        vec![
            Task::new("a", 12.0),
            Task::new("b", 7.0).with_predecessors(["a"]),
            Task::new("c", 19.0),
            Task::new("d", 23.0).with_predecessors(["b"]),
            Task::new("e", 9.0),
        ],
        3,
    );
    let optimizer = Optimizer::default();
    let first = optimizer.solve(&spec, &params()).unwrap();
    let second = optimizer.solve(&spec, &params()).unwrap();
    assert!((first.objective_value - second.objective_value).abs() < 1e-6);
    assert!((first.cycle_time - second.cycle_time).abs() < 1e-6);
}

#[test]
fn plan_serializes_to_the_external_schema() {
    let spec = ProblemSpec::new(vec![Task::new("a", 30.0), Task::new("b", 40.0)], 2);
    let plan = Optimizer::default().solve(&spec, &params()).unwrap();
    let json = plan.to_json().unwrap();
    for key in [
        "\"assignments\"",
        "\"stationLoads\"",
        "\"cycleTime\"",
        "\"objectiveValue\"",
        "\"optimalityGap\"",
        "\"solveDurationSeconds\"",
        "\"stationCount\"",
        "\"efficiencyPercent\"",
    ] {
        assert!(json.contains(key), "missing {key} in {json}");
    }
}

#[tokio::test]
async fn async_solve_runs_off_the_caller_thread() {
    let spec = ProblemSpec::new(
        vec![
            Task::new("a", 30.0),
            Task::new("b", 40.0),
            Task::new("c", 50.0),
        ],
        2,
    );
    let plan = Optimizer::default()
        .solve_async(spec, params())
        .await
        .unwrap();
    assert!((plan.cycle_time - 70.0).abs() < 1e-6);
}

#[tokio::test]
async fn independent_optimizers_solve_in_parallel() {
    let make_spec = |shift: f64| {
        ProblemSpec::new(
            vec![Task::new("a", 10.0 + shift), Task::new("b", 20.0 + shift)],
            2,
        )
    };
    let left_opt = Optimizer::default();
    let right_opt = Optimizer::default();
    let left = left_opt.solve_async(make_spec(0.0), params());
    let right = right_opt.solve_async(make_spec(5.0), params());
    let (left, right) = tokio::join!(left, right);
    assert!((left.unwrap().cycle_time - 20.0).abs() < 1e-6);
    assert!((right.unwrap().cycle_time - 25.0).abs() < 1e-6);
}
