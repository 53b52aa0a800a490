//! Assembly-line balancing through mixed-integer programming.
//!
//! Assigns production tasks, linked by precedence and ergonomic
//! constraints, to a fixed number of ordered work stations so that the
//! bottleneck station's workload (the cycle time), or a normalized
//! weighted combination of cycle time, load imbalance, and ergonomic
//! strain, is minimized.
//!
//! The pipeline is one-directional: a [`ProblemSpec`] is validated and
//! translated into a mixed-integer model, handed to a pluggable
//! [`SolverService`] backend, and the raw solution is interpreted back
//! into an immutable [`AssignmentPlan`] with per-station loads, cycle
//! time, and efficiency statistics.
//!
//! ```no_run
//! use lineopt::{Optimizer, ProblemSpec, SolveParams, Task};
//!
//! let spec = ProblemSpec::new(
//!     vec![
//!         Task::new("cut", 30.0),
//!         Task::new("weld", 40.0).with_predecessors(["cut"]),
//!         Task::new("paint", 50.0).with_predecessors(["weld"]),
//!     ],
//!     2,
//! );
//! let plan = Optimizer::default().solve(&spec, &SolveParams::default())?;
//! println!("cycle time: {}s", plan.cycle_time);
//! # Ok::<(), lineopt::BalanceError>(())
//! ```

// Solver-gateway data model and contract
pub mod domain;

// Line-balancing domain: specification, validation, plan
pub mod line;

// Model builder and solution extractor
pub mod model;

// Facade orchestrating build → solve → extract
pub mod optimizer;

// Solver adapters: concrete implementations of SolverService
pub mod solver;

// Re-export commonly used types
pub use domain::{
    Constraint, ConstraintType, ObjectiveFunction, OptimizationProblem, OptimizationType,
    Solution, SolutionStatus, SolverBackend, SolverConfig, SolverError, SolverService, Variable,
    VariableKind,
};
pub use line::{
    AssignedTask, AssignmentPlan, ErgonomicConstraints, ObjectiveWeights, ProblemSpec, SpecError,
    Task,
};
pub use model::{BuiltModel, ModelBuilder, SolutionExtractor, VariableLayout};
pub use optimizer::{BalanceError, Optimizer, SolveParams};
pub use solver::{CoinCbcSolver, SolverFactory};
#[cfg(feature = "highs-solver")]
pub use solver::HighsSolver;
