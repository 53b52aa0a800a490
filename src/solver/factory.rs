use crate::domain::{SolverBackend, SolverService};
use crate::solver::CoinCbcSolver;
#[cfg(feature = "highs-solver")]
use crate::solver::HighsSolver;
use std::sync::Arc;

/// Factory for creating solver instances based on the requested backend
pub struct SolverFactory;

impl SolverFactory {
    pub fn create(backend: SolverBackend) -> Arc<dyn SolverService> {
        match backend {
            SolverBackend::Auto | SolverBackend::CoinCbc => Arc::new(CoinCbcSolver::new()),
            #[cfg(feature = "highs-solver")]
            SolverBackend::Highs => Arc::new(HighsSolver::new()),
            #[cfg(not(feature = "highs-solver"))]
            SolverBackend::Highs => {
                log::warn!(
                    "HiGHS requested but the 'highs-solver' feature is disabled; using CBC"
                );
                Arc::new(CoinCbcSolver::new())
            }
        }
    }

    /// Default backend for the current build.
    pub fn default_solver() -> Arc<dyn SolverService> {
        Self::create(SolverBackend::Auto)
    }
}
