// Solver adapters: concrete implementations of SolverService

pub mod coin_cbc_solver;
pub mod factory;
#[cfg(feature = "highs-solver")]
pub mod highs_solver;

pub use coin_cbc_solver::CoinCbcSolver;
pub use factory::SolverFactory;
#[cfg(feature = "highs-solver")]
pub use highs_solver::HighsSolver;

use crate::domain::SolverConfig;

/// Gap a backend can certify for a model it reports as solved. MIP solvers
/// terminate as soon as the incumbent is within the configured relative
/// tolerance, and neither backend exposes an achieved-gap query, so a
/// nonzero tolerance is reported back as an upper bound on the residual gap
/// rather than claiming a proven optimum.
pub(crate) fn certified_gap(config: &SolverConfig) -> Option<f64> {
    match config.gap_tolerance {
        Some(tolerance) if tolerance > 0.0 => Some(tolerance),
        _ => Some(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certified_gap_is_zero_only_for_exact_solves() {
        let mut config = SolverConfig::default();
        assert_eq!(certified_gap(&config), Some(0.0));

        config.gap_tolerance = Some(0.0);
        assert_eq!(certified_gap(&config), Some(0.0));

        config.gap_tolerance = Some(0.01);
        assert_eq!(certified_gap(&config), Some(0.01));
    }
}
