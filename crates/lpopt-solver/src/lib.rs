//! # LP Optimizer Solver
//!
//! 求解器模組（角點法、一般 LP、敏感度分析）

pub mod corner;
pub mod general;
pub mod routine;
pub mod sensitivity;

// Re-export 主要類型
pub use corner::CornerPointSolver;
pub use general::{GeneralLpSolver, LinearProgram};
pub use routine::{LinearProgramRoutine, MicrolpRoutine, RoutineOutcome, StandardForm};
pub use sensitivity::{
    CoefficientRange, ConstraintKind, ConstraintStatus, SensitivityAnalyzer, SensitivityReport,
};

use lpopt_core::{ProductionProblem, SolveResult, SolverConfig};

/// 角點法與一般求解器的比對結果
#[derive(Debug, Clone)]
pub struct CrossCheck {
    pub corner: SolveResult,
    pub general: SolveResult,

    /// 兩者最佳值差距是否在容差內
    pub agrees: bool,
}

impl CrossCheck {
    /// 兩者最佳值的絕對差
    pub fn difference(&self) -> f64 {
        (self.corner.optimal_value - self.general.optimal_value).abs()
    }
}

/// 以兩種求解器解同一個雙產品問題並比對最佳值
///
/// 容差為相對值：`cross_check_tolerance × max(1, |Z|)`
pub fn cross_check(
    problem: &ProductionProblem,
    config: &SolverConfig,
) -> lpopt_core::Result<CrossCheck> {
    let corner = CornerPointSolver::new(config.clone()).solve(problem)?;
    let general = GeneralLpSolver::new(config.clone()).solve_products(problem)?;

    let scale = corner.optimal_value.abs().max(1.0);
    let agrees =
        (corner.optimal_value - general.optimal_value).abs() <= config.cross_check_tolerance * scale;

    if !agrees {
        tracing::warn!(
            "角點法 ({}) 與一般求解器 ({}) 最佳值不一致",
            corner.optimal_value,
            general.optimal_value
        );
    }

    Ok(CrossCheck {
        corner,
        general,
        agrees,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpopt_core::ProductParameters;

    #[test]
    fn test_cross_check_agrees() {
        let problem = ProductionProblem::two_products(
            ProductParameters::new(50_000.0, 2.0, 20.0),
            ProductParameters::new(70_000.0, 3.0, 15.0),
            60.0,
        );
        let check = cross_check(&problem, &SolverConfig::default()).unwrap();
        assert!(check.agrees, "difference {}", check.difference());
    }

    #[test]
    fn test_cross_check_rejects_three_products() {
        let problem = ProductionProblem::new(vec![ProductParameters::new(1.0, 1.0, 1.0); 3], 2.0);
        assert!(cross_check(&problem, &SolverConfig::default()).is_err());
    }
}
