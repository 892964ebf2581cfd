//! 一般 LP 求解器
//!
//! 將最大化問題轉為標準形式最小化（目標係數取負），交給外部 LP 程序，
//! 再把目標值反號並整理成 [`SolveResult`]。

use lpopt_core::{
    LpError, Point, ProductionProblem, RoutineStatus, SolveDetails, SolveResult, SolverConfig,
    SolverDiagnostics,
};
use serde::{Deserialize, Serialize};

use crate::routine::{LinearProgramRoutine, MicrolpRoutine, StandardForm};

/// 最大化形式的線性規劃
///
/// maximize c·x，A·x ≤ b，0 ≤ x ≤ upper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearProgram {
    /// 利潤向量 c
    pub profits: Vec<f64>,

    /// 約束矩陣 A（m × n）
    pub constraints: Vec<Vec<f64>>,

    /// 右側值 b
    pub rhs: Vec<f64>,

    /// 逐變數上界（可為 +∞）
    pub upper_bounds: Vec<f64>,
}

impl LinearProgram {
    /// 創建新的線性規劃
    pub fn new(
        profits: Vec<f64>,
        constraints: Vec<Vec<f64>>,
        rhs: Vec<f64>,
        upper_bounds: Vec<f64>,
    ) -> Self {
        Self {
            profits,
            constraints,
            rhs,
            upper_bounds,
        }
    }

    /// 由生產問題建立：一條總工時約束加上需求上界
    pub fn from_problem(problem: &ProductionProblem) -> Self {
        Self::new(
            problem.profits(),
            vec![problem.times()],
            vec![problem.total_time()],
            problem.max_demands(),
        )
    }

    /// 變數數量
    pub fn dimension(&self) -> usize {
        self.profits.len()
    }

    /// 檢查維度與數值
    pub fn validate(&self) -> lpopt_core::Result<()> {
        let n = self.dimension();
        if n == 0 {
            return Err(LpError::DimensionMismatch("沒有任何變數".to_string()));
        }
        if self.upper_bounds.len() != n {
            return Err(LpError::DimensionMismatch(format!(
                "上界數量 {} 與變數數量 {} 不一致",
                self.upper_bounds.len(),
                n
            )));
        }
        if self.constraints.len() != self.rhs.len() {
            return Err(LpError::DimensionMismatch(format!(
                "約束列數 {} 與右側值數量 {} 不一致",
                self.constraints.len(),
                self.rhs.len()
            )));
        }
        if let Some((i, row)) = self
            .constraints
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != n)
        {
            return Err(LpError::DimensionMismatch(format!(
                "第 {} 列約束長度 {} 與變數數量 {} 不一致",
                i + 1,
                row.len(),
                n
            )));
        }

        let finite = self
            .profits
            .iter()
            .chain(self.constraints.iter().flatten())
            .chain(&self.rhs)
            .all(|v| v.is_finite());
        if !finite {
            return Err(LpError::InvalidParameters(
                "目標係數、約束係數與右側值必須為有限數值".to_string(),
            ));
        }

        // 上界允許 +∞，但不可為負或 NaN
        if let Some(bound) = self.upper_bounds.iter().find(|b| !(**b >= 0.0)) {
            return Err(LpError::InvalidParameters(format!(
                "上界必須非負: {}",
                bound
            )));
        }

        Ok(())
    }

    /// 轉為標準形式（最小化 −c·x）
    pub fn to_standard_form(&self) -> StandardForm {
        StandardForm {
            c: self.profits.iter().map(|c| -c).collect(),
            a_ub: self.constraints.clone(),
            b_ub: self.rhs.clone(),
            bounds: self.upper_bounds.iter().map(|&ub| (0.0, ub)).collect(),
        }
    }

    /// 複製並修改第 row 列的右側值
    pub fn with_rhs(&self, row: usize, value: f64) -> Self {
        let mut lp = self.clone();
        if let Some(rhs) = lp.rhs.get_mut(row) {
            *rhs = value;
        }
        lp
    }

    /// 複製並修改第 variable 個變數的上界
    pub fn with_upper_bound(&self, variable: usize, value: f64) -> Self {
        let mut lp = self.clone();
        if let Some(bound) = lp.upper_bounds.get_mut(variable) {
            *bound = value;
        }
        lp
    }

    /// 在容差內檢查點是否滿足所有約束
    pub fn is_feasible(&self, point: &Point, tolerance: f64) -> bool {
        let within_bounds = self
            .upper_bounds
            .iter()
            .enumerate()
            .all(|(i, &ub)| point.get(i) >= -tolerance && point.get(i) <= ub + tolerance);

        within_bounds
            && self
                .constraints
                .iter()
                .zip(&self.rhs)
                .all(|(row, &rhs)| point.dot(row) <= rhs + tolerance)
    }
}

/// 一般 LP 求解器
#[derive(Debug, Clone, Default)]
pub struct GeneralLpSolver<R = MicrolpRoutine> {
    routine: R,
    config: SolverConfig,
}

impl GeneralLpSolver<MicrolpRoutine> {
    /// 使用 microlp 的求解器
    pub fn new(config: SolverConfig) -> Self {
        Self {
            routine: MicrolpRoutine,
            config,
        }
    }
}

impl<R: LinearProgramRoutine> GeneralLpSolver<R> {
    /// 使用自訂 LP 程序
    pub fn with_routine(routine: R, config: SolverConfig) -> Self {
        Self { routine, config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn routine(&self) -> &R {
        &self.routine
    }

    /// 驗證生產問題後求解（1 到 3 個產品）
    pub fn solve_products(&self, problem: &ProductionProblem) -> lpopt_core::Result<SolveResult> {
        problem.validate()?;
        self.solve(&LinearProgram::from_problem(problem))
    }

    /// 求解最大化線性規劃
    pub fn solve(&self, lp: &LinearProgram) -> lpopt_core::Result<SolveResult> {
        lp.validate()?;

        tracing::info!(
            "開始一般 LP 求解：變數 {} 個，約束 {} 條",
            lp.dimension(),
            lp.constraints.len()
        );

        let standard = lp.to_standard_form();
        let outcome = self.routine.minimize(&standard)?;

        match outcome.status {
            RoutineStatus::Infeasible => {
                tracing::warn!("LP 不可行: {}", outcome.message);
                return Err(LpError::Infeasible(outcome.message));
            }
            RoutineStatus::Unbounded => {
                tracing::warn!("LP 目標無界: {}", outcome.message);
                return Err(LpError::Unbounded);
            }
            RoutineStatus::Optimal => {}
        }

        if !outcome.success {
            return Err(LpError::Solver(format!(
                "程序回報最佳狀態但未成功: {}",
                outcome.message
            )));
        }

        if outcome.x.len() != lp.dimension() {
            return Err(LpError::Solver(format!(
                "解向量長度 {} 與變數數量 {} 不一致",
                outcome.x.len(),
                lp.dimension()
            )));
        }

        let optimal_point = Point::new(outcome.x);
        if !lp.is_feasible(&optimal_point, self.config.tolerance) {
            tracing::warn!("求解器回傳的解 {} 超出容差", optimal_point);
            return Err(LpError::Solver(format!(
                "求解器回傳的解 {} 違反約束",
                optimal_point
            )));
        }

        let optimal_value = -outcome.fun;
        tracing::info!(
            "一般 LP 求解完成：x = {}，Z = {}",
            optimal_point,
            optimal_value
        );

        Ok(SolveResult {
            optimal_point,
            optimal_value,
            is_feasible: outcome.success,
            details: SolveDetails::Solver(SolverDiagnostics {
                status: outcome.status,
                message: outcome.message,
                slack: outcome.slack,
                raw_objective: outcome.fun,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routine::RoutineOutcome;
    use lpopt_core::ProductParameters;
    use std::cell::RefCell;

    /// 記錄收到的標準形式並回傳固定結果
    struct RecordingRoutine {
        outcome: RoutineOutcome,
        received: RefCell<Option<StandardForm>>,
    }

    impl RecordingRoutine {
        fn new(outcome: RoutineOutcome) -> Self {
            Self {
                outcome,
                received: RefCell::new(None),
            }
        }
    }

    impl LinearProgramRoutine for RecordingRoutine {
        fn minimize(&self, problem: &StandardForm) -> lpopt_core::Result<RoutineOutcome> {
            *self.received.borrow_mut() = Some(problem.clone());
            Ok(self.outcome.clone())
        }
    }

    fn furniture() -> ProductionProblem {
        ProductionProblem::two_products(
            ProductParameters::new(120_000.0, 3.0, 30.0),
            ProductParameters::new(80_000.0, 2.0, 40.0),
            120.0,
        )
    }

    #[test]
    fn test_furniture_with_microlp() {
        let solver = GeneralLpSolver::new(SolverConfig::default());
        let result = solver.solve_products(&furniture()).unwrap();

        assert!(result.is_feasible);
        assert!((result.optimal_value - 4_800_000.0).abs() < 1e-6);
        assert!(furniture().is_feasible(&result.optimal_point, 1e-9));

        let diagnostics = result.diagnostics().unwrap();
        assert_eq!(diagnostics.status, RoutineStatus::Optimal);
        assert_eq!(diagnostics.slack.len(), 1);
        assert!(diagnostics.slack[0].abs() < 1e-6);
        assert!((diagnostics.raw_objective + 4_800_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_three_products() {
        let problem = ProductionProblem::new(
            vec![
                ProductParameters::new(120_000.0, 3.0, 30.0),
                ProductParameters::new(80_000.0, 2.0, 40.0),
                ProductParameters::new(100_000.0, 1.0, 10.0),
            ],
            120.0,
        );

        let solver = GeneralLpSolver::new(SolverConfig::default());
        let result = solver.solve_products(&problem).unwrap();

        // x₃ 每小時利潤最高，先用滿上界 10，剩餘 110 小時每小時 40000
        assert!((result.optimal_point.get(2) - 10.0).abs() < 1e-9);
        assert!((result.optimal_value - 5_400_000.0).abs() < 1e-6);
        assert_eq!(result.optimal_point.dimension(), 3);
    }

    #[test]
    fn test_objective_is_negated_for_routine() {
        let routine = RecordingRoutine::new(RoutineOutcome::optimal(
            vec![30.0, 15.0],
            -4_800_000.0,
            vec![0.0],
        ));
        let solver = GeneralLpSolver::with_routine(&routine, SolverConfig::default());
        let result = solver.solve_products(&furniture()).unwrap();

        let received = routine.received.borrow().clone().unwrap();
        assert_eq!(received.c, vec![-120_000.0, -80_000.0]);
        assert_eq!(received.a_ub, vec![vec![3.0, 2.0]]);
        assert_eq!(received.b_ub, vec![120.0]);
        assert_eq!(received.bounds, vec![(0.0, 30.0), (0.0, 40.0)]);

        assert_eq!(result.optimal_value, 4_800_000.0);
        assert_eq!(result.optimal_point, Point::xy(30.0, 15.0));
    }

    #[test]
    fn test_input_not_mutated() {
        let lp = LinearProgram::from_problem(&furniture());
        let before = lp.clone();
        let _ = GeneralLpSolver::new(SolverConfig::default()).solve(&lp);
        assert_eq!(lp, before);
    }

    #[test]
    fn test_infeasible_reported() {
        let lp = LinearProgram::new(
            vec![1.0, 1.0],
            vec![vec![1.0, 1.0]],
            vec![-1.0],
            vec![10.0, 10.0],
        );
        let solver = GeneralLpSolver::new(SolverConfig::default());
        assert!(matches!(solver.solve(&lp), Err(LpError::Infeasible(_))));
    }

    #[test]
    fn test_unbounded_reported() {
        let lp = LinearProgram::new(
            vec![1.0, 1.0],
            vec![vec![1.0, -1.0]],
            vec![1.0],
            vec![f64::INFINITY, f64::INFINITY],
        );
        let solver = GeneralLpSolver::new(SolverConfig::default());
        assert!(matches!(solver.solve(&lp), Err(LpError::Unbounded)));
    }

    #[test]
    fn test_routine_failure_statuses() {
        let infeasible = RecordingRoutine::new(RoutineOutcome::failed(
            RoutineStatus::Infeasible,
            "no solution",
        ));
        let solver = GeneralLpSolver::with_routine(&infeasible, SolverConfig::default());
        match solver.solve_products(&furniture()) {
            Err(LpError::Infeasible(message)) => assert_eq!(message, "no solution"),
            other => panic!("expected Infeasible, got {:?}", other),
        }

        let unbounded =
            RecordingRoutine::new(RoutineOutcome::failed(RoutineStatus::Unbounded, "grows"));
        let solver = GeneralLpSolver::with_routine(&unbounded, SolverConfig::default());
        assert!(matches!(
            solver.solve_products(&furniture()),
            Err(LpError::Unbounded)
        ));
    }

    #[test]
    fn test_routine_point_outside_constraints_rejected() {
        // x₁ = 31 超過上界 30
        let routine = RecordingRoutine::new(RoutineOutcome::optimal(
            vec![31.0, 13.5],
            -4_800_000.0,
            vec![0.0],
        ));
        let solver = GeneralLpSolver::with_routine(&routine, SolverConfig::default());
        assert!(matches!(
            solver.solve_products(&furniture()),
            Err(LpError::Solver(_))
        ));
    }

    #[test]
    fn test_row_feasibility_uses_absolute_tolerance() {
        let lp = LinearProgram::from_problem(&furniture());
        assert!(lp.is_feasible(&Point::xy(30.0, 15.0), 1e-9));
        // 超出 2e-8 小時：rhs = 120 時不可因相對容差而放行
        assert!(!lp.is_feasible(&Point::xy(30.0, 15.000_000_01), 1e-9));
    }

    #[test]
    fn test_zero_coefficient_keeps_bound() {
        // x₂ 不耗工時，但仍受上界 40 限制
        let problem = ProductionProblem::two_products(
            ProductParameters::new(120_000.0, 3.0, 30.0),
            ProductParameters::new(80_000.0, 0.0, 40.0),
            60.0,
        );
        let result = GeneralLpSolver::new(SolverConfig::default())
            .solve_products(&problem)
            .unwrap();

        assert!((result.optimal_point.x1() - 20.0).abs() < 1e-9);
        assert!((result.optimal_point.x2() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_dimension_mismatch() {
        let lp = LinearProgram::new(vec![1.0, 1.0], vec![vec![1.0]], vec![1.0], vec![1.0, 1.0]);
        assert!(matches!(lp.validate(), Err(LpError::DimensionMismatch(_))));

        let lp = LinearProgram::new(vec![1.0], vec![], vec![], vec![-1.0]);
        assert!(matches!(lp.validate(), Err(LpError::InvalidParameters(_))));
    }

    #[test]
    fn test_with_rhs_and_bound() {
        let lp = LinearProgram::from_problem(&furniture());
        assert_eq!(lp.with_rhs(0, 121.0).rhs, vec![121.0]);
        assert_eq!(lp.with_upper_bound(1, 41.0).upper_bounds, vec![30.0, 41.0]);
        assert_eq!(lp.rhs, vec![120.0]);
    }
}
