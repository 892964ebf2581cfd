//! 敏感度分析：影子價格、目標係數範圍、約束是否緊繃

use lpopt_core::{CornerPoint, Point, ProductionProblem, SolveResult, SolverConfig};
use serde::{Deserialize, Serialize};

use crate::general::{GeneralLpSolver, LinearProgram};
use crate::routine::{LinearProgramRoutine, MicrolpRoutine};

/// 約束種類（variable 從 0 起算）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Σ tᵢxᵢ ≤ T
    TotalTime,
    /// xᵢ ≤ maxᵢ
    UpperBound { variable: usize },
    /// xᵢ ≥ 0
    NonNegativity { variable: usize },
}

/// 最佳解下的約束狀態
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstraintStatus {
    pub kind: ConstraintKind,
    pub slack: f64,
    pub binding: bool,
}

/// 目標係數在此範圍內時，目前的最佳角點保持最佳
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientRange {
    pub variable: usize,
    pub current: f64,
    pub lower: f64,
    /// `None` 表示無上限
    pub upper: Option<f64>,
}

impl CoefficientRange {
    pub fn contains(&self, value: f64, tolerance: f64) -> bool {
        value >= self.lower - tolerance && self.upper.map_or(true, |upper| value <= upper + tolerance)
    }
}

/// 敏感度分析結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    /// 總工時的影子價格（每增加 1 小時的最佳值增量）
    pub time_shadow_price: f64,

    /// 各需求上界的影子價格
    pub bound_shadow_prices: Vec<f64>,

    /// 近似值：最佳值 / 總工時（平均每小時利潤，不是對偶值）
    pub average_value_per_hour: f64,

    /// 各利潤係數的最佳性範圍（僅角點模式）
    pub profit_ranges: Vec<CoefficientRange>,

    /// 最佳解下各約束的狀態
    pub constraints: Vec<ConstraintStatus>,
}

impl SensitivityReport {
    /// 緊繃的約束
    pub fn binding_constraints(&self) -> impl Iterator<Item = &ConstraintStatus> {
        self.constraints.iter().filter(|c| c.binding)
    }
}

/// 敏感度分析器
///
/// 影子價格以右側值前向差分 (Z(b+δ) − Z(b)) / δ 重新求解取得；
/// 在最佳基底不變的範圍內即為對偶值
#[derive(Debug, Clone, Default)]
pub struct SensitivityAnalyzer<R = MicrolpRoutine> {
    solver: GeneralLpSolver<R>,
}

impl SensitivityAnalyzer<MicrolpRoutine> {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            solver: GeneralLpSolver::new(config),
        }
    }
}

impl<R: LinearProgramRoutine> SensitivityAnalyzer<R> {
    pub fn with_solver(solver: GeneralLpSolver<R>) -> Self {
        Self { solver }
    }

    /// 對已求得的結果做敏感度分析
    pub fn analyze(
        &self,
        problem: &ProductionProblem,
        result: &SolveResult,
    ) -> lpopt_core::Result<SensitivityReport> {
        problem.validate()?;
        let config = self.solver.config();
        let lp = LinearProgram::from_problem(problem);
        let base = self.solver.solve(&lp)?.optimal_value;

        let time_step = config.perturbation_for(problem.total_time());
        let time_shadow_price =
            self.marginal_value(&lp.with_rhs(0, problem.total_time() + time_step), base, time_step)?;

        let bound_shadow_prices = problem
            .products
            .iter()
            .enumerate()
            .map(|(i, product)| {
                let step = config.perturbation_for(product.max_demand);
                self.marginal_value(
                    &lp.with_upper_bound(i, product.max_demand + step),
                    base,
                    step,
                )
            })
            .collect::<lpopt_core::Result<Vec<_>>>()?;

        let profit_ranges = match result.feasible_points() {
            Some(points) => Self::profit_ranges(problem, points, &result.optimal_point, config.tolerance),
            None => Vec::new(),
        };

        let constraints = Self::constraint_status(problem, &result.optimal_point, config.tolerance);

        tracing::debug!(
            "敏感度分析：工時影子價格 {}，上界影子價格 {:?}",
            time_shadow_price,
            bound_shadow_prices
        );

        Ok(SensitivityReport {
            time_shadow_price,
            bound_shadow_prices,
            average_value_per_hour: Self::average_value_per_hour(result.optimal_value, problem.total_time()),
            profit_ranges,
            constraints,
        })
    }

    fn marginal_value(&self, perturbed: &LinearProgram, base: f64, step: f64) -> lpopt_core::Result<f64> {
        let value = self.solver.solve(perturbed)?.optimal_value;
        Ok((value - base) / step)
    }

    /// 粗略近似：最佳值 / 總工時
    pub fn average_value_per_hour(optimal_value: f64, total_time: f64) -> f64 {
        if total_time > 0.0 {
            optimal_value / total_time
        } else {
            0.0
        }
    }

    /// 各約束在 point 的鬆弛量與是否緊繃
    pub fn constraint_status(
        problem: &ProductionProblem,
        point: &Point,
        tolerance: f64,
    ) -> Vec<ConstraintStatus> {
        let status = |kind, slack: f64, scale: f64| ConstraintStatus {
            kind,
            slack,
            binding: slack.abs() <= tolerance * scale.abs().max(1.0),
        };

        let mut constraints = Vec::with_capacity(1 + 2 * problem.dimension());
        let total_time = problem.total_time();
        constraints.push(status(
            ConstraintKind::TotalTime,
            total_time - problem.time_usage(point),
            total_time,
        ));

        for (variable, product) in problem.products.iter().enumerate() {
            let x = point.get(variable);
            constraints.push(status(
                ConstraintKind::UpperBound { variable },
                product.max_demand - x,
                product.max_demand,
            ));
            constraints.push(status(ConstraintKind::NonNegativity { variable }, x, 0.0));
        }

        constraints
    }

    /// 雙產品角點模式下的利潤係數範圍
    ///
    /// 角點位置與利潤無關，因此對每個其他可行角點 w，
    /// cₖ(vₖ − wₖ) ≥ cⱼ(wⱼ − vⱼ) 即給出 cₖ 的一個上界或下界
    pub fn profit_ranges(
        problem: &ProductionProblem,
        points: &[CornerPoint],
        optimal: &Point,
        tolerance: f64,
    ) -> Vec<CoefficientRange> {
        if problem.dimension() != 2 {
            return Vec::new();
        }
        let profits = problem.profits();

        (0..2)
            .map(|k| {
                let j = 1 - k;
                let mut lower: f64 = 0.0;
                let mut upper: Option<f64> = None;

                for other in points.iter().filter(|c| !c.point.approx_eq(optimal, tolerance)) {
                    let dk = optimal.get(k) - other.point.get(k);
                    let rhs = profits[j] * (other.point.get(j) - optimal.get(j));
                    if dk > tolerance {
                        lower = lower.max(rhs / dk);
                    } else if dk < -tolerance {
                        let bound = rhs / dk;
                        upper = Some(upper.map_or(bound, |u: f64| u.min(bound)));
                    }
                }

                CoefficientRange {
                    variable: k,
                    current: profits[k],
                    lower,
                    upper,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corner::CornerPointSolver;
    use lpopt_core::ProductParameters;

    fn furniture() -> ProductionProblem {
        ProductionProblem::two_products(
            ProductParameters::new(120_000.0, 3.0, 30.0),
            ProductParameters::new(80_000.0, 2.0, 40.0),
            120.0,
        )
    }

    fn second_case() -> ProductionProblem {
        ProductionProblem::two_products(
            ProductParameters::new(50_000.0, 2.0, 20.0),
            ProductParameters::new(70_000.0, 3.0, 15.0),
            60.0,
        )
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-4 * b.abs().max(1.0)
    }

    #[test]
    fn test_furniture_sensitivity() {
        let problem = furniture();
        let result = CornerPointSolver::default().solve(&problem).unwrap();
        let report = SensitivityAnalyzer::new(SolverConfig::default())
            .analyze(&problem, &result)
            .unwrap();

        assert!(close(report.time_shadow_price, 40_000.0));
        assert!(close(report.bound_shadow_prices[0], 0.0));
        assert!(close(report.bound_shadow_prices[1], 0.0));
        assert_eq!(report.average_value_per_hour, 40_000.0);

        let p1 = report.profit_ranges[0];
        assert!(close(p1.lower, 120_000.0));
        assert_eq!(p1.upper, None);

        let p2 = report.profit_ranges[1];
        assert_eq!(p2.lower, 0.0);
        assert!(close(p2.upper.unwrap(), 80_000.0));
        assert!(p2.contains(80_000.0, 1e-6));
    }

    #[test]
    fn test_second_case_duals() {
        let problem = second_case();
        let result = CornerPointSolver::default().solve(&problem).unwrap();
        let report = SensitivityAnalyzer::new(SolverConfig::default())
            .analyze(&problem, &result)
            .unwrap();

        // 工時與 x₁ 上界緊繃
        assert!(close(report.time_shadow_price, 70_000.0 / 3.0));
        assert!(close(report.bound_shadow_prices[0], 50_000.0 - 70_000.0 * 2.0 / 3.0));
        assert!(close(report.bound_shadow_prices[1], 0.0));

        let binding: Vec<_> = report.binding_constraints().map(|c| c.kind).collect();
        assert_eq!(
            binding,
            vec![
                ConstraintKind::TotalTime,
                ConstraintKind::UpperBound { variable: 0 }
            ]
        );
    }

    #[test]
    fn test_constraint_status_at_origin() {
        let problem = furniture();
        let status = SensitivityAnalyzer::<MicrolpRoutine>::constraint_status(
            &problem,
            &Point::xy(0.0, 0.0),
            1e-9,
        );

        assert_eq!(status.len(), 5);
        assert_eq!(status[0].slack, 120.0);
        assert!(!status[0].binding);
        assert!(status
            .iter()
            .filter(|s| matches!(s.kind, ConstraintKind::NonNegativity { .. }))
            .all(|s| s.binding));
    }

    #[test]
    fn test_general_result_has_no_profit_ranges() {
        let problem = furniture();
        let result = GeneralLpSolver::new(SolverConfig::default())
            .solve_products(&problem)
            .unwrap();
        let report = SensitivityAnalyzer::new(SolverConfig::default())
            .analyze(&problem, &result)
            .unwrap();

        assert!(report.profit_ranges.is_empty());
        assert!(close(report.time_shadow_price, 40_000.0));
    }

    #[test]
    fn test_average_value_per_hour() {
        assert_eq!(
            SensitivityAnalyzer::<MicrolpRoutine>::average_value_per_hour(4_800_000.0, 120.0),
            40_000.0
        );
        assert_eq!(
            SensitivityAnalyzer::<MicrolpRoutine>::average_value_per_hour(1.0, 0.0),
            0.0
        );
    }
}
