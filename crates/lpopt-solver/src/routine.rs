//! 外部線性規劃程序介面
//!
//! 求解器只依賴 [`LinearProgramRoutine`]：輸入標準形式（最小化、≤ 約束、
//! 逐變數上下界），輸出解向量、目標值、成功旗標與鬆弛量。
//! 預設實作包裝 `microlp` 的單純形法。

use lpopt_core::{LpError, RoutineStatus};
use microlp::{ComparisonOp, OptimizationDirection, Problem, Variable};
use serde::{Deserialize, Serialize};

/// 標準形式 LP：minimize c·x，A_ub·x ≤ b_ub，lo ≤ x ≤ hi
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardForm {
    /// 最小化目標係數
    pub c: Vec<f64>,

    /// 不等式約束矩陣
    pub a_ub: Vec<Vec<f64>>,

    /// 不等式右側值
    pub b_ub: Vec<f64>,

    /// 逐變數上下界
    pub bounds: Vec<(f64, f64)>,
}

impl StandardForm {
    /// 每條約束的鬆弛量 b − A·x
    pub fn slack(&self, x: &[f64]) -> Vec<f64> {
        self.a_ub
            .iter()
            .zip(&self.b_ub)
            .map(|(row, rhs)| rhs - row.iter().zip(x).map(|(a, v)| a * v).sum::<f64>())
            .collect()
    }
}

/// 外部程序的原始輸出
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineOutcome {
    /// 解向量（失敗時為空）
    pub x: Vec<f64>,

    /// 最小化目標值
    pub fun: f64,

    /// 是否成功找到最佳解
    pub success: bool,

    pub status: RoutineStatus,

    pub message: String,

    /// 每條約束的鬆弛量
    pub slack: Vec<f64>,
}

impl RoutineOutcome {
    /// 找到最佳解
    pub fn optimal(x: Vec<f64>, fun: f64, slack: Vec<f64>) -> Self {
        Self {
            x,
            fun,
            success: true,
            status: RoutineStatus::Optimal,
            message: "找到最佳解".to_string(),
            slack,
        }
    }

    /// 求解失敗（不可行或無界）
    pub fn failed(status: RoutineStatus, message: impl Into<String>) -> Self {
        Self {
            x: Vec::new(),
            fun: f64::NAN,
            success: false,
            status,
            message: message.into(),
            slack: Vec::new(),
        }
    }
}

/// 外部 LP 程序能力
pub trait LinearProgramRoutine {
    /// 求解最小化問題
    ///
    /// 不可行/無界以 `RoutineOutcome` 的狀態回報；只有程序本身出錯時回傳 `Err`
    fn minimize(&self, problem: &StandardForm) -> lpopt_core::Result<RoutineOutcome>;
}

impl<R: LinearProgramRoutine + ?Sized> LinearProgramRoutine for &R {
    fn minimize(&self, problem: &StandardForm) -> lpopt_core::Result<RoutineOutcome> {
        (**self).minimize(problem)
    }
}

/// 以 microlp 實作的 LP 程序
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpRoutine;

impl LinearProgramRoutine for MicrolpRoutine {
    fn minimize(&self, lp: &StandardForm) -> lpopt_core::Result<RoutineOutcome> {
        let mut problem = Problem::new(OptimizationDirection::Minimize);

        let vars: Vec<Variable> = lp
            .c
            .iter()
            .zip(&lp.bounds)
            .map(|(&coeff, &bounds)| problem.add_var(coeff, bounds))
            .collect();

        for (row, &rhs) in lp.a_ub.iter().zip(&lp.b_ub) {
            // 係數為 0 的變數不進入約束，只保留其上下界
            let terms: Vec<(Variable, f64)> = vars
                .iter()
                .zip(row)
                .filter(|(_, &coeff)| coeff != 0.0)
                .map(|(&var, &coeff)| (var, coeff))
                .collect();

            if terms.is_empty() {
                if rhs < 0.0 {
                    tracing::debug!("空約束 0 ≤ {} 不成立", rhs);
                    return Ok(RoutineOutcome::failed(
                        RoutineStatus::Infeasible,
                        format!("約束 0 ≤ {} 不成立", rhs),
                    ));
                }
                continue;
            }

            problem.add_constraint(terms, ComparisonOp::Le, rhs);
        }

        tracing::debug!("microlp 問題: {:?}", problem);

        match problem.solve() {
            Ok(solution) => {
                let x: Vec<f64> = vars.iter().map(|&var| *solution.var_value(var)).collect();
                let slack = lp.slack(&x);
                Ok(RoutineOutcome::optimal(x, solution.objective(), slack))
            }
            Err(microlp::Error::Infeasible) => Ok(RoutineOutcome::failed(
                RoutineStatus::Infeasible,
                "problem is infeasible",
            )),
            Err(microlp::Error::Unbounded) => Ok(RoutineOutcome::failed(
                RoutineStatus::Unbounded,
                "problem is unbounded",
            )),
            Err(err) => Err(LpError::Solver(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_microlp_minimize() {
        // minimize −(x + 2y)，x + y ≤ 4，0 ≤ y ≤ 3
        let lp = StandardForm {
            c: vec![-1.0, -2.0],
            a_ub: vec![vec![1.0, 1.0]],
            b_ub: vec![4.0],
            bounds: vec![(0.0, f64::INFINITY), (0.0, 3.0)],
        };

        let outcome = MicrolpRoutine.minimize(&lp).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.status, RoutineStatus::Optimal);
        assert!((outcome.fun + 7.0).abs() < 1e-9);
        assert!((outcome.x[0] - 1.0).abs() < 1e-9);
        assert!((outcome.x[1] - 3.0).abs() < 1e-9);
        assert!(outcome.slack[0].abs() < 1e-9);
    }

    #[test]
    fn test_infeasible_row() {
        let lp = StandardForm {
            c: vec![-1.0, -1.0],
            a_ub: vec![vec![1.0, 1.0]],
            b_ub: vec![-1.0],
            bounds: vec![(0.0, 10.0), (0.0, 10.0)],
        };

        let outcome = MicrolpRoutine.minimize(&lp).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.status, RoutineStatus::Infeasible);
        assert!(outcome.x.is_empty());
    }

    #[test]
    fn test_empty_row_with_negative_rhs() {
        let lp = StandardForm {
            c: vec![-1.0],
            a_ub: vec![vec![0.0]],
            b_ub: vec![-5.0],
            bounds: vec![(0.0, 10.0)],
        };

        let outcome = MicrolpRoutine.minimize(&lp).unwrap();
        assert_eq!(outcome.status, RoutineStatus::Infeasible);
    }

    #[test]
    fn test_slack() {
        let lp = StandardForm {
            c: vec![0.0, 0.0],
            a_ub: vec![vec![3.0, 2.0], vec![1.0, 0.0]],
            b_ub: vec![120.0, 30.0],
            bounds: vec![(0.0, 30.0), (0.0, 40.0)],
        };
        assert_eq!(lp.slack(&[20.0, 10.0]), vec![40.0, 10.0]);
    }
}
