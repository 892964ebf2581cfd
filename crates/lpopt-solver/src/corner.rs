//! 角點法求解器（雙產品、單一工時約束）
//!
//! 可行域由 x₁ ≥ 0、x₂ ≥ 0、x₁ ≤ max₁、x₂ ≤ max₂ 與
//! t₁x₁ + t₂x₂ ≤ T 圍成，最多五個頂點。線性目標的最佳值必在頂點上，
//! 因此依固定順序列舉候選頂點、過濾不可行者後取目標值最大者即可。

use lpopt_core::{
    CornerLabel, CornerPoint, ExcludedCorner, ExclusionReason, LpError, Point, ProductionProblem,
    SolveDetails, SolveResult, SolverConfig, VertexRule,
};
use rayon::prelude::*;

/// 工時係數的退化情形
///
/// 係數為 0 時工時線不再限制該變數，對應的交點公式改取上界值
#[derive(Debug, Clone, Copy, PartialEq)]
enum TimeCoefficients {
    /// t₁ ≠ 0 且 t₂ ≠ 0
    Regular { t1: f64, t2: f64 },
    /// t₂ = 0
    FirstOnly { t1: f64 },
    /// t₁ = 0
    SecondOnly { t2: f64 },
    /// t₁ = t₂ = 0
    Unconstrained,
}

impl TimeCoefficients {
    fn classify(t1: f64, t2: f64) -> Self {
        match (t1 != 0.0, t2 != 0.0) {
            (true, true) => TimeCoefficients::Regular { t1, t2 },
            (true, false) => TimeCoefficients::FirstOnly { t1 },
            (false, true) => TimeCoefficients::SecondOnly { t2 },
            (false, false) => TimeCoefficients::Unconstrained,
        }
    }
}

/// 候選頂點
#[derive(Debug, Clone, PartialEq)]
struct Candidate {
    label: CornerLabel,
    point: Point,
    rule: VertexRule,
}

/// 雙產品問題的數值視圖
#[derive(Debug, Clone, Copy)]
struct TwoProduct {
    profits: (f64, f64),
    times: (f64, f64),
    max: (f64, f64),
    total_time: f64,
}

impl TwoProduct {
    fn from_problem(problem: &ProductionProblem) -> lpopt_core::Result<Self> {
        match problem.products.as_slice() {
            [first, second] => Ok(Self {
                profits: (first.profit, second.profit),
                times: (first.time, second.time),
                max: (first.max_demand, second.max_demand),
                total_time: problem.total_time(),
            }),
            other => Err(LpError::DimensionMismatch(format!(
                "角點法只支援 2 個產品，實際為 {}",
                other.len()
            ))),
        }
    }

    fn objective(&self, point: &Point) -> f64 {
        self.profits.0 * point.x1() + self.profits.1 * point.x2()
    }

    fn time_usage(&self, point: &Point) -> f64 {
        self.times.0 * point.x1() + self.times.1 * point.x2()
    }

    /// 在容差內檢查約束，回傳第一個被違反的約束
    fn violation(&self, point: &Point, tolerance: f64) -> Option<ExclusionReason> {
        let bounds = [self.max.0, self.max.1];
        for (variable, &bound) in bounds.iter().enumerate() {
            let value = point.get(variable);
            if !(value >= -tolerance) {
                return Some(ExclusionReason::Negative { variable, value });
            }
            if !(value <= bound + tolerance) {
                return Some(ExclusionReason::ExceedsBound {
                    variable,
                    value,
                    bound,
                });
            }
        }

        let required = self.time_usage(point);
        if !(required <= self.total_time + tolerance) {
            return Some(ExclusionReason::ExceedsTotalTime {
                required,
                available: self.total_time,
            });
        }

        None
    }
}

/// 由工時線解出一個座標並以上界截斷
fn line_coordinate(numerator: f64, divisor: f64, cap: f64) -> (f64, VertexRule) {
    let solved = numerator / divisor;
    (solved.min(cap), VertexRule::LineIntersection { solved })
}

/// 角點法求解器
#[derive(Debug, Clone, Default)]
pub struct CornerPointSolver {
    config: SolverConfig,
}

impl CornerPointSolver {
    /// 創建新的求解器
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// 驗證參數後求解
    pub fn solve(&self, problem: &ProductionProblem) -> lpopt_core::Result<SolveResult> {
        problem.validate()?;
        self.evaluate(problem)
    }

    /// 不做參數驗證直接列舉角點
    ///
    /// 仍檢查產品數必須為 2；可行集合為空時回傳 `Infeasible`
    pub fn evaluate(&self, problem: &ProductionProblem) -> lpopt_core::Result<SolveResult> {
        let view = TwoProduct::from_problem(problem)?;
        let tolerance = self.config.tolerance;

        tracing::info!(
            "開始角點法求解：利潤 {:?}，工時 {:?}，上界 {:?}，總工時 {}",
            view.profits,
            view.times,
            view.max,
            view.total_time
        );

        // Step 1: 列舉候選頂點
        let candidates = Self::enumerate_candidates(&view, tolerance);
        tracing::debug!("候選頂點數量: {}", candidates.len());

        // Step 2: 可行性過濾
        let mut retained = Vec::with_capacity(candidates.len());
        let mut excluded_points = Vec::new();
        for candidate in candidates {
            match view.violation(&candidate.point, tolerance) {
                None => retained.push(candidate),
                Some(reason) => {
                    tracing::warn!(
                        "角點 {} {} 不可行，已排除: {:?}",
                        candidate.label,
                        candidate.point,
                        reason
                    );
                    excluded_points.push(ExcludedCorner {
                        label: candidate.label,
                        point: candidate.point,
                        rule: candidate.rule,
                        reason,
                    });
                }
            }
        }

        if retained.is_empty() {
            tracing::warn!("沒有任何角點通過可行性過濾");
            return Err(LpError::Infeasible(
                "沒有任何候選角點滿足所有約束".to_string(),
            ));
        }

        // Step 3: 計算目標值
        let values = self.objective_values(&view, &retained);
        let feasible_points: Vec<CornerPoint> = retained
            .into_iter()
            .zip(values)
            .map(|(candidate, objective_value)| {
                tracing::debug!(
                    "Z_{} = {} at {}",
                    candidate.label,
                    objective_value,
                    candidate.point
                );
                CornerPoint {
                    label: candidate.label,
                    point: candidate.point,
                    objective_value,
                    rule: candidate.rule,
                }
            })
            .collect();

        // Step 4: 選出最佳頂點（平手取列舉順序中較前者）
        let best = Self::select_optimum(&feasible_points, tolerance);
        let optimal = &feasible_points[best];

        tracing::info!(
            "角點法求解完成：最佳角點 {} {}，Z = {}",
            optimal.label,
            optimal.point,
            optimal.objective_value
        );

        Ok(SolveResult {
            optimal_point: optimal.point.clone(),
            optimal_value: optimal.objective_value,
            is_feasible: true,
            details: SolveDetails::CornerPoints {
                feasible_points,
                excluded_points,
            },
        })
    }

    /// 依固定順序 A..E（必要時 F）列舉候選頂點
    fn enumerate_candidates(view: &TwoProduct, tolerance: f64) -> Vec<Candidate> {
        let (max1, max2) = view.max;
        let total = view.total_time;
        let coefficients = TimeCoefficients::classify(view.times.0, view.times.1);

        let mut candidates = Vec::with_capacity(6);

        candidates.push(Candidate {
            label: CornerLabel::A,
            point: Point::xy(0.0, 0.0),
            rule: VertexRule::Origin,
        });

        candidates.push(Candidate {
            label: CornerLabel::B,
            point: Point::xy(max1, 0.0),
            rule: VertexRule::Bound,
        });

        // C: x₁ = max₁ 時工時線上的 x₂
        let (c_x2, c_rule) = match coefficients {
            TimeCoefficients::Regular { t1, t2 } => line_coordinate(total - t1 * max1, t2, max2),
            TimeCoefficients::SecondOnly { t2 } => line_coordinate(total, t2, max2),
            TimeCoefficients::FirstOnly { .. } | TimeCoefficients::Unconstrained => {
                (max2, VertexRule::AxisSubstitution)
            }
        };
        candidates.push(Candidate {
            label: CornerLabel::C,
            point: Point::xy(max1, c_x2),
            rule: c_rule,
        });

        // D: x₂ = max₂ 時工時線上的 x₁
        let (d_x1, d_rule) = match coefficients {
            TimeCoefficients::Regular { t1, t2 } => line_coordinate(total - t2 * max2, t1, max1),
            TimeCoefficients::FirstOnly { t1 } => line_coordinate(total, t1, max1),
            TimeCoefficients::SecondOnly { .. } | TimeCoefficients::Unconstrained => {
                (max1, VertexRule::AxisSubstitution)
            }
        };
        candidates.push(Candidate {
            label: CornerLabel::D,
            point: Point::xy(d_x1, max2),
            rule: d_rule,
        });

        // E: x₂ 軸截距
        let (e_x2, e_rule) = match coefficients {
            TimeCoefficients::Regular { t2, .. } | TimeCoefficients::SecondOnly { t2 } => {
                line_coordinate(total, t2, max2)
            }
            TimeCoefficients::FirstOnly { .. } | TimeCoefficients::Unconstrained => {
                (max2, VertexRule::AxisSubstitution)
            }
        };
        candidates.push(Candidate {
            label: CornerLabel::E,
            point: Point::xy(0.0, e_x2),
            rule: e_rule,
        });

        // F: B 超出工時時，可行域在 x₁ 軸上的頂點落在工時線截距
        if view.times.0 * max1 > total + tolerance {
            if let TimeCoefficients::Regular { t1, .. } | TimeCoefficients::FirstOnly { t1 } =
                coefficients
            {
                let (f_x1, f_rule) = line_coordinate(total, t1, max1);
                candidates.push(Candidate {
                    label: CornerLabel::F,
                    point: Point::xy(f_x1, 0.0),
                    rule: f_rule,
                });
            }
        }

        candidates
    }

    /// 計算每個保留角點的目標值，順序與輸入一致
    fn objective_values(&self, view: &TwoProduct, retained: &[Candidate]) -> Vec<f64> {
        if self.config.parallel_evaluation {
            retained
                .par_iter()
                .map(|candidate| view.objective(&candidate.point))
                .collect()
        } else {
            retained
                .iter()
                .map(|candidate| view.objective(&candidate.point))
                .collect()
        }
    }

    /// 目標值最大者的索引；差距在相對容差內視為平手，保留較前者
    fn select_optimum(points: &[CornerPoint], tolerance: f64) -> usize {
        let mut best = 0;
        for (index, corner) in points.iter().enumerate().skip(1) {
            let best_value = points[best].objective_value;
            if corner.objective_value > best_value + tolerance * best_value.abs() {
                best = index;
            }
        }
        best
    }
}
