//! 求解結果模型

use serde::{Deserialize, Serialize};

use crate::Point;

/// 角點標籤（固定列舉順序，同時是平手時的優先順序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CornerLabel {
    /// 原點 (0, 0)
    A,
    /// x₁ 上界與 x₁ 軸 (max₁, 0)
    B,
    /// 工時線 × x₁ = max₁
    C,
    /// 工時線 × x₂ = max₂
    D,
    /// 工時線 × x₁ = 0（x₂ 軸截距）
    E,
    /// 工時線 × x₂ = 0（僅在 B 違反工時約束時產生）
    F,
}

impl CornerLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CornerLabel::A => "A",
            CornerLabel::B => "B",
            CornerLabel::C => "C",
            CornerLabel::D => "D",
            CornerLabel::E => "E",
            CornerLabel::F => "F",
        }
    }
}

impl std::fmt::Display for CornerLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 角點座標的推導方式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum VertexRule {
    /// 原點
    Origin,
    /// 直接取上界值
    Bound,
    /// 由工時線解出一個座標，再以上界截斷
    ///
    /// `solved` 是截斷前的值
    LineIntersection { solved: f64 },
    /// 工時係數為 0，工時線不限制該變數，改取上界值
    AxisSubstitution,
}

/// 被保留的可行角點及其目標值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CornerPoint {
    pub label: CornerLabel,
    pub point: Point,
    pub objective_value: f64,
    pub rule: VertexRule,
}

/// 角點被排除的原因
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// 超出可用總工時
    ExceedsTotalTime { required: f64, available: f64 },
    /// 超出需求上界（variable 從 0 起算）
    ExceedsBound { variable: usize, value: f64, bound: f64 },
    /// 座標為負
    Negative { variable: usize, value: f64 },
}

/// 未通過可行性過濾的候選角點
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedCorner {
    pub label: CornerLabel,
    pub point: Point,
    pub rule: VertexRule,
    pub reason: ExclusionReason,
}

/// 外部 LP 程序回報的狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutineStatus {
    Optimal,
    Infeasible,
    Unbounded,
}

/// 一般求解器的診斷資訊
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverDiagnostics {
    pub status: RoutineStatus,

    /// 求解器訊息
    pub message: String,

    /// 每條 ≤ 約束的鬆弛量 b − A·x
    pub slack: Vec<f64>,

    /// 外部程序回傳的最小化目標值（未反號）
    pub raw_objective: f64,
}

/// 依求解模式而異的細節
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SolveDetails {
    /// 角點法：依列舉順序的可行角點與被排除的角點
    CornerPoints {
        feasible_points: Vec<CornerPoint>,
        excluded_points: Vec<ExcludedCorner>,
    },
    /// 一般 LP 求解器
    Solver(SolverDiagnostics),
}

/// 求解結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// 最佳生產計劃
    pub optimal_point: Point,

    /// 最大目標值
    pub optimal_value: f64,

    /// 是否可行
    pub is_feasible: bool,

    /// 模式細節
    pub details: SolveDetails,
}

impl SolveResult {
    /// 角點模式下的可行角點
    pub fn feasible_points(&self) -> Option<&[CornerPoint]> {
        match &self.details {
            SolveDetails::CornerPoints {
                feasible_points, ..
            } => Some(feasible_points),
            SolveDetails::Solver(_) => None,
        }
    }

    /// 角點模式下被排除的角點
    pub fn excluded_points(&self) -> Option<&[ExcludedCorner]> {
        match &self.details {
            SolveDetails::CornerPoints {
                excluded_points, ..
            } => Some(excluded_points),
            SolveDetails::Solver(_) => None,
        }
    }

    /// 一般模式下的診斷資訊
    pub fn diagnostics(&self) -> Option<&SolverDiagnostics> {
        match &self.details {
            SolveDetails::Solver(diagnostics) => Some(diagnostics),
            SolveDetails::CornerPoints { .. } => None,
        }
    }

    /// 最佳角點的標籤（僅角點模式）
    pub fn optimal_label(&self) -> Option<CornerLabel> {
        self.feasible_points()?
            .iter()
            .find(|c| c.point == self.optimal_point && c.objective_value == self.optimal_value)
            .map(|c| c.label)
    }

    /// 序列化為 JSON（輸出紀錄）
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
