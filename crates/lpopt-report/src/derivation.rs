//! 角點法逐步推導

use lpopt_core::{
    CornerLabel, ExclusionReason, LpError, Point, ProductionProblem, SolveResult, VertexRule,
};
use serde::{Deserialize, Serialize};

use crate::format::{format_currency, format_quantity};

/// 推導的一個步驟
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivationStep {
    pub title: String,
    pub lines: Vec<String>,
}

/// 完整推導
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Derivation {
    pub steps: Vec<DerivationStep>,
}

/// 推導用的單一角點（可行或已排除）
struct Vertex<'a> {
    label: CornerLabel,
    point: &'a Point,
    rule: VertexRule,
    excluded: Option<ExclusionReason>,
}

impl Derivation {
    /// 由角點法結果產生三個步驟：找出角點、計算目標值、選出最佳解
    pub fn build(
        problem: &ProductionProblem,
        result: &SolveResult,
        currency: &str,
    ) -> lpopt_core::Result<Self> {
        let [first, second] = problem.products.as_slice() else {
            return Err(LpError::DimensionMismatch(format!(
                "推導只支援 2 個產品，實際為 {}",
                problem.dimension()
            )));
        };
        let (Some(feasible), Some(excluded)) = (result.feasible_points(), result.excluded_points())
        else {
            return Err(LpError::InvalidParameters(
                "推導需要角點法的求解結果".to_string(),
            ));
        };

        let mut vertices: Vec<Vertex> = feasible
            .iter()
            .map(|c| Vertex {
                label: c.label,
                point: &c.point,
                rule: c.rule,
                excluded: None,
            })
            .chain(excluded.iter().map(|e| Vertex {
                label: e.label,
                point: &e.point,
                rule: e.rule,
                excluded: Some(e.reason),
            }))
            .collect();
        vertices.sort_by_key(|v| v.label);

        let formulas = FormulaContext {
            t1: first.time,
            t2: second.time,
            max1: first.max_demand,
            max2: second.max_demand,
            total: problem.total_time(),
        };

        let corner_lines = vertices
            .iter()
            .map(|v| {
                let mut line = formulas.describe(v.label, v.point, v.rule);
                if let Some(reason) = v.excluded {
                    line.push_str(&format!("（不可行，已排除：{}）", describe_exclusion(&reason)));
                }
                line
            })
            .collect();

        let objective_lines = feasible
            .iter()
            .map(|c| {
                format!(
                    "Z_{} = {} × {} + {} × {} = {}",
                    c.label,
                    first.profit,
                    format_quantity(c.point.x1()),
                    second.profit,
                    format_quantity(c.point.x2()),
                    format_currency(c.objective_value, currency)
                )
            })
            .collect();

        let label = result
            .optimal_label()
            .map_or_else(|| "?".to_string(), |l| l.to_string());
        let optimum_lines = vec![
            format!(
                "最佳角點 {} ({}, {})",
                label,
                format_quantity(result.optimal_point.x1()),
                format_quantity(result.optimal_point.x2())
            ),
            format!(
                "可行角點中目標值最大：Z = {}",
                format_currency(result.optimal_value, currency)
            ),
        ];

        Ok(Self {
            steps: vec![
                DerivationStep {
                    title: "步驟 1：找出角點".to_string(),
                    lines: corner_lines,
                },
                DerivationStep {
                    title: "步驟 2：計算目標值".to_string(),
                    lines: objective_lines,
                },
                DerivationStep {
                    title: "步驟 3：選出最佳解".to_string(),
                    lines: optimum_lines,
                },
            ],
        })
    }

    /// 以純文字輸出
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for step in &self.steps {
            out.push_str(&step.title);
            out.push('\n');
            for line in &step.lines {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

struct FormulaContext {
    t1: f64,
    t2: f64,
    max1: f64,
    max2: f64,
    total: f64,
}

impl FormulaContext {
    fn describe(&self, label: CornerLabel, point: &Point, rule: VertexRule) -> String {
        let x1 = format_quantity(point.x1());
        let x2 = format_quantity(point.x2());
        let q = format_quantity;

        match (label, rule) {
            (_, VertexRule::Origin) => format!("{}: x₁ = 0, x₂ = 0", label),
            (_, VertexRule::Bound) => format!("{}: x₁ = {}, x₂ = {}", label, x1, x2),
            (CornerLabel::C, VertexRule::LineIntersection { solved }) => format!(
                "C: x₁ = {}, x₂ = min(({} − {} × {}) / {}, {}) = min({}, {}) = {}",
                x1,
                self.total,
                self.t1,
                self.max1,
                self.t2,
                self.max2,
                q(solved),
                self.max2,
                x2
            ),
            (CornerLabel::D, VertexRule::LineIntersection { solved }) => format!(
                "D: x₂ = {}, x₁ = min(({} − {} × {}) / {}, {}) = min({}, {}) = {}",
                x2,
                self.total,
                self.t2,
                self.max2,
                self.t1,
                self.max1,
                q(solved),
                self.max1,
                x1
            ),
            (CornerLabel::E, VertexRule::LineIntersection { solved }) => format!(
                "E: x₁ = 0, x₂ = min({} / {}, {}) = min({}, {}) = {}",
                self.total,
                self.t2,
                self.max2,
                q(solved),
                self.max2,
                x2
            ),
            (CornerLabel::F, VertexRule::LineIntersection { solved }) => format!(
                "F: x₂ = 0, x₁ = min({} / {}, {}) = min({}, {}) = {}",
                self.total,
                self.t1,
                self.max1,
                q(solved),
                self.max1,
                x1
            ),
            (CornerLabel::C | CornerLabel::E, VertexRule::AxisSubstitution) => format!(
                "{}: t₂ = 0，工時線不限制 x₂，取 x₂ = max₂ = {} → ({}, {})",
                label, self.max2, x1, x2
            ),
            (_, VertexRule::AxisSubstitution) => format!(
                "{}: t₁ = 0，工時線不限制 x₁，取 x₁ = max₁ = {} → ({}, {})",
                label, self.max1, x1, x2
            ),
            (_, VertexRule::LineIntersection { .. }) => {
                format!("{}: ({}, {})", label, x1, x2)
            }
        }
    }
}

fn describe_exclusion(reason: &ExclusionReason) -> String {
    match *reason {
        ExclusionReason::ExceedsTotalTime {
            required,
            available,
        } => format!(
            "需要 {} 小時 > 可用 {} 小時",
            format_quantity(required),
            format_quantity(available)
        ),
        ExclusionReason::ExceedsBound {
            variable,
            value,
            bound,
        } => format!(
            "x{} = {} 超過上界 {}",
            variable + 1,
            format_quantity(value),
            format_quantity(bound)
        ),
        ExclusionReason::Negative { variable, value } => {
            format!("x{} = {} 為負", variable + 1, format_quantity(value))
        }
    }
}
