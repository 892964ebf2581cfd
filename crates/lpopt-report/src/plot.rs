//! 可行域繪圖幾何（雙產品）
//!
//! 只產生座標資料，實際繪圖由呼叫端負責

use lpopt_core::{LpError, Point, ProductionProblem, SolveResult};
use serde::{Deserialize, Serialize};

/// 繪圖選項
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotOptions {
    /// 視窗範圍為上界的倍數
    pub extent_factor: f64,
    /// 頂點去重容差
    pub tolerance: f64,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            extent_factor: 1.2,
            tolerance: lpopt_core::DEFAULT_TOLERANCE,
        }
    }
}

/// 帶標籤的線段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotLine {
    pub label: String,
    pub start: (f64, f64),
    pub end: (f64, f64),
}

/// 繪圖資料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotGeometry {
    /// 可行域多邊形頂點（逆時針）
    pub feasible_region: Vec<(f64, f64)>,

    /// 工時約束線（兩個工時係數皆為 0 時沒有）
    pub constraint_line: Option<PlotLine>,

    /// x₁ ≤ max₁ 與 x₂ ≤ max₂
    pub bound_lines: Vec<PlotLine>,

    /// 最佳解標記
    pub optimum: (f64, f64),

    /// 視窗範圍 (x_max, y_max)
    pub extent: (f64, f64),
}

impl PlotGeometry {
    /// 由角點法結果產生繪圖資料
    pub fn build(
        problem: &ProductionProblem,
        result: &SolveResult,
        options: &PlotOptions,
    ) -> lpopt_core::Result<Self> {
        let [first, second] = problem.products.as_slice() else {
            return Err(LpError::DimensionMismatch(format!(
                "繪圖只支援 2 個產品，實際為 {}",
                problem.dimension()
            )));
        };
        let points = result.feasible_points().ok_or_else(|| {
            LpError::InvalidParameters("繪圖需要角點法的求解結果".to_string())
        })?;

        let extent = (
            Self::window(first.max_demand, options.extent_factor),
            Self::window(second.max_demand, options.extent_factor),
        );
        let total = problem.total_time();
        let (t1, t2) = (first.time, second.time);
        let label = format!("{}x₁ + {}x₂ ≤ {}", t1, t2, total);

        let constraint_line = if t2 != 0.0 {
            Some(PlotLine {
                label,
                start: (0.0, total / t2),
                end: (extent.0, (total - t1 * extent.0) / t2),
            })
        } else if t1 != 0.0 {
            Some(PlotLine {
                label,
                start: (total / t1, 0.0),
                end: (total / t1, extent.1),
            })
        } else {
            None
        };

        let bound_lines = vec![
            PlotLine {
                label: format!("x₁ ≤ {}", first.max_demand),
                start: (first.max_demand, 0.0),
                end: (first.max_demand, extent.1),
            },
            PlotLine {
                label: format!("x₂ ≤ {}", second.max_demand),
                start: (0.0, second.max_demand),
                end: (extent.0, second.max_demand),
            },
        ];

        let vertices: Vec<Point> = points.iter().map(|c| c.point.clone()).collect();

        Ok(Self {
            feasible_region: Self::order_polygon(&vertices, options.tolerance),
            constraint_line,
            bound_lines,
            optimum: (result.optimal_point.x1(), result.optimal_point.x2()),
            extent,
        })
    }

    fn window(bound: f64, factor: f64) -> f64 {
        if bound > 0.0 {
            bound * factor
        } else {
            factor
        }
    }

    /// 去除重合頂點後依繞質心角度排成逆時針
    pub fn order_polygon(points: &[Point], tolerance: f64) -> Vec<(f64, f64)> {
        let mut unique: Vec<&Point> = Vec::with_capacity(points.len());
        for point in points {
            if !unique.iter().any(|p| p.approx_eq(point, tolerance)) {
                unique.push(point);
            }
        }

        let mut vertices: Vec<(f64, f64)> = unique.iter().map(|p| (p.x1(), p.x2())).collect();
        if vertices.len() < 3 {
            return vertices;
        }

        let n = vertices.len() as f64;
        let cx = vertices.iter().map(|v| v.0).sum::<f64>() / n;
        let cy = vertices.iter().map(|v| v.1).sum::<f64>() / n;
        vertices.sort_by(|a, b| {
            let angle_a = (a.1 - cy).atan2(a.0 - cx);
            let angle_b = (b.1 - cy).atan2(b.0 - cx);
            angle_a.total_cmp(&angle_b)
        });
        vertices
    }
}
