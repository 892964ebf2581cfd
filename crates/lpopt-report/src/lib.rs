//! # LP Optimizer Report
//!
//! 報表資料：參數表、逐步推導、繪圖幾何、敏感度分析

pub mod derivation;
pub mod format;
pub mod plot;
pub mod table;

// Re-export 主要類型
pub use derivation::{Derivation, DerivationStep};
pub use format::{format_currency, format_quantity};
pub use plot::{PlotGeometry, PlotLine, PlotOptions};
pub use table::{ParameterRow, ParameterTable};

use chrono::{DateTime, Utc};
use lpopt_core::{ParameterRecord, ProductionProblem, SolveResult};
use lpopt_solver::SensitivityReport;
use serde::{Deserialize, Serialize};

/// 預設貨幣符號
pub const DEFAULT_CURRENCY: &str = "Rp";

/// 完整求解報表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// 產生時間
    pub generated_at: DateTime<Utc>,

    /// 輸入參數紀錄
    pub parameters: ParameterRecord,

    pub table: ParameterTable,

    pub result: SolveResult,

    /// 逐步推導（僅角點法結果）
    pub derivation: Option<Derivation>,

    /// 繪圖資料（僅角點法結果）
    pub plot: Option<PlotGeometry>,

    pub sensitivity: Option<SensitivityReport>,

    /// 最佳值的顯示字串
    pub optimal_value_display: String,
}

impl Report {
    /// 序列化為 JSON
    pub fn to_json(&self) -> lpopt_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 簡短摘要（每個產品的產量與最大利潤）
    pub fn summary(&self) -> String {
        let mut lines: Vec<String> = self
            .result
            .optimal_point
            .coordinates()
            .iter()
            .enumerate()
            .map(|(i, x)| format!("產品 {} (x{}): {} 單位", i + 1, i + 1, format_quantity(*x)))
            .collect();
        lines.push(format!("最大利潤: {}", self.optimal_value_display));
        lines.join("\n")
    }
}

/// 報表建構器
#[derive(Debug, Clone)]
pub struct ReportBuilder<'a> {
    problem: &'a ProductionProblem,
    result: &'a SolveResult,
    sensitivity: Option<SensitivityReport>,
    currency: String,
    plot_options: PlotOptions,
}

impl<'a> ReportBuilder<'a> {
    /// 創建新的建構器
    pub fn new(problem: &'a ProductionProblem, result: &'a SolveResult) -> Self {
        Self {
            problem,
            result,
            sensitivity: None,
            currency: DEFAULT_CURRENCY.to_string(),
            plot_options: PlotOptions::default(),
        }
    }

    /// 建構器模式：附上敏感度分析
    pub fn with_sensitivity(mut self, sensitivity: SensitivityReport) -> Self {
        self.sensitivity = Some(sensitivity);
        self
    }

    /// 建構器模式：設置貨幣符號
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// 建構器模式：設置繪圖選項
    pub fn with_plot_options(mut self, options: PlotOptions) -> Self {
        self.plot_options = options;
        self
    }

    /// 產生報表
    ///
    /// 推導與繪圖只在雙產品角點法結果時產生
    pub fn build(self) -> lpopt_core::Result<Report> {
        let corner_mode = self.result.feasible_points().is_some() && self.problem.dimension() == 2;

        let (derivation, plot) = if corner_mode {
            (
                Some(Derivation::build(self.problem, self.result, &self.currency)?),
                Some(PlotGeometry::build(
                    self.problem,
                    self.result,
                    &self.plot_options,
                )?),
            )
        } else {
            (None, None)
        };

        tracing::debug!(
            "產生報表：推導 {}，繪圖 {}",
            derivation.is_some(),
            plot.is_some()
        );

        Ok(Report {
            generated_at: Utc::now(),
            parameters: ParameterRecord::from_problem(self.problem),
            table: ParameterTable::from_problem(self.problem),
            result: self.result.clone(),
            derivation,
            plot,
            sensitivity: self.sensitivity,
            optimal_value_display: format_currency(self.result.optimal_value, &self.currency),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpopt_core::{ProductParameters, SolverConfig};
    use lpopt_solver::{CornerPointSolver, GeneralLpSolver, SensitivityAnalyzer};

    fn furniture() -> ProductionProblem {
        ProductionProblem::two_products(
            ProductParameters::new(120_000.0, 3.0, 30.0),
            ProductParameters::new(80_000.0, 2.0, 40.0),
            120.0,
        )
    }

    #[test]
    fn test_corner_report() {
        let problem = furniture();
        let result = CornerPointSolver::default().solve(&problem).unwrap();
        let sensitivity = SensitivityAnalyzer::new(SolverConfig::default())
            .analyze(&problem, &result)
            .unwrap();

        let report = ReportBuilder::new(&problem, &result)
            .with_sensitivity(sensitivity)
            .build()
            .unwrap();

        assert!(report.derivation.is_some());
        assert!(report.plot.is_some());
        assert_eq!(report.optimal_value_display, "Rp4,800,000");
        assert_eq!(
            report.summary(),
            "產品 1 (x1): 30 單位\n產品 2 (x2): 15 單位\n最大利潤: Rp4,800,000"
        );

        let json = report.to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["parameters"]["total_time"], 120.0);
        assert_eq!(parsed["result"]["details"]["mode"], "corner_points");
    }

    #[test]
    fn test_three_product_report() {
        let problem = ProductionProblem::new(
            vec![
                ProductParameters::new(120_000.0, 3.0, 30.0),
                ProductParameters::new(80_000.0, 2.0, 40.0),
                ProductParameters::new(100_000.0, 1.0, 10.0),
            ],
            120.0,
        );
        let result = GeneralLpSolver::new(SolverConfig::default())
            .solve_products(&problem)
            .unwrap();

        let report = ReportBuilder::new(&problem, &result)
            .with_currency("$")
            .build()
            .unwrap();

        assert!(report.derivation.is_none());
        assert!(report.plot.is_none());
        assert_eq!(report.table.columns.len(), 3);
        assert_eq!(report.optimal_value_display, "$5,400,000");
    }
}
