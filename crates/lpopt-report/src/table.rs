//! 參數表（每列一個參數、每欄一個產品）

use lpopt_core::ProductionProblem;
use serde::{Deserialize, Serialize};

/// 參數表的一列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRow {
    pub parameter: String,
    /// 依產品順序的值
    pub values: Vec<f64>,
    /// 總工時欄（只有第一列有值）
    pub total_time: Option<f64>,
}

/// 參數表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterTable {
    /// 欄標題："產品 1"、"產品 2"...
    pub columns: Vec<String>,
    pub rows: Vec<ParameterRow>,
}

impl ParameterTable {
    /// 由問題產生參數表
    pub fn from_problem(problem: &ProductionProblem) -> Self {
        let columns = (1..=problem.dimension())
            .map(|n| format!("產品 {}", n))
            .collect();

        let rows = vec![
            ParameterRow {
                parameter: "單位利潤".to_string(),
                values: problem.profits(),
                total_time: Some(problem.total_time()),
            },
            ParameterRow {
                parameter: "生產時間".to_string(),
                values: problem.times(),
                total_time: None,
            },
            ParameterRow {
                parameter: "最大需求".to_string(),
                values: problem.max_demands(),
                total_time: None,
            },
        ];

        Self { columns, rows }
    }

    /// 以 Markdown 表格輸出
    pub fn to_markdown(&self) -> String {
        let mut out = format!("| 參數 | {} | 總工時 |\n", self.columns.join(" | "));
        out.push_str(&format!("|---|{}---|\n", "---|".repeat(self.columns.len())));
        for row in &self.rows {
            let values: Vec<String> = row.values.iter().map(|v| v.to_string()).collect();
            let total = row
                .total_time
                .map_or_else(|| "-".to_string(), |t| t.to_string());
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                row.parameter,
                values.join(" | "),
                total
            ));
        }
        out
    }
}
