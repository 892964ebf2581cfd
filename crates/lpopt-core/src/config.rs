//! 求解器配置

use serde::{Deserialize, Serialize};

use crate::DEFAULT_TOLERANCE;

/// 求解器參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// 可行性過濾的絕對容差
    pub tolerance: f64,

    /// 是否以 rayon 並行計算角點目標值
    ///
    /// 只影響內部計算方式，結果與順序計算逐位元相同
    pub parallel_evaluation: bool,

    /// 影子價格的右側擾動量（相對值，至少為此絕對值）
    pub dual_step: f64,

    /// 角點法與一般求解器交叉比對的容差
    pub cross_check_tolerance: f64,
}

impl SolverConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            parallel_evaluation: false,
            dual_step: 1e-3,
            cross_check_tolerance: 1e-6,
        }
    }

    /// 建構器模式：設置容差
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// 建構器模式：設置並行計算
    pub fn with_parallel_evaluation(mut self, parallel: bool) -> Self {
        self.parallel_evaluation = parallel;
        self
    }

    /// 建構器模式：設置影子價格擾動量
    pub fn with_dual_step(mut self, step: f64) -> Self {
        self.dual_step = step;
        self
    }

    /// 建構器模式：設置交叉比對容差
    pub fn with_cross_check_tolerance(mut self, tolerance: f64) -> Self {
        self.cross_check_tolerance = tolerance;
        self
    }

    /// 針對右側值 rhs 的擾動量
    pub fn perturbation_for(&self, rhs: f64) -> f64 {
        (self.dual_step * rhs.abs()).max(self.dual_step)
    }

    /// 從 JSON 載入（缺少的欄位使用預設值）
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 檢查配置值
    pub fn validate(&self) -> crate::Result<()> {
        let positive = [
            ("tolerance", self.tolerance),
            ("dual_step", self.dual_step),
            ("cross_check_tolerance", self.cross_check_tolerance),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(crate::LpError::InvalidParameters(format!(
                    "配置 {} 必須為正數: {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}
