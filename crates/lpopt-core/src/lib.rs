//! # LP Optimizer Core
//!
//! 核心資料模型與類型定義（產品參數、資源約束、求解結果）

pub mod config;
pub mod point;
pub mod product;
pub mod record;
pub mod result;

// Re-export 主要類型
pub use config::SolverConfig;
pub use point::Point;
pub use product::{ProductParameters, ProductionProblem, ResourceConstraint};
pub use record::ParameterRecord;
pub use result::{
    CornerLabel, CornerPoint, ExcludedCorner, ExclusionReason, RoutineStatus, SolveDetails,
    SolveResult, SolverDiagnostics, VertexRule,
};

/// 預設數值容差（邊界交點的浮點誤差）
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// 求解錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum LpError {
    #[error("無效的參數: {0}")]
    InvalidParameters(String),

    #[error("問題不可行: {0}")]
    Infeasible(String),

    #[error("目標函數無界")]
    Unbounded,

    #[error("維度不一致: {0}")]
    DimensionMismatch(String),

    #[error("參數紀錄缺少欄位: {0}")]
    MissingField(String),

    #[error("求解器錯誤: {0}")]
    Solver(String),

    #[error("序列化錯誤: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LpError {
    /// 是否為求解前即可發現的參數錯誤（呼叫端應停止後續流程）
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            LpError::InvalidParameters(_) | LpError::DimensionMismatch(_) | LpError::MissingField(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LpError>;
