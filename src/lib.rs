//! # LP Optimizer
//!
//! 生產組合線性規劃：在單一總工時約束與需求上界下最大化利潤
//!
//! - [`lpopt_core`]：資料模型、配置、參數紀錄
//! - [`lpopt_solver`]：角點法、一般 LP、敏感度分析
//! - [`lpopt_report`]：參數表、推導、繪圖幾何

pub use lpopt_core;
pub use lpopt_report;
pub use lpopt_solver;

pub use lpopt_core::{
    LpError, ParameterRecord, Point, ProductParameters, ProductionProblem, Result, SolveResult,
    SolverConfig,
};
pub use lpopt_report::{Report, ReportBuilder};
pub use lpopt_solver::{CornerPointSolver, GeneralLpSolver, SensitivityAnalyzer};

/// 依產品數選擇求解器：2 個產品用角點法，其餘用一般 LP
pub fn solve(problem: &ProductionProblem, config: &SolverConfig) -> Result<SolveResult> {
    if problem.dimension() == 2 {
        CornerPointSolver::new(config.clone()).solve(problem)
    } else {
        GeneralLpSolver::new(config.clone()).solve_products(problem)
    }
}

/// 從參數紀錄一路產生報表（求解 + 敏感度分析 + 報表）
pub fn optimize(record: &ParameterRecord, config: &SolverConfig) -> Result<Report> {
    let problem = record.to_problem()?;
    let result = solve(&problem, config)?;
    let sensitivity = SensitivityAnalyzer::new(config.clone()).analyze(&problem, &result)?;

    ReportBuilder::new(&problem, &result)
        .with_sensitivity(sensitivity)
        .build()
}
