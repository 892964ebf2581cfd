//! 產品參數與資源約束模型

use serde::{Deserialize, Serialize};

use crate::{LpError, Point};

/// 單一產品的參數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductParameters {
    /// 單位利潤
    pub profit: f64,

    /// 單位生產時間（小時）
    pub time: f64,

    /// 最大需求量（上界）
    pub max_demand: f64,
}

impl ProductParameters {
    /// 創建新的產品參數
    pub fn new(profit: f64, time: f64, max_demand: f64) -> Self {
        Self {
            profit,
            time,
            max_demand,
        }
    }

    /// 檢查數值是否有限且非負
    fn validate(&self, index: usize) -> crate::Result<()> {
        let fields = [
            ("profit", self.profit),
            ("time", self.time),
            ("max", self.max_demand),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(LpError::InvalidParameters(format!(
                    "{}_{} 不是有限數值: {}",
                    name,
                    index + 1,
                    value
                )));
            }
            if value < 0.0 {
                return Err(LpError::InvalidParameters(format!(
                    "{}_{} 不可為負: {}",
                    name,
                    index + 1,
                    value
                )));
            }
        }
        Ok(())
    }
}

/// 總工時約束 Σ time_i · x_i ≤ total_time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceConstraint {
    /// 可用總工時（小時）
    pub total_time: f64,
}

impl ResourceConstraint {
    pub fn new(total_time: f64) -> Self {
        Self { total_time }
    }
}

/// 生產組合問題（一次求解的完整參數集）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionProblem {
    /// 產品參數（依序對應 x₁, x₂, ...）
    pub products: Vec<ProductParameters>,

    /// 工時約束
    pub resource: ResourceConstraint,
}

impl ProductionProblem {
    /// 最多支援的產品數
    pub const MAX_PRODUCTS: usize = 3;

    /// 創建新的問題（不做驗證）
    pub fn new(products: Vec<ProductParameters>, total_time: f64) -> Self {
        Self {
            products,
            resource: ResourceConstraint::new(total_time),
        }
    }

    /// 雙產品問題
    pub fn two_products(first: ProductParameters, second: ProductParameters, total_time: f64) -> Self {
        Self::new(vec![first, second], total_time)
    }

    /// 產品數量
    pub fn dimension(&self) -> usize {
        self.products.len()
    }

    pub fn total_time(&self) -> f64 {
        self.resource.total_time
    }

    /// 利潤向量 c
    pub fn profits(&self) -> Vec<f64> {
        self.products.iter().map(|p| p.profit).collect()
    }

    /// 工時係數向量
    pub fn times(&self) -> Vec<f64> {
        self.products.iter().map(|p| p.time).collect()
    }

    /// 需求上界向量
    pub fn max_demands(&self) -> Vec<f64> {
        self.products.iter().map(|p| p.max_demand).collect()
    }

    /// 目標函數值 Z = c · x
    pub fn objective(&self, point: &Point) -> f64 {
        point.dot(&self.profits())
    }

    /// 計劃所需總工時
    pub fn time_usage(&self, point: &Point) -> f64 {
        point.dot(&self.times())
    }

    /// 在容差內檢查點是否滿足所有約束
    pub fn is_feasible(&self, point: &Point, tolerance: f64) -> bool {
        if point.dimension() != self.dimension() {
            return false;
        }
        let within_bounds = self
            .products
            .iter()
            .zip(point.coordinates())
            .all(|(p, &x)| x >= -tolerance && x <= p.max_demand + tolerance);

        within_bounds && self.time_usage(point) <= self.total_time() + tolerance
    }

    /// 求解前驗證
    ///
    /// 拒絕：產品數不在 1..=3、數值非有限或為負、所有利潤為 0、
    /// 所有工時為 0、總工時 ≤ 0
    pub fn validate(&self) -> crate::Result<()> {
        if self.products.is_empty() || self.products.len() > Self::MAX_PRODUCTS {
            return Err(LpError::DimensionMismatch(format!(
                "產品數量必須介於 1 到 {}，實際為 {}",
                Self::MAX_PRODUCTS,
                self.products.len()
            )));
        }

        for (i, product) in self.products.iter().enumerate() {
            product.validate(i)?;
        }

        if self.products.iter().all(|p| p.profit == 0.0) {
            return Err(LpError::InvalidParameters("所有產品利潤皆為 0".to_string()));
        }

        if self.products.iter().all(|p| p.time == 0.0) {
            return Err(LpError::InvalidParameters("所有產品生產時間皆為 0".to_string()));
        }

        let total_time = self.total_time();
        if !total_time.is_finite() || total_time <= 0.0 {
            return Err(LpError::InvalidParameters(format!(
                "總工時必須大於 0: {}",
                total_time
            )));
        }

        Ok(())
    }
}
