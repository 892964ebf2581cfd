//! 參數紀錄（扁平鍵值，供 UI 層儲存/載入）
//!
//! 鍵名：`profit_i`、`time_i`、`max_i`（i 從 1 起算）與 `total_time`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{LpError, ProductParameters, ProductionProblem};

const TOTAL_TIME_KEY: &str = "total_time";

/// 扁平參數紀錄
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterRecord {
    values: BTreeMap<String, f64>,
}

impl ParameterRecord {
    /// 創建空紀錄
    pub fn new() -> Self {
        Self::default()
    }

    /// 設置欄位
    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    /// 建構器模式：設置欄位
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 由問題產生紀錄
    pub fn from_problem(problem: &ProductionProblem) -> Self {
        let mut record = Self::new();
        for (i, product) in problem.products.iter().enumerate() {
            let n = i + 1;
            record.set(format!("profit_{}", n), product.profit);
            record.set(format!("time_{}", n), product.time);
            record.set(format!("max_{}", n), product.max_demand);
        }
        record.set(TOTAL_TIME_KEY, problem.total_time());
        record
    }

    /// 產品數量：連續存在 `profit_i` 的最大 i
    fn product_count(&self) -> usize {
        (1..)
            .take_while(|n| self.values.contains_key(&format!("profit_{}", n)))
            .count()
    }

    /// 超出產品數量卻仍帶有編號的欄位（例如只有 `time_3`）
    fn orphan_index(&self, count: usize) -> Option<usize> {
        self.values
            .keys()
            .filter_map(|key| {
                let (prefix, index) = key.rsplit_once('_')?;
                if !matches!(prefix, "profit" | "time" | "max") {
                    return None;
                }
                index.parse::<usize>().ok()
            })
            .find(|&n| n > count)
    }

    fn require(&self, key: &str) -> crate::Result<f64> {
        self.get(key)
            .ok_or_else(|| LpError::MissingField(key.to_string()))
    }

    /// 轉換為問題並驗證
    pub fn to_problem(&self) -> crate::Result<ProductionProblem> {
        let count = self.product_count();
        if count == 0 || self.orphan_index(count).is_some() {
            return Err(LpError::MissingField(format!("profit_{}", count + 1)));
        }

        let products = (1..=count)
            .map(|n| {
                Ok(ProductParameters::new(
                    self.require(&format!("profit_{}", n))?,
                    self.require(&format!("time_{}", n))?,
                    self.require(&format!("max_{}", n))?,
                ))
            })
            .collect::<crate::Result<Vec<_>>>()?;

        let problem = ProductionProblem::new(products, self.require(TOTAL_TIME_KEY)?);
        problem.validate()?;
        Ok(problem)
    }

    /// 從 JSON 物件解析
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 序列化為 JSON 物件
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<BTreeMap<String, f64>> for ParameterRecord {
    fn from(values: BTreeMap<String, f64>) -> Self {
        Self { values }
    }
}

impl From<std::collections::HashMap<String, f64>> for ParameterRecord {
    fn from(values: std::collections::HashMap<String, f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}
