//! 生產計劃點（決策變數取值）

use serde::{Deserialize, Serialize};

/// 候選生產計劃 (x₁, x₂[, x₃])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point {
    coordinates: Vec<f64>,
}

impl Point {
    /// 由座標建立
    pub fn new(coordinates: Vec<f64>) -> Self {
        Self { coordinates }
    }

    /// 建立二維點
    pub fn xy(x1: f64, x2: f64) -> Self {
        Self {
            coordinates: vec![x1, x2],
        }
    }

    /// 原點
    pub fn origin(dimension: usize) -> Self {
        Self {
            coordinates: vec![0.0; dimension],
        }
    }

    /// 維度
    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    /// 第 i 個座標（從 0 起算），超出維度時視為 0
    pub fn get(&self, index: usize) -> f64 {
        self.coordinates.get(index).copied().unwrap_or(0.0)
    }

    pub fn x1(&self) -> f64 {
        self.get(0)
    }

    pub fn x2(&self) -> f64 {
        self.get(1)
    }

    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// 與係數向量的內積
    pub fn dot(&self, coefficients: &[f64]) -> f64 {
        self.coordinates
            .iter()
            .zip(coefficients)
            .map(|(x, c)| x * c)
            .sum()
    }

    /// 兩點在容差內是否重合
    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        self.dimension() == other.dimension()
            && self
                .coordinates
                .iter()
                .zip(&other.coordinates)
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x1, x2): (f64, f64)) -> Self {
        Self::xy(x1, x2)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, x) in self.coordinates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, ")")
    }
}
