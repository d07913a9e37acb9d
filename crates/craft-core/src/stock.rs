//! 現有庫存來源
//!
//! 計算器只透過 [`StockSource`] 讀取庫存，
//! 實際的庫存系統可以替換而不需修改計算邏輯。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::recipe::Quantity;

/// 以材料名稱查詢現有庫存
pub trait StockSource {
    /// 沒有資料時回傳 `None`，計算時視為 0
    fn stock_of(&self, material: &str) -> Option<Quantity>;
}

/// 沒有任何庫存資料
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStock;

impl StockSource for NoStock {
    fn stock_of(&self, _material: &str) -> Option<Quantity> {
        None
    }
}

impl StockSource for HashMap<String, Quantity> {
    fn stock_of(&self, material: &str) -> Option<Quantity> {
        self.get(material).copied()
    }
}

impl<S: StockSource + ?Sized> StockSource for &S {
    fn stock_of(&self, material: &str) -> Option<Quantity> {
        (**self).stock_of(material)
    }
}

/// 解析使用者輸入的庫存數量
///
/// 空白、非數字或負數都視為「沒有庫存」而回傳 0，不是錯誤。
pub fn parse_stock_input(raw: &str) -> Quantity {
    let trimmed = raw.trim();
    match trimmed.parse::<Quantity>() {
        Ok(quantity) => quantity,
        Err(_) => {
            if !trimmed.is_empty() {
                tracing::warn!("庫存輸入 {:?} 不是有效的非負整數，視為 0", raw);
            }
            0
        }
    }
}

/// 材料名稱 → 現有庫存
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevels {
    levels: HashMap<String, Quantity>,
}

impl StockLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// 從原始輸入字串建立（寬鬆解析）
    pub fn from_raw_inputs<'a, I>(inputs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut levels = Self::new();
        for (material, raw) in inputs {
            levels.set_raw(material, raw);
        }
        levels
    }

    /// 建構器模式：設置庫存
    pub fn with_stock(mut self, material: impl Into<String>, quantity: Quantity) -> Self {
        self.set(material, quantity);
        self
    }

    pub fn set(&mut self, material: impl Into<String>, quantity: Quantity) {
        self.levels.insert(material.into(), quantity);
    }

    /// 以原始輸入設置庫存，回傳實際採用的數量
    pub fn set_raw(&mut self, material: impl Into<String>, raw: &str) -> Quantity {
        let quantity = parse_stock_input(raw);
        self.levels.insert(material.into(), quantity);
        quantity
    }

    pub fn remove(&mut self, material: &str) -> Option<Quantity> {
        self.levels.remove(material)
    }

    /// 查詢庫存，沒有資料視為 0
    pub fn get(&self, material: &str) -> Quantity {
        self.levels.get(material).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl StockSource for StockLevels {
    fn stock_of(&self, material: &str) -> Option<Quantity> {
        self.levels.get(material).copied()
    }
}

impl<S: Into<String>> FromIterator<(S, Quantity)> for StockLevels {
    fn from_iter<I: IntoIterator<Item = (S, Quantity)>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
