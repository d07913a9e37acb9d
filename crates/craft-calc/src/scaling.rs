//! 材料用量放大

use craft_core::{CraftError, Quantity, ResolvedRecipe, ValidationError};
use serde::Serialize;
use std::collections::HashMap;

/// 材料總量（以材料名稱為鍵，保留首次出現順序）
///
/// 每次計算都重新建立，不會跨配方累加。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterialTotals {
    entries: Vec<(String, Quantity)>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl MaterialTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加材料數量；同名材料合併
    pub fn add(&mut self, material: &str, quantity: Quantity) -> craft_core::Result<()> {
        match self.index.get(material) {
            Some(&pos) => {
                let total = &mut self.entries[pos].1;
                *total = total
                    .checked_add(quantity)
                    .ok_or_else(|| CraftError::Overflow {
                        material: material.to_string(),
                    })?;
            }
            None => {
                self.index.insert(material.to_string(), self.entries.len());
                self.entries.push((material.to_string(), quantity));
            }
        }
        Ok(())
    }

    /// 材料總量，不存在時回傳 `None`
    pub fn total(&self, material: &str) -> Option<Quantity> {
        self.index.get(material).map(|&pos| self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Quantity)> {
        self.entries.iter().map(|(name, qty)| (name.as_str(), *qty))
    }

    /// 只走訪數量大於 0 的材料
    pub fn nonzero(&self) -> impl Iterator<Item = (&str, Quantity)> {
        self.iter().filter(|(_, qty)| *qty > 0)
    }

    /// 是否至少有一項材料需要數量大於 0
    pub fn has_nonzero_requirement(&self) -> bool {
        self.entries.iter().any(|(_, qty)| *qty > 0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 用量放大計算器
pub struct QuantityScaler;

impl QuantityScaler {
    /// 計算製作 `multiplier` 單位所需的材料總量
    ///
    /// `multiplier` 必須大於 0；0 會被拒絕而不是產生空結果。
    pub fn scale(
        recipe: &ResolvedRecipe,
        multiplier: Quantity,
    ) -> craft_core::Result<MaterialTotals> {
        if multiplier == 0 {
            return Err(ValidationError::NonPositiveMultiplier(0).into());
        }

        let mut totals = MaterialTotals::new();
        for material in &recipe.materials {
            let required = material
                .required_per_unit
                .checked_mul(multiplier)
                .ok_or_else(|| CraftError::Overflow {
                    material: material.name.clone(),
                })?;
            totals.add(&material.name, required)?;
        }

        tracing::debug!(
            "配方 {} × {} → 材料 {} 項",
            recipe.name,
            multiplier,
            totals.len()
        );

        Ok(totals)
    }
}
