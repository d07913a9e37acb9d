//! 不足量計算

use craft_core::{CraftError, Quantity, StockSource};
use serde::Serialize;
use std::fmt;

use crate::scaling::MaterialTotals;

/// 單項材料的不足量：`max(0, 需求 - 庫存)`
pub fn deficit(required_total: Quantity, current_stock: Quantity) -> Quantity {
    required_total.saturating_sub(current_stock)
}

/// 不足量明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeficitRow {
    /// 材料名稱
    pub material: String,
    /// 總需求
    pub required_total: Quantity,
    /// 現有庫存
    pub current_stock: Quantity,
    /// 不足量
    pub deficit: Quantity,
}

impl DeficitRow {
    pub fn new(material: impl Into<String>, required_total: Quantity, current_stock: Quantity) -> Self {
        Self {
            material: material.into(),
            required_total,
            current_stock,
            deficit: deficit(required_total, current_stock),
        }
    }

    /// 更新庫存並重新計算本列不足量
    pub fn set_stock(&mut self, current_stock: Quantity) {
        self.current_stock = current_stock;
        self.deficit = deficit(self.required_total, current_stock);
    }
}

/// 不足量摘要
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeficitSummary {
    /// 庫存足夠
    Sufficient,
    /// 總不足量
    TotalDeficit(Quantity),
}

impl DeficitSummary {
    pub fn from_total(grand_total_deficit: Quantity) -> Self {
        if grand_total_deficit == 0 {
            DeficitSummary::Sufficient
        } else {
            DeficitSummary::TotalDeficit(grand_total_deficit)
        }
    }

    pub fn is_sufficient(&self) -> bool {
        matches!(self, DeficitSummary::Sufficient)
    }
}

impl fmt::Display for DeficitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeficitSummary::Sufficient => write!(f, "sufficient"),
            DeficitSummary::TotalDeficit(total) => write!(f, "total deficit = {total}"),
        }
    }
}

/// 不足量計算結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeficitReport {
    /// 各材料明細（順序同材料總量）
    pub rows: Vec<DeficitRow>,
    /// 總不足量
    pub grand_total_deficit: Quantity,
}

impl DeficitReport {
    pub fn summary(&self) -> DeficitSummary {
        DeficitSummary::from_total(self.grand_total_deficit)
    }

    /// 顯示用明細，可隱藏總需求為 0 的材料
    pub fn visible_rows(&self, hide_zero_quantities: bool) -> impl Iterator<Item = &DeficitRow> {
        self.rows
            .iter()
            .filter(move |row| !hide_zero_quantities || row.required_total > 0)
    }
}

/// 不足量計算器
pub struct DeficitCalculator;

impl DeficitCalculator {
    /// 依庫存來源計算每項材料的不足量與總不足量
    ///
    /// 庫存來源沒有資料的材料視為庫存 0。
    pub fn calculate<S: StockSource + ?Sized>(
        totals: &MaterialTotals,
        stock: &S,
    ) -> craft_core::Result<DeficitReport> {
        let rows: Vec<DeficitRow> = totals
            .iter()
            .map(|(material, required)| {
                DeficitRow::new(material, required, stock.stock_of(material).unwrap_or(0))
            })
            .collect();

        let grand_total_deficit = Self::grand_total(&rows)?;

        tracing::debug!(
            "不足量計算：材料 {} 項，總不足量 {}",
            rows.len(),
            grand_total_deficit
        );

        Ok(DeficitReport {
            rows,
            grand_total_deficit,
        })
    }

    /// 重新加總所有明細的不足量（不做增量調整）
    pub fn grand_total(rows: &[DeficitRow]) -> craft_core::Result<Quantity> {
        rows.iter().try_fold(0 as Quantity, |sum, row| {
            sum.checked_add(row.deficit)
                .ok_or_else(|| CraftError::Overflow {
                    material: row.material.clone(),
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaling::QuantityScaler;
    use craft_core::{NoStock, ResolvedRecipe, StockLevels};
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(6, 4, 2)]
    #[case(6, 6, 0)]
    #[case(6, 10, 0)]
    #[case(0, 0, 0)]
    fn test_deficit(#[case] required: Quantity, #[case] stock: Quantity, #[case] expected: Quantity) {
        assert_eq!(deficit(required, stock), expected);
    }

    #[test]
    fn test_axe_example() {
        let recipe = ResolvedRecipe::new("Axe").with_material("Wood", 2);
        let totals = QuantityScaler::scale(&recipe, 3).unwrap();
        let stock = StockLevels::new().with_stock("Wood", 4);

        let report = DeficitCalculator::calculate(&totals, &stock).unwrap();

        assert_eq!(report.rows, vec![DeficitRow::new("Wood", 6, 4)]);
        assert_eq!(report.grand_total_deficit, 2);
        assert_eq!(report.summary(), DeficitSummary::TotalDeficit(2));
        assert_eq!(report.summary().to_string(), "total deficit = 2");
    }

    #[test]
    fn test_missing_stock_is_zero() {
        let recipe = ResolvedRecipe::new("Bow")
            .with_material("Wood", 3)
            .with_material("String", 1);
        let totals = QuantityScaler::scale(&recipe, 2).unwrap();

        let report = DeficitCalculator::calculate(&totals, &NoStock).unwrap();

        assert_eq!(report.grand_total_deficit, 8);
        assert!(report.rows.iter().all(|row| row.current_stock == 0));
    }

    #[test]
    fn test_sufficient_summary() {
        let recipe = ResolvedRecipe::new("Axe").with_material("Wood", 2);
        let totals = QuantityScaler::scale(&recipe, 1).unwrap();
        let stock = StockLevels::new().with_stock("Wood", 50);

        let report = DeficitCalculator::calculate(&totals, &stock).unwrap();

        assert!(report.summary().is_sufficient());
        assert_eq!(report.summary().to_string(), "sufficient");
    }

    #[test]
    fn test_visible_rows_hide_zero() {
        let recipe = ResolvedRecipe::new("Kit")
            .with_material("Glue", 0)
            .with_material("Wood", 1);
        let totals = QuantityScaler::scale(&recipe, 1).unwrap();
        let report = DeficitCalculator::calculate(&totals, &NoStock).unwrap();

        assert_eq!(report.visible_rows(true).count(), 1);
        assert_eq!(report.visible_rows(false).count(), 2);
    }

    proptest! {
        #[test]
        fn prop_deficit_non_negative_and_zero_when_covered(
            required in 0u64..1_000_000,
            stock in 0u64..1_000_000,
        ) {
            let d = deficit(required, stock);
            prop_assert!(d <= required);
            if stock >= required {
                prop_assert_eq!(d, 0);
            } else {
                prop_assert_eq!(d, required - stock);
            }
        }
    }
}
