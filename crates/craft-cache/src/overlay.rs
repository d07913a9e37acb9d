//! 庫存覆蓋層
//!
//! 顯示端保存最後一次計算的材料總量，以及使用者逐項輸入的庫存。
//! 修改單項庫存只重算該列不足量，總不足量則每次重新加總所有列。

use craft_calc::{DeficitCalculator, DeficitReport, DeficitRow, DeficitSummary, MaterialTotals};
use craft_core::{Quantity, StockLevels, StockSource};
use std::collections::HashMap;

use crate::dirty_tracking::DirtyTracker;

/// 庫存覆蓋層
#[derive(Debug, Clone)]
pub struct StockOverlay {
    /// 最後一次計算的材料總量
    totals: MaterialTotals,

    /// 各列不足量（順序同材料總量）
    rows: Vec<DeficitRow>,

    /// 材料名稱 → 列索引
    positions: HashMap<String, usize>,

    /// 使用者輸入的庫存
    stock: StockLevels,

    dirty: DirtyTracker,

    grand_total_deficit: Quantity,
}

impl StockOverlay {
    /// 以注入的庫存來源建立初始覆蓋層
    pub fn new<S: StockSource + ?Sized>(
        totals: MaterialTotals,
        source: &S,
    ) -> craft_core::Result<Self> {
        let report = DeficitCalculator::calculate(&totals, source)?;
        let positions = report
            .rows
            .iter()
            .enumerate()
            .map(|(pos, row)| (row.material.clone(), pos))
            .collect();
        let stock = report
            .rows
            .iter()
            .map(|row| (row.material.clone(), row.current_stock))
            .collect();

        Ok(Self {
            totals,
            rows: report.rows,
            positions,
            stock,
            dirty: DirtyTracker::new(),
            grand_total_deficit: report.grand_total_deficit,
        })
    }

    /// 以原始輸入更新單項材料庫存
    ///
    /// 非數字輸入視為 0。材料不在目前顯示的明細中時不做任何變更並回傳 `None`。
    pub fn set_stock_raw(
        &mut self,
        material: &str,
        raw: &str,
    ) -> craft_core::Result<Option<&DeficitRow>> {
        if !self.positions.contains_key(material) {
            tracing::debug!("材料 {} 不在目前明細中，忽略庫存輸入", material);
            return Ok(None);
        }

        let quantity = self.stock.set_raw(material, raw);
        tracing::debug!("材料 {} 庫存更新為 {}", material, quantity);
        self.dirty.mark_dirty(material);
        self.refresh()?;

        Ok(self.row(material))
    }

    /// 一次套用多項庫存輸入，只在全部標記後重算一次
    ///
    /// 不在目前明細中的材料略過。
    pub fn set_stock_inputs<'a, I>(&mut self, inputs: I) -> craft_core::Result<DeficitSummary>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (material, raw) in inputs {
            if !self.positions.contains_key(material) {
                tracing::debug!("材料 {} 不在目前明細中，忽略庫存輸入", material);
                continue;
            }
            self.stock.set_raw(material, raw);
            self.dirty.mark_dirty(material);
        }

        if !self.dirty.is_clean() {
            self.refresh()?;
        }
        Ok(self.summary())
    }

    /// 重算髒列，並重新加總全部列的不足量
    fn refresh(&mut self) -> craft_core::Result<()> {
        for material in self.dirty.take_dirty_materials() {
            if let Some(&pos) = self.positions.get(&material) {
                let stock = self.stock.get(&material);
                self.rows[pos].set_stock(stock);
            }
        }
        self.grand_total_deficit = DeficitCalculator::grand_total(&self.rows)?;
        Ok(())
    }

    pub fn row(&self, material: &str) -> Option<&DeficitRow> {
        self.positions.get(material).map(|&pos| &self.rows[pos])
    }

    pub fn rows(&self) -> &[DeficitRow] {
        &self.rows
    }

    pub fn totals(&self) -> &MaterialTotals {
        &self.totals
    }

    pub fn stock(&self) -> &StockLevels {
        &self.stock
    }

    pub fn grand_total_deficit(&self) -> Quantity {
        self.grand_total_deficit
    }

    pub fn summary(&self) -> DeficitSummary {
        DeficitSummary::from_total(self.grand_total_deficit)
    }

    /// 目前狀態的不足量報告
    pub fn report(&self) -> DeficitReport {
        DeficitReport {
            rows: self.rows.clone(),
            grand_total_deficit: self.grand_total_deficit,
        }
    }
}
