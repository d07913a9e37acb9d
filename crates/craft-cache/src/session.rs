//! 選擇/計算狀態機
//!
//! ```text
//! NoSelection -> RecipeSelected -> MaterialsDisplayed -> (StockEdited -> MaterialsDisplayed)*
//! ```
//!
//! 選擇空白選項會回到 `NoSelection` 並清除顯示內容。
//! 驗證失敗的動作不會改變目前狀態。

use craft_calc::{
    parse_multiplier, resolve_selection, DeficitRow, DeficitSummary, QuantityScaler, Selection,
};
use craft_core::{NoStock, Quantity, RecipeIndex, ResolvedRecipe, StockSource, ValidationError};
use std::sync::Arc;

use crate::overlay::StockOverlay;

/// 狀態
#[derive(Debug, Clone)]
pub enum SessionState {
    /// 未選擇配方（初始狀態）
    NoSelection,

    /// 已選擇配方，尚未計算
    RecipeSelected { recipe: String },

    /// 已顯示材料需求
    MaterialsDisplayed {
        recipe: String,
        multiplier: Quantity,
        overlay: StockOverlay,
    },
}

impl SessionState {
    pub fn selected_recipe(&self) -> Option<&str> {
        match self {
            SessionState::NoSelection => None,
            SessionState::RecipeSelected { recipe }
            | SessionState::MaterialsDisplayed { recipe, .. } => Some(recipe),
        }
    }
}

/// 配方選擇與材料計算的工作階段
///
/// 持有載入時建立的配方索引快照，本身不會修改索引。
pub struct CraftSession {
    index: Arc<RecipeIndex>,
    stock_source: Box<dyn StockSource + Send + Sync>,
    state: SessionState,
}

impl CraftSession {
    /// 創建新的工作階段（沒有庫存來源）
    pub fn new(index: Arc<RecipeIndex>) -> Self {
        Self {
            index,
            stock_source: Box::new(NoStock),
            state: SessionState::NoSelection,
        }
    }

    /// 建構器模式：設置初始庫存來源
    pub fn with_stock_source(mut self, source: impl StockSource + Send + Sync + 'static) -> Self {
        self.stock_source = Box::new(source);
        self
    }

    pub fn index(&self) -> &RecipeIndex {
        &self.index
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// 目前選擇的配方（同名時為第一筆）
    pub fn selected_recipe(&self) -> Option<&ResolvedRecipe> {
        self.state
            .selected_recipe()
            .and_then(|name| self.index.find(name))
    }

    /// 選擇配方；空字串代表選擇開頭的空白選項
    pub fn select(&mut self, name: &str) -> Result<&SessionState, ValidationError> {
        self.state = match resolve_selection(&self.index, name)? {
            Selection::None => {
                tracing::debug!("回到未選擇狀態");
                SessionState::NoSelection
            }
            Selection::Recipe(recipe) => {
                tracing::debug!("選擇配方 {}", recipe.name);
                SessionState::RecipeSelected {
                    recipe: recipe.name.clone(),
                }
            }
        };
        Ok(&self.state)
    }

    /// 計算目前配方的材料需求
    ///
    /// 每次都從頭建立材料總量，庫存回到注入的庫存來源。
    pub fn calculate(&mut self, multiplier_raw: &str) -> craft_core::Result<&StockOverlay> {
        let recipe = self
            .selected_recipe()
            .ok_or(ValidationError::MissingSelection)?;
        let multiplier = parse_multiplier(multiplier_raw)?;

        let totals = QuantityScaler::scale(recipe, multiplier)?;
        let overlay = StockOverlay::new(totals, self.stock_source.as_ref())?;
        let recipe = recipe.name.clone();

        tracing::info!(
            "計算配方 {} × {}：總不足量 {}",
            recipe,
            multiplier,
            overlay.grand_total_deficit()
        );

        self.state = SessionState::MaterialsDisplayed {
            recipe,
            multiplier,
            overlay,
        };
        self.overlay()
            .ok_or_else(|| ValidationError::NotCalculated.into())
    }

    /// 修改單項材料的庫存輸入，回傳更新後的摘要
    pub fn edit_stock(&mut self, material: &str, raw: &str) -> craft_core::Result<DeficitSummary> {
        let SessionState::MaterialsDisplayed { overlay, .. } = &mut self.state else {
            return Err(ValidationError::NotCalculated.into());
        };
        overlay.set_stock_raw(material, raw)?;
        Ok(overlay.summary())
    }

    /// 一次修改多項材料的庫存輸入
    pub fn edit_stocks<'a, I>(&mut self, inputs: I) -> craft_core::Result<DeficitSummary>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let SessionState::MaterialsDisplayed { overlay, .. } = &mut self.state else {
            return Err(ValidationError::NotCalculated.into());
        };
        overlay.set_stock_inputs(inputs)
    }

    /// 目前顯示的材料明細
    pub fn displayed_rows(&self) -> &[DeficitRow] {
        match &self.state {
            SessionState::MaterialsDisplayed { overlay, .. } => overlay.rows(),
            _ => &[],
        }
    }

    pub fn overlay(&self) -> Option<&StockOverlay> {
        match &self.state {
            SessionState::MaterialsDisplayed { overlay, .. } => Some(overlay),
            _ => None,
        }
    }

    /// 回到初始狀態
    pub fn reset(&mut self) {
        self.state = SessionState::NoSelection;
    }
}
