//! # Craft Calculation Engine
//!
//! 配方整合與材料需求計算

pub mod deficit;
pub mod input;
pub mod integrator;
pub mod scaling;

// Re-export 主要類型
pub use deficit::{deficit, DeficitCalculator, DeficitReport, DeficitRow, DeficitSummary};
pub use input::{parse_multiplier, resolve_selection, validate_request, Selection};
pub use integrator::{integrate, RecipeIntegrator};
pub use scaling::{MaterialTotals, QuantityScaler};

use craft_core::{Quantity, RecipeIndex, StockSource};

/// 材料需求計算結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirements {
    /// 配方名稱
    pub recipe_name: String,

    /// 製作數量
    pub multiplier: Quantity,

    /// 材料總量
    pub totals: MaterialTotals,

    /// 不足量
    pub deficits: DeficitReport,
}

impl Requirements {
    /// 是否至少有一項材料需要數量大於 0
    pub fn has_nonzero_requirement(&self) -> bool {
        self.totals.has_nonzero_requirement()
    }

    pub fn summary(&self) -> DeficitSummary {
        self.deficits.summary()
    }
}

/// 主計算入口：驗證輸入 → 放大用量 → 計算不足量
pub fn calculate_requirements<S: StockSource + ?Sized>(
    index: &RecipeIndex,
    selected: &str,
    multiplier_raw: &str,
    stock: &S,
) -> craft_core::Result<Requirements> {
    let (recipe, multiplier) = validate_request(index, selected, multiplier_raw)?;
    let totals = QuantityScaler::scale(recipe, multiplier)?;
    let deficits = DeficitCalculator::calculate(&totals, stock)?;

    Ok(Requirements {
        recipe_name: recipe.name.clone(),
        multiplier,
        totals,
        deficits,
    })
}
