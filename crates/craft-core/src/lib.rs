//! # Craft Core
//!
//! 核心資料模型與類型定義

pub mod collation;
pub mod config;
pub mod id;
pub mod recipe;
pub mod stock;
pub mod table;

// Re-export 主要類型
pub use collation::locale_cmp;
pub use config::{CraftConfig, TableFiles, UnresolvedRecipePolicy};
pub use id::{ConsumeId, Identifier, ItemId};
pub use recipe::{
    IntegrationWarning, MaterialRequirement, Quantity, RecipeIndex, ResolvedRecipe,
    WarningSeverity,
};
pub use stock::{NoStock, StockLevels, StockSource};
pub use table::{ConsumeEntry, ItemRecord, RecipeNameRecord, SourceTables, Table};

/// 使用者輸入驗證錯誤
///
/// 這類錯誤會拒絕「計算」動作，但不會改動已顯示的結果。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("尚未選擇要製作的物品")]
    MissingSelection,

    #[error("找不到配方: {0}")]
    UnknownRecipe(String),

    #[error("製作數量不是有效的整數: {0:?}")]
    InvalidMultiplier(String),

    #[error("製作數量必須大於 0，實際為 {0}")]
    NonPositiveMultiplier(i64),

    #[error("尚未計算材料需求，無法輸入庫存")]
    NotCalculated,
}

/// 配方系統錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum CraftError {
    #[error("格式錯誤的製作定義 {entry}: {reason}")]
    MalformedEntry { entry: String, reason: String },

    #[error("製作定義 {entry} 含有無效數量: {raw}")]
    InvalidQuantity { entry: String, raw: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("材料 {material} 的數量溢出")]
    Overflow { material: String },

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("配置解析錯誤: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CraftError {
    /// 是否為使用者輸入驗證錯誤
    pub fn is_validation(&self) -> bool {
        matches!(self, CraftError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, CraftError>;
