//! 整合與顯示配置

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::id::Identifier;
use crate::{CraftError, Result};

/// `{id}` 佔位符，會替換為原始識別碼
const ID_PLACEHOLDER: &str = "{id}";

/// 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftConfig {
    /// 產出物品名稱無法解析時的處理方式
    pub unresolved_recipe_policy: UnresolvedRecipePolicy,

    /// 無法解析的配方名稱標籤
    pub unresolved_recipe_label: String,

    /// 未知材料名稱標籤
    pub unknown_material_label: String,

    /// 顯示時是否隱藏數量為 0 的材料
    pub hide_zero_quantities: bool,

    /// 選單開頭「未選擇」選項的文字
    pub selection_prompt: String,

    /// 來源資料表檔名
    pub table_files: TableFiles,
}

impl Default for CraftConfig {
    fn default() -> Self {
        Self {
            unresolved_recipe_policy: UnresolvedRecipePolicy::Placeholder,
            unresolved_recipe_label: "unresolved recipe id: {id}".to_string(),
            unknown_material_label: "unknown material id: {id}".to_string(),
            hide_zero_quantities: true,
            selection_prompt: "Select an item to craft".to_string(),
            table_files: TableFiles::default(),
        }
    }
}

impl CraftConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 字串讀取配置（缺少的欄位使用預設值）
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: CraftConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 從 JSON 檔案讀取配置
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// 建構器模式：設置無法解析配方的處理方式
    pub fn with_unresolved_recipe_policy(mut self, policy: UnresolvedRecipePolicy) -> Self {
        self.unresolved_recipe_policy = policy;
        self
    }

    /// 建構器模式：設置無法解析的配方名稱標籤
    pub fn with_unresolved_recipe_label(mut self, label: impl Into<String>) -> Self {
        self.unresolved_recipe_label = label.into();
        self
    }

    /// 建構器模式：設置未知材料名稱標籤
    pub fn with_unknown_material_label(mut self, label: impl Into<String>) -> Self {
        self.unknown_material_label = label.into();
        self
    }

    /// 建構器模式：設置是否隱藏 0 數量材料
    pub fn with_hide_zero_quantities(mut self, hide: bool) -> Self {
        self.hide_zero_quantities = hide;
        self
    }

    /// 建構器模式：設置選單提示文字
    pub fn with_selection_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.selection_prompt = prompt.into();
        self
    }

    /// 建構器模式：設置資料表檔名
    pub fn with_table_files(mut self, files: TableFiles) -> Self {
        self.table_files = files;
        self
    }

    /// 檢查標籤都含有 `{id}`
    pub fn validate(&self) -> Result<()> {
        for (field, label) in [
            ("unresolved_recipe_label", &self.unresolved_recipe_label),
            ("unknown_material_label", &self.unknown_material_label),
        ] {
            if !label.contains(ID_PLACEHOLDER) {
                return Err(CraftError::InvalidConfig(format!(
                    "{field} 必須包含 {ID_PLACEHOLDER}: {label:?}"
                )));
            }
        }
        Ok(())
    }

    /// 無法解析的配方佔位名稱
    pub fn unresolved_recipe_name(&self, id: &Identifier) -> String {
        self.unresolved_recipe_label
            .replace(ID_PLACEHOLDER, id.as_str())
    }

    /// 未知材料佔位名稱
    pub fn unknown_material_name(&self, id: &Identifier) -> String {
        self.unknown_material_label
            .replace(ID_PLACEHOLDER, id.as_str())
    }
}

/// 產出物品名稱無法解析時的處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedRecipePolicy {
    /// 以含識別碼的佔位名稱保留（預設，讓資料問題可見）
    Placeholder,
    /// 捨棄該製作定義
    Drop,
}

/// 來源資料表檔名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFiles {
    pub items: String,
    pub recipes: String,
    pub consumables: String,
}

impl Default for TableFiles {
    fn default() -> Self {
        Self {
            items: "ItemTable.json".to_string(),
            recipes: "RecipeTable.json".to_string(),
            consumables: "ConsumableItemTable.json".to_string(),
        }
    }
}
