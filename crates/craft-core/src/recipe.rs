//! 整合後的配方模型

use serde::{Deserialize, Serialize};

/// 數量（非負整數）
pub type Quantity = u64;

/// 配方中的單項材料需求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRequirement {
    /// 材料顯示名稱
    pub name: String,

    /// 每製作一單位所需數量
    pub required_per_unit: Quantity,
}

impl MaterialRequirement {
    pub fn new(name: impl Into<String>, required_per_unit: Quantity) -> Self {
        Self {
            name: name.into(),
            required_per_unit,
        }
    }
}

/// 整合後的配方（反正規化結果）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRecipe {
    /// 配方顯示名稱
    pub name: String,

    /// 材料清單（保留 ConsumeList 順序）
    pub materials: Vec<MaterialRequirement>,
}

impl ResolvedRecipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            materials: Vec::new(),
        }
    }

    /// 建構器模式：加入材料
    pub fn with_material(mut self, name: impl Into<String>, required_per_unit: Quantity) -> Self {
        self.materials
            .push(MaterialRequirement::new(name, required_per_unit));
        self
    }
}

/// 整合警告的嚴重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}

/// 整合過程中被吸收的資料問題
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationWarning {
    /// 製作定義ID
    pub entry_id: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl IntegrationWarning {
    pub fn new(entry_id: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            entry_id,
            message,
            severity,
        }
    }

    pub fn info(entry_id: String, message: String) -> Self {
        Self::new(entry_id, message, WarningSeverity::Info)
    }

    pub fn warning(entry_id: String, message: String) -> Self {
        Self::new(entry_id, message, WarningSeverity::Warning)
    }

    pub fn error(entry_id: String, message: String) -> Self {
        Self::new(entry_id, message, WarningSeverity::Error)
    }
}

/// 配方索引：載入後一次建立的不可變快照
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeIndex {
    /// 依名稱排序的配方
    recipes: Vec<ResolvedRecipe>,

    /// 警告信息
    warnings: Vec<IntegrationWarning>,

    /// 整合耗時（毫秒）
    integration_time_ms: Option<u128>,
}

impl RecipeIndex {
    /// 由已排序的配方建立索引
    pub fn new(
        recipes: Vec<ResolvedRecipe>,
        warnings: Vec<IntegrationWarning>,
        integration_time_ms: Option<u128>,
    ) -> Self {
        Self {
            recipes,
            warnings,
            integration_time_ms,
        }
    }

    pub fn recipes(&self) -> &[ResolvedRecipe] {
        &self.recipes
    }

    pub fn warnings(&self) -> &[IntegrationWarning] {
        &self.warnings
    }

    pub fn integration_time_ms(&self) -> Option<u128> {
        self.integration_time_ms
    }

    /// 依名稱查找配方；名稱重複時回傳第一筆
    pub fn find(&self, name: &str) -> Option<&ResolvedRecipe> {
        self.recipes.iter().find(|recipe| recipe.name == name)
    }

    /// 所有配方名稱（已排序，可能重複）
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.recipes.iter().map(|recipe| recipe.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
