//! 配方整合器
//!
//! 將三張以不同識別碼空間為鍵的資料表合併為一份依名稱排序的配方清單。

use craft_core::{
    locale_cmp, ConsumeEntry, ConsumeId, CraftConfig, IntegrationWarning, ItemRecord,
    MaterialRequirement, RecipeIndex, RecipeNameRecord, ResolvedRecipe, SourceTables, Table,
    UnresolvedRecipePolicy,
};

/// 配方整合器
#[derive(Debug, Clone, Default)]
pub struct RecipeIntegrator {
    config: CraftConfig,
}

impl RecipeIntegrator {
    /// 創建新的整合器
    pub fn new(config: CraftConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CraftConfig {
        &self.config
    }

    /// 整合三張來源資料表
    pub fn integrate_tables(&self, tables: &SourceTables) -> RecipeIndex {
        self.integrate(&tables.items, &tables.recipe_names, &tables.consume_entries)
    }

    /// 主整合入口
    ///
    /// 依製作定義表的鍵順序走訪，每筆定義最多產生一個配方；
    /// 單筆定義的資料問題只會略過該筆並記錄警告。
    pub fn integrate(
        &self,
        items: &Table<ItemRecord>,
        recipe_names: &Table<RecipeNameRecord>,
        consume_entries: &Table<ConsumeEntry>,
    ) -> RecipeIndex {
        tracing::info!(
            "開始整合配方：物品 {} 筆，配方名稱 {} 筆，製作定義 {} 筆",
            items.len(),
            recipe_names.len(),
            consume_entries.len()
        );

        let start_time = std::time::Instant::now();
        let mut recipes = Vec::with_capacity(consume_entries.len());
        let mut warnings = Vec::new();

        // Step 1: 逐筆解析製作定義
        tracing::debug!("Step 1: 解析製作定義");
        for (entry_id, entry) in consume_entries.iter() {
            match self.resolve_entry(entry_id, entry, items, recipe_names, &mut warnings) {
                Ok(Some(recipe)) => {
                    tracing::debug!(
                        "製作定義 {} → {}（材料 {} 項）",
                        entry_id,
                        recipe.name,
                        recipe.materials.len()
                    );
                    recipes.push(recipe);
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!("略過製作定義 {}: {}", entry_id, err);
                    warnings.push(IntegrationWarning::error(
                        entry_id.to_string(),
                        err.to_string(),
                    ));
                }
            }
        }

        // Step 2: 依名稱排序（穩定排序，重複名稱保留來源順序）
        tracing::debug!("Step 2: 名稱排序");
        recipes.sort_by(|a, b| locale_cmp(&a.name, &b.name));

        let elapsed = start_time.elapsed();
        tracing::info!(
            "配方整合完成，耗時 {:?}：配方 {} 筆，警告 {} 筆",
            elapsed,
            recipes.len(),
            warnings.len()
        );

        RecipeIndex::new(recipes, warnings, Some(elapsed.as_millis()))
    }

    /// 單筆製作定義的解析
    fn resolve_entry(
        &self,
        entry_id: &ConsumeId,
        entry: &ConsumeEntry,
        items: &Table<ItemRecord>,
        recipe_names: &Table<RecipeNameRecord>,
        warnings: &mut Vec<IntegrationWarning>,
    ) -> craft_core::Result<Option<ResolvedRecipe>> {
        let Some(produced_id) = entry.produced_item_id(entry_id)? else {
            tracing::debug!("製作定義 {} 沒有產出物品，略過", entry_id);
            return Ok(None);
        };

        // 先解析材料配對，格式錯誤的定義不留下名稱相關的警告
        let raw_materials = entry.materials(entry_id)?;

        // 名稱優先順序：配方表 → 物品表 → 依策略處理
        let name = match recipe_names
            .name_of(&produced_id)
            .or_else(|| items.name_of(&produced_id))
        {
            Some(name) => name.to_string(),
            None => match self.config.unresolved_recipe_policy {
                UnresolvedRecipePolicy::Drop => {
                    tracing::warn!(
                        "製作定義 {} 的產出物品 {} 沒有名稱，捨棄",
                        entry_id,
                        produced_id
                    );
                    warnings.push(IntegrationWarning::warning(
                        entry_id.to_string(),
                        format!("產出物品 {produced_id} 沒有名稱，已捨棄"),
                    ));
                    return Ok(None);
                }
                UnresolvedRecipePolicy::Placeholder => {
                    tracing::warn!(
                        "製作定義 {} 的產出物品 {} 沒有名稱，使用佔位名稱",
                        entry_id,
                        produced_id
                    );
                    warnings.push(IntegrationWarning::warning(
                        entry_id.to_string(),
                        format!("產出物品 {produced_id} 沒有名稱，使用佔位名稱"),
                    ));
                    self.config.unresolved_recipe_name(&produced_id)
                }
            },
        };

        let materials = raw_materials
            .into_iter()
            .map(|(material_id, required_per_unit)| {
                let material_name = match items.name_of(&material_id) {
                    Some(name) => name.to_string(),
                    None => {
                        warnings.push(IntegrationWarning::info(
                            entry_id.to_string(),
                            format!("材料 {material_id} 沒有名稱，使用佔位名稱"),
                        ));
                        self.config.unknown_material_name(&material_id)
                    }
                };
                MaterialRequirement::new(material_name, required_per_unit)
            })
            .collect();

        Ok(Some(ResolvedRecipe { name, materials }))
    }
}

/// 以預設配置（佔位名稱策略）整合
pub fn integrate(
    items: &Table<ItemRecord>,
    recipe_names: &Table<RecipeNameRecord>,
    consume_entries: &Table<ConsumeEntry>,
) -> RecipeIndex {
    RecipeIntegrator::default().integrate(items, recipe_names, consume_entries)
}
