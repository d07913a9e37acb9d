//! 來源資料表模型
//!
//! 三張正規化資料表（ItemTable、RecipeTable、ConsumableItemTable）都是
//! 「識別碼 → 記錄」的 JSON 物件。[`Table`] 保留原始鍵順序，
//! 整合器依此順序走訪製作定義。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::id::{ConsumeId, Identifier, ItemId};
use crate::recipe::Quantity;
use crate::{CraftError, Result};

/// 保留鍵順序的資料表
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    keys: Vec<Identifier>,
    rows: HashMap<Identifier, T>,
}

/// 單筆記錄解析失敗
#[derive(Debug, thiserror::Error)]
#[error("記錄 {key} 解析失敗: {source}")]
pub struct RecordError {
    pub key: String,
    #[source]
    pub source: serde_json::Error,
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            rows: HashMap::new(),
        }
    }

    /// 插入記錄；鍵已存在時覆蓋內容但保留原本位置
    pub fn insert(&mut self, key: impl Into<Identifier>, row: T) {
        let key = key.into();
        if self.rows.insert(key.clone(), row).is_none() {
            self.keys.push(key);
        }
    }

    pub fn get(&self, key: &Identifier) -> Option<&T> {
        self.rows.get(key)
    }

    pub fn contains_key(&self, key: &Identifier) -> bool {
        self.rows.contains_key(key)
    }

    /// 依原始鍵順序走訪
    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &T)> {
        self.keys
            .iter()
            .filter_map(move |key| self.rows.get(key).map(|row| (key, row)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Identifier> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<T: DeserializeOwned> Table<T> {
    /// 從 JSON 物件建立資料表，任何一筆記錄格式不符即整張表失敗
    pub fn from_json_map(map: &Map<String, Value>) -> std::result::Result<Self, RecordError> {
        let mut table = Table::new();
        for (key, value) in map {
            let row = T::deserialize(value).map_err(|source| RecordError {
                key: key.clone(),
                source,
            })?;
            table.insert(key.as_str(), row);
        }
        Ok(table)
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<Identifier>, T> FromIterator<(K, T)> for Table<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut table = Table::new();
        for (key, row) in iter {
            table.insert(key, row);
        }
        table
    }
}

/// 物品記錄（ItemTable）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemRecord {
    /// 顯示名稱；部分記錄沒有名稱
    #[serde(rename = "Name", alias = "name", default)]
    pub name: Option<String>,
}

impl ItemRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

impl Table<ItemRecord> {
    /// 物品名稱（空字串視為沒有名稱）
    pub fn name_of(&self, id: &ItemId) -> Option<&str> {
        self.get(id)
            .and_then(|item| item.name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

/// 配方名稱記錄（RecipeTable）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecipeNameRecord {
    #[serde(rename = "Name", alias = "name", default)]
    pub name: Option<String>,
}

impl RecipeNameRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

impl Table<RecipeNameRecord> {
    /// 配方表中的名稱（空字串視為沒有名稱）
    pub fn name_of(&self, id: &ItemId) -> Option<&str> {
        self.get(id)
            .and_then(|recipe| recipe.name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

/// 製作定義（ConsumableItemTable）
///
/// 清單保留為原始 JSON 值，連清單本身不是陣列的情況也在整合時逐筆處理，
/// 不會讓整張表載入失敗。缺少的清單視為空清單。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumeEntry {
    /// (副產物ID, 產出物品ID) 配對
    #[serde(rename = "GetItemList", alias = "getItemList", default = "empty_list")]
    pub get_item_list: Value,

    /// (材料ID, 數量) 配對
    #[serde(rename = "ConsumeList", alias = "consumeList", default = "empty_list")]
    pub consume_list: Value,
}

fn empty_list() -> Value {
    Value::Array(Vec::new())
}

impl Default for ConsumeEntry {
    fn default() -> Self {
        Self {
            get_item_list: empty_list(),
            consume_list: empty_list(),
        }
    }
}

impl ConsumeEntry {
    /// 建構器：以產出物品識別碼建立製作定義
    pub fn new(produced: impl Into<Identifier>) -> Self {
        let produced: Identifier = produced.into();
        Self {
            get_item_list: Value::Array(vec![Value::Array(vec![
                Value::from(0),
                Value::String(produced.as_str().to_string()),
            ])]),
            consume_list: empty_list(),
        }
    }

    /// 建構器：加入一項材料
    pub fn with_material(mut self, material: impl Into<Identifier>, quantity: Quantity) -> Self {
        let material: Identifier = material.into();
        let pair = Value::Array(vec![
            Value::String(material.as_str().to_string()),
            Value::from(quantity),
        ]);
        match &mut self.consume_list {
            Value::Array(list) => list.push(pair),
            other => *other = Value::Array(vec![pair]),
        }
        self
    }

    /// GetItemList 是否有任何配對
    pub fn has_output(&self) -> bool {
        self.get_item_list
            .as_array()
            .is_some_and(|list| !list.is_empty())
    }

    /// 產出物品識別碼：GetItemList 第一組配對的第二個元素
    ///
    /// 清單為空時回傳 `Ok(None)`；清單或配對格式錯誤時回傳 `MalformedEntry`。
    pub fn produced_item_id(&self, entry: &ConsumeId) -> Result<Option<ItemId>> {
        let list = as_list(&self.get_item_list, entry, "GetItemList")?;
        let Some(first) = list.first() else {
            return Ok(None);
        };
        let (_, produced) = split_pair(first).ok_or_else(|| CraftError::MalformedEntry {
            entry: entry.to_string(),
            reason: format!("GetItemList 的第一組配對格式錯誤: {first}"),
        })?;
        Identifier::from_value(produced)
            .map(Some)
            .ok_or_else(|| CraftError::MalformedEntry {
                entry: entry.to_string(),
                reason: format!("產出物品識別碼無效: {produced}"),
            })
    }

    /// 逐筆解析 (材料ID, 每單位數量)
    pub fn materials(&self, entry: &ConsumeId) -> Result<Vec<(ItemId, Quantity)>> {
        as_list(&self.consume_list, entry, "ConsumeList")?
            .iter()
            .map(|pair| {
                let (material, quantity) =
                    split_pair(pair).ok_or_else(|| CraftError::MalformedEntry {
                        entry: entry.to_string(),
                        reason: format!("ConsumeList 配對格式錯誤: {pair}"),
                    })?;
                let material =
                    Identifier::from_value(material).ok_or_else(|| CraftError::MalformedEntry {
                        entry: entry.to_string(),
                        reason: format!("材料識別碼無效: {material}"),
                    })?;
                let quantity = parse_quantity(quantity).ok_or_else(|| {
                    CraftError::InvalidQuantity {
                        entry: entry.to_string(),
                        raw: quantity.to_string(),
                    }
                })?;
                Ok((material, quantity))
            })
            .collect()
    }
}

fn as_list<'a>(value: &'a Value, entry: &ConsumeId, field: &str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| CraftError::MalformedEntry {
            entry: entry.to_string(),
            reason: format!("{field} 不是陣列: {value}"),
        })
}

/// 拆出配對的前兩個元素，多餘元素忽略
fn split_pair(value: &Value) -> Option<(&Value, &Value)> {
    match value.as_array()?.as_slice() {
        [first, second, ..] => Some((first, second)),
        _ => None,
    }
}

/// 解析非負整數數量：JSON 整數、沒有小數部分的浮點數，或內容為整數的字串
pub fn parse_quantity(value: &Value) -> Option<Quantity> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= Quantity::MAX as f64)
                .map(|f| f as Quantity)
        }),
        Value::String(s) => s.trim().parse::<Quantity>().ok(),
        _ => None,
    }
}

/// 三張來源資料表
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub items: Table<ItemRecord>,
    pub recipe_names: Table<RecipeNameRecord>,
    pub consume_entries: Table<ConsumeEntry>,
}

impl SourceTables {
    pub fn new(
        items: Table<ItemRecord>,
        recipe_names: Table<RecipeNameRecord>,
        consume_entries: Table<ConsumeEntry>,
    ) -> Self {
        Self {
            items,
            recipe_names,
            consume_entries,
        }
    }

    pub fn item_name(&self, id: &ItemId) -> Option<&str> {
        self.items.name_of(id)
    }

    pub fn recipe_name(&self, id: &ItemId) -> Option<&str> {
        self.recipe_names.name_of(id)
    }
}
