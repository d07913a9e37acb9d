//! # Craft Loader
//!
//! 來源資料表載入與名稱在地化工具

pub mod directory;
pub mod localize;
pub mod memory;

// Re-export 主要類型
pub use directory::DirectoryLoader;
pub use localize::{
    extract_names, extract_names_file, merge_names, merge_names_file, LocalizeError, MergeReport,
};
pub use memory::MemoryLoader;

use craft_core::{ConsumeEntry, ItemRecord, RecipeNameRecord, SourceTables, Table};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

/// 原始 JSON 資料表
pub type RawTable = Map<String, Value>;

/// 三種來源資料表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// ItemTable
    Items,
    /// RecipeTable
    Recipes,
    /// ConsumableItemTable
    Consumables,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [TableKind::Items, TableKind::Recipes, TableKind::Consumables];
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableKind::Items => "ItemTable",
            TableKind::Recipes => "RecipeTable",
            TableKind::Consumables => "ConsumableItemTable",
        };
        f.write_str(name)
    }
}

/// 載入錯誤
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("讀取 {table} 失敗（{path}）: {source}")]
    Io {
        table: TableKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{table} 解析錯誤: {detail}")]
    Parse { table: TableKind, detail: String },

    #[error("找不到資料表 {0}")]
    MissingTable(TableKind),

    #[error("{table} 的記錄 {key} 格式錯誤: {detail}")]
    Record {
        table: TableKind,
        key: String,
        detail: String,
    },

    /// 聚合錯誤：任何一張表失敗，整個初始化失敗
    #[error("資料表載入失敗: {}", summarize(.failures))]
    Initialization { failures: Vec<LoadError> },
}

fn summarize(failures: &[LoadError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl LoadError {
    /// 失敗的資料表
    pub fn failed_tables(&self) -> Vec<TableKind> {
        match self {
            LoadError::Io { table, .. }
            | LoadError::Parse { table, .. }
            | LoadError::Record { table, .. }
            | LoadError::MissingTable(table) => vec![*table],
            LoadError::Initialization { failures } => {
                failures.iter().flat_map(LoadError::failed_tables).collect()
            }
        }
    }
}

/// 資料表載入器（外部協作者）
///
/// 實作只需回傳原始 JSON 物件；型別轉換在所有資料表都載入後統一進行。
pub trait TableLoader: Sync {
    fn load_table(&self, kind: TableKind) -> Result<RawTable, LoadError>;
}

/// 並行載入三張資料表並轉換為 [`SourceTables`]
///
/// 三個載入互相獨立，全部完成後才進行轉換；
/// 任何一張失敗都回傳單一的 [`LoadError::Initialization`]，不產生部分結果。
pub fn load_source_tables<L: TableLoader + ?Sized>(loader: &L) -> Result<SourceTables, LoadError> {
    tracing::info!("開始載入來源資料表");
    let start_time = std::time::Instant::now();

    let (items, (recipes, consumables)) = rayon::join(
        || loader.load_table(TableKind::Items),
        || {
            rayon::join(
                || loader.load_table(TableKind::Recipes),
                || loader.load_table(TableKind::Consumables),
            )
        },
    );

    // 所有載入完成後才檢查結果
    let items = items.and_then(|raw| typed_table::<ItemRecord>(TableKind::Items, &raw));
    let recipes = recipes.and_then(|raw| typed_table::<RecipeNameRecord>(TableKind::Recipes, &raw));
    let consumables =
        consumables.and_then(|raw| typed_table::<ConsumeEntry>(TableKind::Consumables, &raw));

    match (items, recipes, consumables) {
        (Ok(items), Ok(recipes), Ok(consumables)) => {
            tracing::info!(
                "資料表載入完成，耗時 {:?}：物品 {} 筆，配方名稱 {} 筆，製作定義 {} 筆",
                start_time.elapsed(),
                items.len(),
                recipes.len(),
                consumables.len()
            );
            Ok(SourceTables::new(items, recipes, consumables))
        }
        (items, recipes, consumables) => {
            let failures: Vec<LoadError> = [items.err(), recipes.err(), consumables.err()]
                .into_iter()
                .flatten()
                .collect();
            for failure in &failures {
                tracing::error!("{}", failure);
            }
            Err(LoadError::Initialization { failures })
        }
    }
}

fn typed_table<T: serde::de::DeserializeOwned>(
    kind: TableKind,
    raw: &RawTable,
) -> Result<Table<T>, LoadError> {
    Table::from_json_map(raw).map_err(|err| LoadError::Record {
        table: kind,
        key: err.key,
        detail: err.source.to_string(),
    })
}

/// 將 JSON 文字解析為原始資料表（頂層必須是物件）
pub fn parse_raw_table(kind: TableKind, content: &str) -> Result<RawTable, LoadError> {
    let value: Value = serde_json::from_str(content).map_err(|e| LoadError::Parse {
        table: kind,
        detail: e.to_string(),
    })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(LoadError::Parse {
            table: kind,
            detail: format!("頂層必須是 JSON 物件，實際為 {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
