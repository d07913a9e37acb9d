//! 記憶體資料表載入器

use std::collections::HashMap;

use crate::{parse_raw_table, LoadError, RawTable, TableKind, TableLoader};

/// 從記憶體中的 JSON 文字載入資料表（測試與嵌入用途）
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    sources: HashMap<TableKind, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置資料表內容
    pub fn with_json(mut self, kind: TableKind, content: impl Into<String>) -> Self {
        self.sources.insert(kind, content.into());
        self
    }
}

impl TableLoader for MemoryLoader {
    fn load_table(&self, kind: TableKind) -> Result<RawTable, LoadError> {
        let content = self
            .sources
            .get(&kind)
            .ok_or(LoadError::MissingTable(kind))?;
        parse_raw_table(kind, content)
    }
}
