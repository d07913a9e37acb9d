//! 目錄資料表載入器

use craft_core::TableFiles;
use std::path::{Path, PathBuf};

use crate::{parse_raw_table, LoadError, RawTable, TableKind, TableLoader};

/// 從目錄中的 JSON 檔案載入資料表
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    dir: PathBuf,
    files: TableFiles,
}

impl DirectoryLoader {
    /// 使用預設檔名
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: TableFiles::default(),
        }
    }

    /// 建構器模式：設置檔名
    pub fn with_files(mut self, files: TableFiles) -> Self {
        self.files = files;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 資料表的完整路徑
    pub fn path_of(&self, kind: TableKind) -> PathBuf {
        let file = match kind {
            TableKind::Items => &self.files.items,
            TableKind::Recipes => &self.files.recipes,
            TableKind::Consumables => &self.files.consumables,
        };
        self.dir.join(file)
    }
}

impl TableLoader for DirectoryLoader {
    fn load_table(&self, kind: TableKind) -> Result<RawTable, LoadError> {
        let path = self.path_of(kind);
        tracing::debug!("讀取 {}: {}", kind, path.display());

        let content = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::MissingTable(kind)
            } else {
                LoadError::Io {
                    table: kind,
                    path: path.clone(),
                    source,
                }
            }
        })?;

        parse_raw_table(kind, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_source_tables;
    use std::fs;

    fn write_tables(dir: &Path) {
        fs::write(dir.join("ItemTable.json"), r#"{"1": {"Name": "Wood"}}"#).unwrap();
        fs::write(dir.join("RecipeTable.json"), r#"{"100": {"Name": "Axe"}}"#).unwrap();
        fs::write(
            dir.join("ConsumableItemTable.json"),
            r#"{"c1": {"GetItemList": [[9, 100]], "ConsumeList": [[1, 2]]}}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());

        let tables = load_source_tables(&DirectoryLoader::new(dir.path())).unwrap();

        assert_eq!(tables.items.len(), 1);
        assert_eq!(tables.consume_entries.len(), 1);
    }

    #[test]
    fn test_custom_file_names() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());
        fs::rename(dir.path().join("ItemTable.json"), dir.path().join("items.json")).unwrap();

        let files = TableFiles {
            items: "items.json".to_string(),
            ..TableFiles::default()
        };
        let loader = DirectoryLoader::new(dir.path()).with_files(files);

        assert!(load_source_tables(&loader).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let err = DirectoryLoader::new(dir.path())
            .load_table(TableKind::Recipes)
            .unwrap_err();

        assert!(matches!(err, LoadError::MissingTable(TableKind::Recipes)));
    }
}
