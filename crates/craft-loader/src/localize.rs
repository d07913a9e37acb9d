//! 名稱在地化工具
//!
//! 翻譯流程：先把資料表中所有 `Name` 依鍵順序匯出成一行一個的文字檔，
//! 翻譯後再依相同順序寫回，其他欄位與鍵順序保持不變。

use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::RawTable;

const NAME_FIELD: &str = "Name";

/// 在地化錯誤
#[derive(Debug, thiserror::Error)]
pub enum LocalizeError {
    #[error("讀寫 {path} 失敗: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} 的 JSON 格式不正確: {detail}")]
    Parse { path: PathBuf, detail: String },
}

/// 名稱寫回結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeReport {
    /// 已替換的名稱數量
    pub replaced: usize,

    /// 翻譯名稱不足，提前停止
    pub exhausted: bool,

    /// 未使用的翻譯名稱數量
    pub unused: usize,
}

/// 依鍵順序取出所有記錄的 `Name`；沒有 `Name` 的記錄略過
pub fn extract_names(table: &RawTable) -> Vec<String> {
    table
        .values()
        .filter_map(|record| record.get(NAME_FIELD))
        .map(|name| match name {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

/// 依鍵順序以翻譯名稱覆寫 `Name`
///
/// 沒有 `Name` 的記錄不消耗翻譯名稱；名稱用完時停止並標記 `exhausted`。
pub fn merge_names(table: &mut RawTable, names: &[String]) -> MergeReport {
    let mut report = MergeReport::default();
    let mut remaining = names.iter();

    for (key, record) in table.iter_mut() {
        let Value::Object(fields) = record else {
            continue;
        };
        let Some(slot) = fields.get_mut(NAME_FIELD) else {
            continue;
        };
        match remaining.next() {
            Some(name) => {
                *slot = Value::String(name.clone());
                report.replaced += 1;
            }
            None => {
                tracing::warn!(
                    "翻譯名稱不足，已替換 {} 筆，停在記錄 {}",
                    report.replaced,
                    key
                );
                report.exhausted = true;
                break;
            }
        }
    }

    report.unused = remaining.len();
    if report.unused > 0 {
        tracing::warn!("有 {} 個翻譯名稱未被使用", report.unused);
    }
    report
}

/// 匯出名稱到文字檔（一行一個），回傳名稱數量
pub fn extract_names_file(input: &Path, output: &Path) -> Result<usize, LocalizeError> {
    let table = read_table(input)?;
    let names = extract_names(&table);

    let mut content = String::new();
    for name in &names {
        content.push_str(name);
        content.push('\n');
    }
    write_file(output, &content)?;

    tracing::info!("已匯出 {} 個名稱到 {}", names.len(), output.display());
    Ok(names.len())
}

/// 讀取翻譯名稱檔並寫回資料表，結果寫入 `output`
///
/// 每行去除前後空白後即為一個名稱，空行也算一個名稱以保持逐行對應。
pub fn merge_names_file(
    table_path: &Path,
    names_path: &Path,
    output: &Path,
) -> Result<MergeReport, LocalizeError> {
    let mut table = read_table(table_path)?;
    let names: Vec<String> = read_file(names_path)?
        .lines()
        .map(|line| line.trim().to_string())
        .collect();

    let report = merge_names(&mut table, &names);

    let json = serde_json::to_string_pretty(&table).map_err(|e| LocalizeError::Parse {
        path: output.to_path_buf(),
        detail: e.to_string(),
    })?;
    write_file(output, &json)?;

    tracing::info!(
        "已替換 {} 個名稱，結果寫入 {}",
        report.replaced,
        output.display()
    );
    Ok(report)
}

fn read_file(path: &Path) -> Result<String, LocalizeError> {
    std::fs::read_to_string(path).map_err(|source| LocalizeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), LocalizeError> {
    std::fs::write(path, content).map_err(|source| LocalizeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_table(path: &Path) -> Result<RawTable, LocalizeError> {
    let content = read_file(path)?;
    match serde_json::from_str(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(LocalizeError::Parse {
            path: path.to_path_buf(),
            detail: "頂層必須是 JSON 物件".to_string(),
        }),
        Err(e) => Err(LocalizeError::Parse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn table() -> RawTable {
        json!({
            "3": {"Name": "Wood", "Grade": 1},
            "1": {"Icon": "none"},
            "2": {"Name": "Iron"}
        })
        .as_object()
        .unwrap()
        .clone()
    }

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_in_key_order() {
        assert_eq!(extract_names(&table()), vec!["Wood", "Iron"]);
    }

    #[test]
    fn test_merge_replaces_names_only() {
        let mut table = table();

        let report = merge_names(&mut table, &names(&["나무", "철"]));

        assert_eq!(
            report,
            MergeReport {
                replaced: 2,
                exhausted: false,
                unused: 0
            }
        );
        assert_eq!(table["3"], json!({"Name": "나무", "Grade": 1}));
        assert_eq!(table["1"], json!({"Icon": "none"}));
        assert_eq!(table["2"]["Name"], "철");
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_merge_stops_when_names_run_out() {
        let mut table = table();

        let report = merge_names(&mut table, &names(&["나무"]));

        assert_eq!(report.replaced, 1);
        assert!(report.exhausted);
        assert_eq!(table["2"]["Name"], "Iron");
    }

    #[test]
    fn test_merge_reports_unused() {
        let mut table = table();

        let report = merge_names(&mut table, &names(&["a", "b", "c"]));

        assert_eq!(report.unused, 1);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let table_path = dir.path().join("ItemTable.json");
        let names_path = dir.path().join("names.txt");
        let output = dir.path().join("ItemTable_translated.json");
        fs::write(&table_path, serde_json::to_string(&table()).unwrap()).unwrap();

        assert_eq!(extract_names_file(&table_path, &names_path).unwrap(), 2);
        assert_eq!(fs::read_to_string(&names_path).unwrap(), "Wood\nIron\n");

        fs::write(&names_path, "  나무 \n철\n").unwrap();
        let report = merge_names_file(&table_path, &names_path, &output).unwrap();
        assert_eq!(report.replaced, 2);

        let written = fs::read_to_string(&output).unwrap();
        // 非 ASCII 字元不跳脫，兩格縮排
        assert!(written.contains("\"Name\": \"나무\""));
        assert!(written.contains("\n  \"3\": {"));
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_names_file(&dir.path().join("nope.json"), &dir.path().join("out.txt"))
            .unwrap_err();
        assert!(matches!(err, LocalizeError::Io { .. }));
    }
}
