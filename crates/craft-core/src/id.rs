//! 識別碼

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// 不透明識別碼
///
/// 來源資料中的識別碼可能是數字或字串，統一以文字形式保存，
/// 因此 `100` 與 `"100"` 視為同一個鍵。識別碼只用於查找，不參與運算。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

/// 物品識別碼（ItemTable / RecipeTable 的鍵）
pub type ItemId = Identifier;

/// 製作定義識別碼（ConsumableItemTable 的鍵）
pub type ConsumeId = Identifier;

impl Identifier {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// 從 JSON 值解析識別碼，只接受數字或字串
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Identifier {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<u64> for Identifier {
    fn from(raw: u64) -> Self {
        Self(raw.to_string())
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Identifier::from_value(&value).ok_or_else(|| {
            serde::de::Error::custom(format!("識別碼必須是數字或字串，實際為 {value}"))
        })
    }
}
