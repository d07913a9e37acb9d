//! 髒標記追蹤

use std::collections::BTreeSet;

/// 髒標記追蹤器：記錄不足量需要重新計算的材料
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    dirty_materials: BTreeSet<String>,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self::default()
    }

    /// 標記材料為髒
    pub fn mark_dirty(&mut self, material: impl Into<String>) {
        self.dirty_materials.insert(material.into());
    }

    pub fn is_clean(&self) -> bool {
        self.dirty_materials.is_empty()
    }

    /// 取出並清除所有髒材料（依名稱排序）
    pub fn take_dirty_materials(&mut self) -> Vec<String> {
        std::mem::take(&mut self.dirty_materials).into_iter().collect()
    }
}
