//! 顯示端介面
//!
//! 核心只透過 [`Presenter`] 輸出選單、材料明細、摘要與訊息。

use craft_calc::{DeficitRow, DeficitSummary};

/// 選單選項；`value` 為空字串代表開頭的「未選擇」選項
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// 開頭的空白選項
    pub fn blank(prompt: impl Into<String>) -> Self {
        Self::new(prompt, "")
    }

    /// 配方選項（顯示文字即配方名稱）
    pub fn recipe(name: &str) -> Self {
        Self::new(name, name)
    }

    pub fn is_blank(&self) -> bool {
        self.value.is_empty()
    }
}

/// 顯示端（外部協作者）
pub trait Presenter {
    /// 顯示配方選單
    fn render_options(&mut self, options: &[SelectOption]);

    /// 顯示材料明細
    fn render_rows(&mut self, rows: &[DeficitRow]);

    /// 更新單一材料列
    fn update_row(&mut self, row: &DeficitRow);

    /// 顯示總不足量摘要
    fn render_summary(&mut self, summary: &DeficitSummary);

    /// 顯示訊息（驗證錯誤、載入失敗等）
    fn render_message(&mut self, message: &str);

    /// 清除明細、摘要與訊息（不清除選單）
    fn clear_output(&mut self);
}

/// 文字顯示端，內容保存在記憶體中
#[derive(Debug, Clone, Default)]
pub struct TextPresenter {
    options: Vec<SelectOption>,
    rows: Vec<DeficitRow>,
    summary: Option<DeficitSummary>,
    messages: Vec<String>,
}

impl TextPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn rows(&self) -> &[DeficitRow] {
        &self.rows
    }

    pub fn summary(&self) -> Option<&DeficitSummary> {
        self.summary.as_ref()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// 單列文字：`名稱: 總需求`，有不足時附上不足量
    pub fn format_row(row: &DeficitRow) -> String {
        if row.deficit == 0 {
            format!("{}: {}", row.material, row.required_total)
        } else {
            format!(
                "{}: {} (deficit {})",
                row.material, row.required_total, row.deficit
            )
        }
    }

    /// 目前輸出區的文字（明細、訊息、摘要各一行）
    pub fn output(&self) -> String {
        let mut lines: Vec<String> = self.rows.iter().map(Self::format_row).collect();
        lines.extend(self.messages.iter().cloned());
        if let Some(summary) = &self.summary {
            lines.push(summary.to_string());
        }
        lines.join("\n")
    }
}

impl Presenter for TextPresenter {
    fn render_options(&mut self, options: &[SelectOption]) {
        self.options = options.to_vec();
    }

    fn render_rows(&mut self, rows: &[DeficitRow]) {
        self.rows = rows.to_vec();
    }

    fn update_row(&mut self, row: &DeficitRow) {
        match self.rows.iter_mut().find(|r| r.material == row.material) {
            Some(existing) => *existing = row.clone(),
            None => tracing::debug!("材料 {} 未顯示，略過更新", row.material),
        }
    }

    fn render_summary(&mut self, summary: &DeficitSummary) {
        self.summary = Some(*summary);
    }

    fn render_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn clear_output(&mut self) {
        self.rows.clear();
        self.summary = None;
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_output() {
        let mut presenter = TextPresenter::new();
        presenter.render_rows(&[DeficitRow::new("Wood", 6, 4), DeficitRow::new("Iron", 2, 5)]);
        presenter.render_summary(&DeficitSummary::TotalDeficit(2));

        assert_eq!(
            presenter.output(),
            "Wood: 6 (deficit 2)\nIron: 2\ntotal deficit = 2"
        );
    }

    #[test]
    fn test_update_row_in_place() {
        let mut presenter = TextPresenter::new();
        presenter.render_rows(&[DeficitRow::new("Wood", 6, 0), DeficitRow::new("Iron", 2, 0)]);

        presenter.update_row(&DeficitRow::new("Wood", 6, 6));
        presenter.update_row(&DeficitRow::new("Gold", 1, 0));

        assert_eq!(presenter.rows().len(), 2);
        assert_eq!(presenter.rows()[0].deficit, 0);
    }

    #[test]
    fn test_clear_keeps_options() {
        let mut presenter = TextPresenter::new();
        presenter.render_options(&[SelectOption::blank("Select"), SelectOption::recipe("Axe")]);
        presenter.render_message("oops");
        presenter.render_summary(&DeficitSummary::Sufficient);

        presenter.clear_output();

        assert_eq!(presenter.options().len(), 2);
        assert!(presenter.options()[0].is_blank());
        assert_eq!(presenter.output(), "");
    }
}
