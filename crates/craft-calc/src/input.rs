//! 使用者輸入解析

use craft_core::{Quantity, RecipeIndex, ResolvedRecipe, ValidationError};

/// 解析製作數量
///
/// 必須是大於 0 的整數；非數字、0 或負數都是驗證錯誤，不會被夾到合法範圍。
pub fn parse_multiplier(raw: &str) -> Result<Quantity, ValidationError> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(value) if value <= 0 => Err(ValidationError::NonPositiveMultiplier(value)),
        Ok(value) => Ok(value as Quantity),
        // 超出 i64 但仍是正整數
        Err(_) => trimmed
            .parse::<Quantity>()
            .map_err(|_| ValidationError::InvalidMultiplier(raw.to_string())),
    }
}

/// 選單的選擇結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
    /// 選擇了開頭的空白選項
    None,
    /// 選擇了某個配方
    Recipe(&'a ResolvedRecipe),
}

/// 解析選單選擇：空白代表未選擇，其他名稱必須完全符合某個配方
pub fn resolve_selection<'a>(
    index: &'a RecipeIndex,
    selected: &str,
) -> Result<Selection<'a>, ValidationError> {
    if selected.is_empty() {
        return Ok(Selection::None);
    }
    index
        .find(selected)
        .map(Selection::Recipe)
        .ok_or_else(|| ValidationError::UnknownRecipe(selected.to_string()))
}

/// 驗證「計算」動作的輸入：必須已選擇配方且數量有效
pub fn validate_request<'a>(
    index: &'a RecipeIndex,
    selected: &str,
    multiplier_raw: &str,
) -> Result<(&'a ResolvedRecipe, Quantity), ValidationError> {
    let recipe = match resolve_selection(index, selected)? {
        Selection::Recipe(recipe) => recipe,
        Selection::None => return Err(ValidationError::MissingSelection),
    };
    let multiplier = parse_multiplier(multiplier_raw)?;
    Ok((recipe, multiplier))
}
