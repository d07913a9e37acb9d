//! 名稱排序

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// 近似語系排序的字串比較
///
/// 1. 去除重音、忽略大小寫比較（`é` 與 `e` 同級）
/// 2. 相同時比較重音，無重音排在前
/// 3. 仍相同時小寫排在大寫之前
/// 4. 最後比較原始碼點
///
/// 結果是全序：只有完全相同的字串才回傳 `Equal`。
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| a.chars().map(case_rank).cmp(b.chars().map(case_rank)))
        .then_with(|| a.cmp(b))
}

/// 分解後去除組合符號並轉小寫
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// 分解後轉小寫，保留組合符號
fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_rank(c: char) -> u8 {
    u8::from(c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sorted(mut names: Vec<&str>) -> Vec<&str> {
        names.sort_by(|a, b| locale_cmp(a, b));
        names
    }

    #[test]
    fn test_case_insensitive_primary() {
        assert_eq!(
            sorted(vec!["banana", "Apple", "cherry"]),
            vec!["Apple", "banana", "cherry"]
        );
    }

    #[test]
    fn test_lowercase_first_on_tie() {
        assert_eq!(sorted(vec!["Axe", "axe"]), vec!["axe", "Axe"]);
        assert_eq!(locale_cmp("axe", "axe"), Ordering::Equal);
    }

    #[test]
    fn test_accents_sort_with_base_letter() {
        assert_eq!(sorted(vec!["fig", "éclair"]), vec!["éclair", "fig"]);
        assert_eq!(
            sorted(vec!["Zinc", "Äther", "apple"]),
            vec!["apple", "Äther", "Zinc"]
        );
    }

    #[test]
    fn test_unaccented_first_on_tie() {
        assert_eq!(sorted(vec!["résumé", "resume"]), vec!["resume", "résumé"]);
    }

    #[test]
    fn test_hangul_order() {
        assert_eq!(sorted(vec!["도끼", "가방", "나무"]), vec!["가방", "나무", "도끼"]);
    }

    proptest! {
        #[test]
        fn prop_antisymmetric(a in "\\PC{0,8}", b in "\\PC{0,8}") {
            prop_assert_eq!(locale_cmp(&a, &b), locale_cmp(&b, &a).reverse());
        }

        #[test]
        fn prop_equal_only_when_identical(a in "[a-zA-Z]{0,6}", b in "[a-zA-Z]{0,6}") {
            prop_assert_eq!(locale_cmp(&a, &b) == Ordering::Equal, a == b);
        }
    }
}
