//! 集成測試

use craft::{
    calculate_requirements, load_source_tables, CraftApp, CraftConfig, DeficitSummary,
    DirectoryLoader, MemoryLoader, RecipeIntegrator, StockLevels, TableKind, TextPresenter,
    UnresolvedRecipePolicy,
};
use craft_core::{RecipeIndex, WarningSeverity};
use craft_loader::{extract_names_file, merge_names_file};
use rstest::rstest;
use std::fs;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_index(config: CraftConfig) -> RecipeIndex {
    let tables = load_source_tables(&DirectoryLoader::new(fixtures_dir())).unwrap();
    RecipeIntegrator::new(config).integrate_tables(&tables)
}

fn recipe_names(index: &RecipeIndex) -> Vec<&str> {
    index.names().collect()
}

#[test]
fn test_fixture_integration_placeholder_policy() {
    let index = fixture_index(CraftConfig::default());

    assert_eq!(
        recipe_names(&index),
        vec![
            "Axe",
            "Hunting Bow",
            "RawAxeHead",
            "unresolved recipe id: 103",
            "unresolved recipe id: 555",
        ]
    );

    let severities: Vec<_> = index
        .warnings()
        .iter()
        .map(|w| (w.entry_id.as_str(), w.severity))
        .collect();
    assert_eq!(
        severities,
        vec![
            ("c4", WarningSeverity::Warning),
            ("c4", WarningSeverity::Info),
            ("c6", WarningSeverity::Error),
            ("c7", WarningSeverity::Warning),
        ]
    );

    let unresolved = index.find("unresolved recipe id: 555").unwrap();
    assert_eq!(unresolved.materials[1].name, "unknown material id: 77");
}

#[test]
fn test_fixture_integration_drop_policy() {
    let config =
        CraftConfig::default().with_unresolved_recipe_policy(UnresolvedRecipePolicy::Drop);

    let index = fixture_index(config);

    assert_eq!(recipe_names(&index), vec!["Axe", "Hunting Bow", "RawAxeHead"]);
    assert_eq!(index.warnings().len(), 3);
}

#[test]
fn test_integration_is_idempotent() {
    let tables = load_source_tables(&DirectoryLoader::new(fixtures_dir())).unwrap();
    let integrator = RecipeIntegrator::default();

    let first = integrator.integrate_tables(&tables);
    let second = integrator.integrate_tables(&tables);

    assert_eq!(first.recipes(), second.recipes());
    assert_eq!(first.warnings(), second.warnings());
}

#[test]
fn test_axe_example_end_to_end() {
    // items {1: Wood}、recipeNames {100: Axe}、c1 產出 100 消耗 2 個 Wood
    let loader = MemoryLoader::new()
        .with_json(TableKind::Items, r#"{"1": {"Name": "Wood"}}"#)
        .with_json(TableKind::Recipes, r#"{"100": {"Name": "Axe"}}"#)
        .with_json(
            TableKind::Consumables,
            r#"{"c1": {"GetItemList": [[9, 100]], "ConsumeList": [[1, 2]]}}"#,
        );
    let tables = load_source_tables(&loader).unwrap();
    let config =
        CraftConfig::default().with_unresolved_recipe_policy(UnresolvedRecipePolicy::Drop);
    let index = RecipeIntegrator::new(config).integrate_tables(&tables);

    assert_eq!(index.len(), 1);
    assert_eq!(index.recipes()[0].materials[0].required_per_unit, 2);

    let stock = StockLevels::new().with_stock("Wood", 4);
    let result = calculate_requirements(&index, "Axe", "3", &stock).unwrap();

    assert_eq!(result.totals.total("Wood"), Some(6));
    assert_eq!(result.deficits.grand_total_deficit, 2);
    assert_eq!(result.summary().to_string(), "total deficit = 2");
}

#[test]
fn test_non_array_entry_lists_skip_only_that_entry() {
    let loader = MemoryLoader::new()
        .with_json(TableKind::Items, r#"{"1": {"Name": "Wood"}}"#)
        .with_json(TableKind::Recipes, r#"{"100": {"Name": "Axe"}}"#)
        .with_json(
            TableKind::Consumables,
            r#"{
                "bad": {"GetItemList": 100, "ConsumeList": [[1, 2]]},
                "ok": {"GetItemList": [[9, 100]], "ConsumeList": [[1, 2.0]]}
            }"#,
        );

    let mut app = CraftApp::initialize(&loader, CraftConfig::default(), TextPresenter::new());

    assert!(app.is_ready());
    assert_eq!(app.presenter().options().len(), 2);
    app.on_select("Axe");
    app.on_calculate("2").unwrap();
    assert_eq!(app.presenter().output(), "Wood: 4 (deficit 4)\ntotal deficit = 4");
}

#[rstest]
#[case(r#"{"100": {"Name": "RawAxeHead"}}"#, "RawAxeHead")]
#[case(r#"{}"#, "unresolved recipe id: 100")]
fn test_name_fallback(#[case] items: &str, #[case] expected: &str) {
    let loader = MemoryLoader::new()
        .with_json(TableKind::Items, items)
        .with_json(TableKind::Recipes, "{}")
        .with_json(
            TableKind::Consumables,
            r#"{"c1": {"GetItemList": [[9, 100]], "ConsumeList": []}}"#,
        );
    let tables = load_source_tables(&loader).unwrap();

    let index = RecipeIntegrator::default().integrate_tables(&tables);

    assert_eq!(recipe_names(&index), vec![expected]);
}

#[test]
fn test_same_name_materials_are_merged() {
    let index = fixture_index(CraftConfig::default());

    let result = calculate_requirements(&index, "RawAxeHead", "3", &StockLevels::new()).unwrap();

    let totals: Vec<_> = result.totals.iter().collect();
    assert_eq!(totals, vec![("Iron Ingot", 3), ("Wood", 9)]);
    assert_eq!(result.deficits.grand_total_deficit, 12);
}

#[rstest]
#[case("0")]
#[case("-1")]
#[case("two")]
fn test_invalid_multiplier_is_rejected(#[case] raw: &str) {
    let index = fixture_index(CraftConfig::default());

    let err = calculate_requirements(&index, "Axe", raw, &StockLevels::new()).unwrap_err();

    assert!(err.is_validation());
}

#[test]
fn test_app_flow_from_directory() {
    let loader = DirectoryLoader::new(fixtures_dir());
    let stock = StockLevels::new()
        .with_stock("Wood", 10)
        .with_stock("string", 1);
    let mut app = CraftApp::initialize(&loader, CraftConfig::default(), TextPresenter::new())
        .with_stock_source(stock);

    assert_eq!(app.presenter().options().len(), 6);

    app.on_select("Hunting Bow");
    app.on_calculate("2").unwrap();
    assert_eq!(
        app.presenter().output(),
        "Wood: 6\nstring: 4 (deficit 3)\ntotal deficit = 3"
    );

    app.on_stock_input("string", "abc").unwrap();
    assert_eq!(
        app.presenter().summary(),
        Some(&DeficitSummary::TotalDeficit(4))
    );

    app.on_stock_input("string", "4").unwrap();
    assert_eq!(app.presenter().summary(), Some(&DeficitSummary::Sufficient));

    // 選擇其他配方會清除顯示內容
    app.on_select("Axe");
    assert_eq!(app.presenter().output(), "");
}

#[test]
fn test_app_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let loader = DirectoryLoader::new(dir.path());

    let app = CraftApp::initialize(&loader, CraftConfig::default(), TextPresenter::new());

    assert!(!app.is_ready());
    assert!(app.presenter().options().is_empty());
    assert_eq!(app.presenter().messages().len(), 1);
}

#[test]
fn test_localized_names_flow_into_recipes() {
    let dir = tempfile::tempdir().unwrap();
    for file in ["ItemTable.json", "RecipeTable.json", "ConsumableItemTable.json"] {
        fs::copy(fixtures_dir().join(file), dir.path().join(file)).unwrap();
    }
    let items = dir.path().join("ItemTable.json");
    let names = dir.path().join("names.txt");

    assert_eq!(extract_names_file(&items, &names).unwrap(), 8);
    let translated: String = fs::read_to_string(&names)
        .unwrap()
        .lines()
        .map(|line| format!("{}\n", line.to_uppercase()))
        .collect();
    fs::write(&names, translated).unwrap();

    let report = merge_names_file(&items, &names, &items).unwrap();
    assert_eq!(report.replaced, 8);
    assert!(!report.exhausted);

    let tables = load_source_tables(&DirectoryLoader::new(dir.path())).unwrap();
    let index = RecipeIntegrator::default().integrate_tables(&tables);

    // RecipeTable 的名稱優先，不受物品表翻譯影響
    assert!(index.find("Axe").is_some());
    let head = index.find("RAWAXEHEAD").unwrap();
    assert_eq!(head.materials[0].name, "IRON INGOT");
}
