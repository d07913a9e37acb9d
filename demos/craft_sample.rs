//! 配方計算示例（記憶體資料表）

use craft::{CraftApp, CraftConfig, MemoryLoader, StockLevels, TableKind, TextPresenter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("=== 配方計算示例 ===\n");

    let loader = MemoryLoader::new()
        .with_json(
            TableKind::Items,
            r#"{"1": {"Name": "Wood"}, "2": {"Name": "Iron Ingot"}, "3": {"Name": "string"}}"#,
        )
        .with_json(
            TableKind::Recipes,
            r#"{"100": {"Name": "Axe"}, "101": {"Name": "Hunting Bow"}}"#,
        )
        .with_json(
            TableKind::Consumables,
            r#"{
                "c1": {"GetItemList": [[9, 100]], "ConsumeList": [[1, 2], [2, 1]]},
                "c2": {"GetItemList": [[9, 101]], "ConsumeList": [[1, 3], [3, 2]]}
            }"#,
        );

    let stock = StockLevels::new().with_stock("Wood", 4);
    let mut app = CraftApp::initialize(&loader, CraftConfig::default(), TextPresenter::new())
        .with_stock_source(stock);

    println!("選單:");
    for option in app.presenter().options() {
        println!("  - {}", option.label);
    }

    app.on_select("Axe");
    app.on_calculate("3")?;
    println!("\nAxe × 3:\n{}", app.presenter().output());

    app.on_stock_input("Iron Ingot", "3")?;
    println!("\n輸入 Iron Ingot 庫存 3 之後:\n{}", app.presenter().output());

    if let Err(err) = app.on_calculate("0") {
        println!("\n製作數量 0 被拒絕: {err}");
    }

    Ok(())
}
