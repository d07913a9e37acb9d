//! 從目錄載入資料表並計算材料需求
//!
//! 用法：`cargo run --example craft_from_dir -- <資料目錄> <配方名稱> [數量] [config.json]`

use anyhow::{bail, Context};
use craft::{CraftApp, CraftConfig, DirectoryLoader, TextPresenter};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (Some(dir), Some(recipe)) = (args.first(), args.get(1)) else {
        bail!("用法: craft_from_dir <資料目錄> <配方名稱> [數量] [config.json]");
    };
    let multiplier = args.get(2).map(String::as_str).unwrap_or("1");

    let config = match args.get(3) {
        Some(path) => CraftConfig::from_json_file(Path::new(path))
            .with_context(|| format!("讀取配置 {path} 失敗"))?,
        None => CraftConfig::default(),
    };

    let loader = DirectoryLoader::new(dir).with_files(config.table_files.clone());
    let mut app = CraftApp::initialize(&loader, config, TextPresenter::new());
    if let Some(err) = app.initialization_error() {
        bail!("初始化失敗: {err}");
    }

    if let Some(session) = app.session() {
        for warning in session.index().warnings() {
            println!("[{:?}] {}: {}", warning.severity, warning.entry_id, warning.message);
        }
    }

    app.on_select(recipe);
    app.on_calculate(multiplier)?;
    println!("{recipe} × {multiplier}:\n{}", app.presenter().output());

    Ok(())
}
