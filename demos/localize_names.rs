//! 名稱在地化工具
//!
//! ```text
//! localize_names extract <table.json> <names.txt>
//! localize_names merge <table.json> <names.txt> <output.json>
//! ```

use anyhow::bail;
use craft_loader::{extract_names_file, merge_names_file};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["extract", table, names] => {
            let count = extract_names_file(Path::new(table), Path::new(names))?;
            println!("已匯出 {count} 個名稱");
        }
        ["merge", table, names, output] => {
            let report =
                merge_names_file(Path::new(table), Path::new(names), Path::new(output))?;
            println!("已替換 {} 個名稱", report.replaced);
            if report.exhausted {
                println!("翻譯名稱不足，部分記錄保留原名");
            }
        }
        _ => bail!(
            "用法:\n  localize_names extract <table.json> <names.txt>\n  localize_names merge <table.json> <names.txt> <output.json>"
        ),
    }

    Ok(())
}
