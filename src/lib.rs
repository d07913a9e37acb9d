//! # Craft
//!
//! 三張來源資料表（物品、配方名稱、製作定義）整合為配方索引，
//! 並依製作數量與庫存計算材料總量與不足量。
//!
//! ```no_run
//! use craft::{CraftApp, CraftConfig, DirectoryLoader, TextPresenter};
//!
//! let config = CraftConfig::default();
//! let loader = DirectoryLoader::new("data").with_files(config.table_files.clone());
//! let mut app = CraftApp::initialize(&loader, config, TextPresenter::new());
//! app.on_select("Axe");
//! app.on_calculate("3").ok();
//! println!("{}", app.presenter().output());
//! ```

pub mod app;
pub mod presentation;

pub use app::{AppError, CraftApp, NO_MATERIALS_MESSAGE};
pub use presentation::{Presenter, SelectOption, TextPresenter};

pub use craft_cache::{CraftSession, SessionState, StockOverlay};
pub use craft_calc::{
    calculate_requirements, DeficitReport, DeficitRow, DeficitSummary, MaterialTotals,
    RecipeIntegrator, Requirements,
};
pub use craft_core::{
    CraftConfig, CraftError, RecipeIndex, ResolvedRecipe, StockLevels, StockSource,
    UnresolvedRecipePolicy, ValidationError,
};
pub use craft_loader::{load_source_tables, DirectoryLoader, LoadError, MemoryLoader, TableKind};
