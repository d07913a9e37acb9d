//! 應用程式流程
//!
//! 載入 → 整合 → 顯示選單，之後依使用者動作轉交給 [`CraftSession`]。

use craft_cache::CraftSession;
use craft_calc::RecipeIntegrator;
use craft_core::{CraftConfig, CraftError, RecipeIndex, StockSource};
use craft_loader::{load_source_tables, LoadError, TableLoader};
use std::sync::Arc;

use crate::presentation::{Presenter, SelectOption};

/// 沒有任何材料需要數量時顯示的訊息
pub const NO_MATERIALS_MESSAGE: &str = "no materials required";

/// 初始化錯誤
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(CraftError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// 配方計算應用程式
pub struct CraftApp<P: Presenter> {
    config: CraftConfig,
    /// 初始化失敗時為 `None`
    session: Option<CraftSession>,
    init_error: Option<AppError>,
    presenter: P,
}

impl<P: Presenter> CraftApp<P> {
    /// 載入資料表並建立配方索引
    ///
    /// 失敗時只顯示一則訊息，選單保持空白，之後的動作都不會有結果。
    pub fn initialize<L: TableLoader + ?Sized>(loader: &L, config: CraftConfig, presenter: P) -> Self {
        let mut app = Self {
            config,
            session: None,
            init_error: None,
            presenter,
        };

        match app.build_index(loader) {
            Ok(index) => {
                let mut options = vec![SelectOption::blank(&app.config.selection_prompt)];
                options.extend(index.names().map(SelectOption::recipe));
                app.presenter.render_options(&options);

                tracing::info!("應用程式初始化完成：{} 個配方", index.len());
                app.session = Some(CraftSession::new(Arc::new(index)));
            }
            Err(err) => {
                tracing::error!("初始化失敗: {}", err);
                app.presenter.render_options(&[]);
                app.presenter.render_message(&err.to_string());
                app.init_error = Some(err);
            }
        }

        app
    }

    fn build_index<L: TableLoader + ?Sized>(&self, loader: &L) -> Result<RecipeIndex, AppError> {
        self.config.validate().map_err(AppError::Config)?;
        let tables = load_source_tables(loader)?;
        let integrator = RecipeIntegrator::new(self.config.clone());
        Ok(integrator.integrate_tables(&tables))
    }

    /// 建構器模式：設置初始庫存來源
    pub fn with_stock_source(mut self, source: impl StockSource + Send + Sync + 'static) -> Self {
        self.session = self.session.map(|session| session.with_stock_source(source));
        self
    }

    pub fn config(&self) -> &CraftConfig {
        &self.config
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn session(&self) -> Option<&CraftSession> {
        self.session.as_ref()
    }

    pub fn initialization_error(&self) -> Option<&AppError> {
        self.init_error.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    /// 使用者選擇配方（空字串為開頭的空白選項）
    pub fn on_select(&mut self, name: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.select(name) {
            Ok(_) => self.presenter.clear_output(),
            Err(err) => {
                tracing::warn!("選擇失敗: {}", err);
                self.presenter.render_message(&err.to_string());
            }
        }
    }

    /// 使用者按下計算
    ///
    /// 驗證失敗時只顯示訊息，原本顯示的結果保持不變。
    pub fn on_calculate(&mut self, multiplier_raw: &str) -> craft_core::Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        let overlay = match session.calculate(multiplier_raw) {
            Ok(overlay) => overlay,
            Err(err) => {
                tracing::warn!("計算失敗: {}", err);
                self.presenter.render_message(&err.to_string());
                return Err(err);
            }
        };

        self.presenter.clear_output();
        let report = overlay.report();
        let rows: Vec<_> = report
            .visible_rows(self.config.hide_zero_quantities)
            .cloned()
            .collect();
        self.presenter.render_rows(&rows);
        if !overlay.totals().has_nonzero_requirement() {
            self.presenter.render_message(NO_MATERIALS_MESSAGE);
        }
        self.presenter.render_summary(&report.summary());
        Ok(())
    }

    /// 使用者修改某項材料的庫存
    pub fn on_stock_input(&mut self, material: &str, raw: &str) -> craft_core::Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        let summary = match session.edit_stock(material, raw) {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!("庫存輸入失敗: {}", err);
                self.presenter.render_message(&err.to_string());
                return Err(err);
            }
        };

        if let Some(row) = session.overlay().and_then(|overlay| overlay.row(material)) {
            self.presenter.update_row(row);
        }
        self.presenter.render_summary(&summary);
        Ok(())
    }
}
