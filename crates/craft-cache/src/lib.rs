//! # Craft Cache
//!
//! 顯示端快取與選擇/計算狀態機

pub mod dirty_tracking;
pub mod overlay;
pub mod session;

// Re-export 主要類型
pub use dirty_tracking::DirtyTracker;
pub use overlay::StockOverlay;
pub use session::{CraftSession, SessionState};
