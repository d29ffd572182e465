// アプリケーション層モジュール
pub mod item_handler;

// 再エクスポート
pub use item_handler::{ItemHandler, ItemHandlerError};
