// インフラストラクチャ層モジュール
pub mod clock;
pub mod config;
pub mod item_repository;
pub mod logging;

// 再エクスポート
pub use clock::{Clock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use item_repository::{ApplyFn, InMemoryItemRepository, ItemRepository, RepositoryError};
pub use logging::init_logging;
