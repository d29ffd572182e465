//! Itemリソースを扱うサーバーレスCRUD HTTP API
//!
//! レイヤー構成:
//! - `domain`: Itemモデル、ワイヤースキーマ（snake_case / camelCase正規化）、検証
//! - `application`: Itemハンドラー（作成・一覧・取得・部分更新・削除）
//! - `infrastructure`: ストア、クロック、設定、ログ
//! - `router` / `error` / `openapi`: HTTP境界
//!
//! Lambda（`items-api-lambda`）とローカルサーバー（`items-api-local`）は
//! 同じ`create_router`を使用する。

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod openapi;
pub mod router;

pub use error::{ApiError, ApiErrorBody};
pub use openapi::{ApiDoc, build_openapi};
pub use router::{AppState, create_router};
