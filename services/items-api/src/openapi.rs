//! OpenAPI定義
//!
//! utoipaで全エンドポイントとスキーマを記述する。
//! `GET /openapi.json`と`export-openapi`バイナリの両方から利用する。

use utoipa::OpenApi;

use crate::domain::{
    Constraint, FieldViolation, ItemCreate, ItemListResponse, ItemResponse, ItemUpdate,
};
use crate::error::ApiErrorBody;
use crate::infrastructure::AppConfig;
use crate::router::{self, HealthResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        router::health,
        router::list_items,
        router::create_item,
        router::get_item,
        router::update_item,
        router::delete_item,
    ),
    components(schemas(
        ItemCreate,
        ItemUpdate,
        ItemResponse,
        ItemListResponse,
        ApiErrorBody,
        FieldViolation,
        Constraint,
        HealthResponse,
    )),
    tags(
        (name = "items", description = "Itemリソースの作成・取得・更新・削除"),
        (name = "health", description = "ヘルスチェック")
    )
)]
pub struct ApiDoc;

/// 設定を反映したOpenAPI定義を構築する
///
/// タイトルはサービス名、バージョンはクレートのバージョンを使用する。
pub fn build_openapi(config: &AppConfig) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = config.service_name.clone();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc
}
