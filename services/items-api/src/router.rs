//! HTTPルーティング
//!
//! Itemリソースのエンドポイントを提供する:
//! - Itemの作成 (POST /items)
//! - Item一覧 (GET /items)
//! - Itemの取得 (GET /items/{id})
//! - Itemの部分更新 (PATCH /items/{id})
//! - Itemの削除 (DELETE /items/{id})
//! - ヘルスチェック (GET /health)
//! - OpenAPI定義 (GET /openapi.json)

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request, State},
    http::{HeaderValue, StatusCode, request::Parts},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::{ItemHandler, ItemHandlerError};
use crate::domain::{
    Constraint, FieldViolation, ItemCreate, ItemListResponse, ItemResponse, ItemUpdate,
    ValidationError, WireSchema, decode_slice,
};
use crate::error::{ApiError, ApiErrorBody};
use crate::infrastructure::{AppConfig, Clock, InMemoryItemRepository, SystemClock};

/// アプリケーション状態
///
/// ルーター全体で共有される状態を保持する。
#[derive(Clone)]
pub struct AppState {
    /// アプリケーション設定
    pub config: Arc<AppConfig>,
    /// Itemハンドラー（ストアを所有する）
    pub items: Arc<ItemHandler<InMemoryItemRepository>>,
}

impl AppState {
    /// システム時刻と空のストアで状態を作成
    pub fn new(config: AppConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// 指定したクロックと空のストアで状態を作成
    pub fn with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config: Arc::new(config),
            items: Arc::new(ItemHandler::new(InMemoryItemRepository::new(), clock)),
        }
    }
}

/// ワイヤースキーマでデコードするJSONボディ
///
/// snake_case / camelCaseの両方のキーを受け付け、失敗時は422を返す。
pub struct WireJson<T>(pub T);

impl<S, T> FromRequest<S> for WireJson<T>
where
    T: WireSchema,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::new(e.status(), "bad_request", e.body_text()))?;

        decode_slice(&bytes).map(WireJson).map_err(|e| {
            tracing::debug!(error = %e, "リクエストボディのデコードに失敗");
            ApiError::validation(e)
        })
    }
}

/// パスパラメータのItem ID
///
/// UUIDとして解釈できない場合は422を返す。
pub struct ItemId(pub Uuid);

impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::new(e.status(), "bad_request", e.body_text()))?;

        Uuid::parse_str(&raw).map(ItemId).map_err(|_| {
            ApiError::validation(ValidationError::single(FieldViolation::new(
                "id",
                Constraint::Type,
                format!("id must be a valid UUID: {}", raw),
            )))
        })
    }
}

/// ヘルスチェックレスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct HealthResponse {
    /// 常に"ok"
    pub status: String,
    /// サービス名
    pub service: String,
    /// 環境名
    pub environment: String,
}

/// ハンドラーエラーをログに記録してApiErrorに変換
fn into_api_error(operation: &'static str, err: ItemHandlerError) -> ApiError {
    match &err {
        ItemHandlerError::Validation(e) => {
            tracing::info!(operation, error = %e, "リクエストの検証に失敗");
        }
        ItemHandlerError::NotFound(id) => {
            tracing::warn!(operation, item_id = %id, "対象のItemが見つからない");
        }
        ItemHandlerError::Repository(e) => {
            tracing::error!(operation, error = %e, "ストア操作エラー");
        }
    }
    ApiError::from(err)
}

/// ヘルスチェックエンドポイント (GET /health)
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "サービス稼働中", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.config.service_name.clone(),
        environment: state.config.environment.clone(),
    })
}

/// OpenAPI定義エンドポイント (GET /openapi.json)
pub async fn openapi_json(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    Json(crate::openapi::build_openapi(&state.config))
}

/// Item作成エンドポイント (POST /items)
///
/// # Returns
/// - 201 Created: 作成されたItem
/// - 422 Unprocessable Entity: 入力が制約に違反
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = ItemCreate,
    responses(
        (status = 201, description = "Itemを作成", body = ItemResponse),
        (status = 422, description = "入力が不正", body = ApiErrorBody)
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    WireJson(input): WireJson<ItemCreate>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let created = state
        .items
        .create(input)
        .await
        .map_err(|e| into_api_error("create", e))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Item一覧エンドポイント (GET /items)
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    responses((status = 200, description = "Item一覧", body = ItemListResponse))
)]
pub async fn list_items(State(state): State<AppState>) -> Result<Json<ItemListResponse>, ApiError> {
    let list = state
        .items
        .list()
        .await
        .map_err(|e| into_api_error("list", e))?;
    Ok(Json(list))
}

/// Item取得エンドポイント (GET /items/{id})
///
/// # Returns
/// - 200 OK: 指定されたItem
/// - 404 Not Found: Itemが存在しない
/// - 422 Unprocessable Entity: IDがUUIDでない
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item", body = ItemResponse),
        (status = 404, description = "Itemが存在しない", body = ApiErrorBody),
        (status = 422, description = "IDが不正", body = ApiErrorBody)
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = state
        .items
        .get(id)
        .await
        .map_err(|e| into_api_error("get", e))?;
    Ok(Json(item))
}

/// Item部分更新エンドポイント (PATCH /items/{id})
///
/// 指定されたフィールドのみ更新する。
///
/// # Returns
/// - 200 OK: 更新後のItem
/// - 404 Not Found: Itemが存在しない
/// - 422 Unprocessable Entity: 入力またはIDが不正
#[utoipa::path(
    patch,
    path = "/items/{id}",
    tag = "items",
    params(("id" = Uuid, Path, description = "Item ID")),
    request_body = ItemUpdate,
    responses(
        (status = 200, description = "更新後のItem", body = ItemResponse),
        (status = 404, description = "Itemが存在しない", body = ApiErrorBody),
        (status = 422, description = "入力が不正", body = ApiErrorBody)
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
    WireJson(input): WireJson<ItemUpdate>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = state
        .items
        .update(id, input)
        .await
        .map_err(|e| into_api_error("update", e))?;
    Ok(Json(item))
}

/// Item削除エンドポイント (DELETE /items/{id})
///
/// # Returns
/// - 204 No Content: Itemを削除した
/// - 404 Not Found: Itemが存在しない
/// - 422 Unprocessable Entity: IDがUUIDでない
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 204, description = "Itemを削除"),
        (status = 404, description = "Itemが存在しない", body = ApiErrorBody),
        (status = 422, description = "IDが不正", body = ApiErrorBody)
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<StatusCode, ApiError> {
    state
        .items
        .delete(id)
        .await
        .map_err(|e| into_api_error("delete", e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// CORSレイヤーを構築する
///
/// 認証情報付きリクエストを許可する。`*`はワイルドカードと認証情報を併用できないため、
/// リクエストのOriginをそのまま返す。メソッドとヘッダーも同様にリクエストを反映する。
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "不正なCORSオリジンを無視");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// ルーターを構築する
///
/// 全エンドポイントのルーティングを定義し、CORSとリクエストトレーシングを適用する。
/// Lambda（lambda_http）とローカルサーバー（axum::serve）の両方で同じルーターを使用する。
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi_json))
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/{id}",
            get(get_item).patch(update_item).delete(delete_item),
        )
        .layer(cors)
        // リクエストトレーシングレイヤー（method, path, status, latencyを自動記録）
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::test_support::StepClock;
    use crate::infrastructure::logging::init_test_logging;
    use axum::{
        body::Body,
        http::{Method, Request, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    /// テスト用のルーターを作成（1秒ずつ進むクロック付き）
    fn create_test_app() -> Router {
        init_test_logging();
        let state = AppState::with_clock(
            AppConfig::default(),
            Arc::new(StepClock::starting_2025()),
        );
        create_router(state)
    }

    /// リクエストを送信し、ステータスとJSONボディを返す
    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create(app: &Router, body: Value) -> ItemResponse {
        let (status, value) = send(app, Method::POST, "/items", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        serde_json::from_value(value).unwrap()
    }

    // ========================================
    // POST /items
    // ========================================

    #[tokio::test]
    async fn test_create_item_success() {
        let app = create_test_app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/items",
            Some(json!({"name": "Test Item", "description": "A test item"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "Test Item");
        assert_eq!(body["description"], "A test item");
        assert!(body["id"].is_string());
        // camelCaseで出力される
        assert!(body.get("createdAt").is_some());
        assert!(body.get("updatedAt").is_some());
        assert!(body.get("created_at").is_none());
        assert_eq!(body["createdAt"], body["updatedAt"]);
    }

    #[tokio::test]
    async fn test_create_item_minimal() {
        let app = create_test_app();

        let item = create(&app, json!({"name": "Minimal Item"})).await;

        assert_eq!(item.name, "Minimal Item");
        assert_eq!(item.description, None);
    }

    #[tokio::test]
    async fn test_create_item_empty_name_fails() {
        let app = create_test_app();

        let (status, body) = send(&app, Method::POST, "/items", Some(json!({"name": ""}))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["details"][0]["field"], "name");
        assert_eq!(body["details"][0]["constraint"], "min_length");
    }

    #[tokio::test]
    async fn test_create_item_missing_name_fails() {
        let app = create_test_app();

        let (status, body) =
            send(&app, Method::POST, "/items", Some(json!({"description": "x"}))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"][0]["constraint"], "required");
    }

    #[tokio::test]
    async fn test_create_item_too_long_fields_report_each_field() {
        let app = create_test_app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/items",
            Some(json!({"name": "n".repeat(101), "description": "d".repeat(501)})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let fields: Vec<&str> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["name", "description"]);
    }

    /// 必須フィールドの欠落と他フィールドの制約違反はまとめて報告される
    #[tokio::test]
    async fn test_create_item_reports_missing_name_and_long_description() {
        let app = create_test_app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/items",
            Some(json!({"description": "d".repeat(501)})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let details: Vec<(&str, &str)> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| {
                (
                    d["field"].as_str().unwrap(),
                    d["constraint"].as_str().unwrap(),
                )
            })
            .collect();
        assert_eq!(
            details,
            vec![("name", "required"), ("description", "max_length")]
        );
    }

    /// 型の誤りは該当フィールド名で報告される
    #[tokio::test]
    async fn test_create_item_wrong_type_names_the_field() {
        let app = create_test_app();

        let (status, body) = send(&app, Method::POST, "/items", Some(json!({"name": 42}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"][0]["field"], "name");
        assert_eq!(body["details"][0]["constraint"], "type");

        let (status, body) = send(
            &app,
            Method::POST,
            "/items",
            Some(json!({"name": "ok", "description": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"][0]["field"], "description");
    }

    #[tokio::test]
    async fn test_create_item_invalid_json_fails() {
        let app = create_test_app();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/items")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{invalid json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_create_item_ignores_unknown_fields() {
        let app = create_test_app();

        let item = create(&app, json!({"name": "x", "unknownField": 1})).await;

        assert_eq!(item.name, "x");
    }

    // ========================================
    // GET /items
    // ========================================

    #[tokio::test]
    async fn test_list_items_empty() {
        let app = create_test_app();

        let (status, body) = send(&app, Method::GET, "/items", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"items": [], "total": 0}));
    }

    #[tokio::test]
    async fn test_list_items_returns_created() {
        let app = create_test_app();
        create(&app, json!({"name": "Item 1"})).await;
        create(&app, json!({"name": "Item 2"})).await;

        let (status, body) = send(&app, Method::GET, "/items", None).await;

        assert_eq!(status, StatusCode::OK);
        let list: ItemListResponse = serde_json::from_value(body).unwrap();
        assert_eq!(list.total, 2);
        let mut names: Vec<String> = list.items.into_iter().map(|i| i.name).collect();
        names.sort();
        assert_eq!(names, vec!["Item 1", "Item 2"]);
    }

    // ========================================
    // GET /items/{id}
    // ========================================

    #[tokio::test]
    async fn test_get_item_success() {
        let app = create_test_app();
        let created = create(&app, json!({"name": "Test Item"})).await;

        let (status, body) = send(&app, Method::GET, &format!("/items/{}", created.id), None).await;

        assert_eq!(status, StatusCode::OK);
        let fetched: ItemResponse = serde_json::from_value(body).unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_item_not_found() {
        let app = create_test_app();
        let id = Uuid::nil();

        let (status, body) = send(&app, Method::GET, &format!("/items/{}", id), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
        let message = body["message"].as_str().unwrap();
        assert!(message.to_lowercase().contains("not found"));
        assert!(message.contains(&id.to_string()));
    }

    #[tokio::test]
    async fn test_get_item_malformed_id() {
        let app = create_test_app();

        let (status, body) = send(&app, Method::GET, "/items/not-a-uuid", None).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"][0]["field"], "id");
    }

    // ========================================
    // PATCH /items/{id}
    // ========================================

    #[tokio::test]
    async fn test_update_item_success() {
        let app = create_test_app();
        let created = create(&app, json!({"name": "Original", "description": "Original desc"})).await;

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/items/{}", created.id),
            Some(json!({"name": "Updated"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Updated");
        assert_eq!(body["description"], "Original desc");
    }

    /// 指定したフィールドのみ変更され、updated_atが進む
    #[tokio::test]
    async fn test_update_item_partial() {
        let app = create_test_app();
        let created = create(&app, json!({"name": "Original", "description": "Original desc"})).await;

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/items/{}", created.id),
            Some(json!({"description": "New description"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let updated: ItemResponse = serde_json::from_value(body).unwrap();
        assert_eq!(updated.name, "Original");
        assert_eq!(updated.description.as_deref(), Some("New description"));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_update_item_null_description_clears_it() {
        let app = create_test_app();
        let created = create(&app, json!({"name": "Original", "description": "desc"})).await;

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/items/{}", created.id),
            Some(json!({"description": null})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["description"], Value::Null);
        assert_eq!(body["name"], "Original");
    }

    #[tokio::test]
    async fn test_update_item_null_name_fails() {
        let app = create_test_app();
        let created = create(&app, json!({"name": "Original"})).await;

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/items/{}", created.id),
            Some(json!({"name": null})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"][0]["constraint"], "not_null");

        // 変更されていない
        let (_, body) = send(&app, Method::GET, &format!("/items/{}", created.id), None).await;
        assert_eq!(body["name"], "Original");
    }

    #[tokio::test]
    async fn test_update_item_not_found() {
        let app = create_test_app();

        let (status, _) = send(
            &app,
            Method::PATCH,
            "/items/00000000-0000-0000-0000-000000000000",
            Some(json!({"name": "Test"})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // ========================================
    // DELETE /items/{id}
    // ========================================

    #[tokio::test]
    async fn test_delete_item_success() {
        let app = create_test_app();
        let created = create(&app, json!({"name": "To Delete"})).await;
        let uri = format!("/items/{}", created.id);

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains(&created.id.to_string()));
    }

    #[tokio::test]
    async fn test_delete_item_not_found() {
        let app = create_test_app();

        let (status, _) = send(
            &app,
            Method::DELETE,
            "/items/00000000-0000-0000-0000-000000000000",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // ========================================
    // /health, /openapi.json, CORS
    // ========================================

    #[tokio::test]
    async fn test_health_endpoint_returns_ok() {
        let app = create_test_app();

        let (status, body) = send(&app, Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "items-api");
        assert_eq!(body["environment"], "development");
    }

    #[tokio::test]
    async fn test_openapi_endpoint_lists_item_paths() {
        let app = create_test_app();

        let (status, body) = send(&app, Method::GET, "/openapi.json", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"].get("/items").is_some());
        assert!(body["paths"].get("/items/{id}").is_some());
    }

    #[tokio::test]
    async fn test_unknown_endpoint_returns_not_found() {
        let app = create_test_app();

        let request = Request::builder()
            .uri("/unknown")
            .method("GET")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    /// ワイルドカード設定ではリクエストのOriginを返し、認証情報を許可する
    #[tokio::test]
    async fn test_cors_mirrors_origin_for_wildcard() {
        let app = create_test_app();

        let request = Request::builder()
            .uri("/health")
            .method("GET")
            .header(header::ORIGIN, "https://app.example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://app.example.com"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_cors_rejects_unlisted_origin() {
        init_test_logging();
        let config = AppConfig {
            cors_origins: vec!["https://allowed.example.com".to_string()],
            ..AppConfig::default()
        };
        let app = create_router(AppState::new(config));

        let request = Request::builder()
            .uri("/health")
            .method("GET")
            .header(header::ORIGIN, "https://other.example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
