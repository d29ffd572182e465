//! APIエラーハンドリング
//!
//! 統一されたエラーレスポンス形式を提供する。
//! すべてのエラーはJSON形式で返却され、`error`と`message`フィールドを含む。
//! バリデーションエラーの場合は`details`にフィールドごとの違反を含む。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ItemHandlerError;
use crate::domain::{FieldViolation, ValidationError};

/// APIエラーレスポンスのボディ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ApiErrorBody {
    /// エラー種別（例: "validation_error", "not_found", "internal_error"）
    pub error: String,
    /// 詳細なエラーメッセージ
    pub message: String,
    /// フィールドごとの違反（バリデーションエラー時のみ）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldViolation>,
}

/// APIエラー
///
/// ステータスコードとJSON形式のエラーボディを含む。
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTPステータスコード
    status: StatusCode,
    /// エラーレスポンスボディ
    body: ApiErrorBody,
}

impl ApiError {
    /// 新しいApiErrorを作成
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorBody {
                error: error.into(),
                message: message.into(),
                details: Vec::new(),
            },
        }
    }

    /// 422 Unprocessable Entityエラーを作成
    pub fn validation(error: ValidationError) -> Self {
        let mut api_error = Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            error.to_string(),
        );
        api_error.body.details = error.into_violations();
        api_error
    }

    /// 404 Not Foundエラーを作成
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    /// 500 Internal Server Errorを作成
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }

    /// エラー種別を取得
    pub fn error(&self) -> &str {
        &self.body.error
    }

    /// エラーメッセージを取得
    pub fn message(&self) -> &str {
        &self.body.message
    }

    /// 違反詳細を取得
    pub fn details(&self) -> &[FieldViolation] {
        &self.body.details
    }

    /// ステータスコードを取得
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::validation(err)
    }
}

impl From<ItemHandlerError> for ApiError {
    fn from(err: ItemHandlerError) -> Self {
        let message = err.to_string();
        match err {
            ItemHandlerError::Validation(e) => Self::validation(e),
            ItemHandlerError::NotFound(_) => Self::not_found(message),
            ItemHandlerError::Repository(e) => Self::internal_error(format!("ストアエラー: {}", e)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
