/// Itemのワイヤースキーマ
///
/// - `ItemCreate`: 作成リクエスト
/// - `ItemUpdate`: 部分更新リクエスト（全フィールド任意）
/// - `ItemResponse`: レスポンス（サーバー生成フィールドを含む全フィールド）
/// - `ItemListResponse`: 一覧レスポンス
///
/// JSON上のフィールド名はcamelCase。入力はsnake_caseも受け付ける（`wire`モジュール参照）。
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;
use uuid::Uuid;

use super::item::Item;
use super::validation::{FieldViolation, ValidationError, check_length};
use super::wire::{WireField, WireSchema, to_camel_case};

/// nameの最小文字数
pub const NAME_MIN_LENGTH: usize = 1;
/// nameの最大文字数
pub const NAME_MAX_LENGTH: usize = 100;
/// descriptionの最大文字数
pub const DESCRIPTION_MAX_LENGTH: usize = 500;

/// Item作成リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemCreate {
    /// Item名
    #[schema(min_length = 1, max_length = 100)]
    pub name: String,
    /// 任意の説明
    #[serde(default)]
    #[schema(max_length = 500)]
    pub description: Option<String>,
}

impl WireSchema for ItemCreate {
    const FIELDS: &'static [WireField] = &[
        WireField::new::<String>("name")
            .required()
            .length(NAME_MIN_LENGTH, NAME_MAX_LENGTH),
        WireField::new::<Option<String>>("description").length(0, DESCRIPTION_MAX_LENGTH),
    ];
}

impl ItemCreate {
    /// フィールド制約を検証する
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();
        check_length(
            &to_camel_case("name"),
            &self.name,
            NAME_MIN_LENGTH,
            NAME_MAX_LENGTH,
            &mut violations,
        );
        if let Some(description) = &self.description {
            check_length(
                &to_camel_case("description"),
                description,
                0,
                DESCRIPTION_MAX_LENGTH,
                &mut violations,
            );
        }
        ValidationError::from_violations(violations).map_or(Ok(()), Err)
    }
}

/// 部分更新フィールド
///
/// 「指定なし」と「nullを指定」を区別する。
/// - `Unchanged`: キーが存在しない。現在の値を変更しない
/// - `Clear`: キーが存在し値がnull
/// - `Set`: キーが存在し値がある
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    Unchanged,
    Clear,
    Set(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Unchanged
    }
}

impl<T> FieldUpdate<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, FieldUpdate::Unchanged)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            _ => None,
        }
    }
}

// キーが存在する場合のみ呼ばれる（存在しない場合は#[serde(default)]でUnchanged）
impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        })
    }
}

impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldUpdate::Set(value) => serializer.serialize_some(value),
            FieldUpdate::Unchanged | FieldUpdate::Clear => serializer.serialize_none(),
        }
    }
}

/// Item部分更新リクエスト
///
/// すべてのフィールドが任意。指定されたフィールドのみ更新される。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    /// Item名（nullは不可）
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    #[schema(value_type = Option<String>, min_length = 1, max_length = 100)]
    pub name: FieldUpdate<String>,
    /// 説明（nullで削除）
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    #[schema(value_type = Option<String>, max_length = 500)]
    pub description: FieldUpdate<String>,
}

impl WireSchema for ItemUpdate {
    const FIELDS: &'static [WireField] = &[
        WireField::new::<Option<String>>("name")
            .non_null()
            .length(NAME_MIN_LENGTH, NAME_MAX_LENGTH),
        WireField::new::<Option<String>>("description").length(0, DESCRIPTION_MAX_LENGTH),
    ];
}

impl ItemUpdate {
    /// 指定されたフィールドのみ検証する
    ///
    /// レコードは常にnameを持つため、nameへのnull指定は拒否する。
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        let name_field = to_camel_case("name");
        match &self.name {
            FieldUpdate::Unchanged => {}
            FieldUpdate::Clear => violations.push(FieldViolation::not_null(&name_field)),
            FieldUpdate::Set(name) => check_length(
                &name_field,
                name,
                NAME_MIN_LENGTH,
                NAME_MAX_LENGTH,
                &mut violations,
            ),
        }

        if let Some(description) = self.description.as_set() {
            check_length(
                &to_camel_case("description"),
                description,
                0,
                DESCRIPTION_MAX_LENGTH,
                &mut violations,
            );
        }

        ValidationError::from_violations(violations).map_or(Ok(()), Err)
    }

    /// 変更対象のフィールドが1つもないか
    pub fn is_empty(&self) -> bool {
        self.name.is_unchanged() && self.description.is_unchanged()
    }
}

/// Itemレスポンス
///
/// サーバー生成のidとタイムスタンプを含む。descriptionは未設定でもnullとして出力する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    /// Item ID
    pub id: Uuid,
    /// Item名
    pub name: String,
    /// 説明
    #[serde(default)]
    pub description: Option<String>,
    /// 作成日時
    pub created_at: DateTime<Utc>,
    /// 最終更新日時
    pub updated_at: DateTime<Utc>,
}

impl WireSchema for ItemResponse {
    const FIELDS: &'static [WireField] = &[
        WireField::new::<Uuid>("id").required(),
        WireField::new::<String>("name").required(),
        WireField::new::<Option<String>>("description"),
        WireField::new::<DateTime<Utc>>("created_at").required(),
        WireField::new::<DateTime<Utc>>("updated_at").required(),
    ];
}

impl From<&Item> for ItemResponse {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Item一覧レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemListResponse {
    /// Item一覧
    pub items: Vec<ItemResponse>,
    /// 件数（itemsの要素数と一致）
    #[schema(minimum = 0)]
    pub total: usize,
}

impl ItemListResponse {
    pub fn new(items: Vec<ItemResponse>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

impl FromIterator<Item> for ItemListResponse {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(ItemResponse::from).collect())
    }
}
