/// Itemレコード（内部の正規表現）
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::item_schema::{FieldUpdate, ItemCreate, ItemUpdate};

/// Itemレコード
///
/// ストアが排他的に所有する。`id`と`created_at`は作成後に変更されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    /// 未設定（None）と空文字列（Some("")）は区別する
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// 検証済みの作成入力からレコードを作成
    ///
    /// `created_at`と`updated_at`は同じ値になる。
    pub fn new(id: Uuid, input: ItemCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// 部分更新を適用する
    ///
    /// 指定されたフィールドのみ上書きし、`updated_at`は常に更新する。
    /// 値が現在と同じでも、空の更新でも`updated_at`は進む。
    /// `updated_at`が`created_at`より前になることはない。
    ///
    /// 入力は事前に`ItemUpdate::validate`で検証されていること。
    pub fn apply(&mut self, update: &ItemUpdate, now: DateTime<Utc>) {
        // nameのClearはバリデーションで拒否されるため、Setのみ反映する
        if let FieldUpdate::Set(name) = &update.name {
            self.name = name.clone();
        }

        match &update.description {
            FieldUpdate::Unchanged => {}
            FieldUpdate::Clear => self.description = None,
            FieldUpdate::Set(description) => self.description = Some(description.clone()),
        }

        self.updated_at = now.max(self.created_at);
    }
}
