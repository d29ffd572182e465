/// Itemハンドラー
///
/// Itemリソースに対する作成・一覧・取得・部分更新・削除を実行する。
/// 入力の検証はストアを変更する前に完了させ、失敗時に部分的な状態を残さない。
use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Item, ItemCreate, ItemListResponse, ItemResponse, ItemUpdate, ValidationError};
use crate::infrastructure::{Clock, ItemRepository, RepositoryError};

/// Itemハンドラーのエラー型
#[derive(Debug, Error)]
pub enum ItemHandlerError {
    /// 入力がフィールド制約に違反
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 指定IDのItemが存在しない
    #[error("Item {0} not found")]
    NotFound(Uuid),

    /// リポジトリ操作エラー
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Itemリソースを操作するハンドラー
///
/// リポジトリとクロックは外部から注入する。
pub struct ItemHandler<R>
where
    R: ItemRepository,
{
    /// Itemリポジトリ
    repository: R,
    /// 現在時刻の取得元
    clock: Arc<dyn Clock>,
}

impl<R> ItemHandler<R>
where
    R: ItemRepository,
{
    /// 新しいItemHandlerを作成
    pub fn new(repository: R, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// リポジトリへの参照を取得
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Itemを作成
    ///
    /// # 処理フロー
    /// 1. 入力を検証
    /// 2. 未使用のIDを生成し、created_at = updated_at = 現在時刻でレコードを作成
    /// 3. リポジトリに追加（IDが衝突した場合は再生成）
    pub async fn create(&self, input: ItemCreate) -> Result<ItemResponse, ItemHandlerError> {
        input.validate()?;

        let now = self.clock.now();
        let mut item = Item::new(Uuid::new_v4(), input, now);
        while !self.repository.insert(item.clone()).await? {
            tracing::warn!(item_id = %item.id, "Item IDが衝突したため再生成");
            item.id = Uuid::new_v4();
        }

        tracing::info!(item_id = %item.id, "Itemを作成");
        Ok(ItemResponse::from(item))
    }

    /// 全Itemを取得
    pub async fn list(&self) -> Result<ItemListResponse, ItemHandlerError> {
        let list: ItemListResponse = self.repository.list().await?.into_iter().collect();
        tracing::debug!(total = list.total, "Item一覧を取得");
        Ok(list)
    }

    /// IDでItemを取得
    pub async fn get(&self, id: Uuid) -> Result<ItemResponse, ItemHandlerError> {
        self.repository
            .get(id)
            .await?
            .map(ItemResponse::from)
            .ok_or(ItemHandlerError::NotFound(id))
    }

    /// Itemを部分更新
    ///
    /// # 処理フロー
    /// 1. 対象のItemが存在しなければNotFound
    /// 2. 指定されたフィールドのみ検証
    /// 3. 指定されたフィールドのみ上書きし、updated_atを更新
    ///
    /// 値が現在と同じフィールドや空の更新でもupdated_atは更新する。
    pub async fn update(
        &self,
        id: Uuid,
        input: ItemUpdate,
    ) -> Result<ItemResponse, ItemHandlerError> {
        if self.repository.get(id).await?.is_none() {
            return Err(ItemHandlerError::NotFound(id));
        }

        input.validate()?;
        let empty_update = input.is_empty();

        let now = self.clock.now();
        let updated = self
            .repository
            .update(id, Box::new(move |item: &mut Item| item.apply(&input, now)))
            .await?
            // 検証中に他のリクエストで削除された場合
            .ok_or(ItemHandlerError::NotFound(id))?;

        tracing::info!(item_id = %id, empty_update, "Itemを更新");
        Ok(ItemResponse::from(updated))
    }

    /// Itemを削除
    pub async fn delete(&self, id: Uuid) -> Result<(), ItemHandlerError> {
        match self.repository.remove(id).await? {
            Some(_) => {
                tracing::info!(item_id = %id, "Itemを削除");
                Ok(())
            }
            None => Err(ItemHandlerError::NotFound(id)),
        }
    }
}
