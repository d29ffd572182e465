/// Itemレコードを保持するリポジトリ
///
/// リポジトリトレイトで永続化層を抽象化し、現状はプロセス内のインメモリ実装のみを提供する。
/// インスタンスは明示的に生成してハンドラーに注入する（グローバル状態は持たない）。
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::Item;

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// 他スレッドのパニックによりロックが汚染された
    #[error("Store lock poisoned: {0}")]
    LockPoisoned(String),
}

/// レコード更新関数
///
/// ロックを保持したまま呼ばれるため、ブロックする処理を含めないこと。
pub type ApplyFn = Box<dyn FnOnce(&mut Item) + Send>;

/// Itemレコード管理用トレイト
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// レコードを追加
    ///
    /// # 戻り値
    /// * 追加できた場合は`Ok(true)`
    /// * 同じIDのレコードが既に存在する場合は`Ok(false)`（既存レコードは変更しない）
    async fn insert(&self, item: Item) -> Result<bool, RepositoryError>;

    /// 全レコードを取得
    ///
    /// 順序は`created_at`昇順、同時刻の場合は`id`昇順。
    async fn list(&self) -> Result<Vec<Item>, RepositoryError>;

    /// IDでレコードを取得
    async fn get(&self, id: Uuid) -> Result<Option<Item>, RepositoryError>;

    /// IDで指定したレコードに更新関数を適用
    ///
    /// 検索と更新は1回のロック内で行う。
    ///
    /// # 戻り値
    /// * 更新後のレコード（存在しない場合は`Ok(None)`）
    async fn update(&self, id: Uuid, apply: ApplyFn) -> Result<Option<Item>, RepositoryError>;

    /// IDで指定したレコードを削除
    ///
    /// # 戻り値
    /// * 削除したレコード（存在しない場合は`Ok(None)`）
    async fn remove(&self, id: Uuid) -> Result<Option<Item>, RepositoryError>;
}

/// ItemRepositoryのインメモリ実装
///
/// 複数リクエストからの同時アクセスに備え、Mutexでマップを保護する。
#[derive(Debug, Default)]
pub struct InMemoryItemRepository {
    items: Mutex<HashMap<Uuid, Item>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保持しているレコード数
    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Item>>, RepositoryError> {
        self.items
            .lock()
            .map_err(|e| RepositoryError::LockPoisoned(e.to_string()))
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn insert(&self, item: Item) -> Result<bool, RepositoryError> {
        let mut items = self.lock()?;
        if items.contains_key(&item.id) {
            return Ok(false);
        }
        items.insert(item.id, item);
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<Item>, RepositoryError> {
        let mut items: Vec<Item> = self.lock()?.values().cloned().collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Item>, RepositoryError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, apply: ApplyFn) -> Result<Option<Item>, RepositoryError> {
        let mut items = self.lock()?;
        Ok(items.get_mut(&id).map(|item| {
            apply(item);
            item.clone()
        }))
    }

    async fn remove(&self, id: Uuid) -> Result<Option<Item>, RepositoryError> {
        Ok(self.lock()?.remove(&id))
    }
}
