/// 現在時刻の取得
///
/// テストで時刻を制御できるようにトレイトで抽象化する。
use chrono::{DateTime, Utc};

/// 現在時刻を返すクロック
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// システム時刻（UTC）を返すクロック
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
