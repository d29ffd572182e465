/// Items APIのログ設定
///
/// Lambda（CloudWatch）とローカルサーバーで共通のJSON形式ログを出力する。
/// ログレベルは`RUST_LOG`が優先され、未設定時は`APP_DEBUG`に従う。
use std::sync::Once;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// ログサブスクライバー初期化用の同期プリミティブ
static INIT: Once = Once::new();

/// ログサブスクライバーを初期化する
///
/// `default_level`は`AppConfig::default_log_level`の値を渡す。
/// 2回目以降の呼び出しは何もしない。
///
/// ```ignore
/// let config = AppConfig::from_env()?;
/// init_logging(config.default_log_level());
/// ```
pub fn init_logging(default_level: &str) {
    INIT.call_once(|| {
        // 環境変数からログレベルを取得、未設定ならdefault_level
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        // item_id等のフィールドをトップレベルに展開する
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .flatten_event(true)
            .with_current_span(false);

        // サブスクライバーを構築して初期化
        // テスト等で既に別のサブスクライバーが設定されている場合は何もしない
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init();
    });
}

/// テスト用のログサブスクライバー（compact形式、テスト出力に書き込む）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}
