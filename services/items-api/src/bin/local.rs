//! ローカル開発用HTTPサーバー
//!
//! Lambdaと同じルーターを`0.0.0.0:<APP_PORT>`で提供する。
//! SIGTERMまたはCtrl+Cを受信するとgraceful shutdownを実行し、
//! 処理中のリクエストが完了してから終了する。

use std::future::Future;
use std::net::SocketAddr;

use items_api::infrastructure::{AppConfig, init_logging};
use items_api::{AppState, create_router};
use tokio::net::TcpListener;
use tokio::signal;

/// シャットダウンシグナルを待機する
///
/// SIGTERMまたはCtrl+C (SIGINT) を待機し、いずれかを受信したらリターンする。
///
/// # Panics
/// シグナルハンドラーの登録に失敗した場合はパニックする。
async fn shutdown_signal() {
    // Ctrl+C (SIGINT) を待機
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Ctrl+C シグナルハンドラーの登録に失敗しました");
    };

    // SIGTERM を待機 (Unix系OSのみ)
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM シグナルハンドラーの登録に失敗しました")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C (SIGINT) を受信しました。graceful shutdownを開始します");
        }
        _ = terminate => {
            tracing::info!("SIGTERM を受信しました。graceful shutdownを開始します");
        }
    }
}

/// リスナー上でルーターを提供し、`shutdown`の完了で停止する
async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::from_env()?;
    init_logging(config.default_log_level());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(
        service = %config.service_name,
        environment = %config.environment,
        debug = config.debug,
        cors_origins = ?config.cors_origins,
        "Items API ローカルサーバーを起動します"
    );

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("リッスン開始: {}", addr);

    serve(listener, AppState::new(config), shutdown_signal()).await?;

    tracing::info!("サーバーが正常に停止しました");
    Ok(())
}
