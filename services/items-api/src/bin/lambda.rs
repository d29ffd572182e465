/// Items API Lambdaエントリポイント
///
/// API Gateway / Lambda Function URL経由のHTTPリクエストを
/// axumルーターで処理する。ストアはLambdaインスタンス（コールドスタート）単位で生成され、
/// ウォームスタート間で再利用される。
use items_api::infrastructure::{AppConfig, init_logging};
use items_api::{AppState, create_router};
use lambda_http::{Error, run};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 設定を読み込み、構造化ログを初期化
    let config = AppConfig::from_env()?;
    init_logging(config.default_log_level());

    info!(
        service = %config.service_name,
        environment = %config.environment,
        aws_region = %config.aws_region,
        "Items API Lambda関数を初期化"
    );

    let app = create_router(AppState::new(config));

    // Lambda関数を実行
    run(app).await
}
