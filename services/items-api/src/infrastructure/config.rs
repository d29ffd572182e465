// アプリケーション設定
//
// 環境変数（プレフィックス`APP_`）から設定値を読み込み、型安全に提供する。
// 未設定・空文字の項目はデフォルト値を使用する。
use thiserror::Error;

/// 環境名 (APP_ENVIRONMENT)
pub const ENVIRONMENT_ENV: &str = "APP_ENVIRONMENT";
/// デバッグフラグ (APP_DEBUG)
pub const DEBUG_ENV: &str = "APP_DEBUG";
/// サービス名 (APP_SERVICE_NAME)
pub const SERVICE_NAME_ENV: &str = "APP_SERVICE_NAME";
/// AWSリージョン (APP_AWS_REGION)
pub const AWS_REGION_ENV: &str = "APP_AWS_REGION";
/// CORS許可オリジン (APP_CORS_ORIGINS)
pub const CORS_ORIGINS_ENV: &str = "APP_CORS_ORIGINS";
/// ローカルサーバーのポート (APP_PORT)
pub const PORT_ENV: &str = "APP_PORT";

const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_SERVICE_NAME: &str = "items-api";
const DEFAULT_AWS_REGION: &str = "us-east-1";
const DEFAULT_PORT: u16 = 8000;

/// すべてのオリジンを許可する指定
pub const ANY_ORIGIN: &str = "*";

/// 設定読み込みのエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 環境名（development, production等）
    pub environment: String,
    /// デバッグフラグ。trueの場合デフォルトのログレベルがdebugになる
    pub debug: bool,
    /// サービス名（ヘルスチェック、OpenAPIタイトルに使用）
    pub service_name: String,
    /// AWSリージョン
    pub aws_region: String,
    /// CORS許可オリジン
    pub cors_origins: Vec<String>,
    /// ローカルサーバーのポート
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            debug: false,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            aws_region: DEFAULT_AWS_REGION.to_string(),
            cors_origins: vec![ANY_ORIGIN.to_string()],
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// 環境変数から設定を読み込み
    ///
    /// - APP_ENVIRONMENT: 環境名（デフォルト: development）
    /// - APP_DEBUG: デバッグフラグ（true/false/1/0/yes/no/on/off、デフォルト: false）
    /// - APP_SERVICE_NAME: サービス名（デフォルト: items-api）
    /// - APP_AWS_REGION: AWSリージョン（デフォルト: us-east-1）
    /// - APP_CORS_ORIGINS: 許可オリジン（カンマ区切りまたはJSON配列、デフォルト: *）
    /// - APP_PORT: ローカルサーバーのポート（デフォルト: 8000）
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込み
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 文字列を読み込むヘルパー（空文字はNone扱い）
        let get = |key: &str| -> Option<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();

        let debug = match get(DEBUG_ENV) {
            Some(value) => parse_bool(&value).ok_or_else(|| invalid(DEBUG_ENV, &value))?,
            None => defaults.debug,
        };

        let cors_origins = match get(CORS_ORIGINS_ENV) {
            Some(value) => {
                parse_origins(&value).ok_or_else(|| invalid(CORS_ORIGINS_ENV, &value))?
            }
            None => defaults.cors_origins,
        };

        let port = match get(PORT_ENV) {
            Some(value) => value.parse().map_err(|_| invalid(PORT_ENV, &value))?,
            None => defaults.port,
        };

        Ok(Self {
            environment: get(ENVIRONMENT_ENV).unwrap_or(defaults.environment),
            debug,
            service_name: get(SERVICE_NAME_ENV).unwrap_or(defaults.service_name),
            aws_region: get(AWS_REGION_ENV).unwrap_or(defaults.aws_region),
            cors_origins,
            port,
        })
    }

    /// すべてのオリジンを許可するか
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == ANY_ORIGIN)
    }

    /// RUST_LOG未設定時のログレベル
    pub fn default_log_level(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

fn invalid(name: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    }
}

/// 真偽値をパース（大文字小文字を区別しない）
fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// オリジン一覧をパース
///
/// `[`で始まる場合はJSON配列、それ以外はカンマ区切りとして扱う。
/// 空白をトリムし、空文字列は除外する。
fn parse_origins(value: &str) -> Option<Vec<String>> {
    let origins: Vec<String> = if value.starts_with('[') {
        serde_json::from_str::<Vec<String>>(value).ok()?
    } else {
        value.split(',').map(str::to_string).collect()
    };

    Some(
        origins
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    )
}
