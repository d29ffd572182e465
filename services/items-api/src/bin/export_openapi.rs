//! OpenAPI定義エクスポートツール
//!
//! クライアントコード生成用に、APIのOpenAPI定義をJSONファイルへ書き出す。
//!
//! ```bash
//! export-openapi --output openapi.json
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use items_api::build_openapi;
use items_api::infrastructure::{AppConfig, init_logging};

#[derive(Parser, Debug)]
#[command(name = "export-openapi")]
#[command(about = "OpenAPI定義をJSONファイルに書き出す")]
struct Args {
    /// 出力先ファイルパス
    #[arg(short, long, default_value = "openapi.json")]
    output: PathBuf,
}

/// 書き出した定義の概要
#[derive(Debug, PartialEq)]
struct ExportSummary {
    title: String,
    version: String,
    path_count: usize,
}

/// OpenAPI定義を整形済みJSONとして書き出す
fn export(config: &AppConfig, output: &Path) -> Result<ExportSummary, Box<dyn std::error::Error>> {
    let doc = build_openapi(config);
    let json = serde_json::to_string_pretty(&doc)?;
    std::fs::write(output, json)?;

    Ok(ExportSummary {
        title: doc.info.title.clone(),
        version: doc.info.version.clone(),
        path_count: doc.paths.paths.len(),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = AppConfig::from_env()?;
    init_logging(config.default_log_level());

    let summary = export(&config, &args.output)?;
    tracing::info!(output = %args.output.display(), "OpenAPI定義を書き出しました");

    println!("OpenAPI schema exported to {}", args.output.display());
    println!("  Title: {}", summary.title);
    println!("  Version: {}", summary.version);
    println!("  Paths: {}", summary.path_count);
    Ok(())
}
