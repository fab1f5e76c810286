use std::path::PathBuf;

use anyhow::Context;
use circle_grid::{analyzer, cli, config, error, export, gateway, scanner, server};
use circle_grid_common::parse_word_list;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "circle_grid=debug,tower_http=debug" } else { "circle_grid=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { bind, static_dir } => {
            let mut config = Config::load()?;
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            if static_dir.is_some() {
                config.static_dir = static_dir;
            }
            server::serve(config).await?;
        }

        Commands::Extract { paths, output } => {
            let config = Config::load()?;
            if let Err(missing) = config.credentials() {
                anyhow::bail!(
                    "モデル設定が不足しています (api_key: {}, account_id: {}, gateway: {})。`circle-grid config` で設定してください",
                    missing.has_api_key,
                    missing.has_account_id,
                    missing.has_gateway
                );
            }

            eprintln!("🔍 circle-grid - 単語抽出\n");

            eprintln!("[1/3] 写真を確認中...");
            let photos = scanner::collect_photos(&paths)?;
            if photos.is_empty() {
                return Err(error::CircleGridError::NoImagesFound(display_paths(&paths)).into());
            }
            eprintln!("✔ {}枚の写真を検出\n", photos.len());

            eprintln!("[2/3] AI解析中...");
            let model = gateway::AnthropicClient::new(&config)
                .context("HTTPクライアントを初期化できません")?;
            let analysis = analyzer::analyze_photos(&model, &config, &photos, cli.verbose).await?;
            let draft = analysis.draft;
            eprintln!("✔ {}語を抽出", draft.words.len());
            if !analysis.failures.is_empty() {
                eprintln!("⚠ {}枚は解析できませんでした:", analysis.failures.len());
                for failure in &analysis.failures {
                    eprintln!("  - {}: {}", failure.file_name, failure.error);
                }
            }
            eprintln!();

            eprintln!("[3/3] 結果を出力中...");
            let json = draft.to_json();
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    eprintln!("✔ 結果を保存: {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Grid { input, format, output } => {
            println!("🔲 circle-grid - グリッド生成\n");

            let content = std::fs::read_to_string(&input)
                .with_context(|| format!("読み込めません: {}", input.display()))?;
            let draft = parse_word_list(&content).map_err(error::CircleGridError::from)?;
            if draft.words.is_empty() {
                anyhow::bail!("単語がありません: {}", input.display());
            }

            let output = output.unwrap_or_else(|| {
                input.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."))
            });
            export::export_draft(&draft, &format, &output)?;

            println!("\n✅ グリッド生成完了");
        }

        Commands::Config { set_api_key, set_account_id, set_gateway, show } => {
            // 環境変数の値をファイルへ書き戻さない
            let mut config = Config::load_from(&Config::config_path()?)?;
            let mut changed = false;

            if let Some(key) = set_api_key {
                config.api_key = Some(key);
                println!("✔ APIキーを設定しました");
                changed = true;
            }
            if let Some(id) = set_account_id {
                config.account_id = Some(id);
                println!("✔ アカウントIDを設定しました");
                changed = true;
            }
            if let Some(name) = set_gateway {
                config.gateway_name = Some(name);
                println!("✔ Gateway名を設定しました");
                changed = true;
            }
            if changed {
                config.save()?;
            }

            if show || !changed {
                config.apply_env(|key| std::env::var(key).ok());
                println!("設定: {}", Config::config_path()?.display());
                println!("  モデル: {}", config.model);
                println!("  最大トークン: {}", config.max_tokens);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  待ち受け: {}", config.bind_addr);
                println!("  APIキー: {}", config.masked_api_key());
                println!("  アカウントID: {}", config.account_id.as_deref().unwrap_or("未設定"));
                println!("  Gateway: {}", config.gateway_name.as_deref().unwrap_or("未設定"));
            }
        }
    }

    Ok(())
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
