use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "circle-grid")]
#[command(about = "ワークシート写真から丸つけゲーム用の単語グリッドを作るツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 抽出ゲートウェイ（HTTPサーバー）を起動
    Serve {
        /// 待ち受けアドレス（例: 127.0.0.1:8787）
        #[arg(short, long)]
        bind: Option<String>,

        /// Web UI（trunk build の出力）のディレクトリ
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// ワークシート写真から単語を抽出（2枚目以降はマージ）
    Extract {
        /// 写真ファイルまたはフォルダ（複数可）
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 単語リストJSONから印刷用グリッドを生成
    Grid {
        /// 入力JSONファイル（配列 または {title, words}）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力形式 (html/json/both)
        #[arg(short, long, default_value = "html")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// CloudflareアカウントIDを設定
        #[arg(long)]
        set_account_id: Option<String>,

        /// AI Gateway名を設定
        #[arg(long)]
        set_gateway: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default)]
pub enum ExportFormat {
    #[default]
    Html,
    Json,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Ok(ExportFormat::Html),
            "json" => Ok(ExportFormat::Json),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use html, json, or both", s)),
        }
    }
}
