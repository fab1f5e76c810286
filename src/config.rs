use crate::error::{CircleGridError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ENV_ACCOUNT_ID: &str = "CLOUDFLARE_ACCOUNT_ID";
pub const ENV_GATEWAY: &str = "CLOUDFLARE_AI_GATEWAY";
pub const ENV_BIND: &str = "CIRCLE_GRID_BIND";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub account_id: Option<String>,
    pub gateway_name: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
    pub bind_addr: String,
    pub static_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            account_id: None,
            gateway_name: None,
            model: "claude-haiku-4-5".into(),
            max_tokens: 2048,
            timeout_seconds: 120,
            bind_addr: "127.0.0.1:8787".into(),
            static_dir: None,
        }
    }
}

/// モデル呼び出しに必要な3つの設定値
#[derive(Debug, Clone)]
pub struct GatewayCredentials {
    pub api_key: String,
    pub account_id: String,
    pub gateway_name: String,
}

/// 欠けている設定（ログには真偽値のみ出す）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingSettings {
    pub has_api_key: bool,
    pub has_account_id: bool,
    pub has_gateway: bool,
}

impl Config {
    /// 設定ファイルを読み込み、環境変数で上書き
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CircleGridError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("circle-grid").join("config.json"))
    }

    /// 環境変数を優先
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_API_KEY) {
            self.api_key = Some(v);
        }
        if let Some(v) = lookup(ENV_ACCOUNT_ID) {
            self.account_id = Some(v);
        }
        if let Some(v) = lookup(ENV_GATEWAY) {
            self.gateway_name = Some(v);
        }
        if let Some(v) = lookup(ENV_BIND) {
            self.bind_addr = v;
        }
    }

    /// 3つ揃っていれば資格情報を返す。空文字は未設定扱い
    pub fn credentials(&self) -> std::result::Result<GatewayCredentials, MissingSettings> {
        let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);

        match (
            present(&self.api_key),
            present(&self.account_id),
            present(&self.gateway_name),
        ) {
            (Some(api_key), Some(account_id), Some(gateway_name)) => Ok(GatewayCredentials {
                api_key,
                account_id,
                gateway_name,
            }),
            (api_key, account_id, gateway) => Err(MissingSettings {
                has_api_key: api_key.is_some(),
                has_account_id: account_id.is_some(),
                has_gateway: gateway.is_some(),
            }),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }

    /// 表示用（末尾4文字以外を伏せる）
    pub fn masked_api_key(&self) -> String {
        match self.api_key.as_deref() {
            Some(key) if key.chars().count() > 4 => {
                let tail: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
                format!("****{}", tail)
            }
            Some(_) => "****".into(),
            None => "未設定".into(),
        }
    }
}

impl GatewayCredentials {
    /// Cloudflare AI Gateway 経由のAnthropicエンドポイント
    pub fn base_url(&self) -> String {
        format!(
            "https://gateway.ai.cloudflare.com/v1/{}/{}/anthropic",
            self.account_id, self.gateway_name
        )
    }
}
