use crate::error::{InboundError, Result};
use pda_inbound_common::login::DEFAULT_LOGIN_DELAY_MS;
use pda_inbound_common::notice::DEFAULT_NOTICE_MS;
use pda_inbound_common::simulator::DEFAULT_SCAN_HIT_RATE;
use pda_inbound_common::{MidTable, SessionConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ログイン画面の工号初期値
    pub default_operator: Option<String>,
    /// 許可MIDの上書き（空なら組み込みリスト）
    pub valid_mids: Vec<String>,
    pub login_delay_ms: u64,
    pub notice_ms: u64,
    /// 模擬スキャンで許可MIDが読まれる確率
    pub scan_hit_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_operator: None,
            valid_mids: Vec::new(),
            login_delay_ms: DEFAULT_LOGIN_DELAY_MS,
            notice_ms: DEFAULT_NOTICE_MS,
            scan_hit_rate: DEFAULT_SCAN_HIT_RATE,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 既定値で上書き保存する。既存ファイルが壊れていても読まない
    pub fn reset() -> Result<Self> {
        Self::reset_at(&Self::config_path()?)
    }

    pub fn reset_at(path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| InboundError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("pda-inbound").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.scan_hit_rate) {
            return Err(InboundError::Config(format!(
                "scan_hit_rate は 0.0〜1.0 で指定してください: {}",
                self.scan_hit_rate
            )));
        }
        Ok(())
    }

    pub fn set_operator(&mut self, operator: Option<String>) -> Result<()> {
        self.default_operator = operator.filter(|o| !o.trim().is_empty());
        self.save()
    }

    pub fn mid_table(&self) -> MidTable {
        MidTable::from_list(self.valid_mids.iter().cloned())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            mids: self.mid_table(),
            login_delay_ms: self.login_delay_ms,
            notice_ms: self.notice_ms,
            default_operator: self.default_operator.clone(),
        }
    }
}
