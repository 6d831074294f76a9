//! Application configuration.
//!
//! Delay and percentage knobs are `[min, max]` arrays sampled per use, so
//! no two accounts or rounds move on the same clock.

use pdx_core::{CycleRange, UniformRange};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Venue REST base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Market to trade, e.g. "BTC-USD-PERP".
    pub trading_pair: String,

    /// Leverage configured on the venue accounts. Sizing itself works off
    /// free collateral; this is operator-facing context in the startup log.
    #[serde(default = "default_leverage")]
    pub leverage: u32,

    /// Percent of levered collateral to deploy per cycle.
    pub balance_usage_percentage: UniformRange,

    /// Seconds between scheduler rounds.
    pub delay_between_cycles_seconds: UniformRange,

    /// Seconds an account idles after closing out.
    pub delay_between_trades_seconds: UniformRange,

    /// Seconds between an entry order and position close-out.
    pub delay_between_buy_sell_seconds: UniformRange,

    /// Seconds between hedge groups within a round.
    pub delay_between_groups_seconds: UniformRange,

    /// Rounds to run, drawn once at startup.
    pub cycles_per_account: CycleRange,

    /// Fixed pause between retries of a failed venue request.
    #[serde(default = "default_retry_delay_seconds")]
    pub retry_delay_seconds: f64,

    #[serde(default = "default_wallets_file")]
    pub wallets_file: String,

    #[serde(default = "default_proxies_file")]
    pub proxies_file: String,

    #[serde(default = "default_user_agents_file")]
    pub user_agents_file: String,
}

fn default_base_url() -> String {
    "https://api.testnet.paradex.trade".to_string()
}

fn default_leverage() -> u32 {
    1
}

fn default_retry_delay_seconds() -> f64 {
    5.0
}

fn default_wallets_file() -> String {
    "wallets.json".to_string()
}

fn default_proxies_file() -> String {
    "proxies.txt".to_string()
}

fn default_user_agents_file() -> String {
    "user_agents.txt".to_string()
}

impl BotConfig {
    /// Resolve the config path (CLI arg, then `PDX_CONFIG`, then default)
    /// and load it.
    pub fn load(cli_path: Option<String>) -> AppResult<Self> {
        let config_path = cli_path
            .or_else(|| std::env::var("PDX_CONFIG").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());
        if !Path::new(&config_path).exists() {
            return Err(AppError::Config(format!(
                "Config file not found: {config_path}"
            )));
        }
        Self::from_file(&config_path)
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.trading_pair.trim().is_empty() {
            return Err(AppError::Config("trading_pair must not be empty".into()));
        }
        if self.leverage == 0 {
            return Err(AppError::Config("leverage must be at least 1".into()));
        }
        if !(self.retry_delay_seconds > 0.0 && self.retry_delay_seconds.is_finite()) {
            return Err(AppError::Config(
                "retry_delay_seconds must be a positive number".into(),
            ));
        }
        Ok(())
    }
}
