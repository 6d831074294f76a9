//! Account pool assembly from wallet, proxy, and user-agent files.
//!
//! Wallets and proxies must pair one-to-one: an account sharing another's
//! proxy would correlate the sessions. User agents merely need to exist
//! and are assigned round-robin.

use pdx_core::{AccountDescriptor, SecretKeyHex};
use pdx_crypto::felt_from_hex;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

use crate::config::BotConfig;
use crate::error::{AppError, AppResult};

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

/// One entry in `wallets.json`.
#[derive(Debug, Deserialize)]
struct WalletEntry {
    address: String,
    private_key: SecretKeyHex,
}

/// Load and cross-validate the account pool described by `config`.
pub fn load_accounts(config: &BotConfig) -> AppResult<Vec<AccountDescriptor>> {
    let wallets = load_wallets(&config.wallets_file)?;
    let proxies = load_lines(&config.proxies_file)?;
    let user_agents = load_user_agents(&config.user_agents_file)?;

    if wallets.len() < 2 {
        return Err(AppError::Accounts(format!(
            "Need at least 2 wallets for hedge grouping, got {}",
            wallets.len()
        )));
    }
    if wallets.len() != proxies.len() {
        return Err(AppError::Accounts(format!(
            "Wallet and proxy counts must match: {} wallets, {} proxies",
            wallets.len(),
            proxies.len()
        )));
    }
    for (index, wallet) in wallets.iter().enumerate() {
        if felt_from_hex(&wallet.address).is_err() {
            return Err(AppError::Accounts(format!(
                "Wallet {index} has a malformed address: {}",
                wallet.address
            )));
        }
    }

    let accounts: Vec<AccountDescriptor> = wallets
        .into_iter()
        .zip(proxies)
        .enumerate()
        .map(|(index, (wallet, proxy))| AccountDescriptor {
            address: wallet.address,
            private_key: wallet.private_key,
            proxy,
            user_agent: user_agents[index % user_agents.len()].clone(),
            index,
        })
        .collect();

    info!(accounts = accounts.len(), "Account pool loaded");
    Ok(accounts)
}

fn load_wallets(path: &str) -> AppResult<Vec<WalletEntry>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::Accounts(format!("Failed to read {path}: {e}")))?;
    serde_json::from_str(&content)
        .map_err(|e| AppError::Accounts(format!("Failed to parse {path}: {e}")))
}

/// Non-empty trimmed lines of a text file.
fn load_lines(path: &str) -> AppResult<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::Accounts(format!("Failed to read {path}: {e}")))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// User agents are optional; a missing or empty file falls back to one
/// stock browser string.
fn load_user_agents(path: &str) -> AppResult<Vec<String>> {
    if !Path::new(path).exists() {
        warn!(path, "User-agent file not found, using default");
        return Ok(vec![DEFAULT_USER_AGENT.to_string()]);
    }
    let lines = load_lines(path)?;
    if lines.is_empty() {
        warn!(path, "User-agent file is empty, using default");
        return Ok(vec![DEFAULT_USER_AGENT.to_string()]);
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct TempFiles {
        dir: std::path::PathBuf,
    }

    impl TempFiles {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("pdx-accounts-{name}-{}", std::process::id()));
            std::fs::create_dir_all(&dir).unwrap();
            Self { dir }
        }

        fn write(&self, name: &str, content: &str) -> String {
            let path = self.dir.join(name);
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(content.as_bytes()).unwrap();
            path.to_string_lossy().into_owned()
        }
    }

    impl Drop for TempFiles {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.dir);
        }
    }

    fn config_with(files: &TempFiles, wallets: &str, proxies: &str) -> BotConfig {
        let toml_src = r#"
            trading_pair = "BTC-USD-PERP"
            balance_usage_percentage = [20.0, 40.0]
            delay_between_cycles_seconds = [1.0, 2.0]
            delay_between_trades_seconds = [1.0, 2.0]
            delay_between_buy_sell_seconds = [1.0, 2.0]
            delay_between_groups_seconds = [1.0, 2.0]
            cycles_per_account = [1, 2]
        "#;
        let mut config: BotConfig = toml::from_str(toml_src).unwrap();
        config.wallets_file = files.write("wallets.json", wallets);
        config.proxies_file = files.write("proxies.txt", proxies);
        config.user_agents_file = files.dir.join("missing_uas.txt").to_string_lossy().into_owned();
        config
    }

    const TWO_WALLETS: &str = r#"[
        {"address": "0xaa01", "private_key": "0x1111"},
        {"address": "0xaa02", "private_key": "0x2222"}
    ]"#;

    #[test]
    fn test_loads_matching_pool() {
        let files = TempFiles::new("ok");
        let config = config_with(&files, TWO_WALLETS, "http://p1:8080\nhttp://p2:8080\n");
        let accounts = load_accounts(&config).unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].address, "0xaa01");
        assert_eq!(accounts[1].proxy, "http://p2:8080");
        assert_eq!(accounts[0].user_agent, DEFAULT_USER_AGENT);
        assert_eq!(accounts[1].index, 1);
    }

    #[test]
    fn test_rejects_single_wallet() {
        let files = TempFiles::new("single");
        let config = config_with(
            &files,
            r#"[{"address": "0xaa01", "private_key": "0x1111"}]"#,
            "http://p1:8080\n",
        );
        let err = load_accounts(&config).unwrap_err();
        assert!(matches!(err, AppError::Accounts(_)));
    }

    #[test]
    fn test_rejects_malformed_address() {
        let files = TempFiles::new("badaddr");
        let config = config_with(
            &files,
            r#"[
                {"address": "0xaa01", "private_key": "0x1111"},
                {"address": "not-hex", "private_key": "0x2222"}
            ]"#,
            "http://p1:8080\nhttp://p2:8080\n",
        );
        let err = load_accounts(&config).unwrap_err();
        assert!(matches!(err, AppError::Accounts(msg) if msg.contains("malformed address")));
    }

    #[test]
    fn test_rejects_proxy_count_mismatch() {
        let files = TempFiles::new("mismatch");
        let config = config_with(&files, TWO_WALLETS, "http://p1:8080\n");
        let err = load_accounts(&config).unwrap_err();
        assert!(matches!(err, AppError::Accounts(_)));
    }

    #[test]
    fn test_user_agents_cycle() {
        let files = TempFiles::new("uas");
        let mut config = config_with(&files, TWO_WALLETS, "http://p1:8080\nhttp://p2:8080\n");
        config.user_agents_file = files.write("user_agents.txt", "ua-one\n");
        let accounts = load_accounts(&config).unwrap();
        assert_eq!(accounts[0].user_agent, "ua-one");
        assert_eq!(accounts[1].user_agent, "ua-one");
    }
}
