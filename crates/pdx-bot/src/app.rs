//! Application wiring.

use std::time::Duration;

use pdx_client::{fetch_system_config, RetryPolicy};
use pdx_crypto::{chain_id_felt, CryptoError};
use pdx_scheduler::{CycleConfig, Scheduler, SchedulerConfig};
use tracing::info;

use crate::accounts::load_accounts;
use crate::config::BotConfig;
use crate::error::AppResult;

pub struct Application {
    config: BotConfig,
    accounts: Vec<pdx_core::AccountDescriptor>,
}

impl Application {
    /// Load the account pool and validate it against the config.
    pub fn new(config: BotConfig) -> AppResult<Self> {
        let accounts = load_accounts(&config)?;
        Ok(Self { config, accounts })
    }

    /// Discover the venue chain id, then hand off to the scheduler.
    pub async fn run(&self) -> AppResult<()> {
        let retry = RetryPolicy::with_delay(Duration::from_secs_f64(
            self.config.retry_delay_seconds,
        ));

        let system_config = fetch_system_config(&self.config.base_url, &retry).await?;
        let chain_id =
            chain_id_felt(&system_config.starknet_chain_id).map_err(CryptoError::from)?;
        info!(
            chain_id = %system_config.starknet_chain_id,
            market = %self.config.trading_pair,
            leverage = self.config.leverage,
            accounts = self.accounts.len(),
            "Venue config resolved, starting scheduler"
        );

        let scheduler_config = SchedulerConfig {
            cycles_per_account: self.config.cycles_per_account,
            delay_between_cycles: self.config.delay_between_cycles_seconds,
            delay_between_groups: self.config.delay_between_groups_seconds,
            cycle: CycleConfig {
                base_url: self.config.base_url.clone(),
                market: self.config.trading_pair.clone(),
                balance_usage_percent: self.config.balance_usage_percentage,
                delay_between_buy_sell: self.config.delay_between_buy_sell_seconds,
                delay_between_trades: self.config.delay_between_trades_seconds,
                retry,
            },
        };

        let scheduler = Scheduler::new(scheduler_config, self.accounts.clone(), chain_id)?;
        scheduler.run().await?;
        Ok(())
    }
}
