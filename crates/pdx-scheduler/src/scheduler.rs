//! Outer scheduling loop over the account pool.
//!
//! Each round reshuffles the pool so group membership and roles differ
//! from round to round. Members of a group trade concurrently; groups run
//! one after another with a sampled pause in between, and the number of
//! rounds is drawn once at startup.

use futures_util::future::join_all;
use pdx_core::{AccountDescriptor, CycleRange, TradeRole, UniformRange};
use pdx_crypto::Felt;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use crate::cycle::{run_trade_cycle, CycleConfig};
use crate::error::SchedulerError;
use crate::partition::partition_sizes;

/// Directional role by position within a hedge group.
pub fn role_for_position(slot: usize) -> TradeRole {
    match slot {
        0 => TradeRole::Buy,
        1 => TradeRole::Sell,
        _ => TradeRole::ShortHalf,
    }
}

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// How many rounds to run, drawn once at startup.
    pub cycles_per_account: CycleRange,
    /// Seconds between rounds.
    pub delay_between_cycles: UniformRange,
    /// Seconds between groups within a round.
    pub delay_between_groups: UniformRange,
    pub cycle: CycleConfig,
}

pub struct Scheduler {
    config: SchedulerConfig,
    accounts: Vec<AccountDescriptor>,
    chain_id: Felt,
}

impl Scheduler {
    /// Validates the pool is large enough to hedge before anything runs.
    pub fn new(
        config: SchedulerConfig,
        accounts: Vec<AccountDescriptor>,
        chain_id: Felt,
    ) -> Result<Self, SchedulerError> {
        partition_sizes(accounts.len())?;
        Ok(Self {
            config,
            accounts,
            chain_id,
        })
    }

    pub async fn run(&self) -> Result<(), SchedulerError> {
        let total_rounds = {
            let mut rng = rand::thread_rng();
            self.config.cycles_per_account.sample(&mut rng)
        };
        info!(
            total_rounds,
            accounts = self.accounts.len(),
            market = %self.config.cycle.market,
            "Scheduler starting"
        );

        for round in 1..=total_rounds {
            let (order, round_delay) = {
                let mut rng = rand::thread_rng();
                let mut indices: Vec<usize> = (0..self.accounts.len()).collect();
                indices.shuffle(&mut rng);
                (
                    indices,
                    self.config.delay_between_cycles.sample_duration(&mut rng),
                )
            };
            let sizes = partition_sizes(self.accounts.len())?;
            info!(round, total_rounds, groups = sizes.len(), "Round starting");

            let mut cursor = 0;
            for (group_index, &size) in sizes.iter().enumerate() {
                let members = &order[cursor..cursor + size];
                cursor += size;
                self.run_group(round, group_index, members).await;

                if group_index + 1 < sizes.len() {
                    let pause = {
                        let mut rng = rand::thread_rng();
                        self.config.delay_between_groups.sample_duration(&mut rng)
                    };
                    tokio::time::sleep(pause).await;
                }
            }

            // Groups are serialized, so one pause here suspends every
            // account between its rounds; sleeping inside each cycle
            // instead would change nothing observable.
            if round < total_rounds {
                tokio::time::sleep(round_delay).await;
            }
        }

        info!(total_rounds, "Scheduler finished");
        Ok(())
    }

    /// Run every member of one hedge group concurrently.
    ///
    /// A member's failure is logged and does not fail the round; its
    /// hedge partners finish their cycles regardless.
    async fn run_group(&self, round: u32, group_index: usize, members: &[usize]) {
        let futures = members.iter().enumerate().map(|(slot, &account_index)| {
            let account = &self.accounts[account_index];
            let role = role_for_position(slot);
            debug!(
                round,
                group = group_index,
                account = %account.short_address(),
                ?role,
                "Dispatching trade cycle"
            );
            run_trade_cycle(&self.config.cycle, account, self.chain_id, role)
        });

        for (slot, result) in join_all(futures).await.into_iter().enumerate() {
            let account = &self.accounts[members[slot]];
            match result {
                Ok(outcome) => debug!(
                    round,
                    group = group_index,
                    account = %account.short_address(),
                    ?outcome,
                    "Trade cycle finished"
                ),
                Err(err) => warn!(
                    round,
                    group = group_index,
                    account = %account.short_address(),
                    error = %err,
                    "Trade cycle failed"
                ),
            }
        }
    }
}
