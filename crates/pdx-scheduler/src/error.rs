//! Scheduler errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Hedge grouping needs at least 2 accounts, got {0}")]
    TooFewAccounts(usize),

    #[error(transparent)]
    Client(#[from] pdx_client::ClientError),
}
