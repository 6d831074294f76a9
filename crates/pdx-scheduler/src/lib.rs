//! Multi-account trade scheduling.
//!
//! Accounts are shuffled each outer cycle, partitioned into hedge groups
//! of two or three, and each group runs its members' trade cycles
//! concurrently while groups themselves run one after another. Directional
//! roles are positional within a group: the first member buys, the second
//! sells, a third shorts at half size so group exposure stays roughly flat.

pub mod cycle;
pub mod error;
pub mod partition;
pub mod scheduler;

pub use cycle::{position_size, run_trade_cycle, CycleConfig, CycleOutcome};
pub use error::SchedulerError;
pub use partition::partition_sizes;
pub use scheduler::{role_for_position, Scheduler, SchedulerConfig};
