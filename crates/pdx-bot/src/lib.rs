//! Bot assembly: configuration, account pool loading, and the run loop.

pub mod accounts;
pub mod app;
pub mod config;
pub mod error;

pub use accounts::load_accounts;
pub use app::Application;
pub use config::BotConfig;
pub use error::{AppError, AppResult};
