//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Account pool error: {0}")]
    Accounts(String),

    #[error("Client error: {0}")]
    Client(#[from] pdx_client::ClientError),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] pdx_scheduler::SchedulerError),

    #[error("Crypto error: {0}")]
    Crypto(#[from] pdx_crypto::CryptoError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] pdx_telemetry::TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
