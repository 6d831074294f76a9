//! One account's trade cycle.
//!
//! Authenticate, gate on account health, enter with a market order sized
//! from free collateral, wait, flatten every open position, wait again.
//! The HTTP session lives only as long as the cycle; every exit path drops
//! it so the next cycle starts from a clean slate.

use chrono::Utc;
use pdx_client::{ExchangeClient, RetryPolicy};
use pdx_core::{AccountDescriptor, OrderType, TradeRole, UniformRange};
use pdx_crypto::{Felt, OrderSigningParams};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::SchedulerError;

/// Static inputs shared by every trade cycle.
#[derive(Debug, Clone)]
pub struct CycleConfig {
    pub base_url: String,
    /// Market symbol, e.g. `BTC-USD-PERP`.
    pub market: String,
    /// Percent of free collateral to deploy, sampled per cycle.
    pub balance_usage_percent: UniformRange,
    /// Seconds between the entry order and position close-out.
    pub delay_between_buy_sell: UniformRange,
    /// Seconds to idle after close-out before the cycle ends.
    pub delay_between_trades: UniformRange,
    pub retry: RetryPolicy,
}

/// How a trade cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed,
    /// Account status was not `ACTIVE`; nothing was signed or sent.
    SkippedInactive,
    /// No free collateral, or sizing truncated to zero.
    SkippedNoCollateral,
}

/// Entry size for a cycle: percent of free collateral, truncated to
/// whole units, halved for the half-size short role.
pub fn position_size(collateral: Decimal, percent: f64, role: TradeRole) -> Decimal {
    let fraction = Decimal::from_f64_retain(percent / 100.0).unwrap_or_default();
    let mut size = collateral * fraction;
    if role.is_half_size() {
        size /= Decimal::TWO;
    }
    size.trunc()
}

/// Run one full trade cycle for `account` in direction `role`.
pub async fn run_trade_cycle(
    config: &CycleConfig,
    account: &AccountDescriptor,
    chain_id: Felt,
    role: TradeRole,
) -> Result<CycleOutcome, SchedulerError> {
    let mut client =
        ExchangeClient::new(&config.base_url, account, chain_id, config.retry.clone())?;
    client.authenticate().await?;

    let account_info = client.fetch_account().await?;
    if !account_info.is_active() {
        info!(
            account = %client.label(),
            status = %account_info.status,
            "Account not active, skipping cycle"
        );
        return Ok(CycleOutcome::SkippedInactive);
    }
    if account_info.free_collateral <= Decimal::ZERO {
        info!(account = %client.label(), "No free collateral, skipping cycle");
        return Ok(CycleOutcome::SkippedNoCollateral);
    }

    // thread_rng is not Send, so all randomness is drawn before the first
    // subsequent await.
    let (percent, entry_delay, close_delay) = {
        let mut rng = rand::thread_rng();
        (
            config.balance_usage_percent.sample(&mut rng),
            config.delay_between_buy_sell.sample_duration(&mut rng),
            config.delay_between_trades.sample_duration(&mut rng),
        )
    };
    let size = position_size(account_info.free_collateral, percent, role);
    if size.is_zero() {
        info!(account = %client.label(), "Sized to zero, skipping cycle");
        return Ok(CycleOutcome::SkippedNoCollateral);
    }

    let entry = OrderSigningParams {
        timestamp_ms: now_ms(),
        market: config.market.clone(),
        side: role.entry_side(),
        order_type: OrderType::Market,
        size,
        price: None,
    };
    client.place_order(&entry).await?;

    tokio::time::sleep(entry_delay).await;

    // Close every open position on the traded market. A close failure on
    // one position must not strand the others.
    let positions = client.fetch_positions().await?;
    for position in positions {
        if position.market != config.market || position.close_size().is_zero() {
            continue;
        }
        let close = OrderSigningParams {
            timestamp_ms: now_ms(),
            market: position.market.clone(),
            side: position.side.closing_side(),
            order_type: OrderType::Market,
            size: position.close_size(),
            price: None,
        };
        if let Err(err) = client.place_order(&close).await {
            warn!(
                account = %client.label(),
                market = %position.market,
                error = %err,
                "Failed to close position, continuing"
            );
        }
    }

    tokio::time::sleep(close_delay).await;
    Ok(CycleOutcome::Completed)
}

fn now_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdx_core::SecretKeyHex;
    use pdx_crypto::chain_id_felt;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    type RequestLog = Arc<Mutex<Vec<String>>>;

    /// Minimal venue stub: answers auth, account, positions, and order
    /// endpoints over plain HTTP and records every request line.
    async fn spawn_stub_venue(status: &str, collateral: &str) -> (String, RequestLog) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
        let account_body = format!(r#"{{"status":"{status}","free_collateral":"{collateral}"}}"#);
        let log_handle = log.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let head = String::from_utf8_lossy(&buf[..n]).into_owned();
                let request_line = head.lines().next().unwrap_or_default().to_string();
                log_handle.lock().unwrap().push(request_line.clone());
                let body = if request_line.contains("/v1/auth") {
                    r#"{"jwt_token":"stub-jwt"}"#.to_string()
                } else if request_line.contains("/v1/account") {
                    account_body.clone()
                } else if request_line.contains("/v1/positions") {
                    r#"{"results":[]}"#.to_string()
                } else {
                    r#"{"id":"1","status":"NEW"}"#.to_string()
                };
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });
        (base_url, log)
    }

    fn stub_cycle_config(base_url: String) -> CycleConfig {
        CycleConfig {
            base_url,
            market: "BTC-USD-PERP".to_string(),
            balance_usage_percent: UniformRange::new(50.0, 50.0).unwrap(),
            delay_between_buy_sell: UniformRange::new(0.0, 0.0).unwrap(),
            delay_between_trades: UniformRange::new(0.0, 0.0).unwrap(),
            retry: RetryPolicy {
                delay: Duration::from_millis(10),
                max_attempts: Some(2),
            },
        }
    }

    fn stub_account() -> AccountDescriptor {
        AccountDescriptor {
            address: "0x1234abcd".to_string(),
            private_key: SecretKeyHex::new(
                "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcd",
            ),
            proxy: String::new(),
            user_agent: "ua-test".to_string(),
            index: 0,
        }
    }

    fn requests_matching(log: &RequestLog, path: &str) -> usize {
        log.lock()
            .unwrap()
            .iter()
            .filter(|line| line.contains(path))
            .count()
    }

    #[tokio::test]
    async fn test_zero_collateral_skips_before_any_order() {
        let (base_url, requests) = spawn_stub_venue("ACTIVE", "0").await;
        let outcome = run_trade_cycle(
            &stub_cycle_config(base_url),
            &stub_account(),
            chain_id_felt("PRIVATE_SN_TESTNET").unwrap(),
            TradeRole::Buy,
        )
        .await
        .unwrap();
        assert_eq!(outcome, CycleOutcome::SkippedNoCollateral);
        assert_eq!(requests_matching(&requests, "/v1/auth"), 1);
        assert_eq!(requests_matching(&requests, "/v1/account"), 1);
        // The gate fires before anything is signed or submitted.
        assert_eq!(requests_matching(&requests, "/v1/orders"), 0);
        assert_eq!(requests_matching(&requests, "/v1/positions"), 0);
    }

    #[tokio::test]
    async fn test_inactive_account_skips_cycle() {
        let (base_url, requests) = spawn_stub_venue("CLOSED", "100").await;
        let outcome = run_trade_cycle(
            &stub_cycle_config(base_url),
            &stub_account(),
            chain_id_felt("PRIVATE_SN_TESTNET").unwrap(),
            TradeRole::Sell,
        )
        .await
        .unwrap();
        assert_eq!(outcome, CycleOutcome::SkippedInactive);
        assert_eq!(requests_matching(&requests, "/v1/orders"), 0);
    }

    #[tokio::test]
    async fn test_funded_cycle_places_one_entry_and_completes() {
        let (base_url, requests) = spawn_stub_venue("ACTIVE", "100").await;
        let outcome = run_trade_cycle(
            &stub_cycle_config(base_url),
            &stub_account(),
            chain_id_felt("PRIVATE_SN_TESTNET").unwrap(),
            TradeRole::Buy,
        )
        .await
        .unwrap();
        assert_eq!(outcome, CycleOutcome::Completed);
        // One entry order; the venue reports no open positions, so no
        // close orders follow.
        assert_eq!(requests_matching(&requests, "/v1/orders"), 1);
        assert_eq!(requests_matching(&requests, "/v1/positions"), 1);
    }

    #[test]
    fn test_position_size_full_roles() {
        assert_eq!(position_size(dec!(1000), 10.0, TradeRole::Buy), dec!(100));
        assert_eq!(position_size(dec!(1000), 10.0, TradeRole::Sell), dec!(100));
    }

    #[test]
    fn test_position_size_half_role() {
        assert_eq!(
            position_size(dec!(1000), 10.0, TradeRole::ShortHalf),
            dec!(50)
        );
    }

    #[test]
    fn test_position_size_truncates_to_whole_units() {
        assert_eq!(position_size(dec!(999), 10.0, TradeRole::Buy), dec!(99));
        assert_eq!(
            position_size(dec!(999), 10.0, TradeRole::ShortHalf),
            dec!(49)
        );
    }

    #[test]
    fn test_position_size_zero_collateral() {
        assert_eq!(position_size(dec!(0), 50.0, TradeRole::Buy), dec!(0));
    }

    #[test]
    fn test_tiny_collateral_truncates_to_zero() {
        assert_eq!(position_size(dec!(5), 10.0, TradeRole::Buy), dec!(0));
    }
}
