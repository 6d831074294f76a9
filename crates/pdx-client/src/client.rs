//! Per-account venue client.
//!
//! Every account gets its own HTTP session routed through its assigned
//! proxy with its assigned User-Agent, so concurrent accounts never share
//! connection state. Authentication signs a fresh challenge per attempt
//! (the venue rejects stale timestamps); orders are signed once and the
//! same payload is resubmitted on retry.

use std::time::Duration;

use chrono::Utc;
use pdx_core::AccountDescriptor;
use pdx_crypto::{
    felt_from_hex, sign_auth_message, sign_order_message, CryptoError, Felt, NonceMode,
    OrderSigningParams, SigningKey, AUTH_VALIDITY_SECS,
};
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, info};

use crate::error::{ClientError, Result};
use crate::retry::{retry, RetryPolicy};
use crate::types::{
    signature_json, AccountInfo, AuthResponse, OrderAck, OrderPayload, Position,
    PositionsResponse, SystemConfig,
};

/// Default timeout for venue requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const HEADER_ACCOUNT: &str = "PARADEX-STARKNET-ACCOUNT";
const HEADER_TIMESTAMP: &str = "PARADEX-TIMESTAMP";
const HEADER_EXPIRATION: &str = "PARADEX-SIGNATURE-EXPIRATION";
const HEADER_SIGNATURE: &str = "PARADEX-STARKNET-SIGNATURE";

/// Fetch `/v1/system/config` once at startup. No account identity needed.
pub async fn fetch_system_config(base_url: &str, policy: &RetryPolicy) -> Result<SystemConfig> {
    let http = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
    let url = format!("{}/v1/system/config", base_url.trim_end_matches('/'));
    let (http, url) = (&http, url.as_str());
    let config = retry(policy, "fetch_system_config", move || async move {
        let response = http.get(url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<SystemConfig>().await?)
    })
    .await?;
    info!(chain_id = %config.starknet_chain_id, "Fetched system config");
    Ok(config)
}

/// Authenticated REST session for one account.
pub struct ExchangeClient {
    http: Client,
    base_url: String,
    address: Felt,
    address_hex: String,
    label: String,
    key: SigningKey,
    chain_id: Felt,
    retry: RetryPolicy,
    jwt: Option<String>,
}

impl ExchangeClient {
    /// Build a session for `account`, routed through its proxy.
    /// An empty proxy string means a direct connection.
    pub fn new(
        base_url: &str,
        account: &AccountDescriptor,
        chain_id: Felt,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let key =
            SigningKey::from_hex(account.private_key.expose()).map_err(CryptoError::from)?;
        let address = felt_from_hex(&account.address).map_err(CryptoError::from)?;
        let mut builder = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(account.user_agent.clone());
        if !account.proxy.is_empty() {
            builder = builder.proxy(reqwest::Proxy::all(&account.proxy)?);
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            address,
            address_hex: account.address.clone(),
            label: account.short_address(),
            key,
            chain_id,
            retry,
            jwt: None,
        })
    }

    /// Obtain a bearer token by signing the auth challenge.
    ///
    /// Each attempt recomputes timestamp, expiration, and signature so a
    /// retry never replays a challenge the venue already saw expire.
    pub async fn authenticate(&mut self) -> Result<()> {
        let url = format!("{}/v1/auth", self.base_url);
        let (this, url) = (&*self, url.as_str());
        let jwt = retry(&this.retry, "authenticate", move || async move {
            let timestamp = Utc::now().timestamp() as u64;
            let expiration = timestamp + AUTH_VALIDITY_SECS;
            let signature = sign_auth_message(
                &this.key,
                &this.address,
                &this.chain_id,
                timestamp,
                expiration,
                NonceMode::Random,
            )
            .map_err(ClientError::from)?;
            let response = this
                .http
                .post(url)
                .header(HEADER_ACCOUNT, &this.address_hex)
                .header(HEADER_TIMESTAMP, timestamp.to_string())
                .header(HEADER_EXPIRATION, expiration.to_string())
                .header(HEADER_SIGNATURE, signature_json(&signature))
                .send()
                .await?;
            let response = check_status(response).await?;
            let body: AuthResponse = response.json().await?;
            body.jwt_token.ok_or(ClientError::MissingField("jwt_token"))
        })
        .await?;
        debug!(account = %self.label, "Authenticated");
        self.jwt = Some(jwt);
        Ok(())
    }

    /// Account status and free collateral.
    pub async fn fetch_account(&self) -> Result<AccountInfo> {
        let url = format!("{}/v1/account", self.base_url);
        let (this, url) = (self, url.as_str());
        retry(&this.retry, "fetch_account", move || async move {
            let response = this.authorized(this.http.get(url))?.send().await?;
            let response = check_status(response).await?;
            Ok(response.json::<AccountInfo>().await?)
        })
        .await
    }

    /// All currently open positions.
    pub async fn fetch_positions(&self) -> Result<Vec<Position>> {
        let url = format!("{}/v1/positions", self.base_url);
        let (this, url) = (self, url.as_str());
        let body = retry(&this.retry, "fetch_positions", move || async move {
            let response = this.authorized(this.http.get(url))?.send().await?;
            let response = check_status(response).await?;
            Ok(response.json::<PositionsResponse>().await?)
        })
        .await?;
        Ok(body.results)
    }

    /// Sign and submit an order.
    ///
    /// The signature is computed once; retries resubmit the identical
    /// payload, which the venue deduplicates by signature timestamp.
    pub async fn place_order(&self, params: &OrderSigningParams) -> Result<OrderAck> {
        let signature = sign_order_message(
            &self.key,
            &self.address,
            &self.chain_id,
            params,
            NonceMode::Random,
        )
        .map_err(ClientError::from)?;
        let payload = OrderPayload::from_signed(params, &signature);
        let url = format!("{}/v1/orders", self.base_url);
        let (this, url, payload) = (self, url.as_str(), &payload);
        let ack = retry(&this.retry, "place_order", move || async move {
            let response = this
                .authorized(this.http.post(url))?
                .json(payload)
                .send()
                .await?;
            let response = check_status(response).await?;
            Ok(response.json::<OrderAck>().await?)
        })
        .await?;
        info!(
            account = %self.label,
            market = %params.market,
            side = %params.side,
            size = %params.size,
            order_id = ?ack.id,
            "Order placed"
        );
        Ok(ack)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let jwt = self.jwt.as_deref().ok_or(ClientError::NotAuthenticated)?;
        Ok(request.bearer_auth(jwt))
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
