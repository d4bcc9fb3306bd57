//! Caller-side client for the gateway's HTTP contract.
//!
//! Used by `gateway-cli` and the integration tests.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::backend::ProcessRequest;
use crate::gateway::{HEALTH_PATH, PROCESS_PATH, STATS_PATH};

/// Why a comma-separated data list was rejected before any call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataListError {
    #[error("Please enter some data to process.")]
    Empty,

    #[error("Please enter valid comma-separated numbers.")]
    NoValidNumbers,
}

/// Parse `"1, 2, x, 3"` into `[1, 2, 3]`. Each token is read by
/// [`parse_int_prefix`]; tokens without a leading integer are dropped and a
/// list with no integers at all is an error.
pub fn parse_data_list(input: &str) -> Result<Vec<i64>, DataListError> {
    if input.trim().is_empty() {
        return Err(DataListError::Empty);
    }

    let data: Vec<i64> = input.split(',').filter_map(parse_int_prefix).collect();

    if data.is_empty() {
        Err(DataListError::NoValidNumbers)
    } else {
        Ok(data)
    }
}

/// Read the integer at the start of `token`, ignoring whatever follows it:
/// `"12abc"` is 12, `"1.5"` is 1, `"0x1f"` is 31, `"abc"` is `None`.
/// Leading whitespace and a single sign are accepted. Values outside `i64`
/// are dropped.
pub fn parse_int_prefix(token: &str) -> Option<i64> {
    let token = token.trim_start();
    let (negative, rest) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = i128::from_str_radix(&digits[..end], radix).ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).ok()
}

/// A gateway response: status plus JSON body (`Null` when the body is empty
/// or not JSON).
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub struct GatewayClient {
    client: Client,
    gateway_url: String,
}

impl GatewayClient {
    pub fn new(gateway_url: &str) -> Self {
        Self::with_client(Client::new(), gateway_url)
    }

    pub fn with_client(client: Client, gateway_url: &str) -> Self {
        Self {
            client,
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
        }
    }

    /// `POST /api/process`.
    pub async fn process(&self, request: &ProcessRequest) -> Result<GatewayResponse, reqwest::Error> {
        let res = self
            .client
            .post(format!("{}{}", self.gateway_url, PROCESS_PATH))
            .json(request)
            .send()
            .await?;
        read(res).await
    }

    /// `GET /api/rust-health`.
    pub async fn health(&self) -> Result<GatewayResponse, reqwest::Error> {
        let res = self
            .client
            .get(format!("{}{}", self.gateway_url, HEALTH_PATH))
            .send()
            .await?;
        read(res).await
    }

    /// `GET /api/rust-stats`.
    pub async fn stats(&self) -> Result<GatewayResponse, reqwest::Error> {
        let res = self
            .client
            .get(format!("{}{}", self.gateway_url, STATS_PATH))
            .send()
            .await?;
        read(res).await
    }
}

async fn read(res: reqwest::Response) -> Result<GatewayResponse, reqwest::Error> {
    let status = res.status();
    let bytes = res.bytes().await?;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Ok(GatewayResponse { status, body })
}
