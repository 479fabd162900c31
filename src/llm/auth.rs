//! IBM Cloud IAM authentication
//!
//! watsonx.ai does not accept the API key directly; it is exchanged for a
//! short-lived bearer token which is cached until shortly before it expires.

use crate::types::{AppError, Result};
use parking_lot::Mutex;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

const APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Tokens are refreshed this long before the server-side expiry.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    refresh_at: Instant,
}

pub struct IamAuthenticator {
    client: Client,
    api_key: String,
    token_url: String,
    cached: Mutex<Option<CachedToken>>,
}

impl IamAuthenticator {
    pub fn new(client: Client, api_key: impl Into<String>, iam_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            token_url: format!("{}/identity/token", iam_url.trim_end_matches('/')),
            cached: Mutex::new(None),
        }
    }

    /// Return a valid bearer token, fetching a new one when needed.
    pub async fn token(&self) -> Result<String> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }

        let fresh = self.fetch_token().await?;
        let value = fresh.value.clone();
        *self.cached.lock() = Some(fresh);
        Ok(value)
    }

    fn cached_token(&self) -> Option<String> {
        self.cached
            .lock()
            .as_ref()
            .filter(|token| Instant::now() < token.refresh_at)
            .map(|token| token.value.clone())
    }

    async fn fetch_token(&self) -> Result<CachedToken> {
        info!(url = %self.token_url, "Requesting IAM access token");

        let response = self
            .client
            .post(&self.token_url)
            .header("Accept", "application/json")
            .form(&[("grant_type", APIKEY_GRANT_TYPE), ("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::LLM(format!("IAM token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::LLM(format!(
                "IAM authentication failed: HTTP {} - {}",
                status, error_text
            )));
        }

        let token: IamTokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::LLM(format!("Failed to parse IAM token response: {}", e)))?;

        debug!(expires_in = token.expires_in, "IAM access token received");

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(REFRESH_MARGIN);
        Ok(CachedToken {
            value: token.access_token,
            refresh_at: Instant::now() + lifetime,
        })
    }
}
