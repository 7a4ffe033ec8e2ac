//! Form-encoded HTTP transport shared by vendor variants.

use std::collections::BTreeMap;
use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;

use crate::config::TransportSettings;
use crate::errors::SmsError;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one form-encoded POST per call, bounded by the configured timeout.
///
/// Never retries; a failed attempt is reported as a retryable
/// [`SmsError::Transport`].
#[derive(Clone, Debug)]
pub struct FormTransport {
    client: Client,
    provider: &'static str,
    timeout: Duration,
}

impl FormTransport {
    pub fn new(provider: &'static str, settings: &TransportSettings) -> Result<Self, SmsError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(SmsError::HttpClient)?;

        Ok(Self {
            client,
            provider,
            timeout: settings.timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST `params` as `application/x-www-form-urlencoded` to `endpoint`.
    pub async fn post_form(
        &self,
        endpoint: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<RawResponse, SmsError> {
        debug!(
            "{} POST {} with {} form params (timeout {:?})",
            self.provider,
            endpoint,
            params.len(),
            self.timeout
        );

        let response = self
            .client
            .post(endpoint)
            .form(params)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        Ok(RawResponse { status, body })
    }

    fn transport_error(&self, source: reqwest::Error) -> SmsError {
        let timed_out = source.is_timeout();
        warn!(
            "{} request failed (timed out: {}): {}",
            self.provider, timed_out, source
        );
        SmsError::Transport {
            provider: self.provider.to_string(),
            timed_out,
            source,
        }
    }
}
