//! VPN status checker
//!
//! Asks a "am I connected" endpoint whether traffic currently leaves through a
//! Mullvad exit, and turns the answer into a `ConnectionStatus`.

use crate::backend::error::MonitorError;
use crate::shared::{AppConfig, ConnectionStatus};
use reqwest::Client;
use serde::Deserialize;

/// Response body of `am.i.mullvad.net/json`
#[derive(Debug, Deserialize)]
struct MullvadApiResponse {
    mullvad_exit_ip: bool,
    ip: Option<String>,
    country: Option<String>,
    city: Option<String>,
    mullvad_exit_ip_hostname: Option<String>,
    mullvad_server_type: Option<String>,
}

impl From<MullvadApiResponse> for ConnectionStatus {
    fn from(response: MullvadApiResponse) -> Self {
        Self {
            connected: response.mullvad_exit_ip,
            ip: response.ip,
            country: response.country,
            city: response.city,
            hostname: response.mullvad_exit_ip_hostname,
            server_type: response.mullvad_server_type,
        }
    }
}

/// HTTP client for the status endpoint
#[derive(Debug, Clone)]
pub struct StatusChecker {
    client: Client,
    url: String,
}

impl StatusChecker {
    pub fn new(config: &AppConfig) -> Result<Self, MonitorError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(MonitorError::Client)?;

        Ok(Self {
            client,
            url: config.status_api_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Query the endpoint once
    pub async fn check(&self) -> Result<ConnectionStatus, MonitorError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(MonitorError::Request)?;

        if !response.status().is_success() {
            return Err(MonitorError::Status(response.status()));
        }

        let body: MullvadApiResponse = response.json().await.map_err(MonitorError::Decode)?;
        Ok(body.into())
    }
}
