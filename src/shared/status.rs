/**
 * Connection Status Snapshot
 *
 * This module defines the VPN connection status exchanged between the status
 * producer and the desktop views. A status is always a complete snapshot:
 * consumers replace whatever they held with the latest one, they never merge.
 *
 * The optional fields (`ip`, `country`, `city`, `hostname`, `server_type`) are
 * only filled in by producers when `connected` is true. The type does not
 * enforce that, so the display helpers below fall back to "Unknown".
 */
use serde::{Deserialize, Serialize};

/// Placeholder shown for any detail the producer did not report.
pub const UNKNOWN: &str = "Unknown";

/// Last known state of the VPN connection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionStatus {
    /// Whether traffic is routed through the VPN
    pub connected: bool,
    /// Public exit IP address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Exit country
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Exit city
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Exit server hostname
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Tunnel protocol reported by the server (e.g. `wireguard`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_type: Option<String>,
}

/// One labelled line of the connection details card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

impl ConnectionStatus {
    /// Snapshot for "no VPN", with every detail absent
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn headline(&self) -> &'static str {
        if self.connected {
            "Connected"
        } else {
            "Disconnected"
        }
    }

    pub fn subtitle(&self) -> &'static str {
        if self.connected {
            "Your traffic is protected"
        } else {
            "No VPN connection detected"
        }
    }

    pub fn badge(&self) -> &'static str {
        if self.connected {
            "ACTIVE"
        } else {
            "INACTIVE"
        }
    }

    /// "City, Country" when both are known, otherwise whichever country is known.
    ///
    /// A city without a country is not shown on its own.
    pub fn location(&self) -> String {
        match (non_empty(&self.city), non_empty(&self.country)) {
            (Some(city), Some(country)) => format!("{}, {}", city, country),
            (_, Some(country)) => country.to_string(),
            _ => UNKNOWN.to_string(),
        }
    }

    /// Upper-cased protocol name, e.g. `WIREGUARD`
    pub fn protocol(&self) -> String {
        non_empty(&self.server_type)
            .map(|p| p.to_uppercase())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Rows for the connection details card.
    ///
    /// Returns `None` while disconnected: the card is hidden entirely rather
    /// than showing a column of "Unknown" values.
    pub fn detail_rows(&self) -> Option<Vec<DetailRow>> {
        if !self.connected {
            return None;
        }

        Some(vec![
            DetailRow {
                label: "IP Address",
                value: or_unknown(&self.ip),
            },
            DetailRow {
                label: "Location",
                value: self.location(),
            },
            DetailRow {
                label: "Server",
                value: or_unknown(&self.hostname),
            },
            DetailRow {
                label: "Protocol",
                value: self.protocol(),
            },
        ])
    }
}

/// Tooltip / window title for the current connectivity
pub fn tray_tooltip(connected: bool) -> &'static str {
    if connected {
        "Mullvad VPN: Connected"
    } else {
        "Mullvad VPN: Disconnected"
    }
}

/// Message announced when connectivity changes
pub fn notification_message(status: &ConnectionStatus) -> String {
    if status.connected {
        format!(
            "Connected to {} server",
            non_empty(&status.country).unwrap_or("Mullvad")
        )
    } else {
        "VPN connection lost".to_string()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn or_unknown(value: &Option<String>) -> String {
    non_empty(value).unwrap_or(UNKNOWN).to_string()
}
