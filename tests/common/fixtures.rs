//! Status fixtures

use vpn_status::shared::ConnectionStatus;

/// Connected through Sweden, no city reported
pub fn sweden() -> ConnectionStatus {
    ConnectionStatus {
        connected: true,
        ip: Some("1.2.3.4".to_string()),
        country: Some("Sweden".to_string()),
        ..Default::default()
    }
}

pub fn denmark() -> ConnectionStatus {
    ConnectionStatus {
        connected: true,
        ip: Some("5.6.7.8".to_string()),
        country: Some("Denmark".to_string()),
        city: Some("Copenhagen".to_string()),
        hostname: Some("dk-cph-wg-001".to_string()),
        server_type: Some("wireguard".to_string()),
    }
}

pub fn disconnected() -> ConnectionStatus {
    ConnectionStatus {
        connected: false,
        ip: Some("9.9.9.9".to_string()),
        ..Default::default()
    }
}
