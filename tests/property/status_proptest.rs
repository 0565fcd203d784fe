//! Property-based tests for status display helpers

use proptest::prelude::*;
use vpn_status::shared::ConnectionStatus;

fn name() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[A-Za-z][A-Za-z ]{0,15}")
}

proptest! {
    #[test]
    fn test_location_prefers_city_and_country(city in name(), country in name()) {
        let status = ConnectionStatus {
            connected: true,
            city: city.clone(),
            country: country.clone(),
            ..Default::default()
        };

        let expected = match (city, country) {
            (Some(city), Some(country)) => format!("{}, {}", city, country),
            (_, Some(country)) => country,
            _ => "Unknown".to_string(),
        };
        prop_assert_eq!(status.location(), expected);
    }

    #[test]
    fn test_details_hidden_iff_disconnected(connected in any::<bool>(), ip in name()) {
        let status = ConnectionStatus { connected, ip, ..Default::default() };
        prop_assert_eq!(status.detail_rows().is_some(), connected);
    }

    #[test]
    fn test_snapshot_survives_json(connected in any::<bool>(), ip in name(), server_type in name()) {
        let status = ConnectionStatus { connected, ip, server_type, ..Default::default() };
        let json = serde_json::to_string(&status).unwrap();
        let decoded: ConnectionStatus = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded, status);
    }
}
