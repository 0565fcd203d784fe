//! OptimisticToggle over the autostart commands

use crate::common::*;
use assert_matches::assert_matches;
use std::sync::Arc;
use vpn_status::egui_app::{AutostartPreference, OptimisticToggle, ToggleError, ToggleOutcome};

type AutostartToggle = OptimisticToggle<AutostartPreference<ScriptedBridge>>;

async fn initialized(bridge: &Arc<ScriptedBridge>) -> AutostartToggle {
    let toggle = OptimisticToggle::new(AutostartPreference::new(Arc::clone(bridge)));
    toggle.initialize().await;
    toggle
}

#[tokio::test]
async fn test_rejected_write_keeps_value_held_before_call() {
    let bridge = Arc::new(ScriptedBridge::new().with_autostart(true));
    let toggle = initialized(&bridge).await;
    assert!(toggle.value());

    bridge.reject_next_write("permission denied");
    let outcome = toggle.toggle(true).await.unwrap();

    assert_matches!(outcome, ToggleOutcome::Reverted { .. });
    assert!(toggle.value());
    assert_eq!(bridge.writes(), vec![true]);
}

#[tokio::test]
async fn test_rejected_enable_ends_at_previous_value() {
    let bridge = Arc::new(ScriptedBridge::new());
    let toggle = initialized(&bridge).await;
    bridge.reject_next_write("permission denied");

    let release = bridge.hold_write();
    let write = toggle.begin(true).unwrap();
    assert!(toggle.value());

    let background = toggle.clone();
    let task = tokio::spawn(async move { background.complete(write).await });
    release.send(()).unwrap();
    task.await.unwrap();

    assert!(!toggle.value());
    assert!(!bridge.autostart());
}

#[tokio::test]
async fn test_each_toggle_issues_exactly_one_write() {
    let bridge = Arc::new(ScriptedBridge::new());
    let toggle = initialized(&bridge).await;

    toggle.toggle(true).await.unwrap();
    toggle.toggle(false).await.unwrap();
    toggle.toggle(true).await.unwrap();

    assert_eq!(bridge.writes(), vec![true, false, true]);
    assert!(bridge.autostart());
    assert!(toggle.value());
}

#[tokio::test]
async fn test_toggle_while_write_pending_is_rejected() {
    let bridge = Arc::new(ScriptedBridge::new());
    let toggle = initialized(&bridge).await;
    let release = bridge.hold_write();

    let first = toggle.begin(true).unwrap();
    assert_eq!(toggle.begin(false), Err(ToggleError::Busy));
    assert!(!toggle.state().interactive());

    let background = toggle.clone();
    let task = tokio::spawn(async move { background.complete(first).await });
    release.send(()).unwrap();
    assert_eq!(task.await.unwrap(), ToggleOutcome::Confirmed);

    assert!(toggle.state().interactive());
    assert_eq!(bridge.writes(), vec![true]);
}

#[tokio::test]
async fn test_unreadable_registry_defaults_to_off() {
    let bridge = Arc::new(ScriptedBridge::new().with_autostart(true).failing_reads());
    let toggle = initialized(&bridge).await;

    let state = toggle.state();
    assert!(!state.value);
    assert!(!state.loading);
}
