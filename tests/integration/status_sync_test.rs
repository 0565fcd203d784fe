//! StatusSync: initial fetch, push updates, and their ordering

use crate::common::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use vpn_status::egui_app::{StatusSync, SubscriptionState};
use vpn_status::shared::BridgeError;

fn sync_over(bridge: &Arc<ScriptedBridge>) -> StatusSync<ScriptedBridge> {
    StatusSync::new(Arc::clone(bridge))
}

#[tokio::test]
async fn test_fetch_before_any_push_is_displayed() {
    let bridge = Arc::new(ScriptedBridge::new().respond_with(Ok(sweden())));
    let mut sync = sync_over(&bridge);
    sync.start();

    let view = sync.watch().wait_for(|v| !v.loading).await.unwrap().clone();
    assert_eq!(view.status, Some(sweden()));
    assert!(view.connected());
}

#[tokio::test]
async fn test_fetched_status_renders_country_as_location() {
    let bridge = Arc::new(ScriptedBridge::new().respond_with(Ok(sweden())));
    let mut sync = sync_over(&bridge);
    sync.start();
    sync.watch().wait_for(|v| !v.loading).await.unwrap();

    let status = sync.status().unwrap();
    assert!(status.connected);
    assert_eq!(status.ip.as_deref(), Some("1.2.3.4"));

    let rows = status.detail_rows().unwrap();
    let location = rows.iter().find(|r| r.label == "Location").unwrap();
    assert_eq!(location.value, "Sweden");
}

#[tokio::test]
async fn test_push_replaces_status_wholesale() {
    let bridge = Arc::new(ScriptedBridge::new().respond_with(Ok(denmark())));
    let mut sync = sync_over(&bridge);
    sync.start();
    let mut view = sync.watch();
    view.wait_for(|v| !v.loading && v.subscription == SubscriptionState::Open)
        .await
        .unwrap();

    // No field of the richer Denmark snapshot survives
    bridge.push(disconnected());
    view.wait_for(|v| v.pushes_applied == 1).await.unwrap();
    assert_eq!(sync.status(), Some(disconnected()));

    bridge.push(sweden());
    view.wait_for(|v| v.pushes_applied == 2).await.unwrap();
    assert_eq!(sync.status(), Some(sweden()));
}

#[tokio::test]
async fn test_slow_fetch_overwrites_earlier_push() {
    let bridge = Arc::new(ScriptedBridge::new());
    let respond = bridge.respond_later();
    let mut sync = sync_over(&bridge);
    sync.start();
    let mut view = sync.watch();

    view.wait_for(|v| v.subscription == SubscriptionState::Open)
        .await
        .unwrap();
    bridge.push(denmark());
    view.wait_for(|v| v.pushes_applied == 1).await.unwrap();
    assert_eq!(sync.status(), Some(denmark()));
    assert!(sync.is_loading());

    // The fetch result is older than the push, and still lands last
    respond.send(Ok(sweden())).unwrap();
    view.wait_for(|v| !v.loading).await.unwrap();
    assert_eq!(sync.status(), Some(sweden()));
}

#[tokio::test]
async fn test_failed_fetch_stops_loading_and_pushes_still_apply() {
    let bridge = Arc::new(
        ScriptedBridge::new().respond_with(Err(BridgeError::unavailable("Status not available yet"))),
    );
    let mut sync = sync_over(&bridge);
    sync.start();
    let mut view = sync.watch();

    view.wait_for(|v| !v.loading).await.unwrap();
    assert_eq!(sync.status(), None);

    view.wait_for(|v| v.subscription == SubscriptionState::Open)
        .await
        .unwrap();
    bridge.push(sweden());
    view.wait_for(|v| v.pushes_applied == 1).await.unwrap();
    assert_eq!(sync.status(), Some(sweden()));
}

#[tokio::test]
async fn test_fetch_result_after_stop_is_discarded() {
    let bridge = Arc::new(ScriptedBridge::new());
    let respond = bridge.respond_later();
    let mut sync = sync_over(&bridge);
    sync.start();

    sync.stop();
    respond.send(Ok(sweden())).unwrap();
    sync.join().await;

    let view = sync.view();
    assert_eq!(view.status, None);
    assert!(view.loading);
}

#[tokio::test]
async fn test_stop_before_subscription_opens_still_unsubscribes() {
    let bridge = Arc::new(ScriptedBridge::new().respond_with(Ok(sweden())));
    let release = bridge.hold_subscribe();
    let mut sync = sync_over(&bridge);
    sync.start();

    sync.stop();
    assert_eq!(bridge.unsubscribes(), 0);

    release.send(()).unwrap();
    sync.join().await;
    assert_eq!(bridge.unsubscribes(), 1);

    bridge.push(denmark());
    assert_eq!(sync.view().pushes_applied, 0);
}

#[tokio::test]
async fn test_producer_closing_channel_keeps_last_status() {
    let bridge = Arc::new(ScriptedBridge::new().respond_with(Ok(sweden())));
    let mut sync = sync_over(&bridge);
    sync.start();
    let mut view = sync.watch();
    view.wait_for(|v| !v.loading && v.subscription == SubscriptionState::Open)
        .await
        .unwrap();

    bridge.close_events();
    view.wait_for(|v| v.subscription == SubscriptionState::Closed)
        .await
        .unwrap();

    assert_eq!(sync.status(), Some(sweden()));
    assert_eq!(bridge.unsubscribes(), 1);
}

#[tokio::test]
async fn test_drop_releases_subscription() {
    let bridge = Arc::new(ScriptedBridge::new().respond_with(Ok(sweden())));
    let mut sync = sync_over(&bridge);
    sync.start();
    let mut view = sync.watch();
    view.wait_for(|v| v.subscription == SubscriptionState::Open)
        .await
        .unwrap();

    drop(sync);
    view.wait_for(|v| v.subscription == SubscriptionState::Closed)
        .await
        .unwrap();
    assert_eq!(bridge.unsubscribes(), 1);
}
