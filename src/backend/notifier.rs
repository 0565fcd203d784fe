//! Connectivity notifications
//!
//! The monitor announces every connectivity change through a [`Notifier`].
//! The desktop app shows them as OS notifications; tests record them.

use notify_rust::Notification;
use std::sync::Arc;

/// Title of every connectivity notification
pub const NOTIFICATION_TITLE: &str = "Mullvad Connection Status";

/// Sink for user-facing connectivity announcements.
///
/// Called from the polling task, so implementations must not block it.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, title: &str, body: &str);
}

impl<T: Notifier + ?Sized> Notifier for Box<T> {
    fn notify(&self, title: &str, body: &str) {
        (**self).notify(title, body)
    }
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, title: &str, body: &str) {
        (**self).notify(title, body)
    }
}

/// OS desktop notification (D-Bus on Linux, Notification Center on macOS)
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        let title = title.to_string();
        let body = body.to_string();
        let show = move || {
            if let Err(e) = Notification::new().summary(&title).body(&body).show() {
                tracing::warn!("[Notifier] Failed to show desktop notification: {}", e);
            }
        };

        // Showing waits on the notification service
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn_blocking(show);
            }
            Err(_) => show(),
        }
    }
}
